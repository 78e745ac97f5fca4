//! Roman-numeral chords

use super::pitch::{Pitch, PitchClass};
use super::scale::Key;
use serde::Serialize;
use std::fmt;

const NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// A chord written as a scale degree. Upper case is major, lower case minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct RomanNumeral {
    /// Scale degree 1-7
    pub degree: u8,
    pub minor: bool,
}

impl RomanNumeral {
    pub const fn major(degree: u8) -> Self {
        Self {
            degree,
            minor: false,
        }
    }

    pub const fn minor(degree: u8) -> Self {
        Self {
            degree,
            minor: true,
        }
    }

    /// Root pitch class in a key
    pub fn root(&self, key: &Key) -> PitchClass {
        key.degree(self.degree)
    }

    /// Triad voiced upward from the root in an octave
    pub fn voicing(&self, key: &Key, octave: i32) -> [Pitch; 3] {
        let root = self.root(key);
        let base = octave * 12 + root.semitone() as i32;
        let third = if self.minor { 3 } else { 4 };
        [base, base + third, base + 7]
            .map(|abs| Pitch::new(PitchClass::new(abs), abs.div_euclid(12)))
    }
}

impl fmt::Display for RomanNumeral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numeral = NUMERALS[(self.degree.clamp(1, 7) - 1) as usize];
        if self.minor {
            f.write_str(&numeral.to_ascii_lowercase())
        } else {
            f.write_str(numeral)
        }
    }
}

impl From<RomanNumeral> for String {
    fn from(numeral: RomanNumeral) -> Self {
        numeral.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_case() {
        assert_eq!(RomanNumeral::minor(2).to_string(), "ii");
        assert_eq!(RomanNumeral::major(4).to_string(), "IV");
    }

    #[test]
    fn test_roots_in_c_major() {
        let key = Key::C_MAJOR;
        assert_eq!(RomanNumeral::major(5).root(&key).name(), "G");
        assert_eq!(RomanNumeral::minor(6).root(&key).name(), "A");
    }

    #[test]
    fn test_voicing_thirds() {
        let key = Key::C_MAJOR;
        let names = RomanNumeral::major(1).voicing(&key, 4).map(|p| p.class.name());
        assert_eq!(names, ["C", "E", "G"]);

        let names = RomanNumeral::minor(6).voicing(&key, 3).map(|p| p.class.name());
        assert_eq!(names, ["A", "C", "E"]);
    }

    #[test]
    fn test_voicing_ascends() {
        let key = Key::C_MAJOR;
        let voicing = RomanNumeral::minor(6).voicing(&key, 4);
        assert_eq!(voicing.map(|p| p.to_string()), ["A4", "C5", "E5"]);
        assert!(voicing[0].frequency() < voicing[1].frequency());
    }
}
