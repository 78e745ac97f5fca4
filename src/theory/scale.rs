//! Modes and keys

use super::pitch::{Pitch, PitchClass};
use serde::Serialize;
use std::fmt;

/// Scale mode (intervals in semitones from the root)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Major,
    Minor,
    Dorian,
    /// Minor pentatonic (root, m3, P4, P5, m7)
    Pentatonic,
}

impl Mode {
    /// Scale tones used for melodies
    pub fn intervals(self) -> &'static [u8] {
        match self {
            Mode::Major => &[0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Mode::Dorian => &[0, 2, 3, 5, 7, 9, 10],
            Mode::Pentatonic => &[0, 3, 5, 7, 10],
        }
    }

    /// Seven-note parent scale that roman-numeral degrees are read from
    pub fn diatonic_intervals(self) -> &'static [u8] {
        match self {
            Mode::Pentatonic => Mode::Minor.intervals(),
            other => other.intervals(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Major => "major",
            Mode::Minor => "minor",
            Mode::Dorian => "dorian",
            Mode::Pentatonic => "pentatonic",
        }
    }
}

/// A key: root pitch class plus mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Key {
    pub root: PitchClass,
    pub mode: Mode,
}

impl Key {
    pub const C_MAJOR: Key = Key {
        root: PitchClass::C,
        mode: Mode::Major,
    };

    /// Create a key
    pub fn new(root: PitchClass, mode: Mode) -> Self {
        Self { root, mode }
    }

    /// Pitch classes of the scale, starting at the root
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        self.mode
            .intervals()
            .iter()
            .map(|&i| self.root.transpose(i as i32))
            .collect()
    }

    /// Pitch class of a 1-based diatonic degree, wrapping past 7
    pub fn degree(&self, degree: u8) -> PitchClass {
        let intervals = self.mode.diatonic_intervals();
        let idx = (degree.max(1) as usize - 1) % intervals.len();
        self.root.transpose(intervals[idx] as i32)
    }

    /// A scale tone by index in a given octave; the octave is counted from the root
    pub fn tone(&self, index: usize, octave: i32) -> Pitch {
        let intervals = self.mode.intervals();
        let semis = self.root.semitone() as i32 + intervals[index % intervals.len()] as i32;
        Pitch::new(PitchClass::new(semis), octave + semis.div_euclid(12))
    }
}

impl Default for Key {
    fn default() -> Self {
        Self::C_MAJOR
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.mode.name())
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}
