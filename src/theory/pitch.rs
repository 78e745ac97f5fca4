//! Pitches, notes, and frequency resolution
//!
//! Frequencies come from a 7-note table anchored at octave 4 and scaled
//! by powers of two, with accidentals one equal-tempered semitone apart.

use serde::Serialize;
use std::fmt;

/// Frequencies of the natural notes C4..B4 in Hz
pub const NATURAL_FREQUENCIES: [f64; 7] = [261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88];

/// Semitone offset of each natural note from C
const NATURAL_SEMITONES: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Octave the base table is anchored at
pub const REFERENCE_OCTAVE: i32 = 4;

/// A pitch class (0 = C .. 11 = B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const A: PitchClass = PitchClass(9);

    /// Create a pitch class, wrapping into 0..12
    pub fn new(semitone: i32) -> Self {
        Self(semitone.rem_euclid(12) as u8)
    }

    /// Semitones above C
    pub fn semitone(self) -> u8 {
        self.0
    }

    /// Transpose by a number of semitones
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Spelling with sharps
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    /// Index into the natural table plus whether a sharp is applied
    fn natural_index(self) -> (usize, bool) {
        match NATURAL_SEMITONES.iter().position(|&s| s == self.0) {
            Some(idx) => (idx, false),
            None => {
                let below = NATURAL_SEMITONES
                    .iter()
                    .rposition(|&s| s < self.0)
                    .unwrap_or(0);
                (below, true)
            }
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a note letter with an optional accidental, returning semitones
/// relative to C in the same octave and the unparsed remainder
fn parse_letter(name: &str) -> Option<(i32, &str)> {
    let mut chars = name.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    let natural = match letter {
        'C' => 0,
        'D' => 1,
        'E' => 2,
        'F' => 3,
        'G' => 4,
        'A' => 5,
        'B' => 6,
        _ => return None,
    };
    let mut semitone = NATURAL_SEMITONES[natural] as i32;
    let mut rest = chars.as_str();
    if let Some(stripped) = rest.strip_prefix('#') {
        semitone += 1;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('b') {
        semitone -= 1;
        rest = stripped;
    }
    Some((semitone, rest))
}

/// A concrete pitch: pitch class plus octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    /// Concert A, used whenever a name cannot be resolved
    pub const A4: Pitch = Pitch {
        class: PitchClass::A,
        octave: 4,
    };

    /// Create a pitch
    pub fn new(class: PitchClass, octave: i32) -> Self {
        Self { class, octave }
    }

    /// Parse a name like `C4`, `F#3` or `Bb5`. The octave defaults to 4.
    pub fn parse(name: &str) -> Option<Self> {
        let (semitone, rest) = parse_letter(name.trim())?;
        let octave = if rest.is_empty() {
            REFERENCE_OCTAVE
        } else {
            rest.parse::<i32>().ok()?
        };
        // Cb and B# cross the octave boundary
        let absolute = octave.checked_mul(12)?.checked_add(semitone)?;
        Some(Self::new(
            PitchClass::new(absolute),
            absolute.div_euclid(12),
        ))
    }

    /// Parse a name, falling back to A4 when it is not a note
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::A4)
    }

    /// Frequency in Hz
    pub fn frequency(&self) -> f64 {
        let (idx, sharp) = self.class.natural_index();
        let mut hz = NATURAL_FREQUENCIES[idx];
        if sharp {
            hz *= 2.0_f64.powf(1.0 / 12.0);
        }
        hz * 2.0_f64.powi(self.octave - REFERENCE_OCTAVE)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.to_string()
    }
}

/// A note event in a phrase
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Note {
    pub pitch: Pitch,
    /// Length in beats
    pub duration: f64,
    /// Loudness 0.0-1.0
    pub velocity: f64,
}

impl Note {
    /// Create a note, clamping velocity to 0.0-1.0
    pub fn new(pitch: Pitch, duration: f64, velocity: f64) -> Self {
        Self {
            pitch,
            duration: duration.max(0.0),
            velocity: velocity.clamp(0.0, 1.0),
        }
    }

    /// Frequency of the note in Hz
    pub fn frequency(&self) -> f64 {
        self.pitch.frequency()
    }
}
