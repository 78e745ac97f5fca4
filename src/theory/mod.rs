//! Music theory primitives
//!
//! Pitch spelling and frequency lookup, modes and keys, and roman-numeral
//! chords. Everything here is plain immutable data.

mod chord;
mod pitch;
mod scale;

pub use chord::RomanNumeral;
pub use pitch::{Note, Pitch, PitchClass, NATURAL_FREQUENCIES, REFERENCE_OCTAVE};
pub use scale::{Key, Mode};
