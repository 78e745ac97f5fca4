//! Composition planning
//!
//! A composition is a fixed sequence of sections, each carrying its own
//! chords, melody, bass line, and instrument list.

mod builder;
mod section;

pub use builder::{
    bars_for_duration, distribute_bars, effects_for, generate_bass, generate_melody,
    melody_velocity, progression, StructureBuilder, BASS_NOTES_PER_CHORD, CHORD_BEATS,
    DEFAULT_DURATION_SECS, MELODY_NOTES_PER_CHORD,
};
pub use section::{CompositionStructure, Section, SectionKind, TimeSignature};
