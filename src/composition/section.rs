//! Sections and the composition structure

use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::analysis::{Instrument, Mood};
use crate::effects::EffectKind;
use crate::theory::{Key, Note, RomanNumeral};

/// Time signature. Compositions are always in 4/4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSignature {
    pub beats_per_bar: u32,
    pub beat_unit: u32,
}

impl TimeSignature {
    pub const COMMON: TimeSignature = TimeSignature {
        beats_per_bar: 4,
        beat_unit: 4,
    };
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats_per_bar, self.beat_unit)
    }
}

/// Position of a section in the song form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
}

impl SectionKind {
    /// The fixed song form, in order
    pub const TEMPLATE: [SectionKind; 5] = [
        SectionKind::Intro,
        SectionKind::Verse,
        SectionKind::Chorus,
        SectionKind::Bridge,
        SectionKind::Outro,
    ];

    /// Share of the total length, in units
    pub fn weight(self) -> u32 {
        match self {
            SectionKind::Verse => 2,
            _ => 1,
        }
    }

    /// Loudness scale 0.0-1.0
    pub fn intensity(self) -> f64 {
        match self {
            SectionKind::Intro => 0.3,
            SectionKind::Verse => 0.7,
            SectionKind::Chorus => 1.0,
            SectionKind::Bridge => 0.5,
            SectionKind::Outro => 0.2,
        }
    }

    /// Instruments playing in this section, derived from the base set
    pub fn instruments(self, base: &[Instrument]) -> Vec<Instrument> {
        match self {
            SectionKind::Intro | SectionKind::Outro => base
                .iter()
                .copied()
                .filter(|&i| i != Instrument::Drums)
                .collect(),
            SectionKind::Verse => base.to_vec(),
            // Extra synth layer on top of whatever is already there
            SectionKind::Chorus => {
                let mut layers = base.to_vec();
                layers.push(Instrument::Synth);
                layers
            }
            SectionKind::Bridge => base
                .iter()
                .copied()
                .filter(|&i| i != Instrument::Bass)
                .collect(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Intro => "intro",
            SectionKind::Verse => "verse",
            SectionKind::Chorus => "chorus",
            SectionKind::Bridge => "bridge",
            SectionKind::Outro => "outro",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One section of a composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    /// Length in bars (may be zero for very short pieces)
    pub bars: u32,
    pub intensity: f64,
    pub instruments: Vec<Instrument>,
    pub chords: Vec<RomanNumeral>,
    pub melody: Vec<Note>,
    pub bass: Vec<Note>,
}

impl Section {
    /// Length in beats
    pub fn beats(&self, time_signature: TimeSignature) -> u32 {
        self.bars * time_signature.beats_per_bar
    }

    pub fn is_empty(&self) -> bool {
        self.bars == 0
    }
}

/// A fully planned composition. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionStructure {
    pub tempo: u32,
    pub time_signature: TimeSignature,
    pub key: Key,
    pub mood: Mood,
    pub energy: f64,
    pub sections: Vec<Section>,
    /// Post-processing passes, in order
    pub effects: Vec<EffectKind>,
}

impl CompositionStructure {
    /// Seconds per beat
    pub fn beat_seconds(&self) -> f64 {
        60.0 / self.tempo as f64
    }

    pub fn total_bars(&self) -> u32 {
        self.sections.iter().map(|s| s.bars).sum()
    }

    pub fn total_beats(&self) -> u32 {
        self.total_bars() * self.time_signature.beats_per_bar
    }

    pub fn duration_seconds(&self) -> f64 {
        self.total_beats() as f64 * self.beat_seconds()
    }

    /// Frame index at which a beat starts
    pub fn beat_to_frame(&self, beat: f64, sample_rate: u32) -> usize {
        (beat * 60.0 * sample_rate as f64 / self.tempo as f64).floor() as usize
    }

    /// Total number of frames the rendered buffer needs
    pub fn frame_count(&self, sample_rate: u32) -> usize {
        self.beat_to_frame(self.total_beats() as f64, sample_rate)
    }

    /// Frame range of every section, contiguous and in order
    pub fn section_ranges(&self, sample_rate: u32) -> Vec<Range<usize>> {
        let mut ranges = Vec::with_capacity(self.sections.len());
        let mut beat = 0u32;
        for section in &self.sections {
            let start = self.beat_to_frame(beat as f64, sample_rate);
            beat += section.beats(self.time_signature);
            let end = self.beat_to_frame(beat as f64, sample_rate);
            ranges.push(start..end);
        }
        ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: SectionKind, bars: u32) -> Section {
        Section {
            kind,
            bars,
            intensity: kind.intensity(),
            instruments: vec![],
            chords: vec![],
            melody: vec![],
            bass: vec![],
        }
    }

    fn structure(tempo: u32, bars: &[u32]) -> CompositionStructure {
        CompositionStructure {
            tempo,
            time_signature: TimeSignature::COMMON,
            key: Key::C_MAJOR,
            mood: Mood::Neutral,
            energy: 0.5,
            sections: SectionKind::TEMPLATE
                .iter()
                .zip(bars)
                .map(|(&kind, &b)| section(kind, b))
                .collect(),
            effects: vec![],
        }
    }

    #[test]
    fn test_section_instrument_rules() {
        let base = [Instrument::Synth, Instrument::Drums, Instrument::Bass];

        assert_eq!(
            SectionKind::Intro.instruments(&base),
            vec![Instrument::Synth, Instrument::Bass]
        );
        assert_eq!(SectionKind::Verse.instruments(&base), base.to_vec());
        assert_eq!(
            SectionKind::Chorus.instruments(&base),
            vec![
                Instrument::Synth,
                Instrument::Drums,
                Instrument::Bass,
                Instrument::Synth
            ]
        );
        assert_eq!(
            SectionKind::Bridge.instruments(&base),
            vec![Instrument::Synth, Instrument::Drums]
        );
        assert!(!SectionKind::Outro
            .instruments(&base)
            .contains(&Instrument::Drums));
    }

    #[test]
    fn test_durations() {
        let s = structure(120, &[1, 2, 1, 1, 1]);
        assert_eq!(s.total_bars(), 6);
        assert_eq!(s.total_beats(), 24);
        assert_eq!(s.beat_seconds(), 0.5);
        assert_eq!(s.duration_seconds(), 12.0);
        assert_eq!(s.frame_count(44100), 529_200);
    }

    #[test]
    fn test_section_ranges_are_contiguous() {
        let s = structure(97, &[2, 3, 0, 1, 2]);
        let ranges = s.section_ranges(44100);

        assert_eq!(ranges.len(), 5);
        assert_eq!(ranges[0].start, 0);
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(ranges[4].end, s.frame_count(44100));
        // zero-bar chorus has an empty range
        assert!(ranges[2].is_empty());
    }

    #[test]
    fn test_time_signature_display() {
        assert_eq!(TimeSignature::COMMON.to_string(), "4/4");
    }
}
