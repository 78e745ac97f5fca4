//! Structure builder
//!
//! Lays out the fixed five-section form for a target duration and fills each
//! section with a mood-driven chord progression, a random melody over the key,
//! and a root-note bass line.

use rand::Rng;
use tracing::debug;

use super::section::{CompositionStructure, Section, SectionKind, TimeSignature};
use crate::analysis::{Mood, PromptAnalysis, Style};
use crate::effects::EffectKind;
use crate::error::{Error, Result};
use crate::theory::{Key, Note, Pitch, RomanNumeral};

/// Default length of a generated piece in seconds
pub const DEFAULT_DURATION_SECS: f64 = 30.0;

/// Beats each chord of a progression lasts
pub const CHORD_BEATS: f64 = 2.0;
/// Melody notes generated per chord
pub const MELODY_NOTES_PER_CHORD: usize = 4;
/// Bass notes generated per chord
pub const BASS_NOTES_PER_CHORD: usize = 2;

const MELODY_NOTE_BEATS: f64 = CHORD_BEATS / MELODY_NOTES_PER_CHORD as f64;
const BASS_NOTE_BEATS: f64 = CHORD_BEATS / BASS_NOTES_PER_CHORD as f64;
const BASS_VELOCITY: f64 = 0.8;
const BASS_OCTAVE: i32 = 2;
const MELODY_OCTAVES: std::ops::RangeInclusive<i32> = 4..=5;

/// Chord progression for a mood
pub fn progression(mood: Mood) -> [RomanNumeral; 4] {
    use RomanNumeral as R;
    match mood {
        Mood::Happy => [R::major(1), R::major(5), R::minor(6), R::major(4)],
        Mood::Sad => [R::minor(1), R::major(7), R::major(6), R::major(7)],
        Mood::Epic => [R::major(1), R::minor(6), R::major(4), R::major(5)],
        Mood::Mysterious => [R::minor(1), R::major(7), R::minor(1), R::major(7)],
        Mood::Romantic => [R::major(1), R::minor(3), R::minor(6), R::major(4)],
        Mood::Aggressive => [R::minor(1), R::major(6), R::major(3), R::major(7)],
        Mood::Neutral => [R::major(1), R::major(4), R::major(5), R::major(1)],
    }
}

/// Melody velocity for a mood
pub fn melody_velocity(mood: Mood) -> f64 {
    match mood {
        Mood::Happy => 0.8,
        Mood::Sad => 0.4,
        Mood::Epic => 1.0,
        Mood::Mysterious => 0.6,
        Mood::Romantic => 0.6,
        Mood::Aggressive => 0.9,
        Mood::Neutral => 0.7,
    }
}

/// Effect chain for a mood and style. Mood rules are checked before style rules.
pub fn effects_for(mood: Mood, style: Style) -> Vec<EffectKind> {
    use EffectKind::*;
    match (mood, style) {
        (Mood::Mysterious, _) => vec![Reverb, Delay],
        (Mood::Epic, _) => vec![Compressor, Distortion],
        (Mood::Aggressive, _) => vec![Distortion, Compressor],
        (_, Style::Synthwave) => vec![Reverb, Chorus],
        (_, Style::Ambient) => vec![Reverb, Delay],
        (_, Style::Cyberpunk) => vec![Chorus, Distortion],
        _ => Vec::new(),
    }
}

/// Number of whole bars closest to a duration, never less than one.
/// `None` when the count does not fit in a `u32`.
pub fn bars_for_duration(
    duration_secs: f64,
    tempo: u32,
    time_signature: TimeSignature,
) -> Option<u32> {
    let bar_secs = time_signature.beats_per_bar as f64 * 60.0 / tempo as f64;
    let bars = (duration_secs / bar_secs).round();
    if !bars.is_finite() || bars > u32::MAX as f64 {
        return None;
    }
    Some((bars as u32).max(1))
}

/// Split `total` bars across weights with the largest-remainder method.
/// The result always sums to `total`; ties go to the earlier section.
pub fn distribute_bars(total: u32, weights: &[u32]) -> Vec<u32> {
    let weight_sum: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if weight_sum == 0 {
        return vec![0; weights.len()];
    }

    // u64 products cannot overflow for u32 inputs
    let total = u64::from(total);
    let mut bars: Vec<u64> = weights
        .iter()
        .map(|&w| total * u64::from(w) / weight_sum)
        .collect();
    let mut remainders: Vec<(usize, u64)> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| (i, total * u64::from(w) % weight_sum))
        .collect();
    remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let assigned: u64 = bars.iter().sum();
    for &(idx, _) in remainders.iter().take((total - assigned) as usize) {
        bars[idx] += 1;
    }
    // each share is at most `total`, which came from a u32
    bars.into_iter().map(|b| b as u32).collect()
}

/// Generate a melody: random scale tones for each chord
pub fn generate_melody<R: Rng>(
    chords: &[RomanNumeral],
    key: &Key,
    mood: Mood,
    rng: &mut R,
) -> Vec<Note> {
    let scale_len = key.mode.intervals().len();
    let velocity = melody_velocity(mood);
    let mut melody = Vec::with_capacity(chords.len() * MELODY_NOTES_PER_CHORD);

    for _ in chords {
        for _ in 0..MELODY_NOTES_PER_CHORD {
            let index = rng.gen_range(0..scale_len);
            let octave = rng.gen_range(MELODY_OCTAVES);
            melody.push(Note::new(key.tone(index, octave), MELODY_NOTE_BEATS, velocity));
        }
    }
    melody
}

/// Generate a bass line: the chord root, twice per chord
pub fn generate_bass(chords: &[RomanNumeral], key: &Key) -> Vec<Note> {
    chords
        .iter()
        .flat_map(|chord| {
            let pitch = Pitch::new(chord.root(key), BASS_OCTAVE);
            std::iter::repeat(Note::new(pitch, BASS_NOTE_BEATS, BASS_VELOCITY))
                .take(BASS_NOTES_PER_CHORD)
        })
        .collect()
}

/// Builds a `CompositionStructure` from an analysis
#[derive(Debug, Clone)]
pub struct StructureBuilder {
    duration_secs: f64,
    effects: Option<Vec<EffectKind>>,
}

impl StructureBuilder {
    /// Create a builder for a target duration in seconds
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration_secs,
            effects: None,
        }
    }

    /// Use a fixed effect chain instead of the mood/style selection
    pub fn with_effects(mut self, effects: Vec<EffectKind>) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Build the structure. Fails only for a non-positive, non-finite, or
    /// unrepresentably long duration.
    pub fn build<R: Rng>(
        &self,
        analysis: &PromptAnalysis,
        rng: &mut R,
    ) -> Result<CompositionStructure> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(Error::InvalidDuration {
                seconds: self.duration_secs,
            });
        }

        let time_signature = TimeSignature::COMMON;
        let total_bars = bars_for_duration(self.duration_secs, analysis.tempo, time_signature)
            .ok_or(Error::InvalidDuration {
                seconds: self.duration_secs,
            })?;
        let weights: Vec<u32> = SectionKind::TEMPLATE.iter().map(|k| k.weight()).collect();
        let bars = distribute_bars(total_bars, &weights);

        let chords = progression(analysis.mood).to_vec();
        let sections = SectionKind::TEMPLATE
            .iter()
            .zip(bars)
            .map(|(&kind, bars)| Section {
                kind,
                bars,
                intensity: kind.intensity(),
                instruments: kind.instruments(&analysis.instruments),
                chords: chords.clone(),
                melody: generate_melody(&chords, &analysis.key, analysis.mood, rng),
                bass: generate_bass(&chords, &analysis.key),
            })
            .collect::<Vec<_>>();

        let effects = self
            .effects
            .clone()
            .unwrap_or_else(|| effects_for(analysis.mood, analysis.style));

        debug!(
            total_bars,
            sections = sections.len(),
            ?effects,
            "built composition structure"
        );

        Ok(CompositionStructure {
            tempo: analysis.tempo,
            time_signature,
            key: analysis.key,
            mood: analysis.mood,
            energy: analysis.energy,
            sections,
            effects,
        })
    }
}

impl Default for StructureBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}
