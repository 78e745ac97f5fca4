//! Harmonic voices
//!
//! Sustains each chord of the progression as an additive stack of its triad
//! tones, scaled by 1/N so the stack peaks no higher than a single tone.

use super::envelope::Adsr;
use super::oscillator::{Oscillator, Waveform};
use super::voice::{frames_per_beat, looped_spans, section_level, VoiceRenderer};
use crate::buffer::StereoSliceMut;
use crate::composition::{CompositionStructure, Section, CHORD_BEATS};

/// Chord pad renderer
#[derive(Debug, Clone)]
pub struct HarmonicVoice {
    name: &'static str,
    octave: i32,
    envelope: Adsr,
    gain: f64,
    right_gain: f64,
}

impl HarmonicVoice {
    pub fn piano() -> Self {
        Self {
            name: "piano",
            octave: 4,
            envelope: Adsr::NOTE,
            gain: 0.25,
            right_gain: 0.9,
        }
    }

    /// One octave below the piano, with a slow swell
    pub fn strings() -> Self {
        Self {
            name: "strings",
            octave: 3,
            envelope: Adsr::PAD,
            gain: 0.2,
            right_gain: 0.85,
        }
    }
}

impl VoiceRenderer for HarmonicVoice {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(
        &self,
        section: &Section,
        structure: &CompositionStructure,
        sample_rate: u32,
        out: &mut StereoSliceMut<'_>,
    ) {
        let fpb = frames_per_beat(structure, sample_rate);
        let sr = sample_rate as f64;
        let amp = section_level(section, structure) * self.gain;
        let chord_len = CHORD_BEATS * fpb;

        for span in looped_spans(&section.chords, |_| CHORD_BEATS, fpb, out.len()) {
            let voicing = span.item.voicing(&structure.key, self.octave);
            let scale = 1.0 / voicing.len() as f64;
            let mut oscillators: Vec<Oscillator> = voicing
                .iter()
                .map(|pitch| Oscillator::new(Waveform::Sine, pitch.frequency(), sr))
                .collect();

            for frame in span.start..span.end {
                let stack: f64 = oscillators.iter_mut().map(|osc| osc.generate()).sum();
                let env = self.envelope.level(span.position(frame, chord_len));
                let value = stack * scale * env * amp;
                out.add(frame, value, value * self.right_gain);
            }
        }
    }
}
