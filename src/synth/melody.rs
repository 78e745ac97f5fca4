//! Melodic voices
//!
//! Plays the section melody one note at a time. The synth lead adds a slow
//! vibrato line on top of a pure sine; guitar and brass swap the sine for a
//! stack of harmonic partials.

use super::envelope::Adsr;
use super::lfo::Lfo;
use super::oscillator::{Oscillator, Waveform};
use super::voice::{frames_per_beat, looped_spans, section_level, VoiceRenderer};
use crate::buffer::StereoSliceMut;
use crate::composition::{CompositionStructure, Section};

const VIBRATO_RATE_HZ: f64 = 0.5;
const VIBRATO_DEPTH: f64 = 0.1;
const VIBRATO_WEIGHT: f64 = 0.5;

/// Monophonic melody renderer
#[derive(Debug, Clone)]
pub struct MelodyVoice {
    name: &'static str,
    /// Relative amplitude of harmonics 1, 2, 3, ...
    partials: &'static [f64],
    /// Octaves added to every note
    octave_shift: i32,
    vibrato: bool,
    gain: f64,
    right_gain: f64,
    envelope: Adsr,
}

impl MelodyVoice {
    /// Sine lead with vibrato
    pub fn synth() -> Self {
        Self {
            name: "synth",
            partials: &[1.0],
            octave_shift: 0,
            vibrato: true,
            gain: 0.3,
            right_gain: 0.8,
            envelope: Adsr::NOTE,
        }
    }

    /// Plucked harmonics an octave below the melody
    pub fn guitar() -> Self {
        Self {
            name: "guitar",
            partials: &[1.0, 0.5, 0.3],
            octave_shift: -1,
            vibrato: false,
            gain: 0.25,
            right_gain: 0.85,
            envelope: Adsr::NOTE,
        }
    }

    /// Bright, harmonic-rich stack
    pub fn brass() -> Self {
        Self {
            name: "brass",
            partials: &[1.0, 0.8, 0.6, 0.45, 0.3, 0.2],
            octave_shift: -1,
            vibrato: false,
            gain: 0.2,
            right_gain: 0.9,
            envelope: Adsr::NOTE,
        }
    }

    fn partial_sum(&self) -> f64 {
        self.partials.iter().sum()
    }
}

impl VoiceRenderer for MelodyVoice {
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
        let level = section_level(section, structure) * self.gain;
        let norm = 1.0 / self.partial_sum();
        let transpose = 2f64.powi(self.octave_shift);
        let mut lfo = Lfo::new(VIBRATO_RATE_HZ, sr).with_depth(VIBRATO_DEPTH);

        for span in looped_spans(&section.melody, |n| n.duration, fpb, out.len()) {
            let note = span.item;
            let freq = note.frequency() * transpose;
            let note_len = note.duration * fpb;
            let amp = level * note.velocity;

            let mut partials: Vec<(Oscillator, f64)> = self
                .partials
                .iter()
                .enumerate()
                .map(|(k, &w)| (Oscillator::new(Waveform::Sine, freq * (k + 1) as f64, sr), w))
                .collect();
            let mut vibrato = Oscillator::new(Waveform::Sine, freq, sr);

            for frame in span.start..span.end {
                let env = self.envelope.level(span.position(frame, note_len));
                let mut sample: f64 = partials
                    .iter_mut()
                    .map(|(osc, w)| osc.generate() * *w)
                    .sum::<f64>()
                    * norm;

                if self.vibrato {
                    vibrato.set_frequency(freq * (1.0 + lfo.process()));
                    sample += vibrato.generate() * VIBRATO_WEIGHT;
                }

                let value = sample * env * amp;
                out.add(frame, value, value * self.right_gain);
            }
        }
    }
}
