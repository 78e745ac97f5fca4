//! Bass voice: a square wave on each bass note

use super::envelope::Adsr;
use super::oscillator::{Oscillator, Waveform};
use super::voice::{frames_per_beat, looped_spans, section_level, VoiceRenderer};
use crate::buffer::StereoSliceMut;
use crate::composition::{CompositionStructure, Section};

/// 0.7 of the synth lead level
const BASS_GAIN: f64 = 0.3 * 0.7;
const RIGHT_GAIN: f64 = 0.95;

#[derive(Debug, Clone, Copy, Default)]
pub struct BassVoice;

impl BassVoice {
    pub fn new() -> Self {
        Self
    }
}

impl VoiceRenderer for BassVoice {
    fn name(&self) -> &'static str {
        "bass"
    }

    fn render(
        &self,
        section: &Section,
        structure: &CompositionStructure,
        sample_rate: u32,
        out: &mut StereoSliceMut<'_>,
    ) {
        let fpb = frames_per_beat(structure, sample_rate);
        let level = section_level(section, structure) * BASS_GAIN;
        let envelope = Adsr::NOTE;

        for span in looped_spans(&section.bass, |n| n.duration, fpb, out.len()) {
            let note = span.item;
            let note_len = note.duration * fpb;
            let amp = level * note.velocity;
            let mut osc = Oscillator::new(Waveform::Square, note.frequency(), sample_rate as f64);

            for frame in span.start..span.end {
                let value = osc.generate() * envelope.level(span.position(frame, note_len)) * amp;
                out.add(frame, value, value * RIGHT_GAIN);
            }
        }
    }
}
