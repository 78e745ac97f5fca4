//! Drum voice
//!
//! A two-piece kit on a fixed backbeat: kick on beats 1 and 3, snare on 2
//! and 4 of every bar.

use super::envelope::exp_decay;
use super::oscillator::{Oscillator, Waveform};
use super::voice::{frames_per_beat, VoiceRenderer};
use crate::buffer::StereoSliceMut;
use crate::composition::{CompositionStructure, Section};

const KICK_SECONDS: f64 = 0.1;
const KICK_FREQ: f64 = 60.0;
const KICK_SWEEP_RATE: f64 = 10.0;
const KICK_DECAY_RATE: f64 = 20.0;
const KICK_GAIN: f64 = 0.8;

const SNARE_SECONDS: f64 = 0.05;
const SNARE_DECAY_RATE: f64 = 30.0;
const SNARE_GAIN: f64 = 0.6;
const SNARE_RIGHT_GAIN: f64 = 0.9;

const NOISE_SEED: u64 = 0x5EED_D2A5;

/// Kick and snare pattern
#[derive(Debug, Clone, Copy, Default)]
pub struct DrumVoice;

/// Which drum plays on a beat within the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Kick,
    Snare,
}

impl DrumVoice {
    pub fn new() -> Self {
        Self
    }

    /// Hit for a zero-based beat index in 4/4
    pub fn hit_for_beat(beat: u32, beats_per_bar: u32) -> Option<Hit> {
        match beat % beats_per_bar.max(1) {
            0 | 2 => Some(Hit::Kick),
            1 | 3 => Some(Hit::Snare),
            _ => None,
        }
    }

    fn kick(start: usize, level: f64, sr: f64, out: &mut StereoSliceMut<'_>) {
        let frames = (KICK_SECONDS * sr) as usize;
        let mut osc = Oscillator::new(Waveform::Sine, KICK_FREQ, sr);
        for i in 0..frames {
            let t = i as f64 / sr;
            osc.set_frequency(KICK_FREQ * exp_decay(t, KICK_SWEEP_RATE));
            let value = osc.generate() * exp_decay(t, KICK_DECAY_RATE) * level * KICK_GAIN;
            out.add(start + i, value, value);
        }
    }

    fn snare(
        start: usize,
        level: f64,
        sr: f64,
        noise: &mut Oscillator,
        out: &mut StereoSliceMut<'_>,
    ) {
        let frames = (SNARE_SECONDS * sr) as usize;
        for i in 0..frames {
            let t = i as f64 / sr;
            let value = noise.generate() * exp_decay(t, SNARE_DECAY_RATE) * level * SNARE_GAIN;
            out.add(start + i, value, value * SNARE_RIGHT_GAIN);
        }
    }
}

impl VoiceRenderer for DrumVoice {
    fn name(&self) -> &'static str {
        "drums"
    }

    fn render(
        &self,
        section: &Section,
        structure: &CompositionStructure,
        sample_rate: u32,
        out: &mut StereoSliceMut<'_>,
    ) {
        let sr = sample_rate as f64;
        let fpb = frames_per_beat(structure, sample_rate);
        let beats_per_bar = structure.time_signature.beats_per_bar;
        let mut noise = Oscillator::new(Waveform::WhiteNoise, 0.0, sr).with_seed(NOISE_SEED);

        for beat in 0..section.beats(structure.time_signature) {
            let start = (beat as f64 * fpb).floor() as usize;
            if start >= out.len() {
                break;
            }
            match Self::hit_for_beat(beat, beats_per_bar) {
                Some(Hit::Kick) => Self::kick(start, section.intensity, sr, out),
                Some(Hit::Snare) => Self::snare(start, section.intensity, sr, &mut noise, out),
                None => {}
            }
        }
    }
}
