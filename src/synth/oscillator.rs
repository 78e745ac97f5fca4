//! Phase-accumulating oscillator
//!
//! Voices create one oscillator per partial and step it once per frame.
//! Frequency may change between samples (vibrato, pitch sweeps) without
//! phase discontinuities.

use std::f64::consts::PI;

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    /// Uniform white noise; frequency is ignored
    WhiteNoise,
}

/// Default noise seed. Any non-zero value works for xorshift.
const DEFAULT_NOISE_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// A single oscillator
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    /// Normalized phase in [0, 1)
    phase: f64,
    frequency: f64,
    sample_rate: f64,
    rng_state: u64,
}

impl Oscillator {
    /// Create a new oscillator starting at phase zero
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        Self {
            waveform,
            phase: 0.0,
            frequency,
            sample_rate,
            rng_state: DEFAULT_NOISE_SEED,
        }
    }

    /// Seed the noise generator. Same seed, same noise.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_state = seed.max(1);
        self
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Generate the next sample in [-1, 1]
    pub fn generate(&mut self) -> f64 {
        let sample = match self.waveform {
            Waveform::Sine => (self.phase * 2.0 * PI).sin(),
            Waveform::Square => {
                if self.phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::WhiteNoise => self.random(),
        };

        self.phase = (self.phase + self.frequency / self.sample_rate).fract();
        sample
    }

    /// Xorshift64
    fn random(&mut self) -> f64 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng_state = x;
        (x as f64 / u64::MAX as f64) * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_starts_at_zero() {
        let mut osc = Oscillator::new(Waveform::Sine, 440.0, 44100.0);
        assert!(osc.generate().abs() < 1e-12);
        assert!(osc.generate() > 0.0);
    }

    #[test]
    fn test_square_oscillator() {
        let mut osc = Oscillator::new(Waveform::Square, 1.0, 4.0);

        assert_eq!(osc.generate(), 1.0); // phase 0.0
        assert_eq!(osc.generate(), 1.0); // phase 0.25
        assert_eq!(osc.generate(), -1.0); // phase 0.5
        assert_eq!(osc.generate(), -1.0); // phase 0.75
        assert_eq!(osc.generate(), 1.0); // wrapped
    }

    #[test]
    fn test_frequency_change_keeps_phase() {
        let mut osc = Oscillator::new(Waveform::Square, 1.0, 4.0);
        osc.generate();
        osc.set_frequency(2.0);
        assert_eq!(osc.frequency(), 2.0);
        // phase was 0.25 when frequency changed, then 0.75, then 0.25 again
        assert_eq!(osc.generate(), 1.0);
        assert_eq!(osc.generate(), -1.0);
        assert_eq!(osc.generate(), 1.0);
    }

    #[test]
    fn test_white_noise_range_and_mean() {
        let mut osc = Oscillator::new(Waveform::WhiteNoise, 0.0, 44100.0);

        let mut sum = 0.0;
        for _ in 0..1000 {
            let sample = osc.generate();
            assert!((-1.0..=1.0).contains(&sample), "Sample out of range: {}", sample);
            sum += sample;
        }
        let mean = sum / 1000.0;
        assert!(mean.abs() < 0.1, "Mean too far from 0: {}", mean);
    }

    #[test]
    fn test_noise_seed_is_reproducible() {
        let mut a = Oscillator::new(Waveform::WhiteNoise, 0.0, 8000.0).with_seed(7);
        let mut b = Oscillator::new(Waveform::WhiteNoise, 0.0, 8000.0).with_seed(7);
        let mut c = Oscillator::new(Waveform::WhiteNoise, 0.0, 8000.0).with_seed(8);

        let xs: Vec<f64> = (0..16).map(|_| a.generate()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.generate()).collect();
        let zs: Vec<f64> = (0..16).map(|_| c.generate()).collect();
        assert_eq!(xs, ys);
        assert_ne!(xs, zs);
    }

    #[test]
    fn test_zero_seed_is_usable() {
        let mut osc = Oscillator::new(Waveform::WhiteNoise, 0.0, 8000.0).with_seed(0);
        assert_ne!(osc.generate(), osc.generate());
    }
}
