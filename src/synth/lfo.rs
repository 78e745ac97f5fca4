//! Low Frequency Oscillator for modulation
//!
//! Drives melody vibrato and the chorus delay sweep.

use std::f64::consts::PI;

/// Sine Low Frequency Oscillator
#[derive(Debug, Clone)]
pub struct Lfo {
    frequency: f64,
    phase: f64,
    sample_rate: f64,
    /// Depth of modulation (0.0 to 1.0)
    depth: f64,
}

impl Lfo {
    /// Create a full-depth sine LFO
    pub fn new(frequency: f64, sample_rate: f64) -> Self {
        Self {
            frequency: frequency.clamp(0.01, 100.0),
            phase: 0.0,
            sample_rate,
            depth: 1.0,
        }
    }

    /// Set modulation depth (0.0 to 1.0)
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth.clamp(0.0, 1.0);
        self
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Generate next sample (-depth to depth)
    pub fn process(&mut self) -> f64 {
        let raw = (self.phase * 2.0 * PI).sin();
        self.phase = (self.phase + self.frequency / self.sample_rate).fract();
        raw * self.depth
    }
}
