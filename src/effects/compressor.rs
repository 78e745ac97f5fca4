//! Hard-knee compressor, sample by sample

use serde::{Deserialize, Serialize};

use super::{ensure, Effect};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Compressor {
    /// Absolute level above which gain is reduced
    pub threshold: f64,
    /// Input:output ratio above the threshold
    pub ratio: f64,
}

impl Default for Compressor {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            ratio: 4.0,
        }
    }
}

impl Compressor {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.threshold > 0.0 && self.threshold <= 1.0,
            "compressor.threshold",
            "within (0, 1]",
            self.threshold,
        )?;
        ensure(
            self.ratio.is_finite() && self.ratio >= 1.0,
            "compressor.ratio",
            "at least 1",
            self.ratio,
        )
    }

    /// Compressed value of one sample. Sign is preserved.
    pub fn compress(&self, sample: f64) -> f64 {
        let magnitude = sample.abs();
        if magnitude <= self.threshold {
            sample
        } else {
            let reduced = self.threshold + (magnitude - self.threshold) / self.ratio;
            reduced.copysign(sample)
        }
    }
}

impl Effect for Compressor {
    fn name(&self) -> &'static str {
        "compressor"
    }

    fn process(&self, channel: &mut [f32], _sample_rate: u32) {
        for sample in channel.iter_mut() {
            *sample = self.compress(*sample as f64) as f32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_untouched() {
        let comp = Compressor::default();
        assert_eq!(comp.compress(0.3), 0.3);
        assert_eq!(comp.compress(-0.5), -0.5);
    }

    #[test]
    fn test_above_threshold_reduced() {
        let comp = Compressor::default();
        assert!((comp.compress(0.9) - 0.6).abs() < 1e-12);
        assert!((comp.compress(-0.9) + 0.6).abs() < 1e-12);
        assert!((comp.compress(2.5) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_process_channel() {
        let mut channel = vec![0.1, 0.9, -0.9];
        Compressor::default().process(&mut channel, 44100);
        assert_eq!(channel[0], 0.1);
        assert!((channel[1] - 0.6).abs() < 1e-6);
        assert!((channel[2] + 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_compressor_validation() {
        assert!(Compressor::default().validate().is_ok());
        assert!(Compressor {
            threshold: 0.0,
            ratio: 4.0
        }
        .validate()
        .is_err());
        assert!(Compressor {
            threshold: 0.5,
            ratio: 0.5
        }
        .validate()
        .is_err());
    }
}
