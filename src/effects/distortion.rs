//! Soft-clipping distortion: `tanh(x * drive) * output`

use serde::{Deserialize, Serialize};

use super::{ensure, Effect};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Distortion {
    /// Input gain before the tanh curve
    pub drive: f64,
    /// Output gain after the curve
    pub output: f64,
}

impl Default for Distortion {
    fn default() -> Self {
        Self {
            drive: 2.0,
            output: 0.7,
        }
    }
}

impl Distortion {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.drive.is_finite() && self.drive > 0.0,
            "distortion.drive",
            "positive",
            self.drive,
        )?;
        ensure(
            (0.0..=1.0).contains(&self.output),
            "distortion.output",
            "within 0-1",
            self.output,
        )
    }

    pub fn shape(&self, sample: f64) -> f64 {
        (sample * self.drive).tanh() * self.output
    }
}

impl Effect for Distortion {
    fn name(&self) -> &'static str {
        "distortion"
    }

    fn process(&self, channel: &mut [f32], _sample_rate: u32) {
        for sample in channel.iter_mut() {
            *sample = self.shape(*sample as f64) as f32;
        }
    }
}
