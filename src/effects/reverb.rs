//! Single-tap look-ahead reverb.
//!
//! Each sample gains a scaled copy of the sample `time_seconds` later in the
//! buffer. This reads the future, so it only works on a complete offline
//! buffer.

use serde::{Deserialize, Serialize};

use super::{ensure, Effect};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reverb {
    /// Offset of the reflected sample in seconds
    pub time_seconds: f64,
    /// Gain of the reflected sample
    pub amount: f64,
}

impl Default for Reverb {
    fn default() -> Self {
        Self {
            time_seconds: 0.5,
            amount: 0.3,
        }
    }
}

impl Reverb {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.time_seconds.is_finite() && self.time_seconds >= 0.0,
            "reverb.time_seconds",
            "a non-negative number",
            self.time_seconds,
        )?;
        ensure(
            (0.0..=1.0).contains(&self.amount),
            "reverb.amount",
            "within 0-1",
            self.amount,
        )
    }
}

impl Effect for Reverb {
    fn name(&self) -> &'static str {
        "reverb"
    }

    fn process(&self, channel: &mut [f32], sample_rate: u32) {
        let offset = (self.time_seconds * sample_rate as f64) as usize;
        if offset == 0 || offset >= channel.len() {
            return;
        }
        // Forward pass: channel[i + offset] is still dry when channel[i] reads it
        for i in 0..channel.len() - offset {
            channel[i] += (channel[i + offset] as f64 * self.amount) as f32;
        }
    }
}
