//! Feedback delay.
//!
//! A single tap applied in place from front to back, so earlier echoes feed
//! later ones.

use serde::{Deserialize, Serialize};

use super::{ensure, Effect};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Delay {
    /// Delay time in seconds
    pub time_seconds: f64,
    /// Gain of each repeat, below 1.0
    pub feedback: f64,
}

impl Default for Delay {
    fn default() -> Self {
        Self {
            time_seconds: 0.25,
            feedback: 0.4,
        }
    }
}

impl Delay {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.time_seconds.is_finite() && self.time_seconds >= 0.0,
            "delay.time_seconds",
            "a non-negative number",
            self.time_seconds,
        )?;
        ensure(
            (0.0..1.0).contains(&self.feedback),
            "delay.feedback",
            "at least 0 and below 1",
            self.feedback,
        )
    }
}

impl Effect for Delay {
    fn name(&self) -> &'static str {
        "delay"
    }

    fn process(&self, channel: &mut [f32], sample_rate: u32) {
        let offset = (self.time_seconds * sample_rate as f64) as usize;
        if offset == 0 {
            return;
        }
        for i in offset..channel.len() {
            channel[i] += (channel[i - offset] as f64 * self.feedback) as f32;
        }
    }
}
