//! Chorus.
//!
//! Mixes in a copy of the dry signal delayed by a time that sweeps between
//! zero and twice `depth_seconds` under a sine LFO.

use serde::{Deserialize, Serialize};

use super::{ensure, Effect};
use crate::error::Result;
use crate::synth::Lfo;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chorus {
    /// LFO rate in Hz
    pub rate_hz: f64,
    /// Sweep depth, also the centre delay, in seconds
    pub depth_seconds: f64,
    /// Level of the delayed copy
    pub mix: f64,
}

impl Default for Chorus {
    fn default() -> Self {
        Self {
            rate_hz: 0.5,
            depth_seconds: 0.01,
            mix: 0.3,
        }
    }
}

impl Chorus {
    pub fn validate(&self) -> Result<()> {
        ensure(
            self.rate_hz > 0.0 && self.rate_hz <= 20.0,
            "chorus.rate_hz",
            "within (0, 20]",
            self.rate_hz,
        )?;
        ensure(
            (0.0..=0.1).contains(&self.depth_seconds),
            "chorus.depth_seconds",
            "within 0-0.1",
            self.depth_seconds,
        )?;
        ensure(
            (0.0..=1.0).contains(&self.mix),
            "chorus.mix",
            "within 0-1",
            self.mix,
        )
    }
}

impl Effect for Chorus {
    fn name(&self) -> &'static str {
        "chorus"
    }

    fn process(&self, channel: &mut [f32], sample_rate: u32) {
        let depth = self.depth_seconds * sample_rate as f64;
        if depth <= 0.0 || channel.is_empty() {
            return;
        }
        let dry = channel.to_vec();
        let mut lfo = Lfo::new(self.rate_hz, sample_rate as f64);

        for (i, sample) in channel.iter_mut().enumerate() {
            let offset = (depth * (1.0 + lfo.process())).floor() as usize;
            if i >= offset {
                *sample += (dry[i - offset] as f64 * self.mix) as f32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chorus_adds_delayed_copy() {
        let mut channel = vec![0.0f32; 2000];
        channel[0] = 1.0;
        Chorus::default().process(&mut channel, 8000);

        // the impulse stays dry, then reappears once about 80 samples later
        assert!((channel[0] - 1.0).abs() < 1e-6);
        let echoes: Vec<usize> = (1..channel.len()).filter(|&i| channel[i] != 0.0).collect();
        assert!(!echoes.is_empty());
        assert!(echoes.iter().all(|&i| (80..=84).contains(&i)));
        assert!((channel[echoes[0]] - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_chorus_zero_depth_is_identity() {
        let chorus = Chorus {
            depth_seconds: 0.0,
            ..Chorus::default()
        };
        let mut channel = vec![0.25f32; 16];
        chorus.process(&mut channel, 8000);
        assert_eq!(channel, vec![0.25f32; 16]);
    }

    #[test]
    fn test_chorus_validation() {
        assert!(Chorus::default().validate().is_ok());
        assert!(Chorus {
            mix: 2.0,
            ..Chorus::default()
        }
        .validate()
        .is_err());
    }
}
