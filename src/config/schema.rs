//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::effects::EffectSettings;
use crate::error::{Error, Result};

/// Lowest supported output sample rate in Hz
pub const MIN_SAMPLE_RATE: u32 = 8_000;
/// Highest supported output sample rate in Hz
pub const MAX_SAMPLE_RATE: u32 = 192_000;
/// Upper limit for `generation.max_duration_seconds`
pub const DURATION_LIMIT_SECS: f64 = 3_600.0;

/// Main configuration for the engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Generation defaults
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Master output stage
    #[serde(default)]
    pub master: MasterConfig,

    /// Effect parameters
    #[serde(default)]
    pub effects: EffectSettings,
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        check_sample_rate(self.audio.sample_rate)?;

        let max = self.generation.max_duration_seconds;
        if !max.is_finite() || max <= 0.0 || max > DURATION_LIMIT_SECS {
            return Err(Error::invalid_config(format!(
                "generation.max_duration_seconds must be in (0, {}], got {}",
                DURATION_LIMIT_SECS, max
            )));
        }
        check_duration(self.generation.duration_seconds, max)?;

        if let Some(style) = &self.generation.style {
            style.parse::<crate::analysis::Style>()?;
        }

        if !(0.0..=1.0).contains(&self.master.volume) {
            return Err(Error::invalid_config(format!(
                "master.volume must be between 0.0 and 1.0, got {}",
                self.master.volume
            )));
        }

        self.effects.validate()
    }
}

/// Reject sample rates outside the supported range
pub fn check_sample_rate(rate: u32) -> Result<()> {
    if (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
        Ok(())
    } else {
        Err(Error::UnsupportedSampleRate {
            rate,
            min: MIN_SAMPLE_RATE,
            max: MAX_SAMPLE_RATE,
        })
    }
}

/// Reject non-finite, non-positive, or overlong durations
pub fn check_duration(seconds: f64, max_seconds: f64) -> Result<()> {
    if seconds.is_finite() && seconds > 0.0 && seconds <= max_seconds {
        Ok(())
    } else {
        Err(Error::InvalidDuration { seconds })
    }
}

/// Audio output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
        }
    }
}

fn default_sample_rate() -> u32 {
    44100
}

/// Defaults applied to every generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Target length in seconds (default: 30)
    #[serde(default = "default_duration")]
    pub duration_seconds: f64,

    /// Longest accepted request in seconds (default: 600)
    #[serde(default = "default_max_duration")]
    pub max_duration_seconds: f64,

    /// Fixed RNG seed; unset means fresh randomness per request
    #[serde(default)]
    pub seed: Option<u64>,

    /// Style hint applied when a request names none
    #[serde(default)]
    pub style: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            duration_seconds: default_duration(),
            max_duration_seconds: default_max_duration(),
            seed: None,
            style: None,
        }
    }
}

fn default_duration() -> f64 {
    crate::composition::DEFAULT_DURATION_SECS
}
fn default_max_duration() -> f64 {
    600.0
}

/// Master output stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterConfig {
    /// Master volume 0.0-1.0 (default: 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for MasterConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

fn default_volume() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.generation.duration_seconds, 30.0);
        assert_eq!(config.generation.max_duration_seconds, 600.0);
        assert_eq!(config.master.volume, 1.0);
    }

    #[test]
    fn test_sample_rate_bounds() {
        assert!(check_sample_rate(8000).is_ok());
        assert!(check_sample_rate(192_000).is_ok());
        assert!(matches!(
            check_sample_rate(4000),
            Err(Error::UnsupportedSampleRate { rate: 4000, .. })
        ));

        let mut config = EngineConfig::default();
        config.audio.sample_rate = 400_000;
        assert!(matches!(
            config.validate(),
            Err(Error::UnsupportedSampleRate { .. })
        ));
    }

    #[test]
    fn test_duration_bounds() {
        assert!(check_duration(10.0, 600.0).is_ok());
        for bad in [0.0, -1.0, 601.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                check_duration(bad, 600.0),
                Err(Error::InvalidDuration { .. })
            ));
        }
    }

    #[test]
    fn test_max_duration_is_limited() {
        let mut config = EngineConfig::default();
        config.generation.max_duration_seconds = DURATION_LIMIT_SECS;
        assert!(config.validate().is_ok());

        for bad in [1e12, DURATION_LIMIT_SECS + 1.0, 0.0, f64::INFINITY] {
            config.generation.max_duration_seconds = bad;
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_invalid_volume_and_style() {
        let mut config = EngineConfig::default();
        config.master.volume = 1.5;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let mut config = EngineConfig::default();
        config.generation.style = Some("polka".to_string());
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: EngineConfig = serde_yaml::from_str(
            "effects:\n  delay:\n    feedback: 0.6\n",
        )
        .unwrap();
        assert_eq!(config.effects.delay.feedback, 0.6);
        assert_eq!(config.effects.delay.time_seconds, 0.25);
        assert_eq!(config.effects.reverb.amount, 0.3);
        assert_eq!(config.audio.sample_rate, 44100);
    }
}
