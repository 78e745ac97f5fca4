//! Post-processing effects
//!
//! Each effect transforms one channel in place. An `EffectChain` applies
//! effects to both channels of a finished buffer, strictly in the order they
//! were added. Effects do not commute.

mod chorus;
mod compressor;
mod delay;
mod distortion;
mod reverb;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};

pub use chorus::Chorus;
pub use compressor::Compressor;
pub use delay::Delay;
pub use distortion::Distortion;
pub use reverb::Reverb;

/// Trait for in-place effects
pub trait Effect: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Process one channel in place
    fn process(&self, channel: &mut [f32], sample_rate: u32);
}

/// Effect selector used by composition structures and configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Reverb,
    Delay,
    Compressor,
    Distortion,
    Chorus,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Reverb,
        EffectKind::Delay,
        EffectKind::Compressor,
        EffectKind::Distortion,
        EffectKind::Chorus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Reverb => "reverb",
            EffectKind::Delay => "delay",
            EffectKind::Compressor => "compressor",
            EffectKind::Distortion => "distortion",
            EffectKind::Chorus => "chorus",
        }
    }
}

impl FromStr for EffectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| Error::invalid_config(format!("unknown effect '{}'", s)))
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters for every effect
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub reverb: Reverb,
    pub delay: Delay,
    pub compressor: Compressor,
    pub distortion: Distortion,
    pub chorus: Chorus,
}

impl EffectSettings {
    /// Check every parameter range
    pub fn validate(&self) -> Result<()> {
        self.reverb.validate()?;
        self.delay.validate()?;
        self.compressor.validate()?;
        self.distortion.validate()?;
        self.chorus.validate()?;
        Ok(())
    }

    /// Configured effect for a kind
    pub fn effect(&self, kind: EffectKind) -> Box<dyn Effect> {
        match kind {
            EffectKind::Reverb => Box::new(self.reverb),
            EffectKind::Delay => Box::new(self.delay),
            EffectKind::Compressor => Box::new(self.compressor),
            EffectKind::Distortion => Box::new(self.distortion),
            EffectKind::Chorus => Box::new(self.chorus),
        }
    }
}

/// Fail with `InvalidConfiguration` unless `ok`
pub(crate) fn ensure(ok: bool, field: &str, expected: &str, value: f64) -> Result<()> {
    if ok {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "effects.{} must be {}, got {}",
            field, expected, value
        )))
    }
}

/// Ordered sequence of effects
#[derive(Default)]
pub struct EffectChain {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain of configured effects, in the given order
    pub fn from_kinds(kinds: &[EffectKind], settings: &EffectSettings) -> Self {
        Self {
            effects: kinds.iter().map(|&kind| settings.effect(kind)).collect(),
        }
    }

    /// Append an effect
    pub fn with<E: Effect + 'static>(mut self, effect: E) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effect names in application order
    pub fn names(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.name()).collect()
    }

    /// Apply every effect to both channels, in order
    pub fn apply(&self, buffer: &mut AudioBuffer) {
        let sample_rate = buffer.sample_rate();
        for effect in &self.effects {
            for channel in buffer.channels_mut() {
                effect.process(channel, sample_rate);
            }
        }
    }
}

impl fmt::Debug for EffectChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectChain")
            .field("effects", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transient() -> AudioBuffer {
        let mut left = vec![0.0f32; 64];
        left[10] = 0.9;
        left[11] = -0.9;
        AudioBuffer::from_channels(left.clone(), left, 8000)
    }

    #[test]
    fn test_effect_kind_parsing() {
        assert_eq!("Reverb".parse::<EffectKind>().unwrap(), EffectKind::Reverb);
        assert_eq!(" chorus ".parse::<EffectKind>().unwrap(), EffectKind::Chorus);
        assert!(matches!(
            "flanger".parse::<EffectKind>(),
            Err(Error::InvalidConfiguration(_))
        ));
        for kind in EffectKind::ALL {
            assert_eq!(kind.to_string().parse::<EffectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_effect_kind_serde() {
        let kinds: Vec<EffectKind> = serde_yaml::from_str("[reverb, distortion]").unwrap();
        assert_eq!(kinds, vec![EffectKind::Reverb, EffectKind::Distortion]);
    }

    #[test]
    fn test_chain_order_is_not_commutative() {
        let settings = EffectSettings::default();
        let mut a = transient();
        let mut b = transient();

        EffectChain::from_kinds(&[EffectKind::Distortion, EffectKind::Compressor], &settings)
            .apply(&mut a);
        EffectChain::from_kinds(&[EffectKind::Compressor, EffectKind::Distortion], &settings)
            .apply(&mut b);

        assert!((a.left()[10] - 0.5407).abs() < 1e-3);
        assert!((b.left()[10] - 0.5836).abs() < 1e-3);
        assert_ne!(a, b);
        // sign survives both orders
        assert!(a.left()[11] < 0.0 && b.left()[11] < 0.0);
    }

    #[test]
    fn test_empty_chain_is_identity() {
        let mut buffer = transient();
        let chain = EffectChain::new();
        assert!(chain.is_empty());
        chain.apply(&mut buffer);
        assert_eq!(buffer, transient());
    }

    #[test]
    fn test_chain_builder() {
        let chain = EffectChain::new()
            .with(Reverb::default())
            .with(Chorus::default());
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.names(), vec!["reverb", "chorus"]);
    }

    #[test]
    fn test_both_channels_processed() {
        let mut buffer = transient();
        EffectChain::new()
            .with(Distortion::default())
            .apply(&mut buffer);
        assert_eq!(buffer.left(), buffer.right());
        assert!(buffer.right()[10] < 0.9);
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(EffectSettings::default().validate().is_ok());

        let mut settings = EffectSettings::default();
        settings.delay.feedback = 1.0;
        assert!(matches!(
            settings.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }
}
