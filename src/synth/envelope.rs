//! ADSR envelopes
//!
//! Offline rendering knows each note's length up front, so stage lengths are
//! fractions of the note rather than absolute times. `Adsr::level` maps a
//! position in the note (0.0 at onset, 1.0 at the end) to a gain.

/// Envelope stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    Sustain,
    Release,
    /// Past the end of the note
    Done,
}

/// Proportional attack-decay-sustain-release shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    /// Fraction of the note spent rising to full level
    pub attack: f64,
    /// Fraction spent falling to the sustain level
    pub decay: f64,
    /// Sustain level (0.0-1.0)
    pub sustain: f64,
    /// Trailing fraction spent fading to silence
    pub release: f64,
}

impl Adsr {
    /// 10% attack, 20% decay to 70%, 30% release
    pub const NOTE: Adsr = Adsr {
        attack: 0.1,
        decay: 0.2,
        sustain: 0.7,
        release: 0.3,
    };

    /// Slow swell used for bowed strings
    pub const PAD: Adsr = Adsr {
        attack: 0.3,
        decay: 0.2,
        sustain: 0.8,
        release: 0.3,
    };

    /// Create a shape, normalizing the stage fractions so they never exceed the note
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        let attack = attack.max(0.0);
        let decay = decay.max(0.0);
        let release = release.max(0.0);
        let total = attack + decay + release;
        let scale = if total > 1.0 { 1.0 / total } else { 1.0 };
        Self {
            attack: attack * scale,
            decay: decay * scale,
            sustain: sustain.clamp(0.0, 1.0),
            release: release * scale,
        }
    }

    /// Stage at a position within the note
    pub fn stage(&self, position: f64) -> EnvelopeStage {
        if !(0.0..1.0).contains(&position) {
            EnvelopeStage::Done
        } else if position < self.attack {
            EnvelopeStage::Attack
        } else if position < self.attack + self.decay {
            EnvelopeStage::Decay
        } else if position < 1.0 - self.release {
            EnvelopeStage::Sustain
        } else {
            EnvelopeStage::Release
        }
    }

    /// Gain at a position within the note
    pub fn level(&self, position: f64) -> f64 {
        match self.stage(position) {
            EnvelopeStage::Attack => position / self.attack,
            EnvelopeStage::Decay => {
                let t = (position - self.attack) / self.decay;
                1.0 - t * (1.0 - self.sustain)
            }
            EnvelopeStage::Sustain => self.sustain,
            EnvelopeStage::Release => {
                // Release starts from wherever the earlier stages left off
                let start = 1.0 - self.release;
                let from = self.level_before_release(start);
                from * (1.0 - position) / self.release
            }
            EnvelopeStage::Done => 0.0,
        }
    }

    fn level_before_release(&self, position: f64) -> f64 {
        if position < self.attack {
            position / self.attack
        } else if position < self.attack + self.decay {
            1.0 - (position - self.attack) / self.decay * (1.0 - self.sustain)
        } else {
            self.sustain
        }
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::NOTE
    }
}

/// Exponential decay `exp(-rate * t)` used for percussive hits
#[inline]
pub fn exp_decay(seconds: f64, rate: f64) -> f64 {
    (-rate * seconds).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_stages() {
        let env = Adsr::NOTE;
        assert_eq!(env.stage(0.0), EnvelopeStage::Attack);
        assert_eq!(env.stage(0.15), EnvelopeStage::Decay);
        assert_eq!(env.stage(0.5), EnvelopeStage::Sustain);
        assert_eq!(env.stage(0.8), EnvelopeStage::Release);
        assert_eq!(env.stage(1.0), EnvelopeStage::Done);
        assert_eq!(env.stage(-0.1), EnvelopeStage::Done);
    }

    #[test]
    fn test_note_levels() {
        let env = Adsr::NOTE;
        assert_eq!(env.level(0.0), 0.0);
        assert!((env.level(0.05) - 0.5).abs() < 1e-9);
        assert!((env.level(0.1) - 1.0).abs() < 1e-9);
        assert!((env.level(0.2) - 0.85).abs() < 1e-9);
        assert!((env.level(0.5) - 0.7).abs() < 1e-9);
        assert!((env.level(0.85) - 0.35).abs() < 1e-9);
        assert_eq!(env.level(1.0), 0.0);
    }

    #[test]
    fn test_envelope_is_continuous() {
        for env in [Adsr::NOTE, Adsr::PAD, Adsr::new(0.6, 0.3, 0.5, 0.4)] {
            let mut previous = env.level(0.0);
            for i in 1..1000 {
                let level = env.level(i as f64 / 1000.0);
                assert!((level - previous).abs() < 0.05, "jump at {}", i);
                assert!((0.0..=1.0).contains(&level));
                previous = level;
            }
        }
    }

    #[test]
    fn test_new_normalizes_overlong_stages() {
        let env = Adsr::new(0.6, 0.6, 2.0, 0.8);
        assert!((env.attack + env.decay + env.release - 1.0).abs() < 1e-9);
        assert_eq!(env.sustain, 1.0);
    }

    #[test]
    fn test_exp_decay() {
        assert_eq!(exp_decay(0.0, 20.0), 1.0);
        assert!(exp_decay(0.1, 20.0) < 0.14);
        assert!(exp_decay(0.05, 30.0) < exp_decay(0.05, 20.0));
    }
}
