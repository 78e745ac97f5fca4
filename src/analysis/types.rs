//! Musical parameters extracted from a prompt

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::theory::Key;

/// Overall feel of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Neutral,
    Happy,
    Sad,
    Epic,
    Mysterious,
    Romantic,
    Aggressive,
}

impl Mood {
    pub const ALL: [Mood; 7] = [
        Mood::Neutral,
        Mood::Happy,
        Mood::Sad,
        Mood::Epic,
        Mood::Mysterious,
        Mood::Romantic,
        Mood::Aggressive,
    ];

    /// Energy 0.0-1.0, used to scale every voice
    pub fn energy(self) -> f64 {
        match self {
            Mood::Neutral => 0.5,
            Mood::Happy => 0.8,
            Mood::Sad => 0.3,
            Mood::Epic => 0.9,
            Mood::Mysterious => 0.4,
            Mood::Romantic => 0.6,
            Mood::Aggressive => 0.9,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Epic => "epic",
            Mood::Mysterious => "mysterious",
            Mood::Romantic => "romantic",
            Mood::Aggressive => "aggressive",
        }
    }
}

/// Production style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Electronic,
    Synthwave,
    Cyberpunk,
    Ambient,
    Rock,
    Jazz,
    Classical,
    Pop,
}

impl Style {
    pub const ALL: [Style; 8] = [
        Style::Electronic,
        Style::Synthwave,
        Style::Cyberpunk,
        Style::Ambient,
        Style::Rock,
        Style::Jazz,
        Style::Classical,
        Style::Pop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Style::Electronic => "electronic",
            Style::Synthwave => "synthwave",
            Style::Cyberpunk => "cyberpunk",
            Style::Ambient => "ambient",
            Style::Rock => "rock",
            Style::Jazz => "jazz",
            Style::Classical => "classical",
            Style::Pop => "pop",
        }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Style::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| Error::invalid_config(format!("unknown style '{}'", s)))
    }
}

/// Instruments the engine knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Synth,
    Drums,
    Bass,
    Piano,
    Guitar,
    Strings,
    Brass,
}

impl Instrument {
    pub const ALL: [Instrument; 7] = [
        Instrument::Synth,
        Instrument::Drums,
        Instrument::Bass,
        Instrument::Piano,
        Instrument::Guitar,
        Instrument::Strings,
        Instrument::Brass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Synth => "synth",
            Instrument::Drums => "drums",
            Instrument::Bass => "bass",
            Instrument::Piano => "piano",
            Instrument::Guitar => "guitar",
            Instrument::Strings => "strings",
            Instrument::Brass => "brass",
        }
    }
}

impl FromStr for Instrument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Instrument::ALL
            .into_iter()
            .find(|inst| inst.name() == wanted)
            .ok_or_else(|| Error::invalid_config(format!("unknown instrument '{}'", s)))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of analyzing a prompt. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptAnalysis {
    /// Beats per minute (40-220)
    pub tempo: u32,
    pub key: Key,
    /// Never empty, no duplicates
    pub instruments: Vec<Instrument>,
    pub mood: Mood,
    pub style: Style,
    /// Mood energy 0.0-1.0
    pub energy: f64,
}

impl PromptAnalysis {
    pub fn has_instrument(&self, instrument: Instrument) -> bool {
        self.instruments.contains(&instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_from_str() {
        assert_eq!("Piano".parse::<Instrument>().unwrap(), Instrument::Piano);
        assert_eq!(" drums ".parse::<Instrument>().unwrap(), Instrument::Drums);

        let err = "kazoo".parse::<Instrument>().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("synthwave".parse::<Style>().unwrap(), Style::Synthwave);
        assert!("polka".parse::<Style>().is_err());
    }

    #[test]
    fn test_mood_energy_in_range() {
        for mood in Mood::ALL {
            let energy = mood.energy();
            assert!((0.0..=1.0).contains(&energy), "{} energy {}", mood, energy);
        }
    }

    #[test]
    fn test_serde_names() {
        let yaml = serde_yaml::to_string(&Instrument::Strings).unwrap();
        assert_eq!(yaml.trim(), "strings");

        let mood: Mood = serde_yaml::from_str("mysterious").unwrap();
        assert_eq!(mood, Mood::Mysterious);
    }
}
