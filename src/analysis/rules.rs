//! Keyword rule tables
//!
//! Each dimension is an ordered list of rules. Single-valued dimensions take
//! the first rule that matches; the instrument dimension collects every match.
//! Keywords are matched against whole lowercase words, Spanish and English.

use super::types::{Instrument, Mood, Style};
use crate::theory::{Key, Mode, PitchClass};

/// A set of trigger words and the value they select
#[derive(Debug, Clone, Copy)]
pub struct Rule<T> {
    pub keywords: &'static [&'static str],
    pub value: T,
}

impl<T: Copy> Rule<T> {
    /// Check whether any keyword appears among the words
    pub fn matches(&self, words: &[String]) -> bool {
        words.iter().any(|w| self.keywords.contains(&w.as_str()))
    }
}

/// Return the value of the first matching rule
pub fn first_match<T: Copy>(rules: &[Rule<T>], words: &[String]) -> Option<T> {
    rules.iter().find(|rule| rule.matches(words)).map(|rule| rule.value)
}

/// Return the values of every matching rule, in table order
pub fn all_matches<T: Copy>(rules: &[Rule<T>], words: &[String]) -> Vec<T> {
    rules
        .iter()
        .filter(|rule| rule.matches(words))
        .map(|rule| rule.value)
        .collect()
}

pub const TEMPO_RULES: &[Rule<u32>] = &[
    Rule {
        keywords: &["ultra", "extremo", "extreme"],
        value: 180,
    },
    Rule {
        keywords: &["épico", "epico", "epic", "grandioso", "majestic"],
        value: 160,
    },
    Rule {
        keywords: &["rápido", "rapido", "fast", "energético", "energetico", "energetic"],
        value: 140,
    },
    Rule {
        keywords: &["lento", "slow", "calm", "relajante"],
        value: 80,
    },
];

pub const SCALE_RULES: &[Rule<Key>] = &[
    Rule {
        keywords: &["pentatónica", "pentatonica", "pentatonic", "blues"],
        value: Key {
            root: PitchClass::A,
            mode: Mode::Pentatonic,
        },
    },
    Rule {
        keywords: &["dórico", "dorico", "dorian", "misterioso", "mysterious"],
        value: Key {
            root: PitchClass::D,
            mode: Mode::Dorian,
        },
    },
    Rule {
        keywords: &["menor", "minor", "triste", "sad", "melancólico", "melancolico"],
        value: Key {
            root: PitchClass::A,
            mode: Mode::Minor,
        },
    },
    Rule {
        keywords: &["mayor", "major"],
        value: Key::C_MAJOR,
    },
];

pub const INSTRUMENT_RULES: &[Rule<Instrument>] = &[
    Rule {
        keywords: &["piano", "teclado", "keyboard"],
        value: Instrument::Piano,
    },
    Rule {
        keywords: &["guitarra", "guitar", "acoustic", "acústica", "electric", "eléctrica"],
        value: Instrument::Guitar,
    },
    Rule {
        keywords: &["batería", "bateria", "drums", "percusión", "percussion", "beat"],
        value: Instrument::Drums,
    },
    Rule {
        keywords: &["bajo", "bass", "bassline"],
        value: Instrument::Bass,
    },
    Rule {
        keywords: &[
            "sintetizador",
            "synth",
            "sintético",
            "synthetic",
            "electronic",
            "electrónico",
        ],
        value: Instrument::Synth,
    },
    Rule {
        keywords: &["cuerdas", "strings", "violín", "violin", "cello", "viola"],
        value: Instrument::Strings,
    },
    Rule {
        keywords: &["vientos", "brass", "trompeta", "trumpet", "saxofón", "saxophone"],
        value: Instrument::Brass,
    },
];

pub const MOOD_RULES: &[Rule<Mood>] = &[
    Rule {
        keywords: &["alegre", "happy", "feliz", "joyful", "upbeat", "energético"],
        value: Mood::Happy,
    },
    Rule {
        keywords: &["triste", "sad", "melancólico", "melancholic", "nostálgico", "nostalgic"],
        value: Mood::Sad,
    },
    Rule {
        keywords: &["épico", "epico", "epic", "grandioso", "majestic", "heroic", "heroico"],
        value: Mood::Epic,
    },
    Rule {
        keywords: &["misterioso", "mysterious", "oscuro", "dark", "siniestro", "eerie"],
        value: Mood::Mysterious,
    },
    Rule {
        keywords: &[
            "romántico",
            "romantico",
            "romantic",
            "amor",
            "love",
            "pasional",
            "passionate",
        ],
        value: Mood::Romantic,
    },
    Rule {
        keywords: &["agresivo", "aggressive", "intenso", "intense", "fuerte", "strong"],
        value: Mood::Aggressive,
    },
];

pub const STYLE_RULES: &[Rule<Style>] = &[
    Rule {
        keywords: &["synthwave", "retro", "80s", "nostálgico", "nostalgic"],
        value: Style::Synthwave,
    },
    Rule {
        keywords: &["cyberpunk", "futurista", "futuristic", "digital", "tech"],
        value: Style::Cyberpunk,
    },
    Rule {
        keywords: &["ambient", "ambiental", "atmosférico", "atmospheric", "espacial", "space"],
        value: Style::Ambient,
    },
    Rule {
        keywords: &["rock", "guitar", "guitarra", "energético", "energetic"],
        value: Style::Rock,
    },
    Rule {
        keywords: &["jazz", "blues", "improvisación", "improvisation"],
        value: Style::Jazz,
    },
    Rule {
        keywords: &["clásico", "clasico", "classical", "orquestal", "orchestral", "sinfónico"],
        value: Style::Classical,
    },
    Rule {
        keywords: &["pop", "comercial", "commercial", "mainstream"],
        value: Style::Pop,
    },
    Rule {
        keywords: &["electronic", "electrónico", "electrónica", "dance", "techno", "house"],
        value: Style::Electronic,
    },
];
