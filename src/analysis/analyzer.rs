//! Prompt analyzer
//!
//! Turns free text into a fully populated `PromptAnalysis`. Unknown words are
//! ignored and every dimension has a default, so analysis never fails.

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use super::rules::{self, all_matches, first_match};
use super::types::{Instrument, Mood, PromptAnalysis, Style};
use crate::theory::Key;

/// Slowest tempo the analyzer will report
pub const MIN_TEMPO: u32 = 40;
/// Fastest tempo the analyzer will report
pub const MAX_TEMPO: u32 = 220;
pub const DEFAULT_TEMPO: u32 = 120;
pub const DEFAULT_INSTRUMENTS: [Instrument; 2] = [Instrument::Synth, Instrument::Drums];

const BPM_PATTERN: &str = r"(?i)([0-9]+)\s*bpm";

static BPM_REGEX: OnceLock<Regex> = OnceLock::new();

fn bpm_regex() -> &'static Regex {
    BPM_REGEX.get_or_init(|| Regex::new(BPM_PATTERN).expect("invalid regex pattern"))
}

/// Split text into lowercase words
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Find an explicit "<n> bpm" in the text, clamped to the supported range
pub fn explicit_tempo(text: &str) -> Option<u32> {
    let caps = bpm_regex().captures(text)?;
    // an ASCII digit run only fails to parse when it is too large
    let bpm: u64 = caps.get(1)?.as_str().parse().unwrap_or(u64::MAX);
    Some(bpm.clamp(MIN_TEMPO as u64, MAX_TEMPO as u64) as u32)
}

/// Keyword-table prompt analyzer
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptAnalyzer;

impl PromptAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Analyze a prompt with an optional style hint
    ///
    /// A hint naming a known style takes precedence over styles found in the
    /// text. Unknown hints are ignored.
    pub fn analyze(&self, prompt: &str, style_hint: Option<&str>) -> PromptAnalysis {
        let words = tokenize(prompt);

        let tempo = explicit_tempo(prompt)
            .or_else(|| first_match(rules::TEMPO_RULES, &words))
            .unwrap_or(DEFAULT_TEMPO);

        let key = first_match(rules::SCALE_RULES, &words).unwrap_or(Key::C_MAJOR);

        let mut instruments = all_matches(rules::INSTRUMENT_RULES, &words);
        if instruments.is_empty() {
            instruments = DEFAULT_INSTRUMENTS.to_vec();
        }

        let mood = first_match(rules::MOOD_RULES, &words).unwrap_or(Mood::Neutral);

        let hinted = style_hint.and_then(|hint| match hint.parse::<Style>() {
            Ok(style) => Some(style),
            Err(e) => {
                warn!("ignoring style hint: {}", e);
                None
            }
        });
        let style = hinted
            .or_else(|| first_match(rules::STYLE_RULES, &words))
            .unwrap_or(Style::Electronic);

        let analysis = PromptAnalysis {
            tempo,
            key,
            instruments,
            mood,
            style,
            energy: mood.energy(),
        };
        debug!(?analysis, "analyzed prompt");
        analysis
    }
}
