//! Prompt analysis
//!
//! Extracts tempo, key, mood, style, and instrumentation from free text
//! using typed keyword tables.

mod analyzer;
pub mod rules;
mod types;

pub use analyzer::{
    explicit_tempo, tokenize, PromptAnalyzer, DEFAULT_INSTRUMENTS, DEFAULT_TEMPO, MAX_TEMPO,
    MIN_TEMPO,
};
pub use types::{Instrument, Mood, PromptAnalysis, Style};
