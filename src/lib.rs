//! Cadence - procedural music from text prompts
//!
//! Reads tempo, key, mood, style, and instrumentation out of a free-text
//! prompt, plans a five-section composition, renders it additively with
//! simple oscillator voices, runs a short effect chain, and exports 16-bit
//! stereo WAV.

pub mod analysis;
pub mod buffer;
pub mod composition;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod synth;
pub mod theory;

pub use analysis::{Instrument, Mood, PromptAnalysis, PromptAnalyzer, Style};
pub use buffer::AudioBuffer;
pub use composition::{CompositionStructure, Section, SectionKind};
pub use config::EngineConfig;
pub use effects::{EffectChain, EffectKind, EffectSettings};
pub use engine::{export_wav, Composition, Engine, GenerateOptions, Plan, WAV_MIME};
pub use error::{Error, Result};
