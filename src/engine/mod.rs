//! Generation engine
//!
//! Runs the full pipeline for one prompt: analysis, structure, per-section
//! rendering, effects, and the master stage. The engine holds only immutable
//! configuration, so one instance can serve concurrent requests.

#[cfg(feature = "playback")]
pub mod player;
pub mod wav;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::analysis::{Instrument, PromptAnalysis, PromptAnalyzer};
use crate::buffer::AudioBuffer;
use crate::composition::{CompositionStructure, StructureBuilder};
use crate::config::{check_duration, check_sample_rate, EngineConfig};
use crate::effects::{EffectChain, EffectKind};
use crate::error::{Error, Result};
use crate::synth::VoiceBank;

#[cfg(feature = "playback")]
pub use player::Player;
pub use wav::{encode_wav, export_wav, save_wav, WAV_MIME};

/// Per-request overrides. Unset fields fall back to the engine configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Target length in seconds
    pub duration_seconds: Option<f64>,
    /// Style hint; overrides style keywords in the prompt
    pub style: Option<String>,
    /// RNG seed for reproducible output
    pub seed: Option<u64>,
    /// Fixed effect chain instead of the mood/style selection
    pub effects: Option<Vec<EffectKind>>,
    /// Fixed instrument set instead of the one found in the prompt
    pub instruments: Option<Vec<Instrument>>,
}

impl GenerateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn effects(mut self, effects: Vec<EffectKind>) -> Self {
        self.effects = Some(effects);
        self
    }

    pub fn instruments(mut self, instruments: Vec<Instrument>) -> Self {
        self.instruments = Some(instruments);
        self
    }
}

/// A rendered piece
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub prompt: String,
    pub analysis: PromptAnalysis,
    pub structure: CompositionStructure,
    #[serde(skip)]
    pub buffer: AudioBuffer,
    pub sample_rate: u32,
    pub duration_seconds: f64,
    /// Seed the melody was generated with, if one was given
    pub seed: Option<u64>,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at_millis: u64,
}

impl Composition {
    /// Number of frames in the rendered buffer
    pub fn frame_count(&self) -> usize {
        self.buffer.frames()
    }

    /// Export file name: `<prompt slug>_<unix millis>.wav`
    pub fn suggested_filename(&self) -> String {
        format!("{}_{}.wav", slugify(&self.prompt), self.created_at_millis)
    }
}

/// A planned but unrendered piece
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub analysis: PromptAnalysis,
    pub structure: CompositionStructure,
    pub seed: Option<u64>,
}

const MAX_SLUG_LEN: usize = 40;

/// Lowercase words joined by underscores, at most `MAX_SLUG_LEN` characters
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for word in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        let extra = word.chars().count() + usize::from(!slug.is_empty());
        if slug.chars().count() + extra > MAX_SLUG_LEN {
            break;
        }
        if !slug.is_empty() {
            slug.push('_');
        }
        slug.push_str(&word);
    }
    if slug.is_empty() {
        slug.push_str("composition");
    }
    slug
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// The prompt-to-audio engine
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    analyzer: PromptAnalyzer,
    voices: VoiceBank,
}

impl Engine {
    /// Create an engine with the standard voices. Fails if the configuration is invalid.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            analyzer: PromptAnalyzer::new(),
            voices: VoiceBank::standard(),
        })
    }

    /// Replace the voice bank
    pub fn with_voices(mut self, voices: VoiceBank) -> Self {
        self.voices = voices;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.audio.sample_rate
    }

    /// Analyze a prompt without planning or rendering
    pub fn analyze(&self, prompt: &str, style: Option<&str>) -> PromptAnalysis {
        self.analyzer
            .analyze(prompt, style.or(self.config.generation.style.as_deref()))
    }

    /// Analyze and plan a prompt without rendering it
    pub fn plan(&self, prompt: &str, options: &GenerateOptions) -> Result<Plan> {
        let (analysis, structure, seed) = self.prepare(prompt, options)?;
        Ok(Plan {
            analysis,
            structure,
            seed,
        })
    }

    /// Render a prompt to audio.
    ///
    /// Any prompt text is accepted; only invalid options fail.
    pub fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<Composition> {
        let sample_rate = self.sample_rate();
        check_sample_rate(sample_rate)?;
        let (analysis, structure, seed) = self.prepare(prompt, options)?;

        let mut buffer = AudioBuffer::new(structure.frame_count(sample_rate), sample_rate);
        let ranges = structure.section_ranges(sample_rate);
        for (section, mut view) in structure
            .sections
            .iter()
            .zip(buffer.split_ranges_mut(&ranges))
        {
            self.voices
                .render_section(section, &structure, sample_rate, &mut view)?;
        }

        let chain = EffectChain::from_kinds(&structure.effects, &self.config.effects);
        chain.apply(&mut buffer);
        buffer.apply_gain(self.config.master.volume);

        let clipped = buffer.clipped_samples();
        if clipped > 0 {
            warn!(clipped, peak = buffer.peak(), "samples exceed full scale and will be clamped");
        }

        info!(
            tempo = structure.tempo,
            key = %structure.key,
            mood = %structure.mood,
            frames = buffer.frames(),
            effects = ?chain.names(),
            seed = ?seed,
            "generated composition"
        );

        Ok(Composition {
            prompt: prompt.to_string(),
            analysis,
            duration_seconds: buffer.duration_secs(),
            structure,
            buffer,
            sample_rate,
            seed,
            created_at_millis: now_millis(),
        })
    }

    fn prepare(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<(PromptAnalysis, CompositionStructure, Option<u64>)> {
        let generation = &self.config.generation;
        let duration = options
            .duration_seconds
            .unwrap_or(generation.duration_seconds);
        check_duration(duration, generation.max_duration_seconds)?;

        let mut analysis = self.analyze(prompt, options.style.as_deref());
        if let Some(instruments) = &options.instruments {
            analysis.instruments = dedup(instruments);
            if analysis.instruments.is_empty() {
                return Err(Error::invalid_config("instrument override is empty"));
            }
        }

        let mut builder = StructureBuilder::new(duration);
        if let Some(effects) = &options.effects {
            builder = builder.with_effects(effects.clone());
        }

        let seed = options.seed.or(generation.seed);
        let mut rng = match seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_entropy(),
        };
        let structure = builder.build(&analysis, &mut rng)?;
        Ok((analysis, structure, seed))
    }
}

fn dedup(instruments: &[Instrument]) -> Vec<Instrument> {
    let mut unique = Vec::with_capacity(instruments.len());
    for &instrument in instruments {
        if !unique.contains(&instrument) {
            unique.push(instrument);
        }
    }
    unique
}
