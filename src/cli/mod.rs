//! CLI interface for Cadence

use cadence::engine::GenerateOptions;
use cadence::{EffectKind, Instrument};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Procedural music from text prompts
#[derive(Parser)]
#[command(name = "cadence")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a prompt to a WAV file
    Generate {
        /// Description of the music
        prompt: String,

        /// Output file path (default: derived from the prompt)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show what a prompt is heard as, without rendering
    Analyze {
        /// Description of the music
        prompt: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a prompt and play it on the default output device
    #[cfg(feature = "playback")]
    Play {
        /// Description of the music
        prompt: String,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "cadence.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}

/// Options shared by every command that plans or renders
#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Configuration file path (default: built-in settings)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Duration in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Style hint (electronic, synthwave, cyberpunk, ambient, rock, jazz, classical, pop)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Seed for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma-separated effect chain, replacing the automatic choice
    #[arg(long, value_delimiter = ',', conflicts_with = "dry")]
    pub effects: Option<Vec<EffectKind>>,

    /// Skip all effects
    #[arg(long)]
    pub dry: bool,

    /// Comma-separated instruments, replacing those found in the prompt
    #[arg(long, value_delimiter = ',')]
    pub instruments: Option<Vec<Instrument>>,
}

impl RenderArgs {
    pub fn options(&self) -> GenerateOptions {
        let effects = if self.dry {
            Some(Vec::new())
        } else {
            self.effects.clone()
        };
        GenerateOptions {
            duration_seconds: self.duration,
            style: self.style.clone(),
            seed: self.seed,
            effects,
            instruments: self.instruments.clone(),
        }
    }
}
