//! Cadence - procedural music from text prompts

use anyhow::{Context, Result};
use cadence::config;
use cadence::engine::{save_wav, Engine};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands, RenderArgs};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate { prompt, output, render } => {
            let engine = build_engine(&render)?;
            let composition = engine.generate(&prompt, &render.options())?;

            let path = output.unwrap_or_else(|| PathBuf::from(composition.suggested_filename()));
            save_wav(&composition, &path)
                .with_context(|| format!("failed to write {}", path.display()))?;

            let analysis = &composition.analysis;
            println!("Wrote {:?}", path);
            println!("  Duration: {:.1}s", composition.duration_seconds);
            println!("  Tempo: {} BPM", analysis.tempo);
            println!("  Key: {}", analysis.key);
            println!("  Mood: {} / Style: {}", analysis.mood, analysis.style);
            println!("  Instruments: {}", join(&analysis.instruments));
            println!("  Effects: {}", join(&composition.structure.effects));
            if let Some(seed) = composition.seed {
                println!("  Seed: {}", seed);
            }
        }

        Commands::Analyze { prompt, json, render } => {
            let engine = build_engine(&render)?;
            let plan = engine.plan(&prompt, &render.options())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                let analysis = &plan.analysis;
                let structure = &plan.structure;
                println!("Prompt: {}", prompt);
                println!("  Tempo: {} BPM", analysis.tempo);
                println!("  Key: {}", analysis.key);
                println!("  Mood: {} (energy {:.1})", analysis.mood, analysis.energy);
                println!("  Style: {}", analysis.style);
                println!("  Instruments: {}", join(&analysis.instruments));
                println!("  Effects: {}", join(&structure.effects));
                println!(
                    "  Length: {} bars, {:.1}s",
                    structure.total_bars(),
                    structure.duration_seconds()
                );
                println!("Sections:");
                for section in &structure.sections {
                    println!(
                        "  - {:<7} {:>3} bars  intensity {:.1}  [{}]  {}",
                        section.kind.name(),
                        section.bars,
                        section.intensity,
                        join(&section.instruments),
                        join(&section.chords)
                    );
                }
            }
        }

        #[cfg(feature = "playback")]
        Commands::Play { prompt, render } => {
            use cadence::engine::Player;
            use std::sync::atomic::Ordering;

            let engine = build_engine(&render)?;
            let composition = engine.generate(&prompt, &render.options())?;

            let mut player = Player::new();
            let stop = player.stop_flag();
            ctrlc::set_handler(move || stop.store(false, Ordering::SeqCst))
                .context("failed to install Ctrl-C handler")?;

            println!(
                "Playing {:.1}s ({} BPM, {}). Press Ctrl-C to stop.",
                composition.duration_seconds, composition.analysis.tempo, composition.analysis.key
            );
            player.play(&composition)?;
            player.wait();
            println!("Stopped at {:.0}%", player.progress() * 100.0);
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!(
                        "  Duration: {}s (max {}s)",
                        cfg.generation.duration_seconds, cfg.generation.max_duration_seconds
                    );
                    println!("  Master volume: {:.0}%", cfg.master.volume * 100.0);
                    match cfg.generation.seed {
                        Some(seed) => println!("  Seed: {}", seed),
                        None => println!("  Seed: random"),
                    }
                    if let Some(style) = &cfg.generation.style {
                        println!("  Style: {}", style);
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let path = "cadence.yaml";
            if std::path::Path::new(path).exists() {
                println!("cadence.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, config::EXAMPLE_CONFIG)?;
                println!("Created cadence.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine(render: &RenderArgs) -> Result<Engine> {
    let cfg = config::load_or_default(render.config.as_deref())?;
    Ok(Engine::new(cfg)?)
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "none".to_string();
    }
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
