//! CLI command definitions and handlers.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::MuseConfig;

pub mod apply;
pub mod generate;
pub mod normalize;
pub mod prompt;

/// Muse - AI design suggestions for your canvas
#[derive(Parser)]
#[command(name = "muse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config file (defaults to ./muse.toml, then the user config dir)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate design suggestions from a description and apply one
    Generate(generate::GenerateArgs),

    /// Normalize saved model output into design suggestions (offline)
    Normalize(normalize::NormalizeArgs),

    /// Apply a design suggestion from a JSON file to an SVG canvas
    Apply(apply::ApplyArgs),

    /// Print the instruction sent to the model for a description
    Prompt(prompt::PromptArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = MuseConfig::load(self.config.as_deref())?;

        match self.command {
            Commands::Generate(args) => generate::execute(args, config).await,
            Commands::Normalize(args) => normalize::execute(args),
            Commands::Apply(args) => apply::execute(args, config).await,
            Commands::Prompt(args) => prompt::execute(args),
        }
    }
}

/// Read a whole file, or stdin when no path is given.
pub(crate) fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
