//! Run the normalizer over saved model output.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use muse_core::design::normalize::fallback_design;
use muse_core::design::{parse_designs, DesignSuggestion};

use crate::output;

#[derive(Args)]
pub struct NormalizeArgs {
    /// File holding the raw model text (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// The description the model was given
    #[arg(short, long)]
    pub prompt: String,

    /// Print suggestions as JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: NormalizeArgs) -> Result<()> {
    if args.prompt.trim().is_empty() {
        bail!("--prompt must not be blank");
    }

    let raw = super::read_input(args.input.as_deref())?;
    let designs = resolve(&raw, &args.prompt);

    if args.json {
        let json = serde_json::json!({ "designs": designs });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        output::print_suggestions(&designs);
    }
    Ok(())
}

/// Parse once, reporting why the prompt-derived design was used if it was.
fn resolve(raw: &str, prompt: &str) -> Vec<DesignSuggestion> {
    match parse_designs(raw, prompt) {
        Ok(designs) => designs,
        Err(e) => {
            eprintln!("{} {} (using prompt-derived design)", "!".yellow(), e);
            vec![fallback_design(prompt)]
        }
    }
}
