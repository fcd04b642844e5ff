//! Generate design suggestions with Gemini and apply one.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Select;
use muse_core::session::Session;
use muse_core::MuseError;
use muse_gemini::GeminiClient;

use crate::canvas::SvgCanvas;
use crate::clipboard::SystemClipboard;
use crate::config::{MuseConfig, Overrides};
use crate::output;

#[derive(Args)]
pub struct GenerateArgs {
    /// What the design should be, e.g. "modern poster for a coffee shop"
    pub intent: String,

    /// Apply suggestion N (1-based) without asking
    #[arg(long, value_name = "N", conflicts_with = "no_apply")]
    pub apply: Option<usize>,

    /// Only list the suggestions
    #[arg(long)]
    pub no_apply: bool,

    /// SVG file the applied design is written to
    #[arg(short, long, default_value = "design.svg")]
    pub out: PathBuf,

    /// Print suggestions as JSON instead of cards
    #[arg(long)]
    pub json: bool,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Gemini model to use
    #[arg(long, env = "MUSE_GEMINI_MODEL")]
    pub model: Option<String>,

    /// Gemini API root URL
    #[arg(long, env = "MUSE_GEMINI_URL")]
    pub base_url: Option<String>,
}

pub async fn execute(args: GenerateArgs, config: MuseConfig) -> Result<()> {
    if args.intent.trim().is_empty() {
        bail!("Describe the design you want first.");
    }

    let config = config.with_overrides(Overrides {
        api_key: args.api_key.clone(),
        model: args.model.clone(),
        base_url: args.base_url.clone(),
    });

    let client = GeminiClient::new(config.require_api_key()?, &config.model)
        .with_base_url(&config.base_url)
        .with_timeout(config.timeout);
    let mut session = Session::new(client);

    eprintln!("{} Generating designs with {}...", "→".dimmed(), config.model);
    match session.generate(&args.intent).await {
        Ok(_) => {}
        Err(MuseError::Generation(e)) => {
            let hint = if e.is_retryable() { " You can try again." } else { "" };
            bail!("{}{}", e.user_message(), hint);
        }
        Err(e) => return Err(e.into()),
    }

    let suggestions = session.suggestions();
    if args.json {
        let json = serde_json::json!({ "designs": suggestions });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        output::print_suggestions(suggestions);
    }

    let Some(index) = choose(&args, suggestions.iter().map(|d| d.title.as_str()).collect())? else {
        return Ok(());
    };
    let design = suggestions[index].clone();

    let mut canvas = SvgCanvas::new(config.output_path(&args.out));
    let mut clipboard = SystemClipboard::detect();
    eprintln!("{} Applying \"{}\"...", "→".dimmed(), design.title);
    let outcome = session.apply(index, &mut canvas, Some(&mut clipboard)).await?;

    super::apply::finish(&outcome, &design, &canvas, &clipboard)
}

/// Pick the suggestion to apply: `--apply`, an interactive menu, or none.
fn choose(args: &GenerateArgs, titles: Vec<&str>) -> Result<Option<usize>> {
    if args.no_apply {
        return Ok(None);
    }

    if let Some(n) = args.apply {
        if n == 0 || n > titles.len() {
            bail!("--apply must be between 1 and {}", titles.len());
        }
        return Ok(Some(n - 1));
    }

    if args.json || !std::io::stdin().is_terminal() {
        return Ok(None);
    }

    println!();
    Select::new()
        .with_prompt("Apply which design? (Esc to skip)")
        .items(&titles)
        .default(0)
        .interact_opt()
        .context("Failed to read selection")
}
