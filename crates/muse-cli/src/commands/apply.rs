//! Apply a saved design suggestion to an SVG canvas.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use muse_core::apply::{apply, ApplyOutcome};
use muse_core::design::{parse_designs, DesignSuggestion};

use crate::canvas::SvgCanvas;
use crate::clipboard::SystemClipboard;
use crate::config::MuseConfig;

#[derive(Args)]
pub struct ApplyArgs {
    /// JSON file with a `designs` array, e.g. from `muse generate --json`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Which design to apply (1-based)
    #[arg(long, default_value_t = 1)]
    pub index: usize,

    /// SVG file the applied design is written to
    #[arg(short, long, default_value = "design.svg")]
    pub out: PathBuf,

    /// Description the designs were made for (defaults to the input file name)
    #[arg(short, long)]
    pub prompt: Option<String>,
}

pub async fn execute(args: ApplyArgs, config: MuseConfig) -> Result<()> {
    let raw = super::read_input(Some(&args.input))?;
    // No prompt-derived fallback here: a broken file is reported as such.
    let designs = parse_designs(&raw, &intent(&args))
        .with_context(|| format!("{} does not contain design suggestions", args.input.display()))?;

    if args.index == 0 || args.index > designs.len() {
        bail!("--index must be between 1 and {}", designs.len());
    }
    let design = &designs[args.index - 1];

    let mut canvas = SvgCanvas::new(config.output_path(&args.out));
    let mut clipboard = SystemClipboard::detect();
    let outcome = apply(design, &mut canvas, Some(&mut clipboard)).await;

    finish(&outcome, design, &canvas, &clipboard)
}

/// The intent used when a saved design lacks text of its own.
fn intent(args: &ApplyArgs) -> String {
    args.prompt
        .clone()
        .filter(|p| !p.trim().is_empty())
        .or_else(|| {
            args.input
                .file_stem()
                .map(|stem| stem.to_string_lossy().replace(['-', '_'], " "))
        })
        .unwrap_or_else(|| "design".to_string())
}

/// Report the outcome of an apply run.
///
/// The canvas has already written every accepted element by the time this
/// runs, so a success notice always refers to a file on disk.
pub(crate) fn finish(
    outcome: &ApplyOutcome,
    design: &DesignSuggestion,
    canvas: &SvgCanvas,
    clipboard: &SystemClipboard,
) -> Result<()> {
    crate::output::print_outcome(outcome, design);

    match outcome {
        ApplyOutcome::Applied(_) if canvas.is_empty() => {
            bail!("Every element was rejected; nothing was written to {}", canvas.path().display())
        }
        ApplyOutcome::Applied(_) => {
            println!(
                "{} Wrote {} elements to {}",
                "✓".green().bold(),
                canvas.len(),
                canvas.path().display()
            );
            Ok(())
        }
        ApplyOutcome::AppliedWithFallback { .. } => {
            if let Some(tool) = clipboard.tool_name() {
                println!("  {}", format!("(copied with {})", tool).dimmed());
            }
            Ok(())
        }
        ApplyOutcome::Failed { .. } => bail!("Design could not be applied"),
    }
}
