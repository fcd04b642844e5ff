//! Print the model instruction.

use anyhow::{bail, Result};
use clap::Args;

#[derive(Args)]
pub struct PromptArgs {
    /// What the design should be, e.g. "modern poster for a coffee shop"
    pub intent: String,
}

pub fn execute(args: PromptArgs) -> Result<()> {
    if args.intent.trim().is_empty() {
        bail!("Describe the design you want first.");
    }
    println!("{}", muse_core::design::build_prompt(&args.intent));
    Ok(())
}
