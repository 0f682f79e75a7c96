//! Trim command
//!
//! Removes borders that match the top-left pixel within a fuzz tolerance.

use crate::TrimArgs;
use anyhow::{Context, Result};
use imtools_analyze::AnalyzerConfig;
use tracing::{info, trace};

pub fn run(args: TrimArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    trace!(input = %args.input.display(), fuzz = ?args.fuzz, "trim::run");

    let mut analyzer = super::open_image(&args.input, config)?;
    let before = analyzer.dimensions();
    let fuzz = args.fuzz.unwrap_or(config.trim_fuzz);

    let after = analyzer.trim(fuzz).context("Trim failed")?;
    info!(from = ?before, to = ?after, fuzz, "Trimmed");

    super::save_image(&analyzer, &args.output, args.format.as_deref())?;

    if verbose > 0 {
        println!(
            "Trimmed {}x{} -> {}x{}: {}",
            before.0,
            before.1,
            after.0,
            after.1,
            args.output.display()
        );
    }
    Ok(())
}
