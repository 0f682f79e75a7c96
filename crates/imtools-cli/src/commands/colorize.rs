//! Colorize command
//!
//! Turns a logo black or white, keeping its alpha.

use crate::ColorizeArgs;
use anyhow::{Context, Result};
use imtools_analyze::{AnalyzerConfig, Shade};
use tracing::trace;

pub fn run(args: ColorizeArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    trace!(input = %args.input.display(), shade = %args.shade, "colorize::run");

    let shade: Shade = args.shade.parse()?;
    let mut analyzer = super::open_image(&args.input, config)?;
    analyzer.colorize(shade).context("Colorize failed")?;
    super::save_image(&analyzer, &args.output, args.format.as_deref())?;

    if verbose > 0 {
        println!("Colorized {} ({}): {}", args.input.display(), shade, args.output.display());
    }
    Ok(())
}
