//! Convert command
//!
//! Re-encodes an image, flattening onto a background when the target format
//! has no alpha channel.

use crate::ConvertArgs;
use anyhow::{Context, Result};
use imtools_analyze::AnalyzerConfig;
use tracing::trace;

pub fn run(args: ConvertArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");

    let mut analyzer = super::open_image(&args.input, config)?;
    if let Some(hex) = args.background.as_deref() {
        analyzer
            .set_background(hex)
            .with_context(|| format!("Bad --background '{}'", hex))?;
    }

    let from = analyzer.format();
    super::save_image(&analyzer, &args.output, args.format.as_deref())?;

    if verbose > 0 {
        println!(
            "Converted {} ({}) -> {}",
            args.input.display(),
            from,
            args.output.display()
        );
    }
    Ok(())
}
