//! Blur command
//!
//! Applies box or gaussian blur.

use crate::BlurArgs;
use anyhow::{Context, Result};
use imtools_analyze::{AnalyzerConfig, BlurOptions};
use tracing::{info, trace};

pub fn run(args: BlurArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    trace!(input = %args.input.display(), sigma = args.sigma, radius = args.radius, "blur::run");

    let opts = BlurOptions {
        sigma: args.sigma,
        radius: args.radius,
        gaussian: args.gaussian,
    };

    let mut analyzer = super::open_image(&args.input, config)?;
    info!(sigma = opts.sigma, radius = opts.effective_radius(), gaussian = opts.gaussian, "Applying blur");

    if verbose > 0 {
        println!(
            "Applying {} blur (sigma={}, radius={}) to {}",
            if opts.gaussian { "gaussian" } else { "box" },
            opts.sigma,
            opts.effective_radius(),
            args.input.display()
        );
    }

    analyzer.blur(&opts).context("Blur failed")?;
    super::save_image(&analyzer, &args.output, args.format.as_deref())?;

    if verbose > 0 {
        println!("Done.");
    }
    Ok(())
}
