//! Resize command

use crate::ResizeArgs;
use anyhow::{Context, Result};
use imtools_analyze::{AnalyzerConfig, Filter};
use tracing::{info, trace};

pub fn run(args: ResizeArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    trace!(input = %args.input.display(), w = args.width, h = args.height, "resize::run");

    let filter: Filter = args.filter.parse()?;
    let mut analyzer = super::open_image(&args.input, config)?;
    let (src_w, src_h) = analyzer.dimensions();

    analyzer
        .resize(args.width, args.height, filter, !args.exact)
        .context("Resize failed")?;
    let (dst_w, dst_h) = analyzer.dimensions();
    info!(src_w, src_h, dst_w, dst_h, %filter, "Resized");

    super::save_image(&analyzer, &args.output, args.format.as_deref())?;

    if verbose > 0 {
        println!(
            "Resized {}x{} -> {}x{} ({}): {}",
            src_w,
            src_h,
            dst_w,
            dst_h,
            filter,
            args.output.display()
        );
    }
    Ok(())
}
