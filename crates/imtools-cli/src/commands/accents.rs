//! Accent colors command.

use crate::AccentsArgs;
use anyhow::{Context, Result};
use imtools_analyze::{AccentOptions, AnalyzerConfig};
use serde::Serialize;
use tracing::{info, trace};

#[derive(Serialize)]
struct AccentEntry {
    hex: String,
    rgb: [u8; 3],
    brightness: f64,
}

/// Runs the accents command.
pub fn run(args: AccentsArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    trace!(input = %args.input.display(), count = ?args.count, "accents::run");

    let mut analyzer = super::open_image(&args.input, config)?;
    if args.trim {
        let (w, h) = analyzer.trim_default().context("Trim failed")?;
        info!(w, h, "Trimmed before analysis");
    }

    let defaults = config.accent;
    let opts = AccentOptions {
        count: args.count.unwrap_or(defaults.count),
        sample_size: args.sample_size.unwrap_or(defaults.sample_size),
        max_brightness: args.max_brightness.or(defaults.max_brightness),
    };

    let colors = analyzer
        .accent_colors(&opts)
        .with_context(|| format!("Accent extraction failed: {}", args.input.display()))?;

    if args.json {
        let entries: Vec<AccentEntry> = colors
            .iter()
            .map(|c| AccentEntry {
                hex: c.to_hex(),
                rgb: c.to_array(),
                brightness: c.brightness(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if verbose > 0 {
        println!(
            "{} accent color(s) from {} (requested {})",
            colors.len(),
            args.input.display(),
            opts.count
        );
    }
    for c in &colors {
        if verbose > 0 {
            println!("{}  brightness {:.1}", c, c.brightness());
        } else {
            println!("{}", c);
        }
    }
    Ok(())
}
