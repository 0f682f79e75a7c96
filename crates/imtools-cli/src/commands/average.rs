//! Average color command.

use crate::AverageArgs;
use anyhow::{Context, Result};
use imtools_analyze::AnalyzerConfig;
use serde_json::json;

/// Runs the average command.
pub fn run(args: AverageArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    let analyzer = super::open_image(&args.input, config)?;
    let color = analyzer
        .average_color()
        .with_context(|| format!("Failed to average: {}", args.input.display()))?;

    if args.json {
        let out = json!({
            "hex": color.to_hex(),
            "rgb": color.to_array(),
            "brightness": color.brightness(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if verbose > 0 {
        println!("{}  rgb({}, {}, {})", color, color.r, color.g, color.b);
    } else {
        println!("{}", color);
    }
    Ok(())
}
