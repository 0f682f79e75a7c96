//! Image info command.
//!
//! Shows format, dimensions, pixel layout and alpha for each input.

use crate::InfoArgs;
use anyhow::Result;
use imtools_analyze::{AnalyzerConfig, ImageAnalyzer};
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct InfoReport {
    path: String,
    format: &'static str,
    width: u32,
    height: u32,
    color_type: String,
    has_alpha: bool,
    file_size: u64,
}

/// Runs the info command.
pub fn run(args: InfoArgs, verbose: u8, config: &AnalyzerConfig) -> Result<()> {
    let mut reports = Vec::with_capacity(args.input.len());

    for path in &args.input {
        let file_size = fs::metadata(path)?.len();
        let analyzer = super::open_image(path, config)?;

        if args.json {
            reports.push(report(path, &analyzer, file_size));
        } else {
            print_text(path, &analyzer, file_size, verbose);
            if args.input.len() > 1 {
                println!();
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn report(path: &Path, analyzer: &ImageAnalyzer, file_size: u64) -> InfoReport {
    let (width, height) = analyzer.dimensions();
    InfoReport {
        path: path.display().to_string(),
        format: analyzer.format(),
        width,
        height,
        color_type: format!("{:?}", analyzer.image().color()),
        has_alpha: analyzer.has_transparency(),
        file_size,
    }
}

fn print_text(path: &Path, analyzer: &ImageAnalyzer, file_size: u64, verbose: u8) {
    let (w, h) = analyzer.dimensions();
    println!("{}", path.display());
    println!("  Format:     {}", analyzer.format());
    println!("  Resolution: {}x{}", w, h);
    println!("  Alpha:      {}", if analyzer.has_transparency() { "yes" } else { "no" });
    println!("  File size:  {}", super::format_size(file_size));

    if verbose > 0 {
        let color = analyzer.image().color();
        println!("  Layout:     {:?}", color);
        println!("  Channels:   {}", color.channel_count());
        println!("  Bits/pixel: {}", color.bits_per_pixel());
        println!("  Pixels:     {}", w as u64 * h as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage, RgbaImage};

    #[test]
    fn test_reports_outlive_analyzers() {
        let images = [
            DynamicImage::ImageRgb8(RgbImage::new(4, 3)),
            DynamicImage::ImageRgba8(RgbaImage::new(2, 2)),
        ];
        let mut reports = Vec::new();
        for img in images {
            let analyzer = ImageAnalyzer::from_image(img, AnalyzerConfig::default()).unwrap();
            reports.push(report(Path::new("mem.png"), &analyzer, 10));
        }

        let json: serde_json::Value = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["format"], "UNKNOWN");
        assert_eq!(json[0]["width"], 4);
        assert_eq!(json[0]["has_alpha"], false);
        assert_eq!(json[1]["has_alpha"], true);
    }
}
