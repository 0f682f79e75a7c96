//! Color command
//!
//! Parses hex colors and prints RGB, perceived brightness and saturation.

use crate::ColorArgs;
use anyhow::{Context, Result};
use imtools_color::{parse_hex, Color, ColorError};
use serde::Serialize;

#[derive(Serialize)]
struct ColorReport {
    input: String,
    hex: String,
    rgb: [u8; 3],
    brightness: f64,
    /// `None` for black, where saturation is undefined.
    saturation: Option<f64>,
}

fn describe(input: &str, color: Color) -> Result<ColorReport> {
    let saturation = match color.saturation() {
        Ok(s) => Some(s),
        Err(ColorError::DivisionByZero) => None,
        Err(e) => return Err(e.into()),
    };
    Ok(ColorReport {
        input: input.to_string(),
        hex: color.to_hex(),
        rgb: color.to_array(),
        brightness: color.brightness(),
        saturation,
    })
}

pub fn run(args: ColorArgs) -> Result<()> {
    let mut reports = Vec::with_capacity(args.hex.len());
    for input in &args.hex {
        let color = parse_hex(input).with_context(|| format!("Bad color '{}'", input))?;
        reports.push(describe(input, color)?);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for r in &reports {
        let sat = r
            .saturation
            .map(|s| format!("{:.3}", s))
            .unwrap_or_else(|| "undefined".into());
        println!(
            "{}  rgb({}, {}, {})  brightness {:.1}  saturation {}",
            r.hex, r.rgb[0], r.rgb[1], r.rgb[2], r.brightness, sat
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_black() {
        let r = describe("000", Color::BLACK).unwrap();
        assert_eq!(r.hex, "#000000");
        assert_eq!(r.brightness, 0.0);
        assert!(r.saturation.is_none());
    }

    #[test]
    fn test_describe_red() {
        let r = describe("#f00", parse_hex("#f00").unwrap()).unwrap();
        assert_eq!(r.rgb, [255, 0, 0]);
        assert_eq!(r.saturation, Some(1.0));
    }
}
