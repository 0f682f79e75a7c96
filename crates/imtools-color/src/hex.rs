//! Hex color string parsing.
//!
//! Accepted forms, each with an optional leading `#`:
//!
//! - `rgb` - shorthand; every digit is doubled, so `f0a` reads as `ff00aa`
//! - `rrggbb` - full form; anything after the sixth digit is ignored
//!
//! The shorthand expansion doubles the digit text (`d` becomes `dd`), it does
//! not shift nibbles. For hex digits the two give the same value.
//!
//! # Example
//!
//! ```rust
//! use imtools_color::{parse_hex, Color};
//!
//! assert_eq!(parse_hex("#0f0").unwrap(), Color::new(0, 255, 0));
//! assert_eq!(parse_hex("00ff00").unwrap(), Color::new(0, 255, 0));
//! assert!(parse_hex("zz0000").is_err());
//! ```

use crate::error::{ColorError, ColorResult};
use crate::rgb::Color;

/// Number of digits in the shorthand form.
pub const SHORT_LEN: usize = 3;

/// Number of digits read in the full form.
pub const FULL_LEN: usize = 6;

/// Parses a hex color string into a [`Color`].
///
/// # Errors
///
/// [`ColorError::InvalidFormat`] when fewer than six digits are given (and
/// the string is not the three-digit shorthand) or when any digit that is
/// read is not `0-9`, `a-f`, `A-F`.
pub fn parse_hex(hex: &str) -> ColorResult<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let bytes = digits.as_bytes();

    if bytes.len() == SHORT_LEN {
        let r = pair(hex, bytes[0], bytes[0])?;
        let g = pair(hex, bytes[1], bytes[1])?;
        let b = pair(hex, bytes[2], bytes[2])?;
        return Ok(Color::new(r, g, b));
    }

    if bytes.len() < FULL_LEN {
        return Err(ColorError::invalid_format(
            hex,
            format!(
                "expected {} or at least {} hex digits, got {}",
                SHORT_LEN,
                FULL_LEN,
                bytes.len()
            ),
        ));
    }

    let r = pair(hex, bytes[0], bytes[1])?;
    let g = pair(hex, bytes[2], bytes[3])?;
    let b = pair(hex, bytes[4], bytes[5])?;
    Ok(Color::new(r, g, b))
}

/// Decodes two hex digits into one channel value.
fn pair(input: &str, hi: u8, lo: u8) -> ColorResult<u8> {
    Ok(digit(input, hi)? << 4 | digit(input, lo)?)
}

fn digit(input: &str, byte: u8) -> ColorResult<u8> {
    match byte {
        b'0'..=b'9' => Ok(byte - b'0'),
        b'a'..=b'f' => Ok(byte - b'a' + 10),
        b'A'..=b'F' => Ok(byte - b'A' + 10),
        _ => Err(ColorError::invalid_format(
            input,
            format!("non-hex digit {:?}", byte as char),
        )),
    }
}
