//! Error types for color math.
//!
//! Color functions fail synchronously and never retry. The two failure modes
//! are malformed hex input and the undefined saturation of pure black.

use thiserror::Error;

/// Color operation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Hex string is malformed (wrong length or non-hex digit).
    #[error("invalid hex color {input:?}: {reason}")]
    InvalidFormat {
        /// The string as given by the caller.
        input: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Saturation is undefined because every channel is zero.
    #[error("saturation is undefined for pure black (division by zero)")]
    DivisionByZero,
}

impl ColorError {
    /// Creates a [`ColorError::InvalidFormat`] error.
    #[inline]
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a parse failure.
    #[inline]
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Self::InvalidFormat { .. })
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
