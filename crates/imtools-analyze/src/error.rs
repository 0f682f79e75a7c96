//! Error types for image analysis.
//!
//! Every analyzer operation reports one of the [`AnalyzeError`] kinds.
//! Errors from the lower crates are wrapped rather than flattened so the
//! original cause stays reachable through [`std::error::Error::source`].

use std::path::{Path, PathBuf};

use imtools_color::ColorError;
use imtools_ops::OpsError;
use thiserror::Error;

use crate::palette::PaletteError;

/// Result type for analyzer operations.
pub type AnalyzeResult<T> = Result<T, AnalyzeError>;

/// Errors that can occur while loading, analyzing or saving an image.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The source could not be read or decoded.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// An image could not be encoded or written.
    #[error("failed to encode image {path}: {source}")]
    ImageEncode {
        /// Destination path.
        path: PathBuf,
        /// Underlying encoder error.
        #[source]
        source: image::ImageError,
    },

    /// The palette extractor failed.
    #[error("palette extraction failed: {0}")]
    PaletteExtraction(#[from] PaletteError),

    /// Caller-supplied parameter out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Color math error.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Image operation error.
    #[error(transparent)]
    Ops(#[from] OpsError),

    /// Configuration file could not be parsed.
    #[error("invalid config {path}: {message}")]
    Config {
        /// Config file path, or `<inline>` for strings.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalyzeError {
    /// Creates an [`AnalyzeError::ImageLoad`].
    #[inline]
    pub fn image_load(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::ImageLoad {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an [`AnalyzeError::ImageEncode`].
    #[inline]
    pub fn image_encode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::ImageEncode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an [`AnalyzeError::InvalidParameter`].
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Creates an [`AnalyzeError::Config`].
    #[inline]
    pub fn config(path: impl AsRef<Path>, message: impl ToString) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = AnalyzeError::invalid_parameter("sample_size must be > 0");
        assert_eq!(err.to_string(), "invalid parameter: sample_size must be > 0");

        let err = AnalyzeError::config("cfg.yaml", "missing field");
        assert!(err.to_string().contains("cfg.yaml"));
    }

    #[test]
    fn test_wraps_lower_errors() {
        let err: AnalyzeError = ColorError::DivisionByZero.into();
        assert!(matches!(err, AnalyzeError::Color(ColorError::DivisionByZero)));

        let err: AnalyzeError = OpsError::InvalidParameter("fuzz".into()).into();
        assert!(err.to_string().contains("fuzz"));
    }
}
