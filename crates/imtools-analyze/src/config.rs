//! Analyzer configuration.
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```yaml
//! accent:
//!   count: 8
//!   max_brightness: 180
//! trim_fuzz: 0.05
//! kmeans:
//!   seed: 42
//! background: "#ffffff"
//! ```
//!
//! ```rust
//! use imtools_analyze::AnalyzerConfig;
//!
//! let cfg = AnalyzerConfig::from_yaml_str("accent:\n  count: 3\n").unwrap();
//! assert_eq!(cfg.accent.count, 3);
//! assert_eq!(cfg.accent.sample_size, 500);
//! ```

use std::path::{Path, PathBuf};

use imtools_color::{parse_hex, Color};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::palette::KmeansOptions;
use crate::{AnalyzeError, AnalyzeResult};

/// Default trim tolerance.
pub const DEFAULT_TRIM_FUZZ: f64 = 0.1;

/// Parameters of an accent color query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccentOptions {
    /// Number of colors requested from the extractor.
    pub count: usize,
    /// Longest side of the downsampled copy that is analyzed.
    pub sample_size: u32,
    /// Brightness ceiling; absent or negative disables filtering.
    pub max_brightness: Option<f64>,
}

impl Default for AccentOptions {
    fn default() -> Self {
        Self {
            count: 5,
            sample_size: 500,
            max_brightness: None,
        }
    }
}

impl AccentOptions {
    /// Default options with `count` colors.
    pub fn with_count(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Sets the brightness ceiling.
    pub fn max_brightness(mut self, ceiling: f64) -> Self {
        self.max_brightness = Some(ceiling);
        self
    }
}

/// Analyzer-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Defaults for accent color queries.
    pub accent: AccentOptions,
    /// Trim tolerance in `[0, 1]`.
    pub trim_fuzz: f64,
    /// K-means extractor tuning.
    pub kmeans: KmeansOptions,
    /// Directory for the temporary downsample; system temp dir when unset.
    pub scratch_dir: Option<PathBuf>,
    /// Background color as hex; transparent when unset.
    pub background: Option<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            accent: AccentOptions::default(),
            trim_fuzz: DEFAULT_TRIM_FUZZ,
            kmeans: KmeansOptions::default(),
            scratch_dir: None,
            background: None,
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> AnalyzeResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading analyzer config");
        Self::parse(&content, path)
    }

    /// Loads configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> AnalyzeResult<Self> {
        Self::parse(yaml, Path::new("<inline>"))
    }

    fn parse(yaml: &str, origin: &Path) -> AnalyzeResult<Self> {
        let cfg: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| AnalyzeError::config(origin, e))?
        };
        cfg.validate().map_err(|e| AnalyzeError::config(origin, e))?;
        Ok(cfg)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> AnalyzeResult<()> {
        if !(0.0..=1.0).contains(&self.trim_fuzz) {
            return Err(AnalyzeError::invalid_parameter(format!(
                "trim_fuzz must be in [0, 1], got {}",
                self.trim_fuzz
            )));
        }
        if self.accent.sample_size == 0 {
            return Err(AnalyzeError::invalid_parameter("sample_size must be > 0"));
        }
        self.background_color()?;
        Ok(())
    }

    /// Parsed background color, if one is configured.
    pub fn background_color(&self) -> AnalyzeResult<Option<Color>> {
        Ok(self.background.as_deref().map(parse_hex).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AnalyzerConfig::default();
        assert_eq!(cfg.accent, AccentOptions::default());
        assert_eq!(cfg.kmeans.max_iter, 20);
        assert!(cfg.background.is_none());

        let parsed = AnalyzerConfig::from_yaml_str("").unwrap();
        assert_eq!(parsed.trim_fuzz, DEFAULT_TRIM_FUZZ);
        assert_eq!(parsed.accent.count, 5);
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "accent:\n  max_brightness: 180\ntrim_fuzz: 0.25\nbackground: '#fff'\n";
        let cfg = AnalyzerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.accent.max_brightness, Some(180.0));
        assert_eq!(cfg.accent.count, 5);
        assert_eq!(cfg.trim_fuzz, 0.25);
        assert_eq!(cfg.background_color().unwrap(), Some(Color::WHITE));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            AnalyzerConfig::from_yaml_str("trim_fuzz: 3.0"),
            Err(AnalyzeError::Config { .. })
        ));
        assert!(AnalyzerConfig::from_yaml_str("accent:\n  sample_size: 0\n").is_err());
        assert!(AnalyzerConfig::from_yaml_str("background: 'nope'").is_err());
        assert!(AnalyzerConfig::from_yaml_str("accent: [1, 2]").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("imtools.yaml");
        std::fs::write(&path, "kmeans:\n  seed: 7\n").unwrap();

        let cfg = AnalyzerConfig::from_file(&path).unwrap();
        assert_eq!(cfg.kmeans.seed, 7);
        assert!(matches!(
            AnalyzerConfig::from_file(dir.path().join("missing.yaml")),
            Err(AnalyzeError::Io(_))
        ));
    }
}
