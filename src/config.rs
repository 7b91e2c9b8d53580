//! Settings file (randomart.yaml) parsing.
//!
//! Settings hold the defaults for rendering and generation. Every field is
//! optional in the file; command line flags override individual fields.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RaError, Result};

/// Name of the settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "randomart.yaml";

/// How artworks are evaluated while rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Walk the expression tree for every pixel.
    Tree,
    /// Compile the tree once, then evaluate the compiled form.
    #[default]
    Reified,
}

/// File format for rendered images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Png,
    /// Raw big-endian pixel slab.
    Slab,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Slab => "slab",
        }
    }
}

/// Settings loaded from randomart.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Output directory for batch renders.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Canvas side length in pixels.
    #[serde(default = "default_size")]
    pub size: u32,

    /// Pixel block size.
    #[serde(default = "default_block")]
    pub block: u32,

    /// Smallest budget drawn for a fresh artwork (inclusive).
    #[serde(default = "default_min_budget")]
    pub min_budget: i32,

    /// Largest budget drawn for a fresh artwork (exclusive).
    #[serde(default = "default_max_budget")]
    pub max_budget: i32,

    #[serde(default)]
    pub backend: Backend,

    #[serde(default)]
    pub format: OutputFormat,

    /// Random seed. Entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_output() -> PathBuf {
    PathBuf::from("out")
}

fn default_size() -> u32 {
    512
}

fn default_block() -> u32 {
    1
}

fn default_min_budget() -> i32 {
    20
}

fn default_max_budget() -> i32 {
    150
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: default_output(),
            size: default_size(),
            block: default_block(),
            min_budget: default_min_budget(),
            max_budget: default_max_budget(),
            backend: Backend::default(),
            format: OutputFormat::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read settings: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(content).map_err(|e| RaError::Parse {
            message: format!("Invalid settings: {}", e),
            help: Some(format!("Check {} syntax", SETTINGS_FILE)),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `path` if given, else `randomart.yaml` from `dir` if present,
    /// else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(SETTINGS_FILE);
        if candidate.is_file() {
            log::debug!("using settings from {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(RaError::Parse {
                message: "size must be at least 1".to_string(),
                help: None,
            });
        }
        if self.block == 0 {
            return Err(RaError::Parse {
                message: "block must be at least 1".to_string(),
                help: None,
            });
        }
        if self.max_budget < self.min_budget {
            return Err(RaError::Parse {
                message: format!(
                    "max_budget ({}) is below min_budget ({})",
                    self.max_budget, self.min_budget
                ),
                help: Some("Budgets are drawn from min_budget..max_budget".to_string()),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_settings() {
        let settings = Settings::parse("output: renders").unwrap();

        assert_eq!(settings.output, PathBuf::from("renders"));
        assert_eq!(settings.size, 512);
        assert_eq!(settings.backend, Backend::Reified);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_parse_full_settings() {
        let yaml = r#"
output: art/batch
size: 256
block: 2
min_budget: 5
max_budget: 15
backend: tree
format: slab
seed: 1234
"#;
        let settings = Settings::parse(yaml).unwrap();

        assert_eq!(settings.output, PathBuf::from("art/batch"));
        assert_eq!(settings.size, 256);
        assert_eq!(settings.block, 2);
        assert_eq!(settings.min_budget, 5);
        assert_eq!(settings.max_budget, 15);
        assert_eq!(settings.backend, Backend::Tree);
        assert_eq!(settings.format, OutputFormat::Slab);
        assert_eq!(settings.seed, Some(1234));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.output, PathBuf::from("out"));
        assert_eq!(settings.block, 1);
        assert_eq!(settings.min_budget, 20);
        assert_eq!(settings.max_budget, 150);
        assert_eq!(settings.format, OutputFormat::Png);
    }

    #[test]
    fn test_invalid_settings() {
        assert!(Settings::parse("size: 0").is_err());
        assert!(Settings::parse("min_budget: 10\nmax_budget: 5").is_err());
        assert!(Settings::parse("backend: gpu").is_err());
        assert!(Settings::parse("size: [1, 2").is_err());
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::discover(None, dir.path()).unwrap();
        assert_eq!(settings.size, 512);
    }

    #[test]
    fn test_discover_reads_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "size: 64\n").unwrap();
        let settings = Settings::discover(None, dir.path()).unwrap();
        assert_eq!(settings.size, 64);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        assert!(Settings::discover(Some(&missing), dir.path()).is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Slab.extension(), "slab");
    }
}
