#![allow(dead_code)]

use crate::core::error::{ConfigError, ResultExt, RippleError, RippleResult};
use crate::graph::affected::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration for ripple
/// Searched in order: ripple.toml, .ripple.toml, .config/ripple.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RippleConfig {
  #[serde(default)]
  pub analysis: AnalysisSettings,
  #[serde(default)]
  pub output: OutputSettings,
}

/// Defaults for the analyzer knobs, overridable per repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
  /// Reverse-dependency traversal depth (default: 2)
  #[serde(default = "default_max_depth")]
  pub max_depth: usize,

  /// Crawl outward from the changed set (default: true)
  #[serde(default = "default_include_reverse_deps")]
  pub include_reverse_deps: bool,
}

fn default_max_depth() -> usize {
  DEFAULT_MAX_DEPTH
}

fn default_include_reverse_deps() -> bool {
  true
}

impl Default for AnalysisSettings {
  fn default() -> Self {
    Self {
      max_depth: default_max_depth(),
      include_reverse_deps: default_include_reverse_deps(),
    }
  }
}

/// Where impact documents land
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
  /// Directory for impact documents, relative to the repo root (default: ".ripple")
  #[serde(default = "default_output_dir")]
  pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
  PathBuf::from(".ripple")
}

impl Default for OutputSettings {
  fn default() -> Self {
    Self {
      dir: default_output_dir(),
    }
  }
}

impl OutputSettings {
  /// Validate output configuration
  pub fn validate(&self) -> RippleResult<()> {
    if self.dir.as_os_str().is_empty() {
      return Err(RippleError::Config(ConfigError::InvalidValue {
        field: "output.dir".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }

    if self.dir.is_absolute() {
      return Err(RippleError::Config(ConfigError::InvalidValue {
        field: "output.dir".to_string(),
        reason: "must be relative to the repository root".to_string(),
      }));
    }

    if self.dir.components().any(|c| matches!(c, Component::ParentDir)) {
      return Err(RippleError::Config(ConfigError::InvalidValue {
        field: "output.dir".to_string(),
        reason: "must not leave the repository root".to_string(),
      }));
    }

    Ok(())
  }
}

impl RippleConfig {
  /// Find config file in search order: ripple.toml, .ripple.toml, .config/ripple.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("ripple.toml"),
      path.join(".ripple.toml"),
      path.join(".config").join("ripple.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from ripple.toml (searches multiple locations)
  pub fn load(path: &Path) -> RippleResult<Self> {
    let config_path = Self::find_config_path(path).ok_or_else(|| {
      RippleError::Config(ConfigError::NotFound {
        repo_root: path.to_path_buf(),
      })
    })?;

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: RippleConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .output
      .validate()
      .with_context(|| format!("Invalid output configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Save config to ripple.toml (default location)
  pub fn save(&self, path: &Path) -> RippleResult<()> {
    let config_path = path.join("ripple.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(())
  }

  /// Check if config exists at the given path
  pub fn exists(path: &Path) -> bool {
    Self::find_config_path(path).is_some()
  }
}
