//! Tuning for destructible buildings.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use crate::building::DEFAULT_COLLAPSE_THRESHOLD;
use crate::collision::DEFAULT_SIMPLIFICATION_TOLERANCE;

/// Configuration for building generation, collapse and collider derivation.
///
/// Every field is optional in TOML; missing fields take their defaults.
///
/// ```toml
/// seed = 42
/// collapse_threshold = 0.05
/// simplification_tolerance = 0.5
/// ```
#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DestructibleConfig {
  /// Seed for facade generation. None = seeded from the OS.
  pub seed: Option<u64>,

  /// Remaining-integrity fraction at or below which a building collapses.
  /// Default: 0.02
  pub collapse_threshold: f32,

  /// Douglas-Peucker tolerance for collision contours, in pixels.
  /// Default: 0.5
  pub simplification_tolerance: f32,
}

impl Default for DestructibleConfig {
  fn default() -> Self {
    Self {
      seed: None,
      collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
      simplification_tolerance: DEFAULT_SIMPLIFICATION_TOLERANCE,
    }
  }
}

impl DestructibleConfig {
  /// Uses a fixed facade seed.
  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seed = Some(seed);
    self
  }

  /// Sets the collapse threshold.
  pub fn with_collapse_threshold(mut self, threshold: f32) -> Self {
    self.collapse_threshold = threshold;
    self
  }

  /// Sets the contour simplification tolerance.
  pub fn with_tolerance(mut self, tolerance: f32) -> Self {
    self.simplification_tolerance = tolerance;
    self
  }

  /// Parses a config from TOML text.
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
    config.validate()?;
    Ok(config)
  }

  /// Checks that values are in range.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&self.collapse_threshold) {
      return Err(ConfigError::Invalid(format!(
        "collapse_threshold {} is outside 0..=1",
        self.collapse_threshold
      )));
    }
    if !self.simplification_tolerance.is_finite() || self.simplification_tolerance < 0.0 {
      return Err(ConfigError::Invalid(format!(
        "simplification_tolerance {} must be a non-negative number",
        self.simplification_tolerance
      )));
    }
    Ok(())
  }

  /// Reads and parses a TOML config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    Self::from_toml_str(&text)
  }
}

/// Error reading a config file.
#[derive(Debug)]
pub enum ConfigError {
  Io(std::io::Error),
  Parse(toml::de::Error),
  /// Parsed, but a value is out of range.
  Invalid(String),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io(e) => write!(f, "I/O error: {}", e),
      Self::Parse(e) => write!(f, "parse error: {}", e),
      Self::Invalid(msg) => write!(f, "invalid config: {}", msg),
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io(e) => Some(e),
      Self::Parse(e) => Some(e),
      Self::Invalid(_) => None,
    }
  }
}
