use std::path::Path;

use bevy::prelude::*;
use bevy_destructible::{ConfigError, DestructibleConfig};
use serde::Deserialize;

/// Default location of the game config, relative to the working directory.
pub const CONFIG_PATH: &str = "assets/config/skyline.config.toml";

#[derive(Resource, Deserialize, Debug, Clone)]
pub struct SkylineConfig {
  pub window: WindowConfig,
  pub camera: CameraConfig,
  pub physics: PhysicsConfig,
  pub skyline: SkylineLayout,
  #[serde(default)]
  pub destructible: DestructibleConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WindowConfig {
  pub width: u32,
  pub height: u32,
  pub title: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CameraConfig {
  pub viewport_width: f32,
  pub viewport_height: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PhysicsConfig {
  pub gravity: f32,
}

/// How buildings are laid out across the scene.
#[derive(Deserialize, Debug, Clone)]
pub struct SkylineLayout {
  /// Layout seed. None = different skyline every run.
  #[serde(default)]
  pub seed: Option<u64>,
  pub width_unit: u32,
  pub width_units_min: u32,
  /// Exclusive.
  pub width_units_max: u32,
  pub height_min: u32,
  /// Exclusive.
  pub height_max: u32,
  pub gap: f32,
  /// Space between the left scene edge and the first building.
  #[serde(default)]
  pub margin: f32,
  pub ground_height: f32,
  pub ground_color: [f32; 3],
}

impl SkylineLayout {
  /// Checks that the random ranges are non-empty and the layout advances.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.width_unit == 0 || self.width_units_min == 0 {
      return Err(ConfigError::Invalid(
        "skyline: width_unit and width_units_min must be at least 1".into(),
      ));
    }
    if self.width_units_min >= self.width_units_max {
      return Err(ConfigError::Invalid(format!(
        "skyline: width_units_min {} must be below width_units_max {}",
        self.width_units_min, self.width_units_max
      )));
    }
    if self.height_min == 0 || self.height_min >= self.height_max {
      return Err(ConfigError::Invalid(format!(
        "skyline: height range {}..{} is empty",
        self.height_min, self.height_max
      )));
    }
    if !(self.gap.is_finite() && self.gap >= 0.0) {
      return Err(ConfigError::Invalid(format!(
        "skyline: gap {} must be a non-negative number",
        self.gap
      )));
    }
    Ok(())
  }
}

impl SkylineConfig {
  pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(text).map_err(ConfigError::Parse)?;
    config.skyline.validate()?;
    config.destructible.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    Self::from_toml_str(&text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SHIPPED: &str = include_str!("../../assets/config/skyline.config.toml");

  #[test]
  fn shipped_config_parses() {
    let config = SkylineConfig::from_toml_str(SHIPPED).unwrap();
    assert_eq!(config.skyline.width_unit, 40);
    assert_eq!(
      (config.skyline.width_units_min, config.skyline.width_units_max),
      (2, 4)
    );
    assert_eq!((config.skyline.height_min, config.skyline.height_max), (300, 600));
    assert_eq!(config.skyline.gap, 2.0);
    assert_eq!(config.destructible.simplification_tolerance, 0.5);
  }

  #[test]
  fn destructible_section_is_optional() {
    let without: String = SHIPPED
      .split("[destructible]")
      .next()
      .unwrap()
      .to_string();
    let config = SkylineConfig::from_toml_str(&without).unwrap();
    assert_eq!(config.destructible, DestructibleConfig::default());
  }

  #[test]
  fn empty_ranges_are_rejected() {
    let inverted = SHIPPED.replace("width_units_max = 4", "width_units_max = 2");
    let err = SkylineConfig::from_toml_str(&inverted).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
    assert!(err.to_string().contains("width_units_min"));

    let flat = SHIPPED.replace("height_max = 600", "height_max = 300");
    assert!(matches!(
      SkylineConfig::from_toml_str(&flat),
      Err(ConfigError::Invalid(_))
    ));
  }

  #[test]
  fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = SkylineConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
  }
}
