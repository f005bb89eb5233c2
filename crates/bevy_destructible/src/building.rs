//! Destructible building: a raster plus the collision shape derived from it.
//!
//! [`Building`] owns both and keeps them in step. Every mutation goes through
//! [`Building::hit`], which carves the raster and rebuilds the shape before
//! returning, so readers never see a shape older than the pixels.

use bevy::math::Vec2;
use bevy::prelude::Component;
use rand::Rng;

use crate::collision::{CollisionShape, DEFAULT_SIMPLIFICATION_TOLERANCE, resync_with_tolerance};
use crate::damage::apply_impact;
use crate::facade;
use crate::primitives::Raster;

/// Default remaining-integrity fraction at or below which a building counts as
/// collapsed.
pub const DEFAULT_COLLAPSE_THRESHOLD: f32 = 0.02;

/// Error type for building construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildingError {
  /// Width or height is zero.
  EmptyFootprint { width: u32, height: u32 },
}

impl std::fmt::Display for BuildingError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::EmptyFootprint { width, height } => {
        write!(f, "building footprint {}x{} has no area", width, height)
      }
    }
  }
}

impl std::error::Error for BuildingError {}

/// Whether a building is still standing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuildingState {
  #[default]
  Standing,
  /// Integrity fell to the collapse threshold. Terminal.
  Collapsed,
}

/// What a single hit did to a building.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactReport {
  /// Hit point in raster coordinates.
  pub canvas_point: Vec2,
  /// Pixels erased by this hit.
  pub erased: usize,
  /// Opaque pixels left after the hit.
  pub remaining: usize,
  /// True only for the hit that moved the building to
  /// [`BuildingState::Collapsed`].
  pub collapsed: bool,
}

/// A destructible building.
///
/// Also used directly as the ECS component of spawned buildings; systems
/// react to `Changed<Building>` to refresh the sprite texture and collider.
#[derive(Component, Clone, Debug)]
pub struct Building {
  raster: Raster,
  shape: CollisionShape,
  initial_opaque: usize,
  opaque: usize,
  state: BuildingState,
  tolerance: f32,
  collapse_threshold: f32,
}

impl Building {
  /// Creates a building with a freshly painted facade.
  pub fn generate<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    rng: &mut R,
  ) -> Result<Self, BuildingError> {
    check_footprint(width, height)?;
    Self::from_raster(facade::generate(width, height, rng))
  }

  /// Wraps an existing raster.
  ///
  /// Integrity is measured against the raster's opacity at this point.
  pub fn from_raster(raster: Raster) -> Result<Self, BuildingError> {
    Self::from_raster_with(raster, DEFAULT_SIMPLIFICATION_TOLERANCE)
  }

  /// Wraps an existing raster, simplifying its contours with `tolerance`.
  pub fn from_raster_with(raster: Raster, tolerance: f32) -> Result<Self, BuildingError> {
    check_footprint(raster.width(), raster.height())?;
    let opaque = raster.opaque_count();
    let shape = resync_with_tolerance(&raster, tolerance);
    let mut building = Self {
      raster,
      shape,
      initial_opaque: opaque,
      opaque,
      state: BuildingState::Standing,
      tolerance,
      collapse_threshold: DEFAULT_COLLAPSE_THRESHOLD,
    };
    building.update_state();
    Ok(building)
  }

  /// Sets the integrity fraction at or below which the building collapses.
  pub fn with_collapse_threshold(mut self, threshold: f32) -> Self {
    self.collapse_threshold = threshold;
    self.update_state();
    self
  }

  /// Applies a projectile hit at a building-local point.
  ///
  /// Carves the blast hole, rebuilds the collision shape and updates the
  /// building state. Points that miss the raster still rebuild the shape.
  pub fn hit(&mut self, point: Vec2) -> ImpactReport {
    let carve = apply_impact(&mut self.raster, point);
    self.opaque -= carve.erased;
    self.shape = resync_with_tolerance(&self.raster, self.tolerance);

    let was_standing = self.state == BuildingState::Standing;
    self.update_state();

    ImpactReport {
      canvas_point: carve.canvas_point,
      erased: carve.erased,
      remaining: self.opaque,
      collapsed: was_standing && self.state == BuildingState::Collapsed,
    }
  }

  fn update_state(&mut self) {
    if self.opaque == 0 || self.integrity() <= self.collapse_threshold {
      self.state = BuildingState::Collapsed;
    }
  }

  #[inline]
  pub fn width(&self) -> u32 {
    self.raster.width()
  }

  #[inline]
  pub fn height(&self) -> u32 {
    self.raster.height()
  }

  /// Size in pixels, as used for the sprite.
  pub fn size(&self) -> Vec2 {
    Vec2::new(self.width() as f32, self.height() as f32)
  }

  pub fn raster(&self) -> &Raster {
    &self.raster
  }

  pub fn shape(&self) -> &CollisionShape {
    &self.shape
  }

  pub fn state(&self) -> BuildingState {
    self.state
  }

  pub fn is_collapsed(&self) -> bool {
    self.state == BuildingState::Collapsed
  }

  /// Opaque pixels left.
  pub fn opaque_pixels(&self) -> usize {
    self.opaque
  }

  /// Remaining fraction of the opaque pixels the building started with.
  pub fn integrity(&self) -> f32 {
    if self.initial_opaque == 0 {
      return 0.0;
    }
    self.opaque as f32 / self.initial_opaque as f32
  }
}

fn check_footprint(width: u32, height: u32) -> Result<(), BuildingError> {
  if width == 0 || height == 0 {
    return Err(BuildingError::EmptyFootprint { width, height });
  }
  Ok(())
}
