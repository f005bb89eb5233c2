//! Impact carving for building rasters.
//!
//! An impact erases a fixed-size ellipse around the hit point. Carving reads
//! the current raster, so repeated hits compound.
//!
//! # Coordinate Conversion
//!
//! Hit points arrive in the building's local frame: origin at the sprite
//! center, Y+ up. The raster is indexed from its top-left corner with Y+ down.
//! [`to_canvas`] maps between the two as `(x + w/2, |y - h/2|)`.
//!
//! # Parallelization
//!
//! Rows inside the ellipse's bounding box are carved in parallel via rayon.

use bevy::math::Vec2;
use rayon::prelude::*;

use crate::primitives::{Raster, Rect};
use crate::render::CLEAR;

/// Width and height of the blast ellipse, in pixels.
pub const BLAST_SIZE: Vec2 = Vec2::splat(64.0);

/// Outcome of carving one impact into a raster.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactCarve {
  /// Hit point in raster coordinates (top-left origin, Y+ down).
  pub canvas_point: Vec2,
  /// Pixels that went from opaque to transparent.
  pub erased: usize,
}

/// Converts a building-local point to raster coordinates.
#[inline]
pub fn to_canvas(point: Vec2, width: u32, height: u32) -> Vec2 {
  Vec2::new(
    point.x + width as f32 / 2.0,
    (point.y - height as f32 / 2.0).abs(),
  )
}

/// Carves a [`BLAST_SIZE`] hole centered on a building-local point.
///
/// Never fails: points off the raster, or non-finite ones, carve nothing.
pub fn apply_impact(raster: &mut Raster, point: Vec2) -> ImpactCarve {
  let canvas_point = to_canvas(point, raster.width(), raster.height());
  let erased = carve_ellipse(raster, canvas_point, BLAST_SIZE);
  ImpactCarve {
    canvas_point,
    erased,
  }
}

/// Clears every pixel whose center lies inside the axis-aligned ellipse of the
/// given size centered at `center` (raster coordinates).
///
/// Returns the number of pixels that were opaque before the call. The ellipse
/// is clipped to the raster.
pub fn carve_ellipse(raster: &mut Raster, center: Vec2, size: Vec2) -> usize {
  if !center.is_finite() || size.min_element() <= 0.0 {
    return 0;
  }

  let radii = size / 2.0;
  let min = (center - radii).floor();
  let max = (center + radii).ceil();
  let bounds = Rect::clip_span(
    (min.x as i64, min.y as i64),
    (max.x as i64, max.y as i64),
    raster.width(),
    raster.height(),
  );
  if bounds.is_empty() {
    return 0;
  }

  let width = raster.width() as usize;
  let first = bounds.y as usize * width;
  let last = (bounds.y + bounds.height) as usize * width;
  let columns = bounds.x..bounds.x + bounds.width;

  raster.as_slice_mut()[first..last]
    .par_chunks_mut(width)
    .enumerate()
    .map(|(row, pixels)| {
      let dy = ((bounds.y as usize + row) as f32 + 0.5 - center.y) / radii.y;
      let mut erased = 0;
      for x in columns.clone() {
        let dx = (x as f32 + 0.5 - center.x) / radii.x;
        if dx * dx + dy * dy > 1.0 {
          continue;
        }
        let pixel = &mut pixels[x as usize];
        if pixel.alpha > 0 {
          erased += 1;
        }
        *pixel = CLEAR;
      }
      erased
    })
    .sum()
}
