//! Collision shape derivation from a building raster.
//!
//! Uses marching squares to extract contours from the opacity mask,
//! Douglas-Peucker simplification to reduce vertex count, then triangulates
//! every contour together so carved holes stay open.

use bevy::math::Vec2;

use super::contour::{connect_segments, extract_marching_segments};
use super::simplify::simplify_polylines;
use super::triangulate::{Triangle, TriangleMesh, point_in_polygon, triangulate_contours};
use crate::primitives::Raster;

/// Default Douglas-Peucker tolerance in pixels.
pub const DEFAULT_SIMPLIFICATION_TOLERANCE: f32 = 0.5;

/// Physics-facing geometry of a building, in the building's local frame
/// (origin at the sprite center, Y+ up).
///
/// An empty shape is valid and means nothing is left to collide with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionShape {
  /// Closed boundary loops; outer edges and hole edges alike.
  pub contours: Vec<Vec<Vec2>>,
  /// Triangle decomposition of the enclosed region.
  pub mesh: TriangleMesh,
}

impl CollisionShape {
  /// Returns true if the shape covers no area.
  pub fn is_empty(&self) -> bool {
    self.mesh.triangles.is_empty()
  }

  /// Iterates over the triangles as vertex triples.
  pub fn triangles(&self) -> impl Iterator<Item = [Vec2; 3]> + '_ {
    let vertices = &self.mesh.vertices;
    self
      .mesh
      .triangles
      .iter()
      .map(|&Triangle { a, b, c }| [vertices[a], vertices[b], vertices[c]])
  }

  /// Returns the covered area in square pixels.
  pub fn area(&self) -> f32 {
    self
      .triangles()
      .map(|[a, b, c]| (b - a).perp_dot(c - a).abs() / 2.0)
      .sum()
  }

  /// Returns whether a local-frame point lies inside the shape.
  pub fn contains(&self, point: Vec2) -> bool {
    self
      .triangles()
      .any(|[a, b, c]| triangle_contains(point, a, b, c))
  }

  /// Returns whether a point is enclosed by the contours (even-odd rule).
  ///
  /// Agrees with [`contains`](Self::contains) away from degenerate edges; this
  /// variant does not need the triangulation.
  pub fn contours_contain(&self, point: Vec2) -> bool {
    self
      .contours
      .iter()
      .filter(|contour| point_in_polygon(point, contour))
      .count()
      % 2
      == 1
  }
}

fn triangle_contains(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
  let d1 = (b - a).perp_dot(p - a);
  let d2 = (c - b).perp_dot(p - b);
  let d3 = (a - c).perp_dot(p - c);
  let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
  let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
  !(has_neg && has_pos)
}

/// Derives a fresh collision shape from the raster's opacity mask.
pub fn resync(raster: &Raster) -> CollisionShape {
  resync_with_tolerance(raster, DEFAULT_SIMPLIFICATION_TOLERANCE)
}

/// Derives a collision shape with a custom simplification tolerance.
///
/// The shape is rebuilt from scratch on every call; carving can split or merge
/// boundaries arbitrarily, so nothing from a previous shape is reused.
pub fn resync_with_tolerance(raster: &Raster, tolerance: f32) -> CollisionShape {
  let width = raster.width() as usize;
  let height = raster.height() as usize;

  if raster.opaque_count() == 0 {
    return CollisionShape::default();
  }

  // Sample grid with a 1-pixel empty border so every contour closes. Grid
  // rows count upward from the bottom of the raster.
  let grid_width = width + 2;
  let grid_height = height + 2;
  let solid = |gx: usize, gy: usize| {
    (1..=width).contains(&gx)
      && (1..=height).contains(&gy)
      && raster.is_opaque((gx - 1) as u32, (height - gy) as u32)
  };

  let segments = extract_marching_segments(grid_width, grid_height, solid, 1.0);

  // Grid point (1, 1) is the center of the bottom-left pixel.
  let offset = Vec2::new(-0.5 - width as f32 / 2.0, -0.5 - height as f32 / 2.0);
  let polylines: Vec<Vec<Vec2>> = connect_segments(segments)
    .into_iter()
    .map(|poly| poly.into_iter().map(|v| v + offset).collect())
    .collect();

  let contours = simplify_polylines(polylines, tolerance);
  let mesh = triangulate_contours(&contours);

  log::debug!(
    "resync {}x{}: {} contours, {} triangles",
    width,
    height,
    contours.len(),
    mesh.triangles.len()
  );

  CollisionShape { contours, mesh }
}
