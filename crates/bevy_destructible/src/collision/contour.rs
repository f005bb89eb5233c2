//! Marching squares over an opacity mask.
//!
//! Walks every 2x2 block of mask samples, emits the boundary segments for that
//! block, then stitches the segments into closed polylines.

use std::collections::HashMap;

use bevy::math::Vec2;

/// Boundary segment inside one marching cell, in cell-local units [0, 1].
pub type EdgeSegment = ((f32, f32), (f32, f32));

/// Segments emitted for each of the 16 corner configurations.
///
/// Corner bits:
///   - bit 0 (1): top-left (tl)
///   - bit 1 (2): top-right (tr)
///   - bit 2 (4): bottom-left (bl)
///   - bit 3 (8): bottom-right (br)
///
/// Cell layout (Y+ up):
///   (0,1)----(0.5,1)----(1,1)
///     |                   |
///   (0,0.5)            (1,0.5)
///     |                   |
///   (0,0)----(0.5,0)----(1,0)
///
/// Saddle cases (6 and 9) join the two solid corners through the cell, so
/// diagonally touching pixels trace a single loop.
pub const EDGE_TABLE: [&[EdgeSegment]; 16] = [
  &[],
  &[((0.0, 0.5), (0.5, 1.0))],
  &[((0.5, 1.0), (1.0, 0.5))],
  &[((0.0, 0.5), (1.0, 0.5))],
  &[((0.5, 0.0), (0.0, 0.5))],
  &[((0.5, 0.0), (0.5, 1.0))],
  &[((0.0, 0.5), (0.5, 1.0)), ((0.5, 0.0), (1.0, 0.5))],
  &[((0.5, 0.0), (1.0, 0.5))],
  &[((1.0, 0.5), (0.5, 0.0))],
  &[((0.0, 0.5), (0.5, 0.0)), ((0.5, 1.0), (1.0, 0.5))],
  &[((0.5, 1.0), (0.5, 0.0))],
  &[((0.0, 0.5), (0.5, 0.0))],
  &[((1.0, 0.5), (0.0, 0.5))],
  &[((0.5, 1.0), (1.0, 0.5))],
  &[((0.0, 0.5), (0.5, 1.0))],
  &[],
];

/// Emits marching-squares boundary segments for a `width x height` sample
/// grid.
///
/// `solid(x, y)` reports whether the sample at grid point (x, y) is inside the
/// shape, with y growing upward. Segment endpoints are returned in grid units
/// multiplied by `scale`. Callers should pad the grid with an empty border so
/// every contour closes.
pub fn extract_marching_segments<F>(
  width: usize,
  height: usize,
  solid: F,
  scale: f32,
) -> Vec<(Vec2, Vec2)>
where
  F: Fn(usize, usize) -> bool,
{
  let mut segments = Vec::new();
  if width < 2 || height < 2 {
    return segments;
  }

  for cy in 0..height - 1 {
    for cx in 0..width - 1 {
      let bl = solid(cx, cy);
      let br = solid(cx + 1, cy);
      let tl = solid(cx, cy + 1);
      let tr = solid(cx + 1, cy + 1);

      let case = (tl as usize) | ((tr as usize) << 1) | ((bl as usize) << 2) | ((br as usize) << 3);

      for &((x1, y1), (x2, y2)) in EDGE_TABLE[case] {
        let start = Vec2::new(cx as f32 + x1, cy as f32 + y1) * scale;
        let end = Vec2::new(cx as f32 + x2, cy as f32 + y2) * scale;
        segments.push((start, end));
      }
    }
  }

  segments
}

/// Snaps a point to integer grid for robust endpoint matching.
///
/// Segment endpoints sit on half-cell positions, so doubling and rounding
/// gives exact integer keys.
pub fn grid_key(v: Vec2) -> (i32, i32) {
  ((v.x * 2.0).round() as i32, (v.y * 2.0).round() as i32)
}

/// Maps each endpoint key to the segments touching it, as
/// (segment_index, is_start_endpoint).
fn build_adjacency_map(segments: &[(Vec2, Vec2)]) -> HashMap<(i32, i32), Vec<(usize, bool)>> {
  let mut adjacency: HashMap<(i32, i32), Vec<(usize, bool)>> = HashMap::new();
  for (i, (start, end)) in segments.iter().enumerate() {
    adjacency
      .entry(grid_key(*start))
      .or_default()
      .push((i, true));
    adjacency
      .entry(grid_key(*end))
      .or_default()
      .push((i, false));
  }
  adjacency
}

/// Logs endpoints with a single segment attached (debug builds only).
///
/// A padded mask never produces these; seeing one means the mask border was
/// not cleared.
#[cfg(debug_assertions)]
fn log_solo_endpoints(adjacency: &HashMap<(i32, i32), Vec<(usize, bool)>>, segment_count: usize) {
  let solo: Vec<_> = adjacency
    .iter()
    .filter(|(_, entries)| entries.len() == 1)
    .map(|((x, y), _)| (*x as f32 / 2.0, *y as f32 / 2.0))
    .collect();

  if !solo.is_empty() {
    log::debug!(
      "connect_segments: {} segments, {} open endpoints, first at {:?}",
      segment_count,
      solo.len(),
      &solo[..solo.len().min(5)]
    );
  }
}

/// Follows connected segments from `start_idx` and returns the visited
/// vertices, dropping the repeated closing vertex of a loop.
fn traverse_polyline(
  segments: &[(Vec2, Vec2)],
  adjacency: &HashMap<(i32, i32), Vec<(usize, bool)>>,
  used: &mut [bool],
  start_idx: usize,
) -> Vec<Vec2> {
  let (first_start, first_end) = segments[start_idx];
  used[start_idx] = true;
  let mut polyline = vec![first_start, first_end];
  let mut tip = first_end;

  while let Some((idx, is_start)) = adjacency
    .get(&grid_key(tip))
    .and_then(|neighbors| neighbors.iter().find(|(idx, _)| !used[*idx]).copied())
  {
    used[idx] = true;
    let (seg_start, seg_end) = segments[idx];
    tip = if is_start { seg_end } else { seg_start };
    polyline.push(tip);
  }

  if polyline.len() >= 4 && grid_key(polyline[0]) == grid_key(tip) {
    polyline.pop();
  }

  polyline
}

/// Connects edge segments into closed polylines.
///
/// Polylines with fewer than three vertices are discarded.
pub fn connect_segments(segments: Vec<(Vec2, Vec2)>) -> Vec<Vec<Vec2>> {
  if segments.is_empty() {
    return vec![];
  }

  let adjacency = build_adjacency_map(&segments);

  #[cfg(debug_assertions)]
  log_solo_endpoints(&adjacency, segments.len());

  let mut used = vec![false; segments.len()];
  let mut polylines = Vec::new();

  for start_idx in 0..segments.len() {
    if used[start_idx] {
      continue;
    }

    let polyline = traverse_polyline(&segments, &adjacency, &mut used, start_idx);
    if polyline.len() >= 3 {
      polylines.push(polyline);
    }
  }

  polylines
}
