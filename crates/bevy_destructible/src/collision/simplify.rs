//! Douglas-Peucker polyline simplification.
//!
//! Marching squares emits one vertex per half pixel of boundary; a building
//! edge 800 pixels tall would otherwise hand hundreds of collinear vertices
//! to the triangulator.

use bevy::math::Vec2;

/// Simplifies a closed polyline using the Douglas-Peucker algorithm.
///
/// The loop is split at its two most distant vertices so the arbitrary start
/// vertex chosen by contour tracing does not survive as an artifact.
///
/// # Arguments
/// * `polyline` - A closed polyline (last vertex connects back to the first).
/// * `tolerance` - Maximum allowed perpendicular distance from the simplified
///   outline, in pixels.
pub fn douglas_peucker(polyline: &[Vec2], tolerance: f32) -> Vec<Vec2> {
  if polyline.len() <= 3 {
    return polyline.to_vec();
  }

  let (a, b) = find_furthest_pair(polyline);

  // Rotate so the loop starts at `a`, then close it back onto `a`.
  let mut ring: Vec<Vec2> = polyline[a..].iter().chain(&polyline[..a]).copied().collect();
  ring.push(polyline[a]);
  let split = (b + polyline.len() - a) % polyline.len();

  let mut keep = vec![false; ring.len()];
  keep[0] = true;
  keep[split] = true;
  keep[ring.len() - 1] = true;
  mark_open(&ring, 0, split, tolerance * tolerance, &mut keep);
  mark_open(&ring, split, ring.len() - 1, tolerance * tolerance, &mut keep);

  // Drop the duplicated closing vertex.
  ring
    .iter()
    .zip(&keep)
    .take(ring.len() - 1)
    .filter_map(|(&v, &k)| k.then_some(v))
    .collect()
}

/// Simplifies multiple closed polylines, dropping any that degenerate below a
/// triangle.
pub fn simplify_polylines(polylines: Vec<Vec<Vec2>>, tolerance: f32) -> Vec<Vec<Vec2>> {
  polylines
    .into_iter()
    .map(|p| douglas_peucker(&p, tolerance))
    .filter(|p| p.len() >= 3)
    .collect()
}

/// Marks the vertices of the open span `[first, last]` that must be kept.
///
/// Uses an explicit stack rather than recursion; contours of tall buildings
/// can be thousands of vertices long.
fn mark_open(points: &[Vec2], first: usize, last: usize, tolerance_sq: f32, keep: &mut [bool]) {
  let mut stack = vec![(first, last)];

  while let Some((start, end)) = stack.pop() {
    if end <= start + 1 {
      continue;
    }

    let mut max_dist_sq = 0.0f32;
    let mut max_idx = start;
    for i in start + 1..end {
      let dist_sq = perpendicular_distance_squared(points[i], points[start], points[end]);
      if dist_sq > max_dist_sq {
        max_dist_sq = dist_sq;
        max_idx = i;
      }
    }

    if max_dist_sq > tolerance_sq {
      keep[max_idx] = true;
      stack.push((start, max_idx));
      stack.push((max_idx, end));
    }
  }
}

/// Finds the indices of the two furthest-apart points in a polyline.
fn find_furthest_pair(polyline: &[Vec2]) -> (usize, usize) {
  let mut max_dist_sq = 0.0f32;
  let mut best_pair = (0, polyline.len() / 2);

  for i in 0..polyline.len() {
    for j in i + 1..polyline.len() {
      let dist_sq = polyline[i].distance_squared(polyline[j]);
      if dist_sq > max_dist_sq {
        max_dist_sq = dist_sq;
        best_pair = (i, j);
      }
    }
  }

  best_pair
}

/// Squared distance from `point` to the segment `line_start..line_end`.
fn perpendicular_distance_squared(point: Vec2, line_start: Vec2, line_end: Vec2) -> f32 {
  let line_vec = line_end - line_start;
  let line_len_sq = line_vec.length_squared();

  if line_len_sq < 1e-10 {
    return point.distance_squared(line_start);
  }

  let t = ((point - line_start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
  point.distance_squared(line_start + t * line_vec)
}
