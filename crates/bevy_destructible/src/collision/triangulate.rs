//! Contour triangulation using Constrained Delaunay Triangulation (CDT).
//!
//! All contours of a building go into one CDT so that carved holes become
//! constrained boundaries instead of being filled in by their own polygon.
//! Faces are kept under the even-odd rule.

use bevy::math::Vec2;
use spade::handles::FixedVertexHandle;
use spade::{ConstrainedDelaunayTriangulation, Point2, Triangulation};

/// A triangle represented by three vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
  pub a: usize,
  pub b: usize,
  pub c: usize,
}

/// Vertices plus the triangles that index into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
  pub vertices: Vec<Vec2>,
  pub triangles: Vec<Triangle>,
}

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Inserts one closed contour and constrains its edges.
///
/// Edges that would cross an already constrained edge are skipped; that only
/// happens when simplification pulled two contours into each other, and the
/// even-odd face filter still classifies the surrounding faces.
fn insert_contour(cdt: &mut Cdt, contour: &[Vec2]) -> usize {
  let handles: Vec<FixedVertexHandle> = contour
    .iter()
    .filter_map(|v| cdt.insert(Point2::new(v.x as f64, v.y as f64)).ok())
    .collect();

  let mut skipped = 0;
  for i in 0..handles.len() {
    let from = handles[i];
    let to = handles[(i + 1) % handles.len()];
    if from == to {
      continue;
    }
    if cdt.can_add_constraint(from, to) {
      cdt.add_constraint(from, to);
    } else {
      skipped += 1;
    }
  }
  skipped
}

/// Triangulates the region enclosed by a set of closed contours.
///
/// A point is inside the region when it is enclosed by an odd number of
/// contours, so outer boundaries and the holes cut into them may be passed in
/// any order and winding. Degenerate (zero-area) faces are dropped.
pub fn triangulate_contours(contours: &[Vec<Vec2>]) -> TriangleMesh {
  let contours: Vec<&Vec<Vec2>> = contours.iter().filter(|c| c.len() >= 3).collect();
  if contours.is_empty() {
    return TriangleMesh::default();
  }

  let mut cdt = Cdt::new();
  let skipped: usize = contours.iter().map(|c| insert_contour(&mut cdt, c)).sum();
  if skipped > 0 {
    log::debug!("triangulate_contours: skipped {skipped} crossing constraint edges");
  }

  let vertices: Vec<Vec2> = cdt
    .vertices()
    .map(|v| {
      let p = v.position();
      Vec2::new(p.x as f32, p.y as f32)
    })
    .collect();

  let mut triangles = Vec::new();
  for face in cdt.inner_faces() {
    let [a, b, c] = face.vertices().map(|v| v.fix().index());
    let (pa, pb, pc) = (vertices[a], vertices[b], vertices[c]);

    if (pb - pa).perp_dot(pc - pa).abs() <= f32::EPSILON {
      continue;
    }

    let centroid = (pa + pb + pc) / 3.0;
    let enclosing = contours
      .iter()
      .filter(|contour| point_in_polygon(centroid, contour))
      .count();
    if enclosing % 2 == 1 {
      triangles.push(Triangle { a, b, c });
    }
  }

  TriangleMesh {
    vertices,
    triangles,
  }
}

/// Triangulates a single simple polygon.
///
/// Returns indices into `polygon`. Returns empty for fewer than three
/// vertices.
pub fn triangulate_polygon(polygon: &[Vec2]) -> Vec<Triangle> {
  if polygon.len() < 3 {
    return vec![];
  }
  if polygon.len() == 3 {
    return vec![Triangle { a: 0, b: 1, c: 2 }];
  }

  let mesh = triangulate_contours(&[polygon.to_vec()]);

  // CDT vertex order differs from the input; map back by position.
  let index_of = |v: Vec2| polygon.iter().position(|p| p.distance_squared(v) < 1e-8);
  mesh
    .triangles
    .iter()
    .filter_map(|t| {
      Some(Triangle {
        a: index_of(mesh.vertices[t.a])?,
        b: index_of(mesh.vertices[t.b])?,
        c: index_of(mesh.vertices[t.c])?,
      })
    })
    .collect()
}

/// Tests if a point is inside a polygon using the ray casting algorithm.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
  let mut inside = false;
  let n = polygon.len();
  if n < 3 {
    return false;
  }

  let mut j = n - 1;
  for i in 0..n {
    let vi = polygon[i];
    let vj = polygon[j];

    // Check if the ray from point going right crosses this edge
    if ((vi.y > point.y) != (vj.y > point.y))
      && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
    {
      inside = !inside;
    }
    j = i;
  }

  inside
}
