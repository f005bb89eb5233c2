//! Gizmo rendering of building collision shapes.

use bevy::prelude::*;

use crate::building::Building;

/// System: Draws every building's collision triangles and contours.
///
/// Triangle edges are green; boundary loops are drawn on top in yellow.
pub fn draw_building_gizmos(buildings: Query<(&Building, &GlobalTransform)>, mut gizmos: Gizmos) {
  let edge_color = Color::srgb(0.2, 0.8, 0.3);
  let contour_color = Color::srgb(0.95, 0.85, 0.2);

  for (building, transform) in &buildings {
    let to_world = |v: Vec2| transform.transform_point(v.extend(0.0)).truncate();
    let shape = building.shape();

    for [a, b, c] in shape.triangles() {
      let (a, b, c) = (to_world(a), to_world(b), to_world(c));
      gizmos.line_2d(a, b, edge_color);
      gizmos.line_2d(b, c, edge_color);
      gizmos.line_2d(c, a, edge_color);
    }

    for contour in &shape.contours {
      let n = contour.len();
      for i in 0..n {
        gizmos.line_2d(
          to_world(contour[i]),
          to_world(contour[(i + 1) % n]),
          contour_color,
        );
      }
    }
  }
}
