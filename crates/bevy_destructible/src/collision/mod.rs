//! Collision shapes for destructible buildings.
//!
//! A building's collision shape is derived from its raster's opacity mask and
//! rebuilt from scratch after every change:
//! 1. Marching squares traces the boundary between opaque and clear pixels
//! 2. Segments are stitched into closed loops (outer edges and holes)
//! 3. Douglas-Peucker drops vertices within half a pixel of the outline
//! 4. All loops are triangulated together; holes stay open
//!
//! The result is expressed in the building's local frame (origin at the
//! sprite center, Y+ up), which is also the collider's frame.
//!
//! # Usage
//!
//! ```ignore
//! let shape = resync(building.raster());
//! if shape.contains(local_point) {
//!     // still solid here
//! }
//! ```

mod contour;
#[cfg(feature = "visual_debug")]
mod debug;
mod shape;
mod simplify;
mod triangulate;

#[cfg(feature = "rapier2d")]
pub mod physics;

pub use contour::{EDGE_TABLE, connect_segments, extract_marching_segments, grid_key};
#[cfg(feature = "visual_debug")]
pub use debug::draw_building_gizmos;
pub use shape::{CollisionShape, DEFAULT_SIMPLIFICATION_TOLERANCE, resync, resync_with_tolerance};
pub use simplify::{douglas_peucker, simplify_polylines};
pub use triangulate::{
  Triangle, TriangleMesh, point_in_polygon, triangulate_contours, triangulate_polygon,
};
