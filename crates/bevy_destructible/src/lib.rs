//! Destructible pixel buildings for Bevy.
//!
//! Buildings are procedurally painted rasters that projectiles carve holes
//! into. After every hit the collision shape is rebuilt from the raster's
//! opacity mask, so projectiles fly through holes they or others have made.
//!
//! ```ignore
//! app.add_plugins(DestructiblePlugin::new(DestructibleConfig::default().with_seed(7)));
//!
//! fn setup(mut commands: Commands) {
//!     commands.queue(SpawnBuilding::new(UVec2::new(120, 450), Vec2::ZERO));
//! }
//! ```

pub mod building;
pub mod categories;
pub mod collision;
pub mod config;
pub mod damage;
pub mod facade;
pub mod messages;
pub mod plugin;
pub mod primitives;
pub mod render;
pub mod schedule;
pub mod spawn;
pub mod systems;

pub use building::{
  Building, BuildingError, BuildingState, DEFAULT_COLLAPSE_THRESHOLD, ImpactReport,
};
pub use categories::CollisionCategory;
#[cfg(feature = "rapier2d")]
pub use collision::physics::Projectile;
pub use collision::{CollisionShape, resync, resync_with_tolerance};
pub use config::{ConfigError, DestructibleConfig};
pub use damage::{BLAST_SIZE, ImpactCarve, apply_impact, carve_ellipse, to_canvas};
pub use messages::{BuildingCollapsed, ProjectileContact};
pub use plugin::{DestructiblePlugin, FacadeRng};
pub use primitives::{Raster, Rect, Surface};
pub use render::{CLEAR, Rgba, create_texture, hsb, rgb, upload_surface};
pub use schedule::DestructibleSet;
pub use spawn::SpawnBuilding;
