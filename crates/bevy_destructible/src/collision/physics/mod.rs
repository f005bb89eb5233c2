//! Physics engine integration for building collision shapes.
//!
//! Provides optional rapier2d support behind the `rapier2d` feature:
//!
//! ```toml
//! bevy_destructible = { version = "...", features = ["rapier2d"] }
//! ```

pub mod rapier;

use bevy::prelude::*;

pub use rapier::{
  building_physics, collider_from_shape, collision_groups, forward_rapier_contacts,
  sync_building_colliders,
};

/// Marker for projectile bodies.
///
/// Rapier contacts between a `Projectile` and a
/// [`Building`](crate::Building) become
/// [`ProjectileContact`](crate::ProjectileContact) messages.
#[derive(Component, Default, Clone, Copy, Debug)]
pub struct Projectile;
