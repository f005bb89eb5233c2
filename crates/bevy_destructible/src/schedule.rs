//! Shared schedule labels for destructible building systems.
//!
//! All systems run in [`Update`] within one of the two [`DestructibleSet`]
//! phases, chained in order:
//!
//! ```text
//! Impacts → Sync
//! ```
//!
//! # Usage
//!
//! ```ignore
//! app.add_systems(Update, fire_projectiles.before(DestructibleSet::Impacts));
//! ```

use bevy::prelude::*;

/// System sets for the building damage loop.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DestructibleSet {
  /// Contact routing, carving, collapse detection.
  Impacts,
  /// Texture upload and collider replacement for changed buildings.
  Sync,
}
