//! Plugin wiring for destructible buildings.

#[cfg(feature = "rapier2d")]
use bevy::ecs::message::Messages;
use bevy::prelude::*;
#[cfg(feature = "rapier2d")]
use bevy_rapier2d::prelude::CollisionEvent;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[cfg(feature = "visual_debug")]
use crate::collision::draw_building_gizmos;
#[cfg(feature = "rapier2d")]
use crate::collision::physics::{forward_rapier_contacts, sync_building_colliders};
use crate::config::DestructibleConfig;
use crate::messages::{BuildingCollapsed, ProjectileContact};
use crate::schedule::DestructibleSet;
use crate::systems::{apply_projectile_contacts, upload_building_textures};

/// Random source for facade generation, shared by all spawns.
#[derive(Resource)]
pub struct FacadeRng(pub StdRng);

impl FacadeRng {
  /// Seeds from `seed`, or from the OS when `None`.
  pub fn from_seed(seed: Option<u64>) -> Self {
    match seed {
      Some(seed) => Self(StdRng::seed_from_u64(seed)),
      None => Self(StdRng::from_os_rng()),
    }
  }
}

/// Plugin for destructible buildings: impact handling, texture upload and
/// (with `rapier2d`) collider sync and contact routing.
///
/// Spawn buildings with [`SpawnBuilding`](crate::SpawnBuilding) and report hits
/// with [`ProjectileContact`] messages.
#[derive(Default)]
pub struct DestructiblePlugin {
  pub config: DestructibleConfig,
}

impl DestructiblePlugin {
  pub fn new(config: DestructibleConfig) -> Self {
    Self { config }
  }
}

impl Plugin for DestructiblePlugin {
  fn build(&self, app: &mut App) {
    app
      .insert_resource(FacadeRng::from_seed(self.config.seed))
      .insert_resource(self.config.clone())
      .add_message::<ProjectileContact>()
      .add_message::<BuildingCollapsed>()
      .configure_sets(
        Update,
        (DestructibleSet::Impacts, DestructibleSet::Sync).chain(),
      );

    app.add_systems(
      Update,
      apply_projectile_contacts.in_set(DestructibleSet::Impacts),
    );

    // Texture upload (only when image assets exist)
    app.add_systems(
      Update,
      upload_building_textures
        .run_if(resource_exists::<Assets<Image>>)
        .in_set(DestructibleSet::Sync),
    );

    #[cfg(feature = "rapier2d")]
    app.add_systems(
      Update,
      (
        // CollisionEvent is only registered by RapierPhysicsPlugin
        forward_rapier_contacts
          .run_if(resource_exists::<Messages<CollisionEvent>>)
          .before(apply_projectile_contacts)
          .in_set(DestructibleSet::Impacts),
        sync_building_colliders.in_set(DestructibleSet::Sync),
      ),
    );

    // Debug collision gizmos (only when gizmos are available)
    #[cfg(feature = "visual_debug")]
    app.add_systems(
      PostUpdate,
      draw_building_gizmos.run_if(resource_exists::<bevy::gizmos::config::GizmoConfigStore>),
    );
  }
}
