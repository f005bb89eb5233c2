//! Spawn command for destructible buildings.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::building::Building;
#[cfg(feature = "rapier2d")]
use crate::collision::physics::building_physics;
use crate::config::DestructibleConfig;
use crate::facade;
use crate::plugin::FacadeRng;
use crate::render::create_texture;

/// Command to spawn a building with a generated facade.
///
/// Uses the shared [`FacadeRng`] when present. A sprite is attached when the
/// app has image assets; the collider follows on the next
/// [`DestructibleSet::Sync`](crate::DestructibleSet::Sync).
///
/// # Example
/// ```ignore
/// fn spawn_tower(mut commands: Commands) {
///     commands.queue(SpawnBuilding::new(UVec2::new(120, 450), Vec2::new(0.0, -75.0)));
/// }
/// ```
pub struct SpawnBuilding {
  /// Footprint in pixels.
  pub size: UVec2,
  /// World position of the building center.
  pub position: Vec2,
}

impl SpawnBuilding {
  pub fn new(size: UVec2, position: Vec2) -> Self {
    Self { size, position }
  }
}

impl bevy::ecs::system::Command for SpawnBuilding {
  fn apply(self, world: &mut World) {
    let config = world
      .get_resource::<DestructibleConfig>()
      .cloned()
      .unwrap_or_default();

    let raster = match world.get_resource_mut::<FacadeRng>() {
      Some(mut rng) => facade::generate(self.size.x, self.size.y, &mut rng.0),
      None => facade::generate(self.size.x, self.size.y, &mut StdRng::from_os_rng()),
    };

    let building = match Building::from_raster_with(raster, config.simplification_tolerance) {
      Ok(building) => building.with_collapse_threshold(config.collapse_threshold),
      Err(err) => {
        error!("SpawnBuilding at {:?}: {}", self.position, err);
        return;
      }
    };

    let texture = world
      .get_resource_mut::<Assets<Image>>()
      .map(|mut images| create_texture(&mut images, building.raster()));
    let size = building.size();

    let mut entity = world.spawn((
      Name::new("building"),
      Transform::from_translation(self.position.extend(0.0)),
      building,
    ));
    if let Some(image) = texture {
      entity.insert(Sprite {
        image,
        custom_size: Some(size),
        ..default()
      });
    }

    #[cfg(feature = "rapier2d")]
    entity.insert(building_physics());

    info!(
      "spawned building {:?} ({}x{}) at {:?}",
      entity.id(),
      self.size.x,
      self.size.y,
      self.position
    );
  }
}
