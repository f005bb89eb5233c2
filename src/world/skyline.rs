use bevy::prelude::*;
use bevy_destructible::SpawnBuilding;
use bevy_rapier2d::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

use bevy_destructible::CollisionCategory;
use bevy_destructible::collision::physics::collision_groups;

use crate::config::{SkylineConfig, SkylineLayout};

/// Footprint and world position of one building in the skyline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildingSlot {
  pub size: UVec2,
  /// Center of the building.
  pub position: Vec2,
}

/// Lays buildings out left to right across the scene, standing on `floor_y`.
///
/// Each building is a whole number of width units wide with a random height.
/// Buildings are added until the scene's right edge is reached; the last one
/// may overhang it.
pub fn plan_skyline<R: Rng + ?Sized>(
  layout: &SkylineLayout,
  scene_width: f32,
  floor_y: f32,
  rng: &mut R,
) -> Vec<BuildingSlot> {
  let mut slots = Vec::new();
  let right = scene_width / 2.0;
  let mut x = -right + layout.margin;

  while x < right {
    let width = rng.random_range(layout.width_units_min..layout.width_units_max) * layout.width_unit;
    let height = rng.random_range(layout.height_min..layout.height_max);
    let size = UVec2::new(width, height);

    slots.push(BuildingSlot {
      size,
      position: Vec2::new(x + width as f32 / 2.0, floor_y + height as f32 / 2.0),
    });
    x += width as f32 + layout.gap;
  }

  slots
}

/// Spawns the ground strip and queues one building per skyline slot.
pub fn spawn_skyline(mut commands: Commands, config: Res<SkylineConfig>) {
  let layout = &config.skyline;
  let scene_width = config.camera.viewport_width;
  let floor_y = -config.camera.viewport_height / 2.0 + layout.ground_height;

  // Rapier cuboid uses half-extents
  let [r, g, b] = layout.ground_color;
  commands.spawn((
    Name::new("ground"),
    Sprite {
      color: Color::srgb(r, g, b),
      custom_size: Some(Vec2::new(scene_width, layout.ground_height)),
      ..default()
    },
    Transform::from_xyz(0.0, floor_y - layout.ground_height / 2.0, -1.0),
    RigidBody::Fixed,
    Collider::cuboid(scene_width / 2.0, layout.ground_height / 2.0),
    collision_groups(CollisionCategory::GROUND),
  ));

  let mut rng = match layout.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_os_rng(),
  };
  let slots = plan_skyline(layout, scene_width, floor_y, &mut rng);
  info!("skyline: {} buildings", slots.len());

  for slot in slots {
    commands.queue(SpawnBuilding::new(slot.size, slot.position));
  }
}
