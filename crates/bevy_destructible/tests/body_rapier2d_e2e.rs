//! E2E test for building colliders with rapier2d physics.
//!
//! Checks that buildings get a static compound collider tagged with the
//! building category, that the collider is rebuilt after a hit, and that a
//! projectile overlapping a building is routed into a carve.
//!
//! Run: cargo test -p bevy_destructible --features rapier2d body_rapier2d_e2e

use bevy::prelude::*;
use bevy_destructible::collision::physics::collision_groups;
use bevy_destructible::{
  Building, CollisionCategory, DestructibleConfig, DestructiblePlugin, Projectile,
  ProjectileContact, SpawnBuilding,
};
use bevy_rapier2d::prelude::*;

struct TestHarness {
  app: App,
}

impl TestHarness {
  fn new() -> Self {
    let mut harness = Self::without_physics();
    harness
      .app
      .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().with_length_unit(50.0));
    harness.app.update();
    harness
  }

  /// The plugin with rapier support compiled in, but no rapier physics.
  fn without_physics() -> Self {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::transform::TransformPlugin);
    app.add_plugins(bevy::asset::AssetPlugin::default());
    app.add_plugins(bevy::image::ImagePlugin::default());
    app.add_plugins(bevy::scene::ScenePlugin);
    app.add_plugins(bevy::gizmos::GizmoPlugin);

    app.add_plugins(DestructiblePlugin::new(
      DestructibleConfig::default().with_seed(21),
    ));
    Self { app }
  }

  fn run(&mut self, updates: usize) {
    for _ in 0..updates {
      self.app.update();
    }
  }

  fn spawn_building(&mut self, size: UVec2, position: Vec2) -> Entity {
    self
      .app
      .world_mut()
      .commands()
      .queue(SpawnBuilding::new(size, position));
    self.app.update();

    let mut q = self.app.world_mut().query_filtered::<Entity, With<Building>>();
    q.iter(self.app.world())
      .last()
      .expect("building should be spawned")
  }

  fn collider_area(&self, entity: Entity) -> f32 {
    let collider = self
      .app
      .world()
      .get::<Collider>(entity)
      .expect("building should have a collider");
    let compound = collider.as_compound().expect("collider should be compound");
    compound
      .shapes()
      .filter_map(|(_, _, shape)| match shape {
        ColliderView::Triangle(tri) => {
          let (a, b, c) = (tri.a(), tri.b(), tri.c());
          Some((b - a).perp_dot(c - a).abs() / 2.0)
        }
        _ => None,
      })
      .sum()
  }
}

#[test]
fn building_gets_static_collider_with_building_groups() {
  let mut harness = TestHarness::new();
  let entity = harness.spawn_building(UVec2::new(80, 300), Vec2::ZERO);
  harness.run(2);

  let world = harness.app.world();
  assert_eq!(world.get::<RigidBody>(entity), Some(&RigidBody::Fixed));

  let groups = world.get::<CollisionGroups>(entity).unwrap();
  assert_eq!(*groups, collision_groups(CollisionCategory::BUILDING));
  assert_eq!(groups.filters.bits(), CollisionCategory::PROJECTILE.bits());

  let area = harness.collider_area(entity);
  assert!((area - 80.0 * 300.0).abs() < 300.0, "area {area}");
}

#[test]
fn collider_shrinks_after_hit() {
  let mut harness = TestHarness::new();
  let entity = harness.spawn_building(UVec2::new(120, 300), Vec2::new(100.0, 0.0));
  harness.run(2);
  let before = harness.collider_area(entity);

  harness
    .app
    .world_mut()
    .write_message(ProjectileContact::new(entity, Vec2::ZERO));
  harness.run(2);

  let after = harness.collider_area(entity);
  let building = harness.app.world().get::<Building>(entity).unwrap();
  assert!(after < before - 2500.0, "before {before}, after {after}");
  assert!((after - building.shape().area()).abs() < 1.0);
}

#[test]
fn overlapping_projectile_carves_building() {
  let mut harness = TestHarness::new();
  let entity = harness.spawn_building(UVec2::new(120, 300), Vec2::new(-100.0, 0.0));
  harness.run(2);
  let intact = harness
    .app
    .world()
    .get::<Building>(entity)
    .unwrap()
    .opaque_pixels();

  harness.app.world_mut().spawn((
    Projectile,
    Transform::from_xyz(-90.0, 40.0, 0.0),
    RigidBody::Dynamic,
    Collider::ball(6.0),
    collision_groups(CollisionCategory::PROJECTILE),
    ActiveEvents::COLLISION_EVENTS,
  ));
  harness.run(10);

  let building = harness.app.world().get::<Building>(entity).unwrap();
  assert!(building.opaque_pixels() < intact);
  // Impact landed near local (10, 40): canvas (70, 110).
  assert!(!building.raster().is_opaque(70, 110));
}

#[test]
fn plugin_runs_without_rapier_physics() {
  let mut harness = TestHarness::without_physics();
  harness.app.update();
  let entity = harness.spawn_building(UVec2::new(80, 300), Vec2::ZERO);
  let intact = harness
    .app
    .world()
    .get::<Building>(entity)
    .unwrap()
    .opaque_pixels();

  harness
    .app
    .world_mut()
    .write_message(ProjectileContact::new(entity, Vec2::ZERO));
  harness.run(2);

  let building = harness.app.world().get::<Building>(entity).unwrap();
  assert!(building.opaque_pixels() < intact);
  assert!(harness.app.world().get::<Collider>(entity).is_some());
}
