//! E2E test for the destructible building plugin in a headless app.
//!
//! Spawns buildings through the command API, delivers contact messages and
//! checks that raster, shape, texture and collapse reporting stay in step.
//!
//! Run: cargo test -p bevy_destructible --test plugin_e2e

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_destructible::{
  Building, BuildingCollapsed, BuildingState, DestructibleConfig, DestructiblePlugin,
  ProjectileContact, SpawnBuilding,
};

#[derive(Resource, Default)]
struct CollapseLog(Vec<Entity>);

fn record_collapses(mut collapsed: MessageReader<BuildingCollapsed>, mut log: ResMut<CollapseLog>) {
  log.0.extend(collapsed.read().map(|m| m.building));
}

struct TestHarness {
  app: App,
}

impl TestHarness {
  fn new(config: DestructibleConfig) -> Self {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(bevy::transform::TransformPlugin);
    app.add_plugins(bevy::asset::AssetPlugin::default());
    app.add_plugins(bevy::image::ImagePlugin::default());

    app.add_plugins(DestructiblePlugin::new(config));

    app.init_resource::<CollapseLog>();
    app.add_systems(Update, record_collapses.after(bevy_destructible::DestructibleSet::Impacts));

    app.update();
    Self { app }
  }

  fn spawn(&mut self, size: UVec2, position: Vec2) {
    self
      .app
      .world_mut()
      .commands()
      .queue(SpawnBuilding::new(size, position));
    self.app.update();
  }

  fn buildings(&mut self) -> Vec<Entity> {
    let mut q = self.app.world_mut().query_filtered::<Entity, With<Building>>();
    q.iter(self.app.world()).collect()
  }

  fn building(&self, entity: Entity) -> &Building {
    self.app.world().get::<Building>(entity).unwrap()
  }

  fn hit(&mut self, entity: Entity, point: Vec2) {
    self
      .app
      .world_mut()
      .write_message(ProjectileContact::new(entity, point));
    self.app.update();
  }

  fn texture_bytes(&self, entity: Entity) -> Vec<u8> {
    let sprite = self.app.world().get::<Sprite>(entity).unwrap();
    let images = self.app.world().resource::<Assets<Image>>();
    images
      .get(&sprite.image)
      .and_then(|image| image.data.clone())
      .unwrap()
  }

  fn collapses(&self) -> &[Entity] {
    &self.app.world().resource::<CollapseLog>().0
  }
}

#[test]
fn spawned_building_has_texture_and_shape() {
  let mut harness = TestHarness::new(DestructibleConfig::default().with_seed(1));
  harness.spawn(UVec2::new(120, 300), Vec2::new(-200.0, -150.0));

  let buildings = harness.buildings();
  assert_eq!(buildings.len(), 1);
  let entity = buildings[0];

  let building = harness.building(entity);
  assert_eq!((building.width(), building.height()), (120, 300));
  assert!(!building.shape().is_empty());
  let raster_bytes = building.raster().as_bytes().to_vec();

  let transform = harness.app.world().get::<Transform>(entity).unwrap();
  assert_eq!(transform.translation, Vec3::new(-200.0, -150.0, 0.0));

  let name = harness.app.world().get::<Name>(entity).unwrap();
  assert_eq!(name.as_str(), "building");

  assert_eq!(harness.texture_bytes(entity), raster_bytes);
}

#[test]
fn contact_carves_and_updates_texture() {
  let mut harness = TestHarness::new(DestructibleConfig::default().with_seed(2));
  harness.spawn(UVec2::new(120, 300), Vec2::ZERO);
  let entity = harness.buildings()[0];

  harness.hit(entity, Vec2::new(0.0, 50.0));

  let building = harness.building(entity);
  assert!(building.opaque_pixels() < 120 * 300);
  assert!(!building.shape().contains(Vec2::new(0.0, 50.0)));
  assert_eq!(building.state(), BuildingState::Standing);

  let raster_bytes = building.raster().as_bytes().to_vec();
  assert_eq!(harness.texture_bytes(entity), raster_bytes);
  // Canvas point (60, 100) is transparent in the uploaded texture.
  let offset = (100 * 120 + 60) * 4;
  assert_eq!(harness.texture_bytes(entity)[offset + 3], 0);
}

#[test]
fn collapse_is_reported_once() {
  let mut harness =
    TestHarness::new(DestructibleConfig::default().with_seed(3).with_collapse_threshold(0.5));
  harness.spawn(UVec2::new(64, 64), Vec2::ZERO);
  let entity = harness.buildings()[0];

  harness.hit(entity, Vec2::ZERO);
  assert_eq!(harness.collapses(), &[entity]);
  assert!(harness.building(entity).is_collapsed());

  harness.hit(entity, Vec2::new(-30.0, 30.0));
  assert_eq!(harness.collapses().len(), 1);
}

#[test]
fn contact_for_despawned_building_is_ignored() {
  let mut harness = TestHarness::new(DestructibleConfig::default().with_seed(4));
  harness.spawn(UVec2::new(80, 300), Vec2::ZERO);
  let entity = harness.buildings()[0];

  harness.app.world_mut().despawn(entity);
  harness.hit(entity, Vec2::ZERO);
  assert!(harness.buildings().is_empty());
}

#[test]
fn empty_footprint_spawns_nothing() {
  let mut harness = TestHarness::new(DestructibleConfig::default().with_seed(5));
  harness.spawn(UVec2::new(0, 300), Vec2::ZERO);
  assert!(harness.buildings().is_empty());
}

#[test]
fn seeded_plugin_paints_the_same_skyline() {
  let paint = |seed| {
    let mut harness = TestHarness::new(DestructibleConfig::default().with_seed(seed));
    harness.spawn(UVec2::new(80, 300), Vec2::ZERO);
    let entity = harness.buildings()[0];
    harness.building(entity).raster().clone()
  };
  assert_eq!(paint(11), paint(11));
}
