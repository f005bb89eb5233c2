//! E2E test for the skyline level: layout at startup and collapse cleanup.
//!
//! Run: cargo test --test skyline_e2e

use bevy::prelude::*;
use bevy_destructible::{Building, DestructiblePlugin, ProjectileContact};
use skyline::config::SkylineConfig;
use skyline::world::WorldPlugin;

const CONFIG: &str = include_str!("../assets/config/skyline.config.toml");

fn app(seed: u64, collapse_threshold: f32) -> App {
  let mut config = SkylineConfig::from_toml_str(CONFIG).unwrap();
  config.skyline.seed = Some(seed);
  config.destructible = config
    .destructible
    .with_seed(seed)
    .with_collapse_threshold(collapse_threshold);

  let mut app = App::new();
  app.add_plugins(MinimalPlugins);
  app.add_plugins(bevy::transform::TransformPlugin);
  app.add_plugins(bevy::asset::AssetPlugin::default());
  app.add_plugins(bevy::image::ImagePlugin::default());
  app.insert_resource(config.clone());
  app.add_plugins(DestructiblePlugin::new(config.destructible));
  app.add_plugins(WorldPlugin);
  app.update();
  app
}

fn buildings(app: &mut App) -> Vec<(Entity, Building)> {
  let mut q = app.world_mut().query::<(Entity, &Building)>();
  q.iter(app.world()).map(|(e, b)| (e, b.clone())).collect()
}

#[test]
fn startup_lays_out_the_skyline() {
  let mut app = app(3, 0.02);
  let buildings = buildings(&mut app);
  assert!(buildings.len() >= 7, "1024 px of 80..120 px buildings");

  for (_, building) in &buildings {
    assert!(building.width() == 80 || building.width() == 120);
    assert!((300..600).contains(&building.height()));
  }

  let mut ground = app.world_mut().query::<&Name>();
  assert!(ground.iter(app.world()).any(|name| name.as_str() == "ground"));
}

#[test]
fn collapsed_building_is_despawned() {
  // Any blast through a building collapses it at this threshold.
  let mut app = app(5, 0.99);
  let (target, _) = buildings(&mut app)[0];
  let before = buildings(&mut app).len();

  app
    .world_mut()
    .write_message(ProjectileContact::new(target, Vec2::ZERO));
  app.update();
  app.update();

  assert!(app.world().get_entity(target).is_err());
  assert_eq!(buildings(&mut app).len(), before - 1);
}
