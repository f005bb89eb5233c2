use bevy::{prelude::*, window::WindowResolution};
use bevy_destructible::DestructiblePlugin;
use skyline::config::{CONFIG_PATH, SkylineConfig};

fn main() {
  let config = SkylineConfig::load(CONFIG_PATH).expect("Failed to load config");

  let mut app = App::new();

  app
    .add_plugins(
      DefaultPlugins
        .set(ImagePlugin::default_nearest())
        .set(WindowPlugin {
          primary_window: Some(Window {
            resolution: WindowResolution::new(config.window.width, config.window.height),
            title: config.window.title.clone(),
            ..default()
          }),
          ..default()
        }),
    )
    .insert_resource(config.clone())
    .add_plugins(skyline::core::CorePlugin)
    .add_plugins(DestructiblePlugin::new(config.destructible))
    .add_plugins(skyline::world::WorldPlugin);

  app.run();
}
