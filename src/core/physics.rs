use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::config::SkylineConfig;

/// Downward acceleration in pixels per second squared.
#[derive(Resource, Clone, Copy, Debug)]
pub struct GravityConfig {
  pub value: f32,
}

pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().with_length_unit(50.0))
      .add_systems(Startup, setup_gravity)
      .add_systems(Update, apply_gravity);
  }
}

fn setup_gravity(mut commands: Commands, config: Res<SkylineConfig>) {
  commands.insert_resource(GravityConfig {
    value: config.physics.gravity,
  });
}

/// Pushes the configured gravity into newly created rapier contexts.
fn apply_gravity(
  gravity: Option<Res<GravityConfig>>,
  mut contexts: Query<&mut RapierConfiguration, Added<RapierConfiguration>>,
) {
  let Some(gravity) = gravity else {
    return;
  };
  for mut rapier in &mut contexts {
    rapier.gravity = Vec2::new(0.0, -gravity.value);
  }
}
