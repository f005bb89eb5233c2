//! Skyline setup and building lifecycle.

pub mod skyline;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy_destructible::{BuildingCollapsed, DestructibleSet};

pub use skyline::{BuildingSlot, plan_skyline};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, skyline::spawn_skyline)
      .add_systems(Update, despawn_collapsed.after(DestructibleSet::Impacts));
  }
}

/// Removes buildings once they report collapse.
pub fn despawn_collapsed(mut commands: Commands, mut collapsed: MessageReader<BuildingCollapsed>) {
  for message in collapsed.read() {
    info!("building {:?} collapsed", message.building);
    if let Ok(mut entity) = commands.get_entity(message.building) {
      entity.despawn();
    }
  }
}
