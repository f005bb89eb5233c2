//! Messages exchanged with the hosting game.

use bevy::prelude::*;

/// A projectile touched a building.
///
/// `point` is in the building's local frame: origin at the sprite center,
/// Y+ up. Each message is one impact.
#[derive(bevy::prelude::Message, Clone, Copy, Debug, PartialEq)]
pub struct ProjectileContact {
  pub building: Entity,
  pub point: Vec2,
}

impl ProjectileContact {
  pub fn new(building: Entity, point: Vec2) -> Self {
    Self { building, point }
  }
}

/// A building's integrity fell to the collapse threshold.
///
/// Sent once per building. The building entity is left in place; removing it
/// is up to the receiver.
#[derive(bevy::prelude::Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildingCollapsed {
  pub building: Entity,
}
