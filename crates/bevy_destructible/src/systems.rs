//! Bevy systems driving building damage.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::building::Building;
use crate::messages::{BuildingCollapsed, ProjectileContact};
use crate::render::upload_surface;

/// System: Applies each [`ProjectileContact`] to its building.
///
/// Contacts for entities that are gone or are not buildings are dropped.
pub fn apply_projectile_contacts(
  mut contacts: MessageReader<ProjectileContact>,
  mut buildings: Query<&mut Building>,
  mut collapsed: MessageWriter<BuildingCollapsed>,
) {
  for contact in contacts.read() {
    let Ok(mut building) = buildings.get_mut(contact.building) else {
      debug!("contact for missing building {:?}", contact.building);
      continue;
    };

    let report = building.hit(contact.point);
    debug!(
      "building {:?} hit at {:?}: erased {}, {} left",
      contact.building, report.canvas_point, report.erased, report.remaining
    );

    if report.collapsed {
      info!(
        "building {:?} collapsed ({:.1}% left)",
        contact.building,
        building.integrity() * 100.0
      );
      collapsed.write(BuildingCollapsed {
        building: contact.building,
      });
    }
  }
}

/// System: Uploads changed building rasters to their sprite textures.
pub fn upload_building_textures(
  buildings: Query<(&Building, &Sprite), Changed<Building>>,
  mut images: ResMut<Assets<Image>>,
) {
  for (building, sprite) in &buildings {
    if let Some(image) = images.get_mut(&sprite.image) {
      upload_surface(building.raster(), image);
    }
  }
}
