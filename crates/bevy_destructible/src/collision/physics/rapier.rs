//! rapier2d colliders for buildings.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::Projectile;
use crate::building::Building;
use crate::categories::CollisionCategory;
use crate::collision::CollisionShape;
use crate::messages::ProjectileContact;

/// Builds a compound collider from a collision shape.
///
/// Returns None if the shape has no non-degenerate triangles.
pub fn collider_from_shape(shape: &CollisionShape) -> Option<Collider> {
  let shapes: Vec<(Vec2, f32, Collider)> = shape
    .triangles()
    .filter_map(|[a, b, c]| {
      // Skip degenerate triangles that crash parry2d's BVH
      let cross = (b - a).perp_dot(c - a);
      if cross.abs() > f32::EPSILON {
        Some((Vec2::ZERO, 0.0, Collider::triangle(a, b, c)))
      } else {
        None
      }
    })
    .collect();

  if shapes.is_empty() {
    return None;
  }

  Some(Collider::compound(shapes))
}

/// Rapier collision groups for a category: member of itself, filtering
/// against its contact mask.
pub fn collision_groups(category: CollisionCategory) -> CollisionGroups {
  CollisionGroups::new(
    Group::from_bits_truncate(category.bits()),
    Group::from_bits_truncate(category.contact_mask().bits()),
  )
}

/// Static body components for a building. The collider itself is added by
/// [`sync_building_colliders`].
pub fn building_physics() -> impl Bundle {
  (
    RigidBody::Fixed,
    collision_groups(CollisionCategory::BUILDING),
    ActiveEvents::COLLISION_EVENTS,
  )
}

/// System: Replaces the collider of every building whose shape changed.
///
/// A building with nothing left to collide with loses its collider.
pub fn sync_building_colliders(
  mut commands: Commands,
  buildings: Query<(Entity, &Building), Changed<Building>>,
) {
  for (entity, building) in &buildings {
    match collider_from_shape(building.shape()) {
      Some(collider) => {
        commands.entity(entity).insert(collider);
      }
      None => {
        debug!("building {:?} has no collision geometry left", entity);
        commands.entity(entity).remove::<Collider>();
      }
    }
  }
}

/// System: Turns projectile/building contacts into [`ProjectileContact`]
/// messages.
///
/// The impact point is the projectile's position in the building's local
/// frame.
pub fn forward_rapier_contacts(
  mut collisions: MessageReader<CollisionEvent>,
  projectiles: Query<&GlobalTransform, With<Projectile>>,
  buildings: Query<&GlobalTransform, With<Building>>,
  mut contacts: MessageWriter<ProjectileContact>,
) {
  for event in collisions.read() {
    let CollisionEvent::Started(a, b, _) = *event else {
      continue;
    };

    let pair = if buildings.contains(a) && projectiles.contains(b) {
      (a, b)
    } else if buildings.contains(b) && projectiles.contains(a) {
      (b, a)
    } else {
      continue;
    };
    let (building, projectile) = pair;

    let (Ok(building_transform), Ok(projectile_transform)) =
      (buildings.get(building), projectiles.get(projectile))
    else {
      continue;
    };

    let point = building_transform
      .affine()
      .inverse()
      .transform_point3(projectile_transform.translation())
      .truncate();
    contacts.write(ProjectileContact::new(building, point));
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn groups_interact(a: CollisionGroups, b: CollisionGroups) -> bool {
    a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
  }

  #[test]
  fn rapier_groups_agree_with_registry() {
    for a in CollisionCategory::all().iter() {
      for b in CollisionCategory::all().iter() {
        assert_eq!(
          groups_interact(collision_groups(a), collision_groups(b)),
          CollisionCategory::reports_contact(a, b),
          "{a:?} vs {b:?}"
        );
      }
    }
  }

  #[test]
  fn ground_stops_projectiles() {
    assert!(groups_interact(
      collision_groups(CollisionCategory::GROUND),
      collision_groups(CollisionCategory::PROJECTILE)
    ));
    assert!(!groups_interact(
      collision_groups(CollisionCategory::GROUND),
      collision_groups(CollisionCategory::BUILDING)
    ));
  }
}
