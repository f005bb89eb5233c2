//! Collision categories shared by every physics participant in a round.

use bitflags::bitflags;

bitflags! {
  /// Contact-filtering tag attached to physics bodies.
  #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
  pub struct CollisionCategory: u32 {
    /// Thrown projectile (the banana).
    const PROJECTILE = 0b0001;
    const BUILDING = 0b0010;
    const PLAYER = 0b0100;
    const GROUND = 0b1000;
  }
}

impl CollisionCategory {
  /// Categories this one registers contact against.
  ///
  /// Only projectiles touch anything: buildings, players and the ground test
  /// against projectiles, and projectiles test against everything else.
  /// Masks are symmetric, so a pair reports contact only when each side's mask
  /// holds the other. For a combined set, the masks of every member are
  /// merged.
  pub fn contact_mask(self) -> Self {
    let mut mask = Self::empty();
    if self.contains(Self::PROJECTILE) {
      mask |= Self::BUILDING | Self::PLAYER | Self::GROUND;
    }
    if self.intersects(Self::BUILDING | Self::PLAYER | Self::GROUND) {
      mask |= Self::PROJECTILE;
    }
    mask
  }

  /// Returns whether a body tagged `a` and a body tagged `b` report contact.
  pub fn reports_contact(a: Self, b: Self) -> bool {
    a.contact_mask().intersects(b) && b.contact_mask().intersects(a)
  }
}
