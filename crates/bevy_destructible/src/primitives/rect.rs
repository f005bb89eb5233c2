/// A rectangular pixel region, origin at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
  pub x: u32,
  pub y: u32,
  pub width: u32,
  pub height: u32,
}

impl Rect {
  /// Creates a new rectangle.
  #[inline]
  pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
    Self {
      x,
      y,
      width,
      height,
    }
  }

  /// Clips the half-open signed span `[min, max)` to a surface of the given
  /// size.
  ///
  /// Spans that fall entirely outside the surface produce an empty rect.
  pub fn clip_span(min: (i64, i64), max: (i64, i64), bound_width: u32, bound_height: u32) -> Self {
    let x0 = min.0.clamp(0, bound_width as i64);
    let y0 = min.1.clamp(0, bound_height as i64);
    let x1 = max.0.clamp(x0, bound_width as i64);
    let y1 = max.1.clamp(y0, bound_height as i64);
    Self::new(x0 as u32, y0 as u32, (x1 - x0) as u32, (y1 - y0) as u32)
  }

  /// Returns true if the rect covers no pixels.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.width == 0 || self.height == 0
  }

  /// Clamps this rect to fit within the given bounds.
  pub(crate) fn clamped(&self, bound_width: u32, bound_height: u32) -> Self {
    let x = self.x.min(bound_width);
    let y = self.y.min(bound_height);
    let max_w = bound_width.saturating_sub(x);
    let max_h = bound_height.saturating_sub(y);
    Self {
      x,
      y,
      width: self.width.min(max_w),
      height: self.height.min(max_h),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clip_span_inside_is_unchanged() {
    let rect = Rect::clip_span((4, 5), (10, 12), 64, 64);
    assert_eq!(rect, Rect::new(4, 5, 6, 7));
  }

  #[test]
  fn clip_span_crossing_edges_is_trimmed() {
    let rect = Rect::clip_span((-32, -32), (32, 32), 64, 16);
    assert_eq!(rect, Rect::new(0, 0, 32, 16));
  }

  #[test]
  fn clip_span_outside_is_empty() {
    assert!(Rect::clip_span((100, 0), (164, 64), 64, 64).is_empty());
    assert!(Rect::clip_span((-200, -200), (-136, -136), 64, 64).is_empty());
  }
}
