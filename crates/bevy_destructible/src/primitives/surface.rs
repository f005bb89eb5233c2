//! Blittable pixel buffer for building sprites.
//!
//! A [`Surface`] is a generic 2D buffer that can hold any element type.
//! Buildings use [`Raster`], a surface of [`Rgba`] pixels that doubles as the
//! sprite texture and as the source of the collision shape.
//!
//! # Coordinate System
//!
//! Surfaces use the canvas convention of image files and GPU textures:
//! - **X+** is to the right
//! - **Y+** is downward
//! - **(0, 0)** is the top-left corner
//!
//! Data is stored in row-major order where row 0 is the top of the surface,
//! so [`Surface::as_bytes`] can be copied into a texture without flipping.

use std::ops::Index;

use super::Rect;
use crate::render::Rgba;

// Ensure Rgba has the correct size for as_bytes() to work correctly.
// palette::Srgba<u8> should be 4 bytes (u8 x 4) with #[repr(C)].
const _: () = assert!(std::mem::size_of::<Rgba>() == 4);

/// A 2D buffer of elements.
///
/// Data is stored in row-major order (y * width + x).
#[derive(Clone, Debug, PartialEq)]
pub struct Surface<T> {
  data: Box<[T]>,
  width: u32,
  height: u32,
}

impl<T: Clone + Default> Surface<T> {
  /// Creates a new surface filled with the default value.
  pub fn new(width: u32, height: u32) -> Self {
    let len = (width as usize) * (height as usize);
    Self {
      data: vec![T::default(); len].into_boxed_slice(),
      width,
      height,
    }
  }
}

impl<T: Clone> Surface<T> {
  /// Creates a new surface filled with the given value.
  pub fn filled(width: u32, height: u32, value: T) -> Self {
    let len = (width as usize) * (height as usize);
    Self {
      data: vec![value; len].into_boxed_slice(),
      width,
      height,
    }
  }

  /// Fills a rectangle with the given value, clipped to the surface bounds.
  pub fn fill_rect(&mut self, rect: Rect, value: T) {
    let rect = rect.clamped(self.width, self.height);
    let width = self.width as usize;
    for y in rect.y..rect.y + rect.height {
      let start = (y as usize) * width + rect.x as usize;
      self.data[start..start + rect.width as usize].fill(value.clone());
    }
  }
}

impl<T> Surface<T> {
  /// Returns the width of the surface.
  #[inline]
  pub fn width(&self) -> u32 {
    self.width
  }

  /// Returns the height of the surface.
  #[inline]
  pub fn height(&self) -> u32 {
    self.height
  }

  /// Converts (x, y) to a linear index, or `None` if out of bounds.
  #[inline]
  fn index_of(&self, x: u32, y: u32) -> Option<usize> {
    if x < self.width && y < self.height {
      Some((y as usize) * (self.width as usize) + (x as usize))
    } else {
      None
    }
  }

  /// Returns a reference to the element at (x, y), or `None` if out of bounds.
  #[inline]
  pub fn get(&self, x: u32, y: u32) -> Option<&T> {
    self.index_of(x, y).map(|i| &self.data[i])
  }

  /// Sets the element at (x, y). Returns `true` if successful, `false` if out
  /// of bounds.
  #[inline]
  pub fn set(&mut self, x: u32, y: u32, value: T) -> bool {
    if let Some(i) = self.index_of(x, y) {
      self.data[i] = value;
      true
    } else {
      false
    }
  }

  /// Returns the raw data as a byte slice (for GPU upload).
  ///
  /// # Safety
  /// This reinterprets the data as bytes. Only safe when `T` is `#[repr(C)]`
  /// and has no padding.
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    let ptr = self.data.as_ptr() as *const u8;
    let len = self.data.len() * std::mem::size_of::<T>();
    // SAFETY: Surface data is contiguous and T is expected to be repr(C)
    unsafe { std::slice::from_raw_parts(ptr, len) }
  }

  /// Returns a slice of the underlying data.
  #[inline]
  pub fn as_slice(&self) -> &[T] {
    &self.data
  }

  /// Returns a mutable slice of the underlying data.
  #[inline]
  pub fn as_slice_mut(&mut self) -> &mut [T] {
    &mut self.data
  }
}

impl<T> Index<(u32, u32)> for Surface<T> {
  type Output = T;

  #[inline]
  fn index(&self, (x, y): (u32, u32)) -> &Self::Output {
    let i = (y as usize) * (self.width as usize) + (x as usize);
    &self.data[i]
  }
}

/// A building sprite's pixels: colour plus opacity, origin at the top-left.
pub type Raster = Surface<Rgba>;

impl Raster {
  /// Returns whether the pixel at (x, y) has any opacity.
  ///
  /// Out-of-bounds coordinates are treated as transparent.
  #[inline]
  pub fn is_opaque(&self, x: u32, y: u32) -> bool {
    self.get(x, y).is_some_and(|p| p.alpha > 0)
  }

  /// Returns the number of pixels with nonzero opacity.
  pub fn opaque_count(&self) -> usize {
    self.data.iter().filter(|p| p.alpha > 0).count()
  }
}
