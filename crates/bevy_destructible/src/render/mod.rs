mod texture;

use palette::{FromColor, Hsv, Srgb};
pub use texture::{create_texture, upload_surface};

/// RGBA pixel with 8 bits per channel, using sRGB color space.
///
/// Re-exported from the `palette` crate for color handling.
pub type Rgba = palette::Srgba<u8>;

/// Fully transparent pixel with no colour contribution.
pub const CLEAR: Rgba = Rgba::new(0, 0, 0, 0);

/// Creates an opaque RGB color (alpha = 255).
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
  Rgba::new(r, g, b, 255)
}

/// Creates an opaque color from hue/saturation/brightness.
///
/// `hue` is a fraction of a full turn (0.0..=1.0), matching the way the
/// facade palette is authored.
pub fn hsb(hue: f32, saturation: f32, brightness: f32) -> Rgba {
  let color = Srgb::<f32>::from_color(Hsv::new(hue * 360.0, saturation, brightness));
  let color: Srgb<u8> = color.into_format();
  rgb(color.red, color.green, color.blue)
}
