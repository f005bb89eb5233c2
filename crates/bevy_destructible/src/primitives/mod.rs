mod rect;
mod surface;

pub use rect::Rect;
pub use surface::{Raster, Surface};
