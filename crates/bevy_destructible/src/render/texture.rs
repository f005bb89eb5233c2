//! Texture creation and upload for building rasters.

use bevy::asset::RenderAssetUsages;
use bevy::image::ImageSampler;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use crate::primitives::Raster;

/// Creates an RGBA8 texture holding a copy of the raster, with
/// nearest-neighbor sampling.
///
/// Returns a handle to the created image.
pub fn create_texture(images: &mut Assets<Image>, raster: &Raster) -> Handle<Image> {
  let size = Extent3d {
    width: raster.width(),
    height: raster.height(),
    depth_or_array_layers: 1,
  };

  let mut image = Image::new(
    size,
    TextureDimension::D2,
    raster.as_bytes().to_vec(),
    TextureFormat::Rgba8UnormSrgb,
    RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
  );

  // Use nearest-neighbor sampling so carved edges stay crisp
  image.sampler = ImageSampler::nearest();

  images.add(image)
}

/// Uploads raster pixel data to an existing texture.
///
/// The raster dimensions must match the texture dimensions; mismatched
/// textures are left untouched.
pub fn upload_surface(raster: &Raster, image: &mut Image) {
  let bytes = raster.as_bytes();
  if let Some(ref mut data) = image.data {
    if data.len() == bytes.len() {
      data.copy_from_slice(bytes);
    }
  }
}
