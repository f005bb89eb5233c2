use bevy::{camera::ScalingMode, prelude::*};

use crate::config::SkylineConfig;

/// Marker component for the game camera
#[derive(Component)]
pub struct GameCamera;

/// Fixed orthographic camera framing the whole skyline.
pub fn setup_camera(mut commands: Commands, config: Res<SkylineConfig>) {
  commands.spawn((
    GameCamera,
    Camera2d,
    Camera {
      order: 0,
      clear_color: ClearColorConfig::Custom(Color::BLACK),
      ..default()
    },
    Projection::Orthographic(OrthographicProjection {
      near: -1000.0,
      far: 1000.0,
      scale: 1.0,
      viewport_origin: Vec2::new(0.5, 0.5),
      scaling_mode: ScalingMode::AutoMin {
        min_width: config.camera.viewport_width,
        min_height: config.camera.viewport_height,
      },
      area: Rect::default(),
    }),
  ));
}
