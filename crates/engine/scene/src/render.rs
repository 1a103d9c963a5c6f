//! Mapping from scene data to immediate-mode draw calls
//!
//! The scene crate does not render. It drives any [`RenderSurface`] that can
//! place primitives, set lights and keep a push/pop transform stack.

use crate::config::Preset;
use crate::generator::floor_block_center;
use crate::scene::{Scene, Shape};
use crate::selector::ShapeKind;
use glam::Vec3;
use palette::Color;
use serde::{Deserialize, Serialize};

/// Immediate-mode 3D drawing context
pub trait RenderSurface {
    /// Clear the frame with a flat color
    fn background(&mut self, color: Color);

    fn ambient_light(&mut self, color: Color);

    fn directional_light(&mut self, color: Color, direction: Vec3);

    /// Place the camera at `eye`, looking at `target`
    fn camera(&mut self, eye: Vec3, target: Vec3, up: Vec3);

    /// Save the current transform and fill
    fn push(&mut self);

    /// Restore the last saved transform and fill
    fn pop(&mut self);

    fn translate(&mut self, offset: Vec3);

    /// Rotate by Euler angles in radians, applied x then y then z
    fn rotate(&mut self, angles: Vec3);

    fn fill(&mut self, color: Color);

    /// Axis-aligned cuboid of the given width, height and depth
    fn draw_box(&mut self, size: Vec3);

    fn draw_sphere(&mut self, radius: f32);

    fn draw_ellipsoid(&mut self, radii: Vec3);

    fn draw_cone(&mut self, radius: f32, height: f32);
}

/// Per-driver drawing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Vertical stretch applied to boxes, spheres and cones
    pub vertical_stretch: f32,
    pub light_direction: Vec3,
    pub background: Color,
    pub ambient: Color,
    pub light: Color,
    pub floor_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            vertical_stretch: 1.5,
            light_direction: Vec3::new(-1.0, 0.5, -1.0),
            background: Color::new(128, 128, 128),
            ambient: Color::new(60, 60, 60),
            light: Color::WHITE,
            floor_color: Color::new(90, 90, 90),
        }
    }
}

impl RenderStyle {
    /// Style with no vertical stretch
    pub fn flat() -> Self {
        Self {
            vertical_stretch: 1.0,
            ..Self::default()
        }
    }

    /// Style the sketch variant behind `preset` was drawn with
    pub fn for_preset(preset: Preset) -> Self {
        match preset {
            Preset::Sparse => Self::flat(),
            Preset::Dense => Self::default(),
        }
    }
}

/// Frame shown while a regeneration is in flight
pub fn draw_placeholder<S: RenderSurface + ?Sized>(style: &RenderStyle, surface: &mut S) {
    surface.background(style.background);
}

/// Draw every floor block and tower shape of `scene`
///
/// The camera is left to the caller. The reserved `textured` flag is ignored.
pub fn draw_scene<S: RenderSurface + ?Sized>(scene: &Scene, style: &RenderStyle, surface: &mut S) {
    surface.background(style.background);
    surface.ambient_light(style.ambient);
    surface.directional_light(style.light, style.light_direction);

    for block in &scene.floor {
        surface.push();
        surface.translate(floor_block_center(block));
        surface.fill(style.floor_color);
        surface.draw_box(Vec3::new(block.width, block.height, block.depth));
        surface.pop();
    }

    for tower in &scene.towers {
        for (position, shape) in tower.placed_shapes() {
            surface.push();
            surface.translate(position);
            if let Some(angles) = shape.rotation {
                surface.rotate(angles);
            }
            surface.fill(shape.color);
            draw_shape(shape, style.vertical_stretch, surface);
            surface.pop();
        }
    }
}

fn draw_shape<S: RenderSurface + ?Sized>(shape: &Shape, stretch: f32, surface: &mut S) {
    let size = shape.size;
    match shape.kind {
        ShapeKind::Box => surface.draw_box(Vec3::new(size, size * stretch, size)),
        ShapeKind::Sphere if stretch == 1.0 => surface.draw_sphere(size),
        ShapeKind::Sphere => surface.draw_ellipsoid(Vec3::new(size, size * stretch, size)),
        ShapeKind::Cone => surface.draw_cone(size, size * stretch),
    }
}
