//! Headless render surface that tallies draw calls per frame

use glam::Vec3;
use palette::Color;
use scene::RenderSurface;
use std::fmt;

/// Draw-call summary of one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub background: Option<Color>,
    pub eye: Option<Vec3>,
    pub lights: usize,
    pub boxes: usize,
    pub spheres: usize,
    pub ellipsoids: usize,
    pub cones: usize,
    depth: usize,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primitives(&self) -> usize {
        self.boxes + self.spheres + self.ellipsoids + self.cones
    }

    /// True when nothing but a background was drawn
    pub fn is_placeholder(&self) -> bool {
        self.background.is_some() && self.primitives() == 0 && self.lights == 0
    }

    /// Whether every push was matched by a pop
    pub fn is_balanced(&self) -> bool {
        self.depth == 0
    }
}

impl RenderSurface for FrameStats {
    fn background(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn ambient_light(&mut self, _color: Color) {
        self.lights += 1;
    }

    fn directional_light(&mut self, _color: Color, _direction: Vec3) {
        self.lights += 1;
    }

    fn camera(&mut self, eye: Vec3, _target: Vec3, _up: Vec3) {
        self.eye = Some(eye);
    }

    fn push(&mut self) {
        self.depth += 1;
    }

    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn translate(&mut self, _offset: Vec3) {}

    fn rotate(&mut self, _angles: Vec3) {}

    fn fill(&mut self, _color: Color) {}

    fn draw_box(&mut self, _size: Vec3) {
        self.boxes += 1;
    }

    fn draw_sphere(&mut self, _radius: f32) {
        self.spheres += 1;
    }

    fn draw_ellipsoid(&mut self, _radii: Vec3) {
        self.ellipsoids += 1;
    }

    fn draw_cone(&mut self, _radius: f32, _height: f32) {
        self.cones += 1;
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            return write!(f, "placeholder");
        }
        if let Some(eye) = self.eye {
            write!(f, "eye=({:.1}, {:.1}, {:.1}) ", eye.x, eye.y, eye.z)?;
        }
        write!(
            f,
            "boxes={} spheres={} ellipsoids={} cones={}",
            self.boxes, self.spheres, self.ellipsoids, self.cones
        )
    }
}
