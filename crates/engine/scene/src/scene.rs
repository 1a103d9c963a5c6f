//! Generated scene data
//!
//! A [`Scene`] is built in one piece by the generator and never mutated
//! afterwards; regeneration replaces it wholesale.

use crate::selector::ShapeKind;
use glam::Vec3;
use palette::{Color, PaletteSet};
use serde::Serialize;

/// A generated primitive, positioned relative to its tower
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Offset from the owning tower's origin
    pub offset: Vec3,
    /// Drives every dimension of the primitive
    pub size: f32,
    /// Euler angles in radians, when rotation is enabled
    pub rotation: Option<Vec3>,
    pub color: Color,
    /// Reserved; no renderer applies a texture
    pub textured: bool,
}

/// A vertical cluster of shapes sharing one origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tower {
    pub origin: Vec3,
    pub shapes: Vec<Shape>,
}

impl Tower {
    /// World-space position of a shape of this tower
    pub fn world_position(&self, shape: &Shape) -> Vec3 {
        shape.offset + self.origin
    }

    /// Shapes paired with their world-space positions
    pub fn placed_shapes(&self) -> impl Iterator<Item = (Vec3, &Shape)> {
        self.shapes
            .iter()
            .map(move |shape| (self.world_position(shape), shape))
    }
}

/// Axis-aligned ground decoration, resting on y = 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FloorBlock {
    pub x: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
}

/// The live scene handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// Increments with every completed regeneration; 0 for the initial scene
    pub generation: u64,
    pub palettes: PaletteSet,
    /// Palette the first tower starts from under per-tower coloring
    pub palette_offset: usize,
    pub towers: Vec<Tower>,
    pub floor: Vec<FloorBlock>,
}

impl Scene {
    /// Scene shown before the first regeneration completes
    pub fn empty() -> Self {
        Self {
            generation: 0,
            palettes: PaletteSet::fallback(),
            palette_offset: 0,
            towers: Vec::new(),
            floor: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.towers.is_empty() && self.floor.is_empty()
    }

    pub fn shape_count(&self) -> usize {
        self.towers.iter().map(|tower| tower.shapes.len()).sum()
    }

    /// Number of shapes of the given kind across all towers
    pub fn count_kind(&self, kind: ShapeKind) -> usize {
        self.shapes().filter(|shape| shape.kind == kind).count()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.towers.iter().flat_map(|tower| tower.shapes.iter())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::empty()
    }
}
