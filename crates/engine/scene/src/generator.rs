//! Tower and floor generation
//!
//! All randomness comes from the caller's RNG, drawn in a fixed order, so a
//! seeded RNG and the same palettes always reproduce the same scene:
//!
//! 1. floor blocks (when enabled): x, z, width, depth, height
//! 2. tower count
//! 3. per tower: tall draw, shape count, each shape, then the origin
//! 4. per shape: offset, size, color, kind, textured flag, rotation
//!
//! The palette offset shifts which palette a tower starts from under
//! [`ColorPolicy::PerTower`]; it is how a reshuffle cycles palettes without
//! fetching new ones.

use crate::config::{ColorPolicy, GeneratorConfig, Preset};
use crate::error::Result;
use crate::scene::{FloorBlock, Scene, Shape, Tower};
use glam::Vec3;
use palette::{Color, Palette, PaletteSet};
use rand::Rng;

/// Builds towers and floor blocks from a [`GeneratorConfig`]
#[derive(Debug, Clone, Default)]
pub struct SceneGenerator {
    config: GeneratorConfig,
}

impl SceneGenerator {
    /// Validate `config` and build a generator over it
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator over a built-in preset, which is always valid
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            config: preset.config(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a complete scene: floor first, then towers
    pub fn generate<R: Rng + ?Sized>(
        &self,
        generation: u64,
        palettes: PaletteSet,
        palette_offset: usize,
        rng: &mut R,
    ) -> Scene {
        let floor = self.generate_floor(rng);
        let towers = self.generate_towers(&palettes, palette_offset, rng);
        Scene {
            generation,
            palettes,
            palette_offset,
            towers,
            floor,
        }
    }

    pub fn generate_towers<R: Rng + ?Sized>(
        &self,
        palettes: &PaletteSet,
        palette_offset: usize,
        rng: &mut R,
    ) -> Vec<Tower> {
        let count = self.config.tower_count.sample(rng);
        (0..count as usize)
            .map(|index| self.generate_tower(index + palette_offset, palettes, rng))
            .collect()
    }

    /// Empty when the floor is disabled
    pub fn generate_floor<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<FloorBlock> {
        let floor = &self.config.floor;
        if !floor.enabled {
            return Vec::new();
        }

        (0..floor.count)
            .map(|_| FloorBlock {
                x: floor.x.sample(rng),
                z: floor.z.sample(rng),
                width: floor.width.sample(rng),
                depth: floor.depth.sample(rng),
                height: floor.height.sample(rng),
            })
            .collect()
    }

    fn generate_tower<R: Rng + ?Sized>(
        &self,
        palette_index: usize,
        palettes: &PaletteSet,
        rng: &mut R,
    ) -> Tower {
        let config = &self.config;

        let tall = rng.random_bool(config.tall_ratio);
        let shape_count = if tall {
            config.tall_shapes.sample(rng)
        } else {
            config.short_shapes.sample(rng)
        };

        let tower_palette = match config.color_policy {
            ColorPolicy::PerTower => Some(palettes.wrapping(palette_index)),
            ColorPolicy::PerShape => None,
        };

        let shapes = (0..shape_count)
            .map(|_| self.generate_shape(tower_palette, palettes, rng))
            .collect();

        Tower {
            origin: config.origin.sample(rng),
            shapes,
        }
    }

    fn generate_shape<R: Rng + ?Sized>(
        &self,
        tower_palette: Option<&Palette>,
        palettes: &PaletteSet,
        rng: &mut R,
    ) -> Shape {
        let config = &self.config;

        let offset = config.offset.sample(rng);
        let size = config.size.sample(rng);
        let color = match tower_palette {
            Some(palette) => pick_color(palette, rng),
            None => {
                let palette = palettes.wrapping(rng.random_range(0..palettes.len()));
                pick_color(palette, rng)
            }
        };
        let kind = config.weights.sample(rng);
        let textured = rng.random_bool(config.textured_ratio);
        let rotation = config
            .rotation
            .enabled
            .then(|| config.rotation.angles.sample(rng));

        Shape {
            kind,
            offset,
            size,
            rotation,
            color,
            textured,
        }
    }
}

fn pick_color<R: Rng + ?Sized>(palette: &Palette, rng: &mut R) -> Color {
    palette.wrapping(rng.random_range(0..palette.len()))
}

/// Center of a floor block, which rests on the ground
pub fn floor_block_center(block: &FloorBlock) -> Vec3 {
    Vec3::new(block.x, -block.height / 2.0, block.z)
}
