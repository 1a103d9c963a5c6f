//! Generator configuration and density presets
//!
//! Float ranges ([`Span`]) are half-open `[min, max)`; a degenerate span with
//! `min == max` always yields `min`. Integer ranges ([`CountRange`]) are
//! inclusive on both ends.

use crate::error::{ConfigError, Result};
use crate::selector::ShapeWeights;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

/// Half-open float range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        if self.max > self.min {
            value >= self.min && value < self.max
        } else {
            value == self.min
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

/// Inclusive integer range `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn exactly(count: u32) -> Self {
        Self::new(count, count)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name: name.to_string(),
                min: self.min as f64,
                max: self.max as f64,
            });
        }
        Ok(())
    }
}

/// Per-axis spans for a 3D draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpans {
    pub x: Span,
    pub y: Span,
    pub z: Span,
}

impl AxisSpans {
    pub const fn new(x: Span, y: Span, z: Span) -> Self {
        Self { x, y, z }
    }

    /// Sample x, then y, then z
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> glam::Vec3 {
        let x = self.x.sample(rng);
        let y = self.y.sample(rng);
        let z = self.z.sample(rng);
        glam::Vec3::new(x, y, z)
    }

    pub fn contains(&self, value: glam::Vec3) -> bool {
        self.x.contains(value.x) && self.y.contains(value.y) && self.z.contains(value.z)
    }

    fn validate(&self, name: &str) -> Result<()> {
        self.x.validate(&format!("{name}.x"))?;
        self.y.validate(&format!("{name}.y"))?;
        self.z.validate(&format!("{name}.z"))
    }
}

/// How a shape's color is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    /// Palette index follows the tower index (wrapping); color uniform within it
    PerTower,
    /// Palette uniform per shape, then color uniform within it
    #[default]
    PerShape,
}

/// Optional per-shape rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationConfig {
    pub enabled: bool,
    pub angles: AxisSpans,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            angles: AxisSpans::new(
                Span::new(0.0, PI / 8.0),
                Span::new(0.0, TAU),
                Span::new(0.0, PI / 8.0),
            ),
        }
    }
}

/// Scattered ground blocks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub enabled: bool,
    pub count: u32,
    pub x: Span,
    pub z: Span,
    pub width: Span,
    pub depth: Span,
    pub height: Span,
}

impl Default for FloorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 500,
            x: Span::new(-400.0, 400.0),
            z: Span::new(-400.0, 400.0),
            width: Span::new(1.0, 100.0),
            depth: Span::new(1.0, 100.0),
            height: Span::new(1.0, 50.0),
        }
    }
}

/// Every knob of tower and floor generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub tower_count: CountRange,
    /// Probability that a tower uses `tall_shapes` instead of `short_shapes`
    pub tall_ratio: f64,
    pub short_shapes: CountRange,
    pub tall_shapes: CountRange,
    /// Shape offset relative to its tower origin
    pub offset: AxisSpans,
    pub size: Span,
    pub origin: AxisSpans,
    /// Probability of setting the reserved `textured` flag
    pub textured_ratio: f64,
    pub color_policy: ColorPolicy,
    pub weights: ShapeWeights,
    pub rotation: RotationConfig,
    pub floor: FloorConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Preset::default().config()
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        self.tower_count.validate("tower_count")?;
        probability("tall_ratio", self.tall_ratio)?;
        self.short_shapes.validate("short_shapes")?;
        self.tall_shapes.validate("tall_shapes")?;
        self.offset.validate("offset")?;
        self.size.validate("size")?;
        self.origin.validate("origin")?;
        probability("textured_ratio", self.textured_ratio)?;
        self.weights.validate()?;
        self.rotation.angles.validate("rotation")?;
        self.floor.x.validate("floor.x")?;
        self.floor.z.validate("floor.z")?;
        self.floor.width.validate("floor.width")?;
        self.floor.depth.validate("floor.depth")?;
        self.floor.height.validate("floor.height")?;
        Ok(())
    }
}

fn probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::InvalidProbability {
            name: name.to_string(),
            value,
        });
    }
    Ok(())
}

/// Density presets observed in the sketch variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Ten towers of 5-10 shapes, one palette per tower, no rotation or floor
    Sparse,
    /// 25-45 short towers with rotated shapes over a field of ground blocks
    #[default]
    Dense,
}

impl Preset {
    pub fn config(self) -> GeneratorConfig {
        let offset = AxisSpans::new(
            Span::new(-5.0, 5.0),
            Span::new(-160.0, -20.0),
            Span::new(-5.0, 5.0),
        );
        let origin = AxisSpans::new(
            Span::new(-200.0, 200.0),
            Span::new(-10.0, 0.0),
            Span::new(-200.0, 200.0),
        );

        match self {
            Preset::Sparse => GeneratorConfig {
                tower_count: CountRange::exactly(10),
                tall_ratio: 0.1,
                short_shapes: CountRange::new(5, 10),
                tall_shapes: CountRange::new(20, 25),
                offset,
                size: Span::new(20.0, 80.0),
                origin,
                textured_ratio: 0.5,
                color_policy: ColorPolicy::PerTower,
                weights: ShapeWeights::box_sphere_cone(0.85, 0.10, 0.05),
                rotation: RotationConfig {
                    enabled: false,
                    ..RotationConfig::default()
                },
                floor: FloorConfig {
                    enabled: false,
                    ..FloorConfig::default()
                },
            },
            Preset::Dense => GeneratorConfig {
                tower_count: CountRange::new(25, 45),
                tall_ratio: 0.1,
                short_shapes: CountRange::new(1, 4),
                tall_shapes: CountRange::new(20, 40),
                offset,
                size: Span::new(20.0, 80.0),
                origin,
                textured_ratio: 0.5,
                color_policy: ColorPolicy::PerShape,
                weights: ShapeWeights::box_sphere_cone(0.70, 0.20, 0.10),
                rotation: RotationConfig::default(),
                floor: FloorConfig::default(),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Sparse => "sparse",
            Preset::Dense => "dense",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sparse" => Ok(Preset::Sparse),
            "dense" => Ok(Preset::Dense),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A preset plus optional overrides, as read from a config file
///
/// ```toml
/// preset = "sparse"
/// tall_ratio = 0.2
/// floor = true
///
/// [[weights]]
/// kind = "box"
/// probability = 0.5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    pub preset: Preset,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tower_count: Option<CountRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tall_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_shapes: Option<CountRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tall_shapes: Option<CountRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<AxisSpans>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<AxisSpans>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textured_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_policy: Option<ColorPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<ShapeWeights>,
    /// Toggle per-shape rotation without restating the angle spans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<bool>,
    /// Toggle the ground block field without restating its spans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_count: Option<u32>,
}

impl GeneratorSettings {
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Default::default()
        }
    }

    /// Apply the overrides on top of the preset and validate the result
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = self.preset.config();

        if let Some(range) = self.tower_count {
            config.tower_count = range;
        }
        if let Some(ratio) = self.tall_ratio {
            config.tall_ratio = ratio;
        }
        if let Some(range) = self.short_shapes {
            config.short_shapes = range;
        }
        if let Some(range) = self.tall_shapes {
            config.tall_shapes = range;
        }
        if let Some(spans) = self.offset {
            config.offset = spans;
        }
        if let Some(span) = self.size {
            config.size = span;
        }
        if let Some(spans) = self.origin {
            config.origin = spans;
        }
        if let Some(ratio) = self.textured_ratio {
            config.textured_ratio = ratio;
        }
        if let Some(policy) = self.color_policy {
            config.color_policy = policy;
        }
        if let Some(weights) = &self.weights {
            config.weights = weights.clone();
        }
        if let Some(enabled) = self.rotation {
            config.rotation.enabled = enabled;
        }
        if let Some(enabled) = self.floor {
            config.floor.enabled = enabled;
        }
        if let Some(count) = self.floor_count {
            config.floor.count = count;
        }

        config.validate()?;
        Ok(config)
    }
}
