//! Weighted shape-type selection
//!
//! The table is walked in declaration order, accumulating probabilities, and
//! the first kind whose running total reaches the drawn value wins. A draw
//! outside `[0, 1)`, or one left above the total by float drift, returns the
//! first declared kind.

use crate::error::{ConfigError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tolerance used when checking that a weight table sums to one
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Primitive kind of a generated shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Box,
    Sphere,
    Cone,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Box, ShapeKind::Sphere, ShapeKind::Cone];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cone => "cone",
        }
    }
}

/// One `(kind, probability)` entry of a weight table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeWeight {
    pub kind: ShapeKind,
    pub probability: f64,
}

impl ShapeWeight {
    pub const fn new(kind: ShapeKind, probability: f64) -> Self {
        Self { kind, probability }
    }
}

/// Ordered probability table for shape kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeWeights {
    entries: Vec<ShapeWeight>,
}

impl ShapeWeights {
    pub fn new(entries: Vec<ShapeWeight>) -> Self {
        Self { entries }
    }

    /// Shorthand for a box/sphere/cone table in that order
    pub fn box_sphere_cone(boxes: f64, spheres: f64, cones: f64) -> Self {
        Self::new(vec![
            ShapeWeight::new(ShapeKind::Box, boxes),
            ShapeWeight::new(ShapeKind::Sphere, spheres),
            ShapeWeight::new(ShapeKind::Cone, cones),
        ])
    }

    pub fn entries(&self) -> &[ShapeWeight] {
        &self.entries
    }

    /// First declared kind, or `Box` for an empty table
    pub fn fallback(&self) -> ShapeKind {
        self.entries
            .first()
            .map(|entry| entry.kind)
            .unwrap_or(ShapeKind::Box)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|entry| entry.probability).sum()
    }

    /// Pick a kind for a draw `r` in `[0, 1)`
    pub fn select(&self, r: f64) -> ShapeKind {
        if !(0.0..1.0).contains(&r) {
            return self.fallback();
        }

        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.probability;
            if cumulative >= r {
                return entry.kind;
            }
        }
        self.fallback()
    }

    /// Draw one uniform value from `rng` and select with it
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        self.select(rng.random::<f64>())
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }
        for entry in &self.entries {
            if !(0.0..=1.0).contains(&entry.probability) {
                return Err(ConfigError::InvalidProbability {
                    name: format!("weights.{}", entry.kind.name()),
                    value: entry.probability,
                });
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightSum(total));
        }
        Ok(())
    }
}
