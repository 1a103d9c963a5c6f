//! Procedural tower scenes for Towerscape
//!
//! Generates "towers" (vertical stacks of boxes, spheres and cones) and an
//! optional field of ground blocks from a set of color palettes, and manages
//! the regeneration lifecycle that swaps one finished scene for the next.
//!
//! # Example
//!
//! ```rust,ignore
//! use palette::StaticPalettes;
//! use scene::{Preset, SceneController, SceneGenerator};
//!
//! let generator = SceneGenerator::from_preset(Preset::Sparse);
//! let controller = SceneController::seeded(StaticPalettes::fallback(), generator, 42);
//!
//! controller.regenerate().await;
//! let scene = controller.current_scene();
//! println!("{} towers, {} shapes", scene.towers.len(), scene.shape_count());
//! ```
//!
//! # Modules
//!
//! - [`config`]: ranges, presets and file-level overrides
//! - [`selector`]: weighted shape-type selection
//! - [`generator`]: tower and floor generation
//! - [`scene`]: generated data types
//! - [`controller`]: regeneration lifecycle and snapshot publication
//! - [`render`]: draw-call mapping onto a render surface
//! - [`error`]: configuration errors

pub mod config;
pub mod controller;
pub mod error;
pub mod generator;
pub mod render;
pub mod scene;
pub mod selector;

pub use config::{
    AxisSpans, ColorPolicy, CountRange, FloorConfig, GeneratorConfig, GeneratorSettings, Preset,
    RotationConfig, Span,
};
pub use controller::{RegenerateOutcome, SceneController};
pub use error::ConfigError;
pub use generator::SceneGenerator;
pub use render::{draw_placeholder, draw_scene, RenderStyle, RenderSurface};
pub use scene::{FloorBlock, Scene, Shape, Tower};
pub use selector::{ShapeKind, ShapeWeight, ShapeWeights};
