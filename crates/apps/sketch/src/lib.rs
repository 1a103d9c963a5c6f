//! Command-line driver for Towerscape
//!
//! Wires a [`SketchConfig`] into a palette source and a [`SceneController`],
//! then either generates a single scene or runs the interactive loop in
//! [`session`]. Rendering goes to a headless [`FrameStats`] surface that
//! reports what a real renderer would have drawn.

pub mod camera;
pub mod cli;
pub mod config;
pub mod session;
pub mod surface;

pub use camera::OrbitCamera;
pub use cli::SceneArgs;
pub use config::{CameraSettings, PaletteSettings, RenderSettings, RoutingMode, SketchConfig};
pub use session::{Command, Session};
pub use surface::FrameStats;

use palette::PaletteSource;
use scene::{SceneController, SceneGenerator};
use std::sync::Arc;

/// Controller type built from a config file
pub type SketchController = SceneController<Arc<dyn PaletteSource>>;

/// Build the controller described by `config`
///
/// A configured seed makes every regeneration sequence reproducible; without
/// one the RNG is seeded from the OS.
pub fn build_controller(config: &SketchConfig) -> anyhow::Result<SketchController> {
    let generator = SceneGenerator::new(config.generator_config()?)?;
    let source = config.palette.build_source();

    Ok(match config.seed {
        Some(seed) => SceneController::seeded(source, generator, seed),
        None => SceneController::from_entropy(source, generator),
    })
}

/// Build a ready-to-run interactive session
pub fn build_session(config: &SketchConfig) -> anyhow::Result<Session<Arc<dyn PaletteSource>>> {
    let controller = build_controller(config)?;
    Ok(Session::new(
        Arc::new(controller),
        config.render_style(),
        &config.render,
    ))
}
