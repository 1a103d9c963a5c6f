//! Command line arguments shared by the sketch subcommands
//!
//! Flags are applied on top of the config file, so `--seed 7` wins over a
//! `seed` in sketch.toml.

use crate::config::SketchConfig;
use clap::Args;
use scene::Preset;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub struct SceneArgs {
    /// Load configuration from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Seed for reproducible scenes
    #[arg(long)]
    pub seed: Option<u64>,

    /// Density preset (sparse or dense)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<Preset>,

    /// Skip the palette service and use the built-in palette
    #[arg(long)]
    pub offline: bool,
}

impl SceneArgs {
    /// Load the config file (if any) and apply the flags to it
    pub fn load(&self) -> anyhow::Result<SketchConfig> {
        let config = SketchConfig::load_or_default(self.config.as_deref())?;
        self.apply_to(config)
    }

    pub fn apply_to(&self, mut config: SketchConfig) -> anyhow::Result<SketchConfig> {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(preset) = self.preset {
            config.generator.preset = preset;
        }
        if self.offline {
            config.palette.offline = true;
        }

        // A preset switch can invalidate file-level overrides
        config.generator_config()?;
        Ok(config)
    }
}
