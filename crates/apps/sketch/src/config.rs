//! Sketch configuration loaded from a TOML file
//!
//! Every section is optional; a missing section falls back to the defaults
//! below, which reproduce the dense variant with a direct palette fetch.

use anyhow::Context;
use palette::{
    HttpTransport, PaletteClient, PaletteSource, Routing, StaticPalettes, DEFAULT_ENDPOINT,
    DEFAULT_NUM_RESULTS, DEFAULT_RELAY_ENDPOINT,
};
use scene::{GeneratorConfig, GeneratorSettings, RenderStyle};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Configuration loaded from sketch.toml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Seed for scene generation; absent means a fresh OS seed per run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub generator: GeneratorSettings,
    pub palette: PaletteSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMode {
    #[default]
    Direct,
    Relay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    /// Skip the network and always use the built-in palette
    pub offline: bool,
    pub routing: RoutingMode,
    pub endpoint: String,
    pub relay_endpoint: String,
    pub num_results: u32,
    /// Per-request timeout; absent leaves the HTTP client default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            offline: false,
            routing: RoutingMode::Direct,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            relay_endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            num_results: DEFAULT_NUM_RESULTS,
            timeout_secs: None,
        }
    }
}

impl PaletteSettings {
    pub fn routing(&self) -> Routing {
        match self.routing {
            RoutingMode::Direct => Routing::Direct,
            RoutingMode::Relay => Routing::relay(self.relay_endpoint.clone()),
        }
    }

    /// Build the palette source these settings describe
    pub fn build_source(&self) -> Arc<dyn PaletteSource> {
        if self.offline {
            return Arc::new(StaticPalettes::fallback());
        }

        let mut transport = HttpTransport::new();
        if let Some(secs) = self.timeout_secs {
            transport = transport.with_timeout(Duration::from_secs(secs));
        }

        Arc::new(
            PaletteClient::new(transport)
                .with_endpoint(self.endpoint.clone())
                .with_num_results(self.num_results)
                .with_routing(self.routing()),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub viewport_width: u32,
    /// Overrides the stretch of the selected preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_stretch: Option<f32>,
    pub camera: CameraSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            viewport_width: 1200,
            vertical_stretch: None,
            camera: CameraSettings::default(),
        }
    }
}

/// Orbit camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub radius: f32,
    pub height: f32,
    /// Radians per frame before any mouse steering
    pub rotation_speed: f32,
    /// Horizontal distance from the viewport center with no steering effect
    pub deadzone: f32,
    /// Speed change per pixel of mouse offset
    pub steer_gain: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            radius: 300.0,
            height: 200.0,
            rotation_speed: 0.01,
            deadzone: 25.0,
            steer_gain: 0.0001,
        }
    }
}

impl SketchConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(text).context("failed to parse sketch config")?;
        config.generator_config()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolve the generator preset and overrides
    pub fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        self.generator
            .resolve()
            .context("invalid generator settings")
    }

    /// Drawing style for the selected preset
    pub fn render_style(&self) -> RenderStyle {
        let mut style = RenderStyle::for_preset(self.generator.preset);
        if let Some(stretch) = self.render.vertical_stretch {
            style.vertical_stretch = stretch;
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene::{ColorPolicy, CountRange, Preset, ShapeKind};
    use std::io::Write;

    const SAMPLE: &str = include_str!("../sketch.toml");

    #[test]
    fn test_sample_config_parses() {
        let config = SketchConfig::from_toml(SAMPLE).unwrap();
        let generator = config.generator_config().unwrap();

        assert_eq!(config.generator.preset, Preset::Dense);
        assert_eq!(generator.tower_count, CountRange::new(25, 45));
        assert_eq!(config.palette.routing, RoutingMode::Direct);
        assert_eq!(config.render.viewport_width, 1200);

        let render = toml::to_string(&config.render).unwrap();
        assert!(!render.contains("viewport_height"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SketchConfig::from_toml("").unwrap();
        assert_eq!(config, SketchConfig::default());
        assert_eq!(config.palette.num_results, 5);
        assert_eq!(config.render_style().vertical_stretch, 1.5);
    }

    #[test]
    fn test_overrides() {
        let config = SketchConfig::from_toml(
            r#"
            seed = 7

            [generator]
            preset = "sparse"
            color_policy = "per_shape"
            tower_count = { min = 2, max = 3 }

            [[generator.weights]]
            kind = "cone"
            probability = 1.0

            [palette]
            routing = "relay"
            relay_endpoint = "https://relay.example/raw"
            timeout_secs = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(7));
        let generator = config.generator_config().unwrap();
        assert_eq!(generator.color_policy, ColorPolicy::PerShape);
        assert_eq!(generator.tower_count, CountRange::new(2, 3));
        assert_eq!(generator.weights.select(0.5), ShapeKind::Cone);
        assert_eq!(
            config.palette.routing(),
            Routing::relay("https://relay.example/raw")
        );
        assert_eq!(config.palette.timeout_secs, Some(4));
        assert_eq!(config.render_style().vertical_stretch, 1.0);
    }

    #[test]
    fn test_stretch_override() {
        let config = SketchConfig::from_toml("[render]\nvertical_stretch = 2.0").unwrap();
        assert_eq!(config.render_style().vertical_stretch, 2.0);
    }

    #[test]
    fn test_invalid_generator_rejected() {
        let err = SketchConfig::from_toml(
            r#"
            [generator]
            tall_ratio = 2.0
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("tall_ratio"));

        assert!(SketchConfig::from_toml("[generator]\npreset = \"huge\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[palette]\noffline = true").unwrap();

        let config = SketchConfig::load(file.path()).unwrap();
        assert!(config.palette.offline);

        let missing = SketchConfig::load(Path::new("/nonexistent/sketch.toml"));
        assert!(missing.is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = SketchConfig {
            seed: Some(3),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SketchConfig::from_toml(&text).unwrap(), config);
    }
}
