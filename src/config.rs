//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`CAROUSEL_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use carousel_core::{AssetError, FontLibrary};

use crate::scene::{PrimitiveKind, SceneParams};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Carousel layout
    #[serde(default)]
    pub scene: SceneConfig,
    /// Camera setup
    #[serde(default)]
    pub cameras: CameraConfig,
    /// Font resources
    #[serde(default)]
    pub fonts: FontConfig,
    /// Scene export
    #[serde(default)]
    pub output: OutputConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`CAROUSEL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // CAROUSEL_SCENE__OBJECT_SIZE=1.0 -> scene.object_size = 1.0
        figment = figment.merge(Env::prefixed("CAROUSEL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Layout parameters for the scene builder
    pub fn scene_params(&self) -> SceneParams {
        SceneParams {
            object_size: self.scene.object_size,
            radius_factor: self.scene.radius_factor,
            rotation_period: self.scene.rotation_period,
            primitives: self.scene.primitives.clone(),
            static_fov: self.cameras.static_fov,
            follow_fov: self.cameras.follow_fov,
            overhead_height_factor: self.cameras.overhead_height_factor,
            marker_radius: self.cameras.marker_radius,
            marker_height: self.cameras.marker_height,
            label_font: self.fonts.label_font.clone(),
            label_font_size: self.fonts.label_font_size,
            primitive_font: self.fonts.primitive_font.clone(),
            primitive_font_size: self.fonts.primitive_font_size,
        }
    }
}

/// Carousel layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Base size every primitive is derived from
    pub object_size: f32,
    /// Carousel radius as a multiple of `object_size`
    pub radius_factor: f32,
    /// Seconds per carousel revolution
    pub rotation_period: f32,
    /// Primitives placed around the carousel, in order
    pub primitives: Vec<PrimitiveKind>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            object_size: 0.5,
            radius_factor: 5.0,
            rotation_period: 20.0,
            primitives: PrimitiveKind::ALL.to_vec(),
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Field of view of the overhead and fixed cameras, in degrees
    pub static_fov: f32,
    /// Field of view of the follow camera, in degrees
    pub follow_fov: f32,
    /// Overhead camera height as a multiple of the carousel radius
    pub overhead_height_factor: f32,
    /// Base radius of the cone marking each camera
    pub marker_radius: f32,
    /// Height of the cone marking each camera
    pub marker_height: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            static_fov: 60.0,
            follow_fov: 30.0,
            overhead_height_factor: 3.0,
            marker_radius: 0.1,
            marker_height: 0.2,
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Families assumed to be installed
    pub families: Vec<String>,
    /// Optional directory of font files to register as well
    #[serde(default)]
    pub search_dir: Option<String>,
    /// Font of the center label
    pub label_font: String,
    /// Size of the center label
    pub label_font_size: f32,
    /// Font of the text primitive
    pub primitive_font: String,
    /// Size of the text primitive
    pub primitive_font_size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            families: vec!["Helvetica".to_string(), "Chalkduster".to_string()],
            search_dir: None,
            label_font: "Helvetica".to_string(),
            label_font_size: 0.5,
            primitive_font: "Chalkduster".to_string(),
            primitive_font_size: 0.5,
        }
    }
}

impl FontConfig {
    /// Build the font library from the configured families and search dir
    pub fn font_library(&self) -> Result<FontLibrary, AssetError> {
        let mut library = FontLibrary::from_families(&self.families);
        if let Some(ref dir) = self.search_dir {
            library.scan_dir(dir)?;
        }
        Ok(library)
    }
}

/// Scene export configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the built scene to this RON file
    #[serde(default)]
    pub scene_path: Option<String>,
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
