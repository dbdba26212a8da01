//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ROAM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use roam_math::Vec3;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Which demo to run and how frames are timed
    #[serde(default)]
    pub demo: DemoConfig,
    /// Roaming Ralph tuning
    #[serde(default)]
    pub ralph: RalphConfig,
    /// Bump mapping viewer tuning
    #[serde(default)]
    pub bump: BumpConfig,
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
    /// 3. Environment variables (`ROAM_*`)
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

        // ROAM_RALPH__RUN_SPEED=40 -> ralph.run_speed = 40
        figment = figment.merge(Env::prefixed("ROAM_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title prefix (the demo title and status are appended)
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Roam".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
        }
    }
}

/// Demo selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoKind {
    /// Roaming Ralph: walking on uneven terrain
    Ralph,
    /// Bump mapping viewer
    Bump,
}

/// Demo and frame timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Demo to run
    pub kind: DemoKind,
    /// Longest frame step in seconds (longer frames are clamped)
    pub max_frame_dt: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            kind: DemoKind::Ralph,
            max_frame_dt: 0.25,
        }
    }
}

/// Roaming Ralph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RalphConfig {
    /// Scene description (terrain, rocks, trees, start point)
    pub scene_path: String,
    /// Character model
    pub model: String,
    /// Run animation asset
    pub run_anim: String,
    /// Walk animation asset
    pub walk_anim: String,
    /// Character scale
    pub scale: f32,
    /// Turn rate in degrees per second
    pub turn_rate: f32,
    /// Run speed in units per second
    pub run_speed: f32,
    /// Camera sideways orbit speed in units per second
    pub orbit_speed: f32,
    /// Closest planar camera distance
    pub min_distance: f32,
    /// Farthest planar camera distance
    pub max_distance: f32,
    /// Camera height above the terrain under it
    pub camera_clearance: f32,
    /// Minimum camera height above the character
    pub camera_min_height: f32,
    /// Height of the camera's look-at point above the character
    pub floater_height: f32,
    /// Height above a node where its ground probe starts
    pub probe_height: f32,
    /// Surface name that can be walked on
    pub terrain_name: String,
    /// Walk frame held when standing still
    pub walk_pose_frame: u32,
    /// Initial camera offset behind the character (along +Y)
    pub camera_start_distance: f32,
    /// Initial camera height
    pub camera_start_height: f32,
}

impl Default for RalphConfig {
    fn default() -> Self {
        Self {
            scene_path: "scenes/roaming_ralph.ron".to_string(),
            model: "models/ralph".to_string(),
            run_anim: "models/ralph-run".to_string(),
            walk_anim: "models/ralph-walk".to_string(),
            scale: 0.2,
            turn_rate: 300.0,
            run_speed: 25.0,
            orbit_speed: 20.0,
            min_distance: 5.0,
            max_distance: 10.0,
            camera_clearance: 1.0,
            camera_min_height: 2.0,
            floater_height: 2.0,
            probe_height: 1000.0,
            terrain_name: "terrain".to_string(),
            walk_pose_frame: 5,
            camera_start_distance: 10.0,
            camera_start_height: 2.0,
        }
    }
}

/// Bump mapping viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BumpConfig {
    /// Room model
    pub model: String,
    /// Initial focus point [x, y, z]
    pub focus: [f32; 3],
    /// Initial camera heading in degrees
    pub heading: f32,
    /// Initial camera pitch in degrees
    pub pitch: f32,
    /// Pitch is clamped to [-pitch_limit, pitch_limit]
    pub pitch_limit: f32,
    /// Degrees of turn per unit of pointer motion
    pub mouse_sensitivity: f32,
    /// Fly speed in units per second
    pub fly_speed: f32,
    /// Distance from the camera to the focus point
    pub focus_distance: f32,
    /// Lower camera bound [x, y, z]
    pub bounds_min: [f32; 3],
    /// Upper camera bound [x, y, z]
    pub bounds_max: [f32; 3],
    /// Light pivot position [x, y, z]
    pub light_pivot: [f32; 3],
    /// Light distance from the pivot
    pub light_radius: f32,
    /// Degrees per light rotation key press
    pub light_step: f32,
    /// Seconds per full light revolution
    pub light_period: f32,
    /// Degrees per camera rotation key press
    pub camera_heading_step: f32,
}

impl BumpConfig {
    pub fn focus(&self) -> Vec3 {
        Vec3::from_array(self.focus)
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        (Vec3::from_array(self.bounds_min), Vec3::from_array(self.bounds_max))
    }
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            model: "models/abstractroom".to_string(),
            focus: [55.0, -55.0, 20.0],
            heading: 180.0,
            pitch: 0.0,
            pitch_limit: 45.0,
            mouse_sensitivity: 0.2,
            fly_speed: 30.0,
            focus_distance: 5.0,
            bounds_min: [-59.0, -59.0, 5.0],
            bounds_max: [59.0, 59.0, 45.0],
            light_pivot: [0.0, 0.0, 25.0],
            light_radius: 45.0,
            light_step: 20.0,
            light_period: 10.0,
            camera_heading_step: 10.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show the demo status line in the window title
    pub show_status: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_status: true,
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
