//! Scene configuration
//!
//! Every tunable of the simulation lives here. A JSON file may override any
//! subset of the fields; anything it leaves out keeps the built-in value.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::explosion::ExplosionParams;
use crate::sim::spline::{ControlPoints, default_camera_path, default_flight_path};

/// Why a configuration could not be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Placement of a static prop (car, tree)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropPlacement {
    pub position: Vec3,
    /// Heading in the horizontal plane
    pub direction: Vec3,
    pub size: f32,
}

/// The aircraft flying the closed flight path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AircraftConfig {
    /// Origin the flight path is offset from
    pub anchor: Vec3,
    pub size: f32,
    /// Curve segments travelled per second
    pub path_speed: f32,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            anchor: Vec3::new(0.0, 0.0, 0.1),
            size: FOXBAT_SIZE,
            path_speed: FOXBAT_PATH_SPEED,
        }
    }
}

/// The spinning cube; touching it ends the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    pub anchor: Vec3,
    pub size: f32,
    /// Height of the vertical bob
    pub bob_amplitude: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            anchor: Vec3::new(-0.5, 0.5, 0.0),
            size: CUBE_SIZE,
            bob_amplitude: CUBE_BOB_AMPLITUDE,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Scene ===
    pub scene_half_extent: f32,
    pub min_height: f32,
    pub max_height: f32,

    // === Player ===
    pub player_size: f32,
    pub speed_increment: f32,
    pub vertical_speed_increment: f32,
    pub speed_max: f32,
    pub speed_min: f32,
    /// Degrees turned per tick
    pub view_angle_delta: f32,
    pub initial_view_angle: f32,
    /// Scales speed into per-tick displacement
    pub integration_factor: f32,

    // === Collisions and effects ===
    pub collision_shrink: f32,
    pub explosion: ExplosionParams,

    // === Entities ===
    pub terrain_position: Vec3,
    pub terrain_size: f32,
    pub aircraft: AircraftConfig,
    pub car: PropPlacement,
    pub trees: Vec<PropPlacement>,
    pub cube: CubeConfig,

    // === Paths ===
    pub flight_path: ControlPoints,
    pub camera_path: ControlPoints,
    pub camera_path_speed: f32,

    // === Camera ===
    pub camera_elevation_max: f32,
    pub mouse_sensitivity: f32,

    /// Scheduler period for the tick loop
    pub tick_period_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scene_half_extent: SCENE_HALF_EXTENT,
            min_height: MIN_HEIGHT,
            max_height: MAX_HEIGHT,

            player_size: PLAYER_SIZE,
            speed_increment: PLAYER_SPEED_INCREMENT,
            vertical_speed_increment: PLAYER_UP_SPEED_INCREMENT,
            speed_max: PLAYER_SPEED_MAX,
            speed_min: PLAYER_SPEED_MIN,
            view_angle_delta: PLAYER_VIEW_ANGLE_DELTA,
            initial_view_angle: PLAYER_INITIAL_VIEW_ANGLE,
            integration_factor: INTEGRATION_FACTOR,

            collision_shrink: COLLISION_SHRINK,
            explosion: ExplosionParams::default(),

            terrain_position: Vec3::new(0.0, 0.0, -0.5),
            terrain_size: TERRAIN_SIZE,
            aircraft: AircraftConfig::default(),
            car: PropPlacement {
                position: Vec3::new(0.4, -0.4, -0.1),
                direction: Vec3::new(1.0, 0.0, 0.0),
                size: CAR_SIZE,
            },
            trees: vec![
                PropPlacement {
                    position: Vec3::new(0.6, 0.5, -0.05),
                    direction: Vec3::Y,
                    size: TREE_SIZE,
                },
                PropPlacement {
                    position: Vec3::new(-0.6, -0.5, -0.05),
                    direction: Vec3::Y,
                    size: TREE_SIZE,
                },
            ],
            cube: CubeConfig::default(),

            flight_path: default_flight_path(),
            camera_path: default_camera_path(),
            camera_path_speed: CAMERA_PATH_SPEED,

            camera_elevation_max: CAMERA_ELEVATION_MAX,
            mouse_sensitivity: CAMERA_MOUSE_SENSITIVITY,

            tick_period_ms: TICK_PERIOD_MS,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a JSON file, falling back to defaults when it is unusable
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using default config");
                Self::default()
            }
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::invalid(field, format!("must be > 0, got {value}")))
            }
        }

        positive("scene_half_extent", self.scene_half_extent)?;
        if self.min_height >= self.max_height {
            return Err(ConfigError::invalid(
                "min_height",
                format!("must be below max_height ({} >= {})", self.min_height, self.max_height),
            ));
        }

        positive("player_size", self.player_size)?;
        positive("speed_increment", self.speed_increment)?;
        positive("vertical_speed_increment", self.vertical_speed_increment)?;
        positive("view_angle_delta", self.view_angle_delta)?;
        positive("integration_factor", self.integration_factor)?;
        if self.speed_min > 0.0 || self.speed_max < 0.0 {
            return Err(ConfigError::invalid(
                "speed_min",
                format!(
                    "speed range [{}, {}] must contain 0",
                    self.speed_min, self.speed_max
                ),
            ));
        }

        if !(self.collision_shrink > 0.0 && self.collision_shrink <= 1.0) {
            return Err(ConfigError::invalid(
                "collision_shrink",
                format!("must be in (0, 1], got {}", self.collision_shrink),
            ));
        }
        positive("explosion.frame_duration", self.explosion.frame_duration)?;
        if self.explosion.total_frames == 0 {
            return Err(ConfigError::invalid("explosion.total_frames", "must be > 0"));
        }

        positive("terrain_size", self.terrain_size)?;
        positive("aircraft.size", self.aircraft.size)?;
        positive("car.size", self.car.size)?;
        positive("cube.size", self.cube.size)?;
        for tree in &self.trees {
            positive("trees.size", tree.size)?;
        }
        if self.aircraft.path_speed < 0.0 {
            return Err(ConfigError::invalid("aircraft.path_speed", "must be >= 0"));
        }
        if self.camera_path_speed < 0.0 {
            return Err(ConfigError::invalid("camera_path_speed", "must be >= 0"));
        }

        positive("camera_elevation_max", self.camera_elevation_max)?;
        if self.tick_period_ms == 0 {
            return Err(ConfigError::invalid("tick_period_ms", "must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        SimConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            SimConfig::from_json_str(r#"{ "integration_factor": 0.01, "speed_max": 0.6 }"#).unwrap();
        assert_eq!(config.integration_factor, 0.01);
        assert_eq!(config.speed_max, 0.6);
        assert_eq!(config.player_size, PLAYER_SIZE);
        assert_eq!(config.flight_path.len(), 12);
    }

    #[test]
    fn test_round_trip_through_json() {
        let config = SimConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(SimConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SimConfig::from_json_str(r#"{ "collision_shrink": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "collision_shrink", .. }));

        let err = SimConfig::from_json_str(r#"{ "min_height": 0.2 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "min_height", .. }));

        let err =
            SimConfig::from_json_str(r#"{ "explosion": { "frame_duration": 0.1, "total_frames": 0 } }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "explosion.total_frames", .. }));
    }

    #[test]
    fn test_rejects_short_path() {
        let err = SimConfig::from_json_str(r#"{ "camera_path": [[0,0,0],[1,0,0]] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = SimConfig::load_or_default("/nonexistent/skyward.json");
        assert_eq!(config, SimConfig::default());
        assert!(matches!(
            SimConfig::load("/nonexistent/skyward.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
