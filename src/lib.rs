//! Skyward - simulation core of a small 3D terrain flyer scene
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (splines, collisions, explosions, game state)
//! - `camera`: Camera rig and view poses for the presentation layer
//! - `config`: Data-driven scene configuration

pub mod camera;
pub mod config;
pub mod sim;

pub use camera::{CameraMode, CameraPose, CameraRig};
pub use config::{ConfigError, SimConfig};

use glam::Vec3;

/// Scene configuration constants
pub mod consts {
    /// Scheduler period (~33 Hz)
    pub const TICK_PERIOD_MS: u64 = 30;

    /// Scene dimensions (play area is [-HALF_EXTENT, HALF_EXTENT] on x and y)
    pub const SCENE_HALF_EXTENT: f32 = 1.0;
    pub const MIN_HEIGHT: f32 = -0.15;
    pub const MAX_HEIGHT: f32 = 0.15;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 0.05;
    pub const PLAYER_SPEED_INCREMENT: f32 = 0.2;
    pub const PLAYER_UP_SPEED_INCREMENT: f32 = 0.1;
    pub const PLAYER_SPEED_MAX: f32 = 0.4;
    pub const PLAYER_SPEED_MIN: f32 = -0.2;
    /// Degrees turned per tick while a turn key is held
    pub const PLAYER_VIEW_ANGLE_DELTA: f32 = 2.0;
    pub const PLAYER_INITIAL_VIEW_ANGLE: f32 = 90.0;
    /// Scales speed into per-tick displacement
    pub const INTEGRATION_FACTOR: f32 = 0.015;

    /// Effective combined radius multiplier for hit tests
    pub const COLLISION_SHRINK: f32 = 0.7;

    /// Explosion sprite sheet timing
    pub const EXPLOSION_FRAME_DURATION: f32 = 0.1;
    pub const EXPLOSION_TOTAL_FRAMES: u32 = 16;

    /// Entity sizes
    pub const TERRAIN_SIZE: f32 = 1.0;
    pub const CUBE_SIZE: f32 = 0.1;
    pub const FOXBAT_SIZE: f32 = 0.1;
    pub const CAR_SIZE: f32 = 0.1;
    pub const TREE_SIZE: f32 = 0.2;

    /// Aircraft path speed (curve segments per second)
    pub const FOXBAT_PATH_SPEED: f32 = 0.5;
    /// Camera fly-path speed (curve segments per second)
    pub const CAMERA_PATH_SPEED: f32 = 0.25;
    /// Vertical bob of the spinning cube
    pub const CUBE_BOB_AMPLITUDE: f32 = 0.05;

    /// Camera
    pub const CAMERA_ELEVATION_MAX: f32 = 50.0;
    pub const CAMERA_MOUSE_SENSITIVITY: f32 = 0.01;
}

/// Wrap an angle in degrees with a truncating modulo (keeps the sign)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    angle % 360.0
}

/// Horizontal unit heading for a view angle in degrees
#[inline]
pub fn heading_to_direction(view_angle: f32) -> Vec3 {
    let rad = view_angle.to_radians();
    Vec3::new(rad.cos(), rad.sin(), 0.0)
}
