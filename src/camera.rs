//! Camera rig
//!
//! Computes where the camera sits and looks for each viewing mode. Building
//! projection matrices and uploading them is left to the renderer.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::sim::World;
use crate::sim::orient::is_vector_null;
use crate::sim::spline::{evaluate_position, evaluate_tangent};

/// Distance behind the player in third-person view
const THIRD_PERSON_DISTANCE: f32 = 0.3;
/// Height above the player in third-person view
const THIRD_PERSON_HEIGHT: f32 = 0.15;

/// Viewing modes, cycled with [`CameraMode::next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    /// Fixed view from above the scene centre
    #[default]
    TopView,
    /// From the player's eyes, pitched by the elevation angle
    FirstPerson,
    /// Trailing behind and above the player
    ThirdPerson,
    /// Flying the camera spline around the scene
    FlyPath,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            CameraMode::TopView => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::FlyPath,
            CameraMode::FlyPath => CameraMode::TopView,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::TopView => "top",
            CameraMode::FirstPerson => "first-person",
            CameraMode::ThirdPerson => "third-person",
            CameraMode::FlyPath => "fly-path",
        }
    }
}

/// Eye, target and up vector of a camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }
}

/// Camera state owned by the presentation layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraRig {
    pub mode: CameraMode,
    /// Pitch in degrees (positive looks down)
    pub elevation: f32,
    /// When the fly-path started (seconds)
    pub path_start_time: f32,
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to the next mode; the fly-path restarts from its first point
    pub fn cycle(&mut self, now: f32) {
        self.set_mode(self.mode.next(), now);
    }

    pub fn set_mode(&mut self, mode: CameraMode, now: f32) {
        self.mode = mode;
        if mode == CameraMode::FlyPath {
            self.path_start_time = now;
        }
        log::debug!("Camera mode: {}", mode.as_str());
    }

    /// Pitch from vertical mouse movement
    ///
    /// A change that would reach the elevation limit is dropped.
    pub fn apply_mouse(&mut self, dy: f32, config: &SimConfig) {
        let delta = config.mouse_sensitivity * dy;
        if (self.elevation + delta).abs() < config.camera_elevation_max {
            self.elevation += delta;
        }
    }

    /// Back to the top view, level
    pub fn reset(&mut self) {
        self.mode = CameraMode::TopView;
        self.elevation = 0.0;
        self.path_start_time = 0.0;
    }

    /// Camera pose for the current mode
    pub fn pose(&self, world: &World, now: f32) -> CameraPose {
        let player = world.player();
        match self.mode {
            CameraMode::TopView => CameraPose {
                eye: Vec3::Z,
                center: Vec3::ZERO,
                up: Vec3::Y,
            },
            CameraMode::FirstPerson => {
                let pitch = (-self.elevation).to_radians();
                let eye = player.position;
                CameraPose {
                    eye,
                    center: eye + pitch.cos() * player.direction + pitch.sin() * Vec3::Z,
                    up: Vec3::Z,
                }
            }
            CameraMode::ThirdPerson => {
                let heading = if is_vector_null(player.direction) {
                    Vec3::Y
                } else {
                    player.direction.normalize()
                };
                let eye = player.position - heading * THIRD_PERSON_DISTANCE
                    + Vec3::Z * THIRD_PERSON_HEIGHT;
                CameraPose {
                    eye,
                    center: player.position,
                    up: Vec3::Z,
                }
            }
            CameraMode::FlyPath => {
                let curve = &world.config.camera_path;
                let t = world.config.camera_path_speed * (now - self.path_start_time).max(0.0);
                let eye = evaluate_position(curve, t);
                let tangent = evaluate_tangent(curve, t);
                let forward = if tangent.length_squared() > f32::EPSILON {
                    tangent.normalize()
                } else {
                    Vec3::Y
                };
                CameraPose {
                    eye,
                    center: eye + forward,
                    up: Vec3::Z,
                }
            }
        }
    }
}
