//! Tick-driven scene simulation
//!
//! This module contains all gameplay logic. It is single-threaded and
//! performs no I/O; the presentation layer reads the world between ticks.

pub mod collision;
pub mod explosion;
pub mod orient;
pub mod spline;
pub mod state;
pub mod tick;

pub use collision::{clamp_player, clamp_to_scene, overlaps};
pub use explosion::{ExplosionEffect, ExplosionParams, ExplosionRegistry};
pub use orient::{build_frame, is_vector_null};
pub use spline::{ControlPoints, evaluate_position, evaluate_tangent};
pub use state::{CollisionRole, Entity, EntityId, EntityKind, GamePhase, PathId, World};
pub use tick::{TickInput, apply_input, tick};
