//! Per-tick simulation step
//!
//! Order within a tick is fixed: player intent, game-over check, collisions,
//! player integration, scripted entities, explosions. Collisions therefore
//! see positions from the end of the previous tick.

use glam::Vec3;

use super::collision::{clamp_player, clamp_to_scene, overlaps};
use super::spline::{evaluate_position, evaluate_tangent};
use super::state::{CollisionRole, EntityKind, GamePhase, PathId, World};
use crate::{heading_to_direction, wrap_degrees};

/// Held movement keys for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_forward: bool,
    pub move_backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub ascend: bool,
    pub descend: bool,
}

/// Advance the world to time `now` (seconds)
pub fn tick(world: &mut World, input: &TickInput, now: f32) {
    world.elapsed_time = now;

    apply_input(world, input);

    // Dead players keep turning but never move forward again
    if world.player().destroyed {
        world.phase = GamePhase::GameOver;
        world.player_mut().speed = 0.0;
    }

    resolve_collisions(world, now);
    integrate_player(world, now);
    advance_entities(world, now);

    world.explosions.advance(now);
}

/// Apply held keys to the player's speed and heading
pub fn apply_input(world: &mut World, input: &TickInput) {
    let cfg = &world.config;
    let (speed_inc, vertical_inc) = (cfg.speed_increment, cfg.vertical_speed_increment);
    let (speed_min, speed_max) = (cfg.speed_min, cfg.speed_max);
    let angle_delta = cfg.view_angle_delta;

    let player = world.player_mut();

    if input.move_forward && player.speed < speed_max {
        player.speed += speed_inc;
    }
    if input.move_backward && player.speed > speed_min {
        player.speed -= speed_inc;
    }

    if let EntityKind::Player { view_angle } = &mut player.kind {
        let mut turned = false;
        if input.turn_right {
            *view_angle = wrap_degrees(*view_angle - angle_delta);
            turned = true;
        }
        if input.turn_left {
            *view_angle = wrap_degrees(*view_angle + angle_delta);
            turned = true;
        }
        if turned {
            player.direction = heading_to_direction(*view_angle);
        }
    }

    if input.ascend {
        player.vertical_speed += vertical_inc;
    }
    if input.descend {
        player.vertical_speed -= vertical_inc;
    }
}

/// Test every live collidable entity against the player
///
/// All hits in a tick are resolved, not just the first one.
fn resolve_collisions(world: &mut World, now: f32) {
    let player_id = world.player_id();
    let World {
        config,
        entities,
        explosions,
        phase,
        ..
    } = world;

    let (player_pos, player_size, player_dead) = {
        let p = &entities[player_id.0];
        (p.position, p.size, p.destroyed)
    };

    let mut fatal_hit = None;
    for (i, entity) in entities.iter_mut().enumerate() {
        if i == player_id.0 || entity.destroyed || entity.role == CollisionRole::None {
            continue;
        }
        if !overlaps(
            player_pos,
            player_size,
            entity.position,
            entity.size,
            config.collision_shrink,
        ) {
            continue;
        }

        match entity.role {
            CollisionRole::Destructible => {
                entity.destroyed = true;
                explosions.spawn(entity.position, now, config.explosion);
                log::debug!("Player destroyed {} at {}", entity.name, entity.position);
            }
            CollisionRole::Fatal if !player_dead && fatal_hit.is_none() => {
                fatal_hit = Some(entity.name.clone());
            }
            _ => {}
        }
    }

    if let Some(name) = fatal_hit {
        entities[player_id.0].destroyed = true;
        explosions.spawn(player_pos, now, config.explosion);
        *phase = GamePhase::GameOver;
        log::info!("Player hit {name} at {player_pos}; game over");
    }
}

/// Move the player along its heading and keep it inside the scene box
fn integrate_player(world: &mut World, now: f32) {
    let cfg = &world.config;
    let factor = cfg.integration_factor;
    let (half_extent, min_h, max_h) = (cfg.scene_half_extent, cfg.min_height, cfg.max_height);

    let player = world.player_mut();
    player.current_time = now;

    let mut position = player.position + player.direction * player.speed * factor;
    position.z += player.vertical_speed * factor;
    player.position = clamp_player(position, player.size, half_extent, min_h, max_h);
}

/// Advance spline followers and spinners
fn advance_entities(world: &mut World, now: f32) {
    let player_id = world.player_id();
    let World {
        config, entities, ..
    } = world;

    for (i, entity) in entities.iter_mut().enumerate() {
        if i == player_id.0 {
            continue;
        }
        entity.current_time = now;
        let elapsed = (now - entity.start_time).max(0.0);

        match entity.kind {
            EntityKind::SplineFollower {
                initial_position,
                is_moving: true,
                path,
            } => {
                let curve = match path {
                    PathId::Flight => &config.flight_path,
                    PathId::Camera => &config.camera_path,
                };
                // Speed is validated non-negative, so the parameter is too
                let t = entity.speed.max(0.0) * elapsed;
                let position = initial_position + evaluate_position(curve, t);
                entity.position = clamp_to_scene(position, entity.size, config.scene_half_extent);

                let tangent = evaluate_tangent(curve, t);
                if tangent.length_squared() > f32::EPSILON {
                    entity.direction = tangent.normalize();
                }
            }
            EntityKind::Spinner {
                anchor,
                bob_amplitude,
            } => {
                entity.direction = Vec3::new(elapsed.cos(), elapsed.sin(), 0.0);
                entity.position = anchor + Vec3::Z * (bob_amplitude * elapsed.sin());
            }
            _ => {}
        }
    }
}
