//! World state and entity types
//!
//! Every simulated object shares one base record; per-kind data lives in
//! [`EntityKind`]. Entities sit in an arena addressed by [`EntityId`] and are
//! never removed mid-run: destruction only sets a flag.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::explosion::{ExplosionEffect, ExplosionRegistry};
use super::orient::build_frame;
use crate::config::{PropPlacement, SimConfig};
use crate::heading_to_direction;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    /// The player hit the fatal entity; ends only on restart
    GameOver,
}

/// Stable handle into the world's entity arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub usize);

/// What touching the player does to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionRole {
    /// Not tested against the player
    None,
    /// Explodes and is destroyed on contact
    Destructible,
    /// Destroys the player on contact
    Fatal,
}

/// Which path table a spline follower flies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathId {
    Flight,
    Camera,
}

/// Per-kind data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player {
        /// Heading in degrees
        view_angle: f32,
    },
    Terrain,
    /// Flies a closed spline offset from `initial_position`
    SplineFollower {
        initial_position: Vec3,
        is_moving: bool,
        path: PathId,
    },
    /// Spins in place and bobs vertically
    Spinner { anchor: Vec3, bob_amplitude: f32 },
    /// Static scenery
    Prop,
}

/// One simulated object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub role: CollisionRole,
    pub position: Vec3,
    /// Heading; also the orientation input for spinners
    pub direction: Vec3,
    pub speed: f32,
    pub vertical_speed: f32,
    /// Collision radius and render scale
    pub size: f32,
    pub destroyed: bool,
    pub start_time: f32,
    pub current_time: f32,
}

impl Entity {
    fn new(id: EntityId, name: &str, kind: EntityKind, role: CollisionRole, time: f32) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind,
            role,
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            speed: 0.0,
            vertical_speed: 0.0,
            size: 1.0,
            destroyed: false,
            start_time: time,
            current_time: time,
        }
    }

    fn prop(id: EntityId, name: &str, placement: &PropPlacement, time: f32) -> Self {
        let mut entity = Self::new(id, name, EntityKind::Prop, CollisionRole::Destructible, time);
        entity.position = placement.position;
        entity.direction = placement.direction;
        entity.size = placement.size;
        entity
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.destroyed
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player { .. })
    }

    /// Player heading in degrees (`None` for other kinds)
    pub fn view_angle(&self) -> Option<f32> {
        match self.kind {
            EntityKind::Player { view_angle } => Some(view_angle),
            _ => None,
        }
    }

    /// Placement transform (orientation from heading, scaled by size)
    pub fn model_matrix(&self) -> Mat4 {
        build_frame(self.position, self.direction, Vec3::Z)
            * Mat4::from_scale(Vec3::splat(self.size))
    }
}

/// The whole simulation: configuration, entities and explosions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub config: SimConfig,
    pub phase: GamePhase,
    /// Time of the last tick (seconds)
    pub elapsed_time: f32,
    pub(crate) entities: Vec<Entity>,
    pub explosions: ExplosionRegistry,
    player: EntityId,
}

impl World {
    /// Build the scene at time zero
    pub fn new(config: SimConfig) -> Self {
        Self::new_at(config, 0.0)
    }

    /// Build the scene with every clock starting at `time`
    pub fn new_at(config: SimConfig, time: f32) -> Self {
        let mut world = Self {
            config,
            phase: GamePhase::Running,
            elapsed_time: time,
            entities: Vec::new(),
            explosions: ExplosionRegistry::new(),
            player: EntityId(0),
        };
        world.populate(time);
        world
    }

    /// Reset every entity to its configured start, drop all explosions and
    /// leave game over
    pub fn restart(&mut self, time: f32) {
        self.entities.clear();
        self.explosions.clear();
        self.phase = GamePhase::Running;
        self.elapsed_time = time;
        self.populate(time);
        log::info!("Scene restarted at t={time:.3} with {} entities", self.entities.len());
    }

    fn next_id(&self) -> EntityId {
        EntityId(self.entities.len())
    }

    fn populate(&mut self, time: f32) {
        let cfg = &self.config;
        let mut entities: Vec<Entity> = Vec::new();

        let view_angle = cfg.initial_view_angle;
        let mut player = Entity::new(
            EntityId(entities.len()),
            "player",
            EntityKind::Player { view_angle },
            CollisionRole::None,
            time,
        );
        player.direction = heading_to_direction(view_angle);
        player.size = cfg.player_size;
        entities.push(player);

        let mut terrain = Entity::new(
            EntityId(entities.len()),
            "terrain",
            EntityKind::Terrain,
            CollisionRole::None,
            time,
        );
        terrain.position = cfg.terrain_position;
        terrain.size = cfg.terrain_size;
        entities.push(terrain);

        let mut aircraft = Entity::new(
            EntityId(entities.len()),
            "foxbat",
            EntityKind::SplineFollower {
                initial_position: cfg.aircraft.anchor,
                is_moving: true,
                path: PathId::Flight,
            },
            CollisionRole::Destructible,
            time,
        );
        aircraft.position = cfg.aircraft.anchor + cfg.flight_path.as_slice()[0];
        aircraft.size = cfg.aircraft.size;
        aircraft.speed = cfg.aircraft.path_speed;
        entities.push(aircraft);

        entities.push(Entity::prop(EntityId(entities.len()), "car", &cfg.car, time));
        for (i, tree) in cfg.trees.iter().enumerate() {
            entities.push(Entity::prop(EntityId(entities.len()), &format!("tree-{i}"), tree, time));
        }

        let mut cube = Entity::new(
            EntityId(entities.len()),
            "cube",
            EntityKind::Spinner {
                anchor: cfg.cube.anchor,
                bob_amplitude: cfg.cube.bob_amplitude,
            },
            CollisionRole::Fatal,
            time,
        );
        cube.position = cfg.cube.anchor;
        cube.direction = Vec3::X;
        cube.size = cfg.cube.size;
        entities.push(cube);

        self.player = EntityId(0);
        self.entities = entities;
    }

    /// Drop everything but the player; later spawns get fresh ids
    pub fn retain_player_only(&mut self) {
        self.entities.truncate(self.player.0 + 1);
        self.entities.drain(..self.player.0);
        self.player = EntityId(0);
    }

    /// Add an entity to the arena and return its id
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id();
        entity.id = id;
        self.entities.push(entity);
        id
    }

    /// Add a static destructible prop
    pub fn spawn_prop(&mut self, name: &str, placement: &PropPlacement) -> EntityId {
        let entity = Entity::prop(self.next_id(), name, placement, self.elapsed_time);
        self.spawn(entity)
    }

    /// Add a fatal spinner at `anchor`
    pub fn spawn_fatal(&mut self, name: &str, anchor: Vec3, size: f32) -> EntityId {
        let mut entity = Entity::new(
            self.next_id(),
            name,
            EntityKind::Spinner {
                anchor,
                bob_amplitude: 0.0,
            },
            CollisionRole::Fatal,
            self.elapsed_time,
        );
        entity.position = anchor;
        entity.direction = Vec3::X;
        entity.size = size;
        self.spawn(entity)
    }

    pub fn player_id(&self) -> EntityId {
        self.player
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player.0]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.player.0]
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.0)
    }

    /// First entity with the given name
    pub fn find(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities still in play (what the renderer draws)
    pub fn live_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_live())
    }

    pub fn explosions(&self) -> &[ExplosionEffect] {
        self.explosions.as_slice()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Placement transform for an entity
    pub fn model_matrix(&self, id: EntityId) -> Option<Mat4> {
        self.entity(id).map(Entity::model_matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_scene() {
        let world = World::new(SimConfig::default());
        let player = world.player();
        assert_eq!(player.position, Vec3::ZERO);
        assert_eq!(player.view_angle(), Some(90.0));
        assert_eq!(player.speed, 0.0);
        assert!(player.direction.distance(Vec3::Y) < 1e-6);
        assert!(!world.is_game_over());
        assert!(world.explosions().is_empty());

        // Ids match arena slots
        for (i, e) in world.entities().iter().enumerate() {
            assert_eq!(e.id, EntityId(i));
            assert!(e.size > 0.0);
        }

        let cube = world.find("cube").unwrap();
        assert_eq!(cube.role, CollisionRole::Fatal);
        let foxbat = world.find("foxbat").unwrap();
        assert!(matches!(foxbat.kind, EntityKind::SplineFollower { is_moving: true, .. }));
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut world = World::new(SimConfig::default());
        world.player_mut().position = Vec3::new(0.5, 0.5, 0.1);
        world.player_mut().destroyed = true;
        world.phase = GamePhase::GameOver;
        world.explosions.spawn(Vec3::ZERO, 0.0, world.config.explosion);
        let count = world.entities().len();

        world.restart(3.0);

        assert_eq!(world.entities().len(), count);
        assert_eq!(world.player().position, Vec3::ZERO);
        assert!(!world.player().destroyed);
        assert_eq!(world.player().start_time, 3.0);
        assert!(world.explosions().is_empty());
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_spawned_ids_are_stable() {
        let mut world = World::new(SimConfig::default());
        let id = world.spawn_fatal("mine", Vec3::new(0.2, 0.2, 0.0), 0.05);
        assert_eq!(world.entity(id).unwrap().name, "mine");
        assert_eq!(world.entity(id).unwrap().id, id);
    }

    #[test]
    fn test_spawn_after_clearing_scenery() {
        let mut world = World::new(SimConfig::default());
        world.retain_player_only();
        assert_eq!(world.entities().len(), 1);
        assert!(world.player().is_player());

        let car = world.config.car;
        let prop = world.spawn_prop("crate", &car);
        let mine = world.spawn_fatal("mine", Vec3::ZERO, 0.1);
        assert_eq!((prop, mine), (EntityId(1), EntityId(2)));
        for (i, e) in world.entities().iter().enumerate() {
            assert_eq!(e.id, EntityId(i));
        }
        assert_eq!(world.entity(prop).unwrap().role, CollisionRole::Destructible);
        assert_eq!(world.entity(mine).unwrap().role, CollisionRole::Fatal);
    }

    #[test]
    fn test_model_matrix_scales_by_size() {
        let world = World::new(SimConfig::default());
        let m = world.model_matrix(world.player_id()).unwrap();
        let size = world.config.player_size;
        assert!((m.x_axis.truncate().length() - size).abs() < 1e-6);
        assert_eq!(m.w_axis.truncate(), Vec3::ZERO);
    }
}
