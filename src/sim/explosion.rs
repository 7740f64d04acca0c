//! Timed explosion sprites
//!
//! Explosions are purely visual: they play a fixed number of sprite frames
//! and then leave the active set.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_FRAME_DURATION, EXPLOSION_TOTAL_FRAMES};

/// Sprite sheet timing shared by every explosion spawned with it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExplosionParams {
    /// Seconds each frame stays on screen
    pub frame_duration: f32,
    pub total_frames: u32,
}

impl Default for ExplosionParams {
    fn default() -> Self {
        Self {
            frame_duration: EXPLOSION_FRAME_DURATION,
            total_frames: EXPLOSION_TOTAL_FRAMES,
        }
    }
}

impl ExplosionParams {
    /// Total playback time in seconds
    #[inline]
    pub fn lifetime(&self) -> f32 {
        self.total_frames as f32 * self.frame_duration
    }
}

/// One active explosion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionEffect {
    pub position: Vec3,
    pub start_time: f32,
    pub current_time: f32,
    pub frame_duration: f32,
    pub total_frames: u32,
    pub destroyed: bool,
}

impl ExplosionEffect {
    pub fn new(position: Vec3, time: f32, params: ExplosionParams) -> Self {
        Self {
            position,
            start_time: time,
            current_time: time,
            frame_duration: params.frame_duration,
            total_frames: params.total_frames,
            destroyed: false,
        }
    }

    /// True once playback has run past the last frame
    #[inline]
    pub fn expired(&self) -> bool {
        self.current_time > self.start_time + self.total_frames as f32 * self.frame_duration
    }

    /// Sprite frame to draw (0-based, held on the last frame)
    pub fn frame(&self) -> u32 {
        let elapsed = (self.current_time - self.start_time).max(0.0);
        let frame = (elapsed / self.frame_duration) as u32;
        frame.min(self.total_frames.saturating_sub(1))
    }
}

/// Active explosions in spawn order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplosionRegistry {
    effects: Vec<ExplosionEffect>,
}

impl ExplosionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new explosion at `position`
    pub fn spawn(&mut self, position: Vec3, time: f32, params: ExplosionParams) {
        log::debug!("Explosion spawned at {position} (t={time:.3})");
        self.effects.push(ExplosionEffect::new(position, time, params));
    }

    /// Advance every effect to `time` and drop the expired ones
    pub fn advance(&mut self, time: f32) {
        let before = self.effects.len();
        self.effects.retain_mut(|effect| {
            effect.current_time = time;
            if effect.expired() {
                effect.destroyed = true;
            }
            !effect.destroyed
        });
        let retired = before - self.effects.len();
        if retired > 0 {
            log::debug!("Retired {retired} explosion(s), {} active", self.effects.len());
        }
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExplosionEffect> {
        self.effects.iter()
    }

    pub fn as_slice(&self) -> &[ExplosionEffect] {
        &self.effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ExplosionParams {
        ExplosionParams {
            frame_duration: 0.1,
            total_frames: 16,
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut registry = ExplosionRegistry::new();
        registry.spawn(Vec3::ZERO, 0.0, params());

        for t in [0.0, 0.5, 1.0, 1.59, 1.6] {
            registry.advance(t);
            assert_eq!(registry.len(), 1, "should still be active at t={t}");
        }

        registry.advance(1.6001);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_advance_empty_is_noop() {
        let mut registry = ExplosionRegistry::new();
        registry.advance(10.0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_removal_does_not_skip_neighbours() {
        let mut registry = ExplosionRegistry::new();
        // Alternate expired / live so every removal is followed by a survivor
        for i in 0..6 {
            let start = if i % 2 == 0 { 0.0 } else { 2.0 };
            registry.spawn(Vec3::new(i as f32, 0.0, 0.0), start, params());
        }
        // Two adjacent expired effects at the end
        registry.spawn(Vec3::new(6.0, 0.0, 0.0), 0.0, params());
        registry.spawn(Vec3::new(7.0, 0.0, 0.0), 0.0, params());

        registry.advance(2.5);

        let xs: Vec<f32> = registry.iter().map(|e| e.position.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 5.0]);
        assert!(registry.iter().all(|e| !e.destroyed && e.current_time == 2.5));
    }

    #[test]
    fn test_size_shrinks_between_spawns() {
        let mut registry = ExplosionRegistry::new();
        registry.spawn(Vec3::ZERO, 0.0, params());
        registry.spawn(Vec3::ONE, 0.5, params());
        registry.spawn(Vec3::X, 1.0, params());

        let mut last = registry.len();
        for step in 0..40 {
            registry.advance(step as f32 * 0.1);
            assert!(registry.len() <= last);
            last = registry.len();
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_frame_index() {
        let mut effect = ExplosionEffect::new(Vec3::ZERO, 1.0, params());
        assert_eq!(effect.frame(), 0);
        effect.current_time = 1.35;
        assert_eq!(effect.frame(), 3);
        effect.current_time = 5.0;
        assert_eq!(effect.frame(), 15);
    }
}
