//! Tunable gameplay constants.
//!
//! Installed with `init_resource`, so an app (or a test) that inserts its own
//! `Tunables` before the plugins are registered keeps it.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    pub player_speed: f32,
    pub bullet_speed: f32,
    pub player_max_health: f32,
    pub player_spawn: Vec2,
    pub max_lives: u32,
    pub enemies_to_win: u32,
    /// Seconds the player stays hidden before respawning.
    pub respawn_delay: f32,
    /// Full playable extent of the arena (width, height).
    pub arena_size: Vec2,
    pub knockback_distance: f32,
    pub knockback_duration: f32,
    /// Seconds a dead enemy lingers (non-interacting) before removal.
    pub corpse_linger: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            player_speed: 420.0,
            bullet_speed: 900.0,
            player_max_health: 100.0,
            player_spawn: Vec2::ZERO,
            max_lives: 3,
            enemies_to_win: 15,
            respawn_delay: 2.0,
            arena_size: Vec2::new(2048.0, 1152.0),
            knockback_distance: 24.0,
            knockback_duration: 0.12,
            corpse_linger: 0.35,
        }
    }
}

impl Tunables {
    /// Longest side of the arena; projectile range is a fraction of this.
    #[inline]
    pub fn map_extent(&self) -> f32 {
        self.arena_size.x.max(self.arena_size.y)
    }

    #[inline]
    pub fn arena_half_extents(&self) -> Vec2 {
        self.arena_size * 0.5
    }
}
