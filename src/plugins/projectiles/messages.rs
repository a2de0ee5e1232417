//! Buffered projectile messages.
//!
//! Producers (the player's weapon) create *intent*; the spawn consumer is the
//! single place that creates projectile entities.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub origin: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub max_distance: f32,
}

/// A projectile landed on something with Health.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ProjectileHit {
    pub target: Entity,
    pub direction: Vec2,
    pub damage: f32,
}
