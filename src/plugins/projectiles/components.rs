use bevy::prelude::*;

/// A straight-line mover with a fixed range.
///
/// Invariant: `traveled <= max_distance`. The last step is clamped, so a
/// projectile never overshoots its range before it is removed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub max_distance: f32,
    pub traveled: f32,
    /// Set on first damaging contact or range exhaustion; later contacts are ignored.
    pub spent: bool,
}

impl Projectile {
    pub fn new(direction: Vec2, speed: f32, damage: f32, max_distance: f32) -> Self {
        Self {
            direction: direction.try_normalize().unwrap_or(Vec2::Y),
            speed: speed.max(0.0),
            damage,
            max_distance: max_distance.max(0.0),
            traveled: 0.0,
            spent: false,
        }
    }

    /// Move along `direction` for `dt` seconds; returns the displacement.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let remaining = (self.max_distance - self.traveled).max(0.0);
        let step = (self.speed * dt.max(0.0)).min(remaining);
        self.traveled += step;
        self.direction * step
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.traveled >= self.max_distance
    }
}
