//! Weapons: fire-rate gated emitters with single-shot and spread patterns.
//!
//! A `Weapon` component holds a loadout of `WeaponConfig`s, the selected
//! index, and a cooldown counter. The cooldown is "time remaining", ticked by
//! the fixed delta, so it freezes with the simulation clock.
//!
//! `try_fire` returns the pellet directions; turning those into projectile
//! spawn requests is the caller's job (see `player::fire_weapon`).

use bevy::prelude::*;

/// Visual/audio cue: a weapon fired a volley.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub weapon: usize,
    pub pellets: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FirePattern {
    Single,
    Spread { pellets: u32, spread_degrees: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeaponConfig {
    pub name: &'static str,
    /// Seconds between shots.
    pub fire_rate: f32,
    pub damage: f32,
    /// Range as a fraction of the map extent, in (0, 1].
    pub range_fraction: f32,
    pub pattern: FirePattern,
}

impl WeaponConfig {
    pub fn pistol() -> Self {
        Self {
            name: "Pistol",
            fire_rate: 0.25,
            damage: 25.0,
            range_fraction: 0.6,
            pattern: FirePattern::Single,
        }
    }

    pub fn shotgun() -> Self {
        Self {
            name: "Shotgun",
            fire_rate: 0.8,
            damage: 15.0,
            range_fraction: 0.35,
            pattern: FirePattern::Spread { pellets: 6, spread_degrees: 30.0 },
        }
    }

    pub fn rifle() -> Self {
        Self {
            name: "Rifle",
            fire_rate: 0.1,
            damage: 12.0,
            range_fraction: 0.9,
            pattern: FirePattern::Single,
        }
    }

    /// Projectile range for a map whose longest side is `map_extent`.
    #[inline]
    pub fn max_distance(&self, map_extent: f32) -> f32 {
        map_extent * self.range_fraction.clamp(f32::EPSILON, 1.0)
    }

    #[inline]
    pub fn pellet_count(&self) -> usize {
        match self.pattern {
            FirePattern::Single => 1,
            FirePattern::Spread { pellets, .. } => pellets.max(1) as usize,
        }
    }
}

/// Angular offsets (degrees) of each pellet relative to the aim direction.
///
/// Evenly spaced over `[-spread/2, +spread/2]` with `pellets - 1` steps;
/// a single pellet flies straight.
pub fn pellet_offsets(pattern: FirePattern) -> Vec<f32> {
    match pattern {
        FirePattern::Single => vec![0.0],
        FirePattern::Spread { pellets, .. } if pellets <= 1 => vec![0.0],
        FirePattern::Spread { pellets, spread_degrees } => {
            let half = spread_degrees * 0.5;
            let step = spread_degrees / (pellets - 1) as f32;
            (0..pellets).map(|i| -half + step * i as f32).collect()
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Weapon {
    loadout: Vec<WeaponConfig>,
    selected: usize,
    cooldown: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(vec![WeaponConfig::pistol(), WeaponConfig::shotgun(), WeaponConfig::rifle()])
    }
}

impl Weapon {
    pub fn new(loadout: Vec<WeaponConfig>) -> Self {
        Self { loadout, selected: 0, cooldown: 0.0 }
    }

    #[inline]
    pub fn current(&self) -> Option<&WeaponConfig> {
        self.loadout.get(self.selected)
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn loadout(&self) -> &[WeaponConfig] {
        &self.loadout
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    /// Switch to `index`. Out of range requests are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.loadout.len() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        self.cooldown = (self.cooldown - dt).max(0.0);
    }

    /// Fire along `aim`. Returns one unit direction per pellet, or `None`
    /// while cooling down (or with an empty loadout).
    pub fn try_fire(&mut self, aim: Vec2) -> Option<Vec<Vec2>> {
        if !self.is_ready() {
            return None;
        }
        let config = self.loadout.get(self.selected)?;

        let aim = aim.try_normalize().unwrap_or(Vec2::Y);
        let dirs = pellet_offsets(config.pattern)
            .into_iter()
            .map(|deg| Vec2::from_angle(deg.to_radians()).rotate(aim))
            .collect();

        self.cooldown = config.fire_rate.max(0.0);
        Some(dirs)
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<WeaponFired>();
}

#[cfg(test)]
mod tests;
