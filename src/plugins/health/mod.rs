//! Health: hit points for any combatant, plus the `Died` notification.
//!
//! `Health` is pure data with the rules attached. Whoever applies damage
//! writes `Died` when `apply_damage` reports the alive → dead transition, so
//! the message fires exactly once per life no matter how many hits land
//! afterwards.

use bevy::prelude::*;

/// Written once when an entity's health reaches zero.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Died {
    pub entity: Entity,
}

/// Result of a damage call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead, or a non-positive amount.
    Ignored,
    Hurt,
    /// This call took the last hit point.
    Died,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    current: f32,
    max: f32,
    // Latch: set on the alive -> dead transition, cleared by `reset`.
    died: bool,
}

impl Health {
    /// Full health. A non-positive `max` is clamped to one hit point.
    pub fn new(max: f32) -> Self {
        let max = if max > 0.0 { max } else { 1.0 };
        Self { current: max, max, died: false }
    }

    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    #[inline]
    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if !self.is_alive() || self.died || !(amount > 0.0) {
            return DamageOutcome::Ignored;
        }

        self.current = (self.current - amount).max(0.0);

        if self.is_alive() {
            DamageOutcome::Hurt
        } else {
            self.died = true;
            DamageOutcome::Died
        }
    }

    /// Returns `true` if any health was restored. Dead entities stay dead.
    pub fn heal(&mut self, amount: f32) -> bool {
        if !self.is_alive() || self.current >= self.max || !(amount > 0.0) {
            return false;
        }
        self.current = (self.current + amount).min(self.max);
        true
    }

    pub fn reset(&mut self) {
        self.current = self.max;
        self.died = false;
    }
}

/// Apply `amount` to `health` and write `Died` on the killing blow.
pub fn strike(
    entity: Entity,
    health: &mut Health,
    amount: f32,
    died: &mut MessageWriter<Died>,
) -> DamageOutcome {
    let outcome = health.apply_damage(amount);
    if outcome == DamageOutcome::Died {
        died.write(Died { entity });
    }
    outcome
}

pub fn plugin(app: &mut App) {
    app.add_message::<Died>();
}

#[cfg(test)]
mod tests;
