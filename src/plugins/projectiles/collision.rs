//! Projectile contact resolution.
//!
//! First contact wins: the first health-bearing entity a projectile overlaps
//! takes the damage and the projectile is spent immediately. No penetration.
//! A projectile that has used up its range hits nothing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::lifecycle::PendingDespawn;
use crate::plugins::health::{strike, Died, Health};
use crate::plugins::physics::{split_pair, started_sides};

use super::components::Projectile;
use super::messages::ProjectileHit;

pub fn resolve_projectile_hits(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_is_projectile: Query<(), With<Projectile>>,
    mut q_projectiles: Query<&mut Projectile>,
    mut q_health: Query<&mut Health, Without<Projectile>>,
    mut died: MessageWriter<Died>,
    mut hits: MessageWriter<ProjectileHit>,
) {
    for ev in started.read() {
        let Some((shot, other)) =
            split_pair(started_sides(ev), |s| q_is_projectile.contains(s.collider))
        else {
            continue;
        };

        let Ok(mut projectile) = q_projectiles.get_mut(shot.collider) else {
            continue;
        };
        // Out of range counts as spent even before motion has marked it.
        if projectile.spent || projectile.is_exhausted() {
            continue;
        }

        let target = other.owner();
        let Ok(mut health) = q_health.get_mut(target) else {
            continue; // nothing to hurt; keep flying
        };
        if !health.is_alive() {
            continue;
        }

        strike(target, &mut health, projectile.damage, &mut died);
        projectile.spent = true;
        commands.entity(shot.collider).insert(PendingDespawn);

        hits.write(ProjectileHit {
            target,
            direction: projectile.direction,
            damage: projectile.damage,
        });
    }
}
