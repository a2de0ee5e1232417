//! Straight-line motion with range exhaustion.

use bevy::prelude::*;

use crate::common::lifecycle::PendingDespawn;

use super::components::Projectile;

pub fn advance_projectiles(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Projectile, &mut Transform), Without<PendingDespawn>>,
) {
    let dt = time.delta_secs();

    for (e, mut projectile, mut tf) in &mut q {
        if projectile.spent {
            continue;
        }

        let step = projectile.advance(dt);
        tf.translation += step.extend(0.0);

        if projectile.is_exhausted() {
            projectile.spent = true;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}
