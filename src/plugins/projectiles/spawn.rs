//! Spawn consumer: turn requests into projectile entities.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::player_bullet_layers;
use crate::common::lifecycle::RunScoped;

use super::components::Projectile;
use super::messages::SpawnProjectileRequest;

const PROJECTILE_RADIUS: f32 = 4.0;

pub fn spawn_projectiles(
    mut commands: Commands,
    mut reader: MessageReader<SpawnProjectileRequest>,
) {
    for req in reader.read() {
        let projectile = Projectile::new(req.direction, req.speed, req.damage, req.max_distance);
        let angle = projectile.direction.to_angle();

        commands.spawn((
            Name::new("Projectile"),
            projectile,
            Sprite {
                color: Color::srgb(1.0, 0.85, 0.3),
                custom_size: Some(Vec2::new(10.0, 4.0)),
                ..default()
            },
            Transform::from_translation(req.origin.extend(2.0))
                .with_rotation(Quat::from_rotation_z(angle)),
            // Kinematic sensor: we move it ourselves and only want overlap events.
            RigidBody::Kinematic,
            Collider::circle(PROJECTILE_RADIUS),
            Sensor,
            player_bullet_layers(),
            CollisionEventsEnabled,
            RunScoped,
        ));
    }
}
