//! World plugin: arena walls, floor, and the enemy spawn points.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::common::tunables::Tunables;

const TILE: f32 = 64.0;
const WALL_THICKNESS: f32 = 30.0;
/// Distance of spawn points from the walls.
const SPAWN_INSET: f32 = 96.0;

/// Candidate enemy spawn locations. Empty is allowed; the spawner reports it.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnPoints(pub Vec<Vec2>);

impl SpawnPoints {
    /// Corners and edge midpoints, pulled in from the walls.
    pub fn around_arena(half: Vec2, inset: f32) -> Self {
        let hx = (half.x - inset).max(0.0);
        let hy = (half.y - inset).max(0.0);
        Self(vec![
            Vec2::new(-hx, hy),
            Vec2::new(0.0, hy),
            Vec2::new(hx, hy),
            Vec2::new(hx, 0.0),
            Vec2::new(hx, -hy),
            Vec2::new(0.0, -hy),
            Vec2::new(-hx, -hy),
            Vec2::new(-hx, 0.0),
        ])
    }
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<SpawnPoints>() {
        let half = app.world().resource::<Tunables>().arena_half_extents();
        app.insert_resource(SpawnPoints::around_arena(half, SPAWN_INSET));
    }
    app.add_systems(Startup, (spawn_arena, spawn_floor));
}

fn spawn_arena(mut commands: Commands, tunables: Res<Tunables>) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    let half = tunables.arena_half_extents();
    let t = WALL_THICKNESS;

    let wall_layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]);

    let mut spawn_wall = |name: &str, pos: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name.to_string()),
            Sprite {
                color: wall_color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            wall_layers,
        ));
    };

    spawn_wall(
        "WallTop",
        Vec2::new(0.0, half.y + t * 0.5),
        Vec2::new(half.x * 2.0 + t * 2.0, t),
    );
    spawn_wall(
        "WallBottom",
        Vec2::new(0.0, -half.y - t * 0.5),
        Vec2::new(half.x * 2.0 + t * 2.0, t),
    );
    spawn_wall("WallLeft", Vec2::new(-half.x - t * 0.5, 0.0), Vec2::new(t, half.y * 2.0));
    spawn_wall("WallRight", Vec2::new(half.x + t * 0.5, 0.0), Vec2::new(t, half.y * 2.0));
}

/// Checkerboard floor from solid-colour sprites; the project ships no assets.
fn spawn_floor(mut commands: Commands, tunables: Res<Tunables>) {
    let half = tunables.arena_half_extents();
    let nx = (half.x / TILE) as i32;
    let ny = (half.y / TILE) as i32;

    (-ny..=ny)
        .flat_map(|y| (-nx..=nx).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let world_pos = Vec3::new(x as f32 * TILE, y as f32 * TILE, 0.0);
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE)),
                Transform::from_translation(world_pos),
            ));
        });
}

#[cfg(test)]
mod tests;
