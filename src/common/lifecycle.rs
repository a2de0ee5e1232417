//! Entity lifecycle markers shared by every gameplay plugin.

use bevy::prelude::*;

/// Marker: entity belongs to the current run and is removed on return to the menu.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct RunScoped;

/// Marker: entity should be removed from the world.
///
/// We don't despawn inside the fixed step; we mark and despawn later in PostUpdate.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(PostUpdate, despawn_pending);
}

/// Runs in PostUpdate, after every fixed step of the frame.
pub fn despawn_pending(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

/// Remove everything that belongs to a run (player, enemies, projectiles).
pub fn despawn_run_entities(mut commands: Commands, q: Query<Entity, With<RunScoped>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
