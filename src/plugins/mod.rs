//! Feature plugins.
//!
//! Registration order matters in one place: `core` must run first because
//! `physics` and `world` read `Tunables` while they build.

use bevy::prelude::*;

use crate::common::lifecycle;

pub mod core;
pub mod enemies;
pub mod health;
pub mod hud;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod spawner;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    lifecycle::plugin(app);
    health::plugin(app);
    weapons::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    spawner::plugin(app);
    session::plugin(app);
    hud::plugin(app);
    app.add_plugins(projectiles::ProjectilesPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    hud::render_plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
