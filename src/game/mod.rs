//! Game composition root.
//!
//! - `configure_full`: window + render plugins on top of the gameplay core.
//! - `configure_headless`: gameplay core only, for integration tests.
//!
//! Both share `configure_game`, which fixes the simulation rate and installs
//! the state machine before any plugin gates on it.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Simulation ticks per second. Every cooldown and countdown is driven by it.
pub const FIXED_HZ: f64 = 64.0;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Arena Shooter".into(),
            resolution: WindowResolution::new(1280, 720),
            resizable: false,
            ..default()
        }),
        ..default()
    });

    // Vulkan is unreliable on some Windows drivers; force DX12 and the discrete GPU.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);
    configure_game(app);
    plugins::register_render(app);
}

/// No DefaultPlugins and no render-only plugins (Firefly, camera, window title).
/// The caller supplies `MinimalPlugins` + `StatesPlugin`.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

fn configure_game(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .init_state::<GameState>();
    plugins::register_gameplay(app);
}
