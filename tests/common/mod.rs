//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `arena_shooter::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use arena_shooter::common::state::GameState;
use arena_shooter::common::tunables::Tunables;
use arena_shooter::plugins::session::SessionCommand;
use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

/// Same as `app_headless`, with caller tunables (installed before the plugins
/// so `init_resource` keeps them).
pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    app.insert_resource(tunables);
    arena_shooter::game::configure_headless(&mut app);
    // Run plugin finish/cleanup as `App::run` would; physics registers resources there.
    app.finish();
    app.cleanup();
    app
}

pub fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Send a session command and let the state change land.
pub fn command(app: &mut App, cmd: SessionCommand) {
    app.world_mut().write_message(cmd);
    for _ in 0..3 {
        app.update();
    }
}
