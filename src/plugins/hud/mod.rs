//! HUD readout.
//!
//! The core exposes plain numbers in `HudReadout`; drawing them is a render
//! concern. The full app shows them in the window title.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::state::GameState;
use crate::plugins::health::Health;
use crate::plugins::player::Player;
use crate::plugins::session::GameSession;
use crate::plugins::spawner::{Campaign, Spawner};

#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct HudReadout {
    pub score: u32,
    pub lives: u32,
    pub health: f32,
    pub max_health: f32,
    /// 1-based wave number, clamped to `waves`.
    pub wave: usize,
    pub waves: usize,
    pub phase: GameState,
}

impl HudReadout {
    pub fn title(&self) -> String {
        match self.phase {
            GameState::Menu => "Arena Shooter | Press Enter to start".to_string(),
            GameState::Playing => format!(
                "Score {} | Lives {} | HP {:.0}/{:.0} | Wave {}/{}",
                self.score, self.lives, self.health, self.max_health, self.wave, self.waves
            ),
            GameState::Won => format!("You win! Score {} | Enter for menu", self.score),
            GameState::Lost => format!("Game over. Score {} | Enter for menu", self.score),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<HudReadout>()
        .add_systems(Update, refresh_readout);
}

pub fn render_plugin(app: &mut App) {
    app.add_systems(Update, write_window_title.after(refresh_readout));
}

pub fn refresh_readout(
    session: Res<GameSession>,
    spawner: Res<Spawner>,
    campaign: Res<Campaign>,
    q_player: Query<&Health, With<Player>>,
    mut hud: ResMut<HudReadout>,
) {
    let (health, max_health) = q_player
        .single()
        .map(|hp| (hp.current(), hp.max()))
        .unwrap_or((0.0, 0.0));

    let waves = campaign.waves.len();
    let next = HudReadout {
        score: session.score(),
        lives: session.lives(),
        health,
        max_health,
        wave: (spawner.wave_index() + 1).min(waves),
        waves,
        phase: session.phase(),
    };

    // Avoid change detection churn on idle frames.
    if *hud != next {
        *hud = next;
    }
}

fn write_window_title(hud: Res<HudReadout>, mut q_window: Query<&mut Window, With<PrimaryWindow>>) {
    if !hud.is_changed() {
        return;
    }
    let Ok(mut window) = q_window.single_mut() else {
        return;
    };
    window.title = hud.title();
}
