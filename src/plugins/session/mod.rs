//! Game session: score, lives, kill tally and the Menu/Playing/Won/Lost phase.
//!
//! `GameSession` is the single source of truth for the phase. Bevy's
//! `State<GameState>` follows it (`mirror_phase`) so other plugins can use
//! `in_state` / `OnEnter` without knowing the rules.
//!
//! Message flow:
//! - `SessionCommand` (menu input) -> start / back to menu
//! - `EnemyKilled` -> score + kills (after the spawner counted it)
//! - `Died` on the player -> lives, respawn countdown or Lost
//! - countdown expiry -> `RespawnPlayer`

use bevy::prelude::*;

use crate::common::lifecycle::despawn_run_entities;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::EnemyKilled;
use crate::plugins::health::Died;
use crate::plugins::player::{Player, RespawnPlayer};
use crate::plugins::projectiles::ProjectileSystems;
use crate::plugins::spawner::{record_kills, Campaign, Spawner, WaveEvent};

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    BackToMenu,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerDeathOutcome {
    /// Not playing, or already waiting on a respawn.
    Ignored,
    Respawning,
    GameOver,
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    score: u32,
    lives: u32,
    max_lives: u32,
    kills: u32,
    enemies_to_win: u32,
    respawn_delay: f32,
    phase: GameState,
    /// Seconds until the player comes back; `None` when not respawning.
    respawn: Option<f32>,
}

impl FromWorld for GameSession {
    fn from_world(world: &mut World) -> Self {
        let t = world.get_resource::<Tunables>().cloned().unwrap_or_default();
        Self::new(t.max_lives, t.enemies_to_win, t.respawn_delay)
    }
}

impl GameSession {
    pub fn new(max_lives: u32, enemies_to_win: u32, respawn_delay: f32) -> Self {
        Self {
            score: 0,
            lives: max_lives,
            max_lives,
            kills: 0,
            enemies_to_win,
            respawn_delay: respawn_delay.max(0.0),
            phase: GameState::Menu,
            respawn: None,
        }
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[inline]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    #[inline]
    pub fn phase(&self) -> GameState {
        self.phase
    }

    #[inline]
    pub fn is_respawning(&self) -> bool {
        self.respawn.is_some()
    }

    /// Menu -> Playing with fresh score, lives and kills.
    pub fn start_game(&mut self) -> bool {
        if self.phase != GameState::Menu {
            return false;
        }
        self.score = 0;
        self.lives = self.max_lives;
        self.kills = 0;
        self.respawn = None;
        self.phase = GameState::Playing;
        true
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Count a kill. Returns `true` if this kill won the game.
    pub fn enemy_killed(&mut self) -> bool {
        if self.phase != GameState::Playing {
            return false;
        }
        self.kills += 1;
        if self.kills < self.enemies_to_win {
            return false;
        }
        self.phase = GameState::Won;
        self.respawn = None;
        true
    }

    pub fn player_died(&mut self) -> PlayerDeathOutcome {
        if self.phase != GameState::Playing || self.respawn.is_some() {
            return PlayerDeathOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.respawn = Some(self.respawn_delay);
            PlayerDeathOutcome::Respawning
        } else {
            self.phase = GameState::Lost;
            PlayerDeathOutcome::GameOver
        }
    }

    /// Count down a pending respawn. Returns `true` on the tick it expires.
    pub fn tick_respawn(&mut self, dt: f32) -> bool {
        if self.phase != GameState::Playing {
            return false;
        }
        let Some(remaining) = self.respawn else {
            return false;
        };
        let remaining = remaining - dt;
        if remaining > 0.0 {
            self.respawn = Some(remaining);
            return false;
        }
        self.respawn = None;
        true
    }

    /// Won/Lost -> Menu. Cancels any pending respawn.
    pub fn back_to_menu(&mut self) -> bool {
        if !self.phase.is_terminal() {
            return false;
        }
        self.respawn = None;
        self.phase = GameState::Menu;
        true
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<GameSession>()
        .add_message::<SessionCommand>()
        .add_systems(
            Update,
            (menu_input, apply_session_commands, mirror_phase).chain(),
        )
        .add_systems(
            FixedUpdate,
            tick_respawn.run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            FixedPostUpdate,
            (
                tally_kills.after(record_kills),
                handle_player_death.after(ProjectileSystems::Resolve),
                log_waves,
            )
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(OnEnter(GameState::Playing), resume_time)
        .add_systems(OnEnter(GameState::Menu), (resume_time, despawn_run_entities))
        .add_systems(OnEnter(GameState::Won), (freeze_time, stop_spawner))
        .add_systems(OnEnter(GameState::Lost), (freeze_time, stop_spawner));
}

// -----------------------------------------------------------------------------
// Commands and phase mirroring
// -----------------------------------------------------------------------------

/// Enter starts a run from the menu; Enter or Escape leaves a finished run.
fn menu_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    session: Res<GameSession>,
    mut out: MessageWriter<SessionCommand>,
) {
    let Some(keys) = keys else { return; };

    match session.phase() {
        GameState::Menu if keys.just_pressed(KeyCode::Enter) => {
            out.write(SessionCommand::Start);
        }
        GameState::Won | GameState::Lost
            if keys.any_just_pressed([KeyCode::Enter, KeyCode::Escape]) =>
        {
            out.write(SessionCommand::BackToMenu);
        }
        _ => {}
    }
}

pub fn apply_session_commands(
    mut reader: MessageReader<SessionCommand>,
    mut session: ResMut<GameSession>,
    mut spawner: ResMut<Spawner>,
    campaign: Res<Campaign>,
) {
    for cmd in reader.read() {
        match cmd {
            SessionCommand::Start => {
                if session.start_game() {
                    spawner.start_spawning(&campaign);
                    info!("Game started");
                }
            }
            SessionCommand::BackToMenu => {
                if session.back_to_menu() {
                    spawner.stop_spawning();
                    info!("Back to menu");
                }
            }
        }
    }
}

pub fn mirror_phase(
    session: Res<GameSession>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if session.phase() != *state.get() {
        info!("Phase {:?} -> {:?}", state.get(), session.phase());
        next.set(session.phase());
    }
}

// -----------------------------------------------------------------------------
// Gameplay notifications
// -----------------------------------------------------------------------------

/// Runs after the spawner counted the same kills.
pub fn tally_kills(
    mut killed: MessageReader<EnemyKilled>,
    mut session: ResMut<GameSession>,
    mut spawner: ResMut<Spawner>,
) {
    for k in killed.read() {
        if session.phase() != GameState::Playing {
            continue;
        }
        session.add_score(k.points);
        if session.enemy_killed() {
            spawner.stop_spawning();
            info!("Won with {} kills, score {}", session.kills(), session.score());
        }
    }
}

pub fn handle_player_death(
    mut deaths: MessageReader<Died>,
    q_player: Query<(), With<Player>>,
    mut session: ResMut<GameSession>,
    mut spawner: ResMut<Spawner>,
) {
    for death in deaths.read() {
        if !q_player.contains(death.entity) {
            continue;
        }
        match session.player_died() {
            PlayerDeathOutcome::Respawning => {
                spawner.set_paused(true);
                info!("Player died, {} lives left", session.lives());
            }
            PlayerDeathOutcome::GameOver => {
                spawner.stop_spawning();
                info!("Game over, score {}", session.score());
            }
            PlayerDeathOutcome::Ignored => {}
        }
    }
}

pub fn tick_respawn(
    time: Res<Time>,
    mut session: ResMut<GameSession>,
    mut spawner: ResMut<Spawner>,
    mut respawns: MessageWriter<RespawnPlayer>,
) {
    if session.tick_respawn(time.delta_secs()) {
        spawner.set_paused(false);
        respawns.write(RespawnPlayer);
    }
}

fn log_waves(mut waves: MessageReader<WaveEvent>, session: Res<GameSession>) {
    for ev in waves.read() {
        if *ev == WaveEvent::CampaignComplete {
            info!(
                "All waves spawned and cleared ({} kills, score {})",
                session.kills(),
                session.score()
            );
        }
    }
}

// -----------------------------------------------------------------------------
// Phase entry
// -----------------------------------------------------------------------------

fn freeze_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

fn stop_spawner(mut spawner: ResMut<Spawner>) {
    spawner.stop_spawning();
}

#[cfg(test)]
mod tests;
