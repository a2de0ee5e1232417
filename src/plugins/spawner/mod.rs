//! Wave spawner.
//!
//! The `Spawner` resource is a resumable state machine ticked once per fixed
//! step. Every wait (next emission, wave clear, intermission) is a phase plus
//! a countdown, so stopping is just a phase change and pausing `Time<Virtual>`
//! freezes it.
//!
//! ```text
//! Idle -> Emitting -> Clearing -> Intermission -> Emitting -> ... -> Complete
//!   ^__________________ stop_spawning() from anywhere __________________|
//! ```
//!
//! `tick` returns signals instead of touching the world; `run_spawner` turns
//! them into `SpawnEnemyRequest` and `WaveEvent` messages.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::common::diagnostics::{ConfigIssue, ReportedIssues};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies::archetype::EnemyKind;
use crate::plugins::enemies::{begin_dying, EnemyKilled, SpawnEnemyRequest};
use crate::plugins::world::SpawnPoints;

/// Floor for `spawn_interval`, keeps the emission loop finite.
const MIN_SPAWN_INTERVAL: f32 = 0.01;

// -----------------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveConfig {
    pub kind: EnemyKind,
    pub count: u32,
    /// Seconds between emissions.
    pub spawn_interval: f32,
}

#[derive(Resource, Clone, Debug, PartialEq)]
pub struct Campaign {
    pub waves: Vec<WaveConfig>,
    pub time_between_waves: f32,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            waves: vec![
                WaveConfig { kind: EnemyKind::Zombie, count: 5, spawn_interval: 1.0 },
                WaveConfig { kind: EnemyKind::Runner, count: 8, spawn_interval: 0.6 },
                WaveConfig { kind: EnemyKind::Brute, count: 4, spawn_interval: 1.5 },
            ],
            time_between_waves: 3.0,
        }
    }
}

impl Campaign {
    pub fn total_enemies(&self) -> u32 {
        self.waves.iter().map(|w| w.count).sum()
    }
}

// -----------------------------------------------------------------------------
// State machine
// -----------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum SpawnerPhase {
    #[default]
    Idle,
    Emitting { next_in: f32 },
    /// Everything emitted; waiting for `killed_in_wave == count`.
    Clearing,
    Intermission { remaining: f32 },
    Complete,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnerSignal {
    WaveStarted(usize),
    Emit(EnemyKind),
    WaveCleared(usize),
    CampaignComplete,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct Spawner {
    phase: SpawnerPhase,
    wave_index: usize,
    spawned_in_wave: u32,
    killed_in_wave: u32,
    paused: bool,
}

impl Spawner {
    #[inline]
    pub fn phase(&self) -> SpawnerPhase {
        self.phase
    }

    #[inline]
    pub fn wave_index(&self) -> usize {
        self.wave_index
    }

    #[inline]
    pub fn spawned_in_wave(&self) -> u32 {
        self.spawned_in_wave
    }

    #[inline]
    pub fn killed_in_wave(&self) -> u32 {
        self.killed_in_wave
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Running a campaign (not Idle, not Complete).
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, SpawnerPhase::Idle | SpawnerPhase::Complete)
    }

    /// Reset to wave 0 and start emitting on the next tick.
    pub fn start_spawning(&mut self, campaign: &Campaign) {
        self.wave_index = 0;
        self.spawned_in_wave = 0;
        self.killed_in_wave = 0;
        self.paused = false;
        self.phase = if campaign.waves.is_empty() {
            SpawnerPhase::Complete
        } else {
            SpawnerPhase::Emitting { next_in: 0.0 }
        };
    }

    /// Abandon whatever is in flight. Safe from any phase.
    pub fn stop_spawning(&mut self) {
        self.phase = SpawnerPhase::Idle;
        self.spawned_in_wave = 0;
        self.killed_in_wave = 0;
        self.paused = false;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Count one kill toward the current wave. Returns `false` if the kill
    /// was ignored (inactive, or nothing left alive to kill).
    pub fn notify_killed(&mut self) -> bool {
        if !self.is_active() || self.killed_in_wave >= self.spawned_in_wave {
            return false;
        }
        self.killed_in_wave += 1;
        true
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, campaign: &Campaign, dt: f32) -> Vec<SpawnerSignal> {
        let mut out = Vec::new();
        if self.paused {
            return out;
        }

        match self.phase {
            SpawnerPhase::Idle | SpawnerPhase::Complete => {}

            SpawnerPhase::Emitting { next_in } => {
                let Some(wave) = campaign.waves.get(self.wave_index) else {
                    self.phase = SpawnerPhase::Complete;
                    out.push(SpawnerSignal::CampaignComplete);
                    return out;
                };

                let mut next_in = next_in - dt;
                while next_in <= 0.0 && self.spawned_in_wave < wave.count {
                    if self.spawned_in_wave == 0 {
                        out.push(SpawnerSignal::WaveStarted(self.wave_index));
                    }
                    out.push(SpawnerSignal::Emit(wave.kind));
                    self.spawned_in_wave += 1;
                    next_in += wave.spawn_interval.max(MIN_SPAWN_INTERVAL);
                }

                self.phase = if self.spawned_in_wave >= wave.count {
                    SpawnerPhase::Clearing
                } else {
                    SpawnerPhase::Emitting { next_in }
                };
            }

            SpawnerPhase::Clearing => {
                let count = campaign.waves.get(self.wave_index).map_or(0, |w| w.count);
                if self.killed_in_wave < count {
                    return out;
                }

                out.push(SpawnerSignal::WaveCleared(self.wave_index));
                self.wave_index += 1;
                self.spawned_in_wave = 0;
                self.killed_in_wave = 0;

                if self.wave_index < campaign.waves.len() {
                    self.phase = SpawnerPhase::Intermission {
                        remaining: campaign.time_between_waves.max(0.0),
                    };
                } else {
                    self.phase = SpawnerPhase::Complete;
                    out.push(SpawnerSignal::CampaignComplete);
                }
            }

            SpawnerPhase::Intermission { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    SpawnerPhase::Emitting { next_in: 0.0 }
                } else {
                    SpawnerPhase::Intermission { remaining }
                };
            }
        }

        out
    }
}

// -----------------------------------------------------------------------------
// ECS glue
// -----------------------------------------------------------------------------

/// Wave progress, for logs, HUD and the session.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum WaveEvent {
    Started { wave: usize },
    Cleared { wave: usize },
    CampaignComplete,
}

#[derive(Resource)]
pub struct SpawnRng(pub StdRng);

impl Default for SpawnRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SpawnRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Campaign>()
        .init_resource::<Spawner>()
        .init_resource::<SpawnRng>()
        .add_message::<WaveEvent>()
        .add_systems(Startup, validate_campaign)
        .add_systems(
            FixedUpdate,
            run_spawner.run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            FixedPostUpdate,
            record_kills
                .after(begin_dying)
                .run_if(in_state(GameState::Playing)),
        );
}

/// Producer: tick the state machine and emit spawn requests at random points.
pub fn run_spawner(
    time: Res<Time>,
    campaign: Res<Campaign>,
    points: Res<SpawnPoints>,
    mut spawner: ResMut<Spawner>,
    mut rng: ResMut<SpawnRng>,
    mut issues: ResMut<ReportedIssues>,
    mut requests: MessageWriter<SpawnEnemyRequest>,
    mut waves: MessageWriter<WaveEvent>,
) {
    if !spawner.is_active() || spawner.is_paused() {
        return;
    }
    if points.0.is_empty() {
        issues.report(ConfigIssue::NoSpawnPoints);
        return;
    }

    for signal in spawner.tick(&campaign, time.delta_secs()) {
        match signal {
            SpawnerSignal::Emit(kind) => {
                let Some(&position) = points.0.choose(&mut rng.0) else {
                    continue;
                };
                requests.write(SpawnEnemyRequest { kind, position });
            }
            SpawnerSignal::WaveStarted(wave) => {
                info!("Wave {} started", wave + 1);
                waves.write(WaveEvent::Started { wave });
            }
            SpawnerSignal::WaveCleared(wave) => {
                info!("Wave {} cleared", wave + 1);
                waves.write(WaveEvent::Cleared { wave });
            }
            SpawnerSignal::CampaignComplete => {
                info!("Campaign complete");
                waves.write(WaveEvent::CampaignComplete);
            }
        }
    }
}

/// Consumer: each finished enemy counts toward the current wave.
pub fn record_kills(mut spawner: ResMut<Spawner>, mut killed: MessageReader<EnemyKilled>) {
    for k in killed.read() {
        if !spawner.notify_killed() {
            debug!("Kill of {:?} not counted toward a wave", k.entity);
        }
    }
}

/// Startup check: a campaign that cannot reach the win threshold is playable
/// but unwinnable, so say so once.
pub fn validate_campaign(
    campaign: Res<Campaign>,
    tunables: Res<Tunables>,
    mut issues: ResMut<ReportedIssues>,
) {
    if campaign.waves.is_empty() {
        issues.report(ConfigIssue::EmptyCampaign);
        return;
    }
    let total = campaign.total_enemies();
    if total < tunables.enemies_to_win {
        issues.report(ConfigIssue::CampaignTooShort { total, needed: tunables.enemies_to_win });
    }
}
