use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use crate::common::state::GameState;
use crate::common::test_utils::{drain_messages, ensure_messages, insert_time_with_delta, run_system_once};
use crate::common::tunables::Tunables;
use crate::plugins::enemies::archetype::EnemyKind;
use crate::plugins::enemies::EnemyKilled;
use crate::plugins::health::Died;
use crate::plugins::player::{Player, RespawnPlayer};
use crate::plugins::spawner::{Campaign, Spawner, SpawnerPhase};

use super::{GameSession, PlayerDeathOutcome, SessionCommand};

fn playing(max_lives: u32, enemies_to_win: u32) -> GameSession {
    let mut s = GameSession::new(max_lives, enemies_to_win, 2.0);
    assert!(s.start_game());
    s
}

#[test]
fn starts_in_menu() {
    let s = GameSession::new(3, 10, 2.0);
    assert_eq!(s.phase(), GameState::Menu);
    assert_eq!(s.lives(), 3);
    assert_eq!(s.score(), 0);
}

#[test]
fn third_death_loses() {
    let mut s = playing(3, 10);

    assert_eq!(s.player_died(), PlayerDeathOutcome::Respawning);
    assert_eq!(s.lives(), 2);
    assert!(s.tick_respawn(2.0));

    assert_eq!(s.player_died(), PlayerDeathOutcome::Respawning);
    assert_eq!(s.lives(), 1);
    assert!(s.tick_respawn(2.0));

    assert_eq!(s.player_died(), PlayerDeathOutcome::GameOver);
    assert_eq!(s.lives(), 0);
    assert_eq!(s.phase(), GameState::Lost);
}

#[test]
fn tenth_kill_wins() {
    let mut s = playing(3, 10);
    for _ in 0..9 {
        assert!(!s.enemy_killed());
    }
    assert_eq!(s.phase(), GameState::Playing);

    assert!(s.enemy_killed());
    assert_eq!(s.phase(), GameState::Won);
    assert_eq!(s.kills(), 10);
}

#[test]
fn death_during_respawn_is_ignored() {
    let mut s = playing(3, 10);
    s.player_died();
    assert_eq!(s.player_died(), PlayerDeathOutcome::Ignored);
    assert_eq!(s.lives(), 2);
}

#[test]
fn respawn_counts_down() {
    let mut s = playing(3, 10);
    s.player_died();
    assert!(!s.tick_respawn(1.5));
    assert!(s.is_respawning());
    assert!(s.tick_respawn(0.5));
    assert!(!s.is_respawning());
    assert!(!s.tick_respawn(1.0));
}

#[test]
fn only_legal_transitions() {
    let mut s = GameSession::new(1, 1, 0.0);
    assert!(!s.back_to_menu());
    assert!(!s.enemy_killed());
    assert_eq!(s.player_died(), PlayerDeathOutcome::Ignored);

    assert!(s.start_game());
    assert!(!s.start_game());
    assert!(!s.back_to_menu());

    assert!(s.enemy_killed());
    assert_eq!(s.phase(), GameState::Won);
    assert_eq!(s.player_died(), PlayerDeathOutcome::Ignored);
    assert!(!s.start_game());

    assert!(s.back_to_menu());
    assert_eq!(s.phase(), GameState::Menu);
}

#[test]
fn back_to_menu_cancels_respawn_and_restart_resets() {
    let mut s = playing(2, 10);
    s.add_score(50);
    s.enemy_killed();
    s.player_died();
    s.player_died();
    assert!(s.tick_respawn(5.0));
    s.player_died();
    assert_eq!(s.phase(), GameState::Lost);

    assert!(s.back_to_menu());
    assert!(!s.is_respawning());
    assert!(s.start_game());
    assert_eq!(s.score(), 0);
    assert_eq!(s.kills(), 0);
    assert_eq!(s.lives(), 2);
}

#[test]
fn score_saturates() {
    let mut s = playing(3, 10);
    s.add_score(u32::MAX);
    s.add_score(10);
    assert_eq!(s.score(), u32::MAX);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[test]
fn first_session_wins() {
    let mut app = App::new();
    app.insert_resource(GameSession::new(7, 1, 0.0));
    app.init_resource::<GameSession>();
    assert_eq!(app.world().resource::<GameSession>().lives(), 7);
}

#[test]
fn session_reads_tunables() {
    let mut world = World::new();
    world.insert_resource(Tunables { max_lives: 5, ..default() });
    world.init_resource::<GameSession>();
    assert_eq!(world.resource::<GameSession>().lives(), 5);
}

#[test]
fn start_command_starts_spawner() {
    let mut world = World::new();
    world.insert_resource(GameSession::new(3, 10, 2.0));
    world.init_resource::<Spawner>();
    world.insert_resource(Campaign::default());
    ensure_messages::<SessionCommand>(&mut world);
    world.write_message(SessionCommand::Start);

    run_system_once(&mut world, super::apply_session_commands);

    assert_eq!(world.resource::<GameSession>().phase(), GameState::Playing);
    assert!(world.resource::<Spawner>().is_active());
}

#[test]
fn back_to_menu_command_stops_spawner() {
    let mut world = World::new();
    let mut session = playing(1, 10);
    session.player_died();
    world.insert_resource(session);
    let mut spawner = Spawner::default();
    spawner.start_spawning(&Campaign::default());
    world.insert_resource(spawner);
    world.insert_resource(Campaign::default());
    ensure_messages::<SessionCommand>(&mut world);
    world.write_message(SessionCommand::BackToMenu);

    run_system_once(&mut world, super::apply_session_commands);

    assert_eq!(world.resource::<GameSession>().phase(), GameState::Menu);
    assert_eq!(world.resource::<Spawner>().phase(), SpawnerPhase::Idle);
}

#[test]
fn mirror_phase_drives_bevy_state() {
    let mut app = App::new();
    app.add_plugins(StatesPlugin).init_state::<GameState>();
    app.insert_resource(playing(3, 10));
    app.add_systems(Update, super::mirror_phase);

    app.update();
    app.update();

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Playing);
}

#[test]
fn tally_kills_scores_and_wins() {
    let mut world = World::new();
    world.insert_resource(playing(3, 2));
    let mut spawner = Spawner::default();
    spawner.start_spawning(&Campaign::default());
    world.insert_resource(spawner);
    ensure_messages::<EnemyKilled>(&mut world);

    for _ in 0..2 {
        let e = world.spawn_empty().id();
        world.write_message(EnemyKilled { entity: e, kind: EnemyKind::Runner, points: 15 });
    }
    run_system_once(&mut world, super::tally_kills);

    let session = world.resource::<GameSession>();
    assert_eq!(session.score(), 30);
    assert_eq!(session.phase(), GameState::Won);
    assert!(!world.resource::<Spawner>().is_active());
}

#[test]
fn player_death_pauses_spawner() {
    let mut world = World::new();
    world.insert_resource(playing(3, 10));
    let mut spawner = Spawner::default();
    spawner.start_spawning(&Campaign::default());
    world.insert_resource(spawner);
    ensure_messages::<Died>(&mut world);

    let player = world.spawn(Player).id();
    let other = world.spawn_empty().id();
    world.write_message(Died { entity: other });
    world.write_message(Died { entity: player });

    run_system_once(&mut world, super::handle_player_death);

    assert_eq!(world.resource::<GameSession>().lives(), 2);
    assert!(world.resource::<Spawner>().is_paused());
}

#[test]
fn last_life_stops_spawner() {
    let mut world = World::new();
    world.insert_resource(playing(1, 10));
    let mut spawner = Spawner::default();
    spawner.start_spawning(&Campaign::default());
    world.insert_resource(spawner);
    ensure_messages::<Died>(&mut world);

    let player = world.spawn(Player).id();
    world.write_message(Died { entity: player });
    run_system_once(&mut world, super::handle_player_death);

    assert_eq!(world.resource::<GameSession>().phase(), GameState::Lost);
    assert_eq!(world.resource::<Spawner>().phase(), SpawnerPhase::Idle);
}

#[test]
fn respawn_expiry_resumes_spawner_and_requests_respawn() {
    let mut world = World::new();
    let mut session = playing(3, 10);
    session.player_died();
    world.insert_resource(session);
    let mut spawner = Spawner::default();
    spawner.start_spawning(&Campaign::default());
    spawner.set_paused(true);
    world.insert_resource(spawner);
    ensure_messages::<RespawnPlayer>(&mut world);

    insert_time_with_delta(&mut world, 1.0);
    run_system_once(&mut world, super::tick_respawn);
    assert!(drain_messages::<RespawnPlayer>(&mut world).is_empty());

    run_system_once(&mut world, super::tick_respawn);
    assert_eq!(drain_messages::<RespawnPlayer>(&mut world).len(), 1);
    assert!(!world.resource::<Spawner>().is_paused());
}
