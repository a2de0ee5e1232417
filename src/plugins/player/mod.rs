//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input, write `PlayerInput` resource
//! - FixedUpdate: apply velocity to the kinematic body, tick + fire the weapon
//! - FixedPostUpdate: stow the player on death, bring it back on `RespawnPlayer`
//!
//! Lives and the respawn countdown belong to the session; this module only
//! carries out what the session decides.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::diagnostics::{ConfigIssue, ReportedIssues};
use crate::common::layers::{non_interacting, player_layers, Layer};
use crate::common::lifecycle::RunScoped;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::camera::MainCamera;
use crate::plugins::health::{Died, Health};
use crate::plugins::projectiles::messages::SpawnProjectileRequest;
use crate::plugins::projectiles::ProjectileSystems;
use crate::plugins::weapons::{Weapon, WeaponFired};

/// Muzzle distance from the player's centre.
const MUZZLE_OFFSET: f32 = 18.0;
const PLAYER_RADIUS: f32 = 13.0;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Marker: the player is dead and waiting to respawn (hidden, out of play).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Respawning;

/// Written by the session when the respawn countdown ends.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RespawnPlayer;

#[derive(Resource, Default, Debug, Clone)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    /// Cursor in world space; `None` when the cursor is outside the window.
    pub aim_point: Option<Vec2>,
    pub fire: bool,
    /// Pending weapon switch, consumed by the fixed step.
    pub switch_to: Option<usize>,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_message::<RespawnPlayer>()
        .add_systems(OnEnter(GameState::Playing), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::Playing)))
        .add_systems(
            FixedUpdate,
            (apply_movement, fire_weapon)
                .before(ProjectileSystems::Spawn)
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            FixedPostUpdate,
            (stow_dead_player.after(ProjectileSystems::Resolve), respawn_player)
                .run_if(in_state(GameState::Playing)),
        );
}

pub fn spawn(mut commands: Commands, tunables: Res<Tunables>, q_existing: Query<(), With<Player>>) {
    if !q_existing.is_empty() {
        return;
    }

    commands.spawn((
        Name::new("Player"),
        Player,
        Health::new(tunables.player_max_health),
        Weapon::default(),
        Sprite {
            color: Color::srgb(0.2, 0.75, 0.9),
            custom_size: Some(Vec2::splat(PLAYER_RADIUS * 2.0)),
            ..default()
        },
        Transform::from_translation(tunables.player_spawn.extend(1.0)),
        Visibility::Visible,
        RigidBody::Kinematic,
        Collider::circle(PLAYER_RADIUS),
        player_layers(),
        LinearVelocity::ZERO,
        CollisionEventsEnabled,
        RunScoped,
    ));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    windows: Query<&Window>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<PlayerInput>,
) {
    let Some(keys) = keys else { return; };

    let mut axis = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }
    input.move_axis = axis.normalize_or_zero();

    for (i, key) in [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3].into_iter().enumerate() {
        if keys.just_pressed(key) {
            input.switch_to = Some(i);
        }
    }

    input.fire = buttons.is_some_and(|b| b.pressed(MouseButton::Left));
    input.aim_point = cursor_world_position(&windows, &q_camera);
}

fn cursor_world_position(
    windows: &Query<&Window>,
    q_camera: &Query<(&Camera, &GlobalTransform), With<MainCamera>>,
) -> Option<Vec2> {
    let window = match windows.single() {
        Ok(w) => w,
        Err(e) => { debug!("No single Window: {e:?}"); return None; }
    };
    let cursor = window.cursor_position()?;
    let (camera, camera_tf) = match q_camera.single() {
        Ok(v) => v,
        Err(e) => { debug!("No single MainCamera: {e:?}"); return None; }
    };
    match camera.viewport_to_world_2d(camera_tf, cursor) {
        Ok(p) => Some(p),
        Err(e) => { debug!("viewport_to_world_2d failed: {e:?}"); None }
    }
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut LinearVelocity, Has<Respawning>), With<Player>>,
) {
    let Ok((mut vel, respawning)) = q_player.single_mut() else {
        return;
    };
    vel.0 = if respawning { Vec2::ZERO } else { input.move_axis * tunables.player_speed };
}

/// Producer: tick the cooldown, apply weapon switches, and turn an accepted
/// shot into one `SpawnProjectileRequest` per pellet.
pub fn fire_weapon(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut issues: ResMut<ReportedIssues>,
    mut q_player: Query<(Entity, &Transform, &mut Weapon, Has<Respawning>), With<Player>>,
    mut requests: MessageWriter<SpawnProjectileRequest>,
    mut fired: MessageWriter<WeaponFired>,
) {
    let Ok((player_e, tf, mut weapon, respawning)) = q_player.single_mut() else {
        return;
    };

    weapon.tick(time.delta_secs());

    if let Some(index) = input.switch_to.take() {
        if weapon.select(index) {
            debug!("Switched to weapon {index}");
        }
    }

    if !input.fire || respawning {
        return;
    }

    let Some(config) = weapon.current().cloned() else {
        issues.report(ConfigIssue::EmptyLoadout);
        return;
    };

    let origin = tf.translation.truncate();
    let aim = input.aim_point.map(|p| p - origin).unwrap_or(Vec2::Y);

    let Some(dirs) = weapon.try_fire(aim) else {
        return;
    };

    let max_distance = config.max_distance(tunables.map_extent());
    for dir in &dirs {
        requests.write(SpawnProjectileRequest {
            origin: origin + *dir * MUZZLE_OFFSET,
            direction: *dir,
            speed: tunables.bullet_speed,
            damage: config.damage,
            max_distance,
        });
    }

    fired.write(WeaponFired {
        shooter: player_e,
        weapon: weapon.selected(),
        pellets: dirs.len(),
    });
}

/// Take a dead player out of play: hidden, still, colliding with nothing.
pub fn stow_dead_player(
    mut commands: Commands,
    mut deaths: MessageReader<Died>,
    mut q: Query<(&mut Visibility, &mut CollisionLayers, &mut LinearVelocity), With<Player>>,
) {
    for death in deaths.read() {
        let Ok((mut vis, mut layers, mut vel)) = q.get_mut(death.entity) else {
            continue;
        };
        *vis = Visibility::Hidden;
        *layers = non_interacting(Layer::Player);
        vel.0 = Vec2::ZERO;
        commands.entity(death.entity).insert(Respawning);
    }
}

/// Bring the player back at the spawn point with full health.
pub fn respawn_player(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut respawns: MessageReader<RespawnPlayer>,
    mut q: Query<(Entity, &mut Health, &mut Transform, &mut Visibility, &mut CollisionLayers), With<Player>>,
) {
    if respawns.read().count() == 0 {
        return;
    }
    let Ok((e, mut hp, mut tf, mut vis, mut layers)) = q.single_mut() else {
        debug!("RespawnPlayer without a player");
        return;
    };

    hp.reset();
    tf.translation = tunables.player_spawn.extend(tf.translation.z);
    *vis = Visibility::Visible;
    *layers = player_layers();
    commands.entity(e).remove::<Respawning>();
    info!("Player respawned");
}
