//! Enemies plugin: seekers with Health, contact damage, knockback and a
//! short death state.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components:
//!    - `Health` (shared), `Seeker`, `ContactDamage`, `Knockback`, `EnemyLifeState`.
//!
//! 2) RULES mutate facts in predictable places:
//!    - projectile collision (elsewhere) updates Health and writes `Died` / `ProjectileHit`.
//!    - this module turns `Died` into the Dying state and an `EnemyKilled` message,
//!      and `ProjectileHit` into a knockback.
//!
//! 3) Every component is present from spawn on. A hit or a contact only mutates
//!    numbers; nothing is inserted or removed per hit.
//!
//! Life cycle:
//! ```text
//!   Alive ──Died──▶ Dying{timer} ──timer──▶ Dead + PendingDespawn
//! ```
//! Death handling runs exactly once because only `Alive` reacts to `Died`.

pub mod archetype;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::diagnostics::{ConfigIssue, ReportedIssues};
use crate::common::layers::{enemy_layers, non_interacting, Layer};
use crate::common::lifecycle::{PendingDespawn, RunScoped};
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::health::{strike, Died, Health};
use crate::plugins::physics::{ended_sides, split_pair, started_sides, ContactSide};
use crate::plugins::player::{Player, Respawning};
use crate::plugins::projectiles::messages::ProjectileHit;
use crate::plugins::projectiles::ProjectileSystems;

pub use archetype::{EnemyArchetype, EnemyKind};

// -----------------------------------------------------------------------------
// Messages
// -----------------------------------------------------------------------------

/// Entity factory request: put an enemy of `kind` at `position`.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnEnemyRequest {
    pub kind: EnemyKind,
    pub position: Vec2,
}

/// An enemy finished dying. Consumed by the spawner (wave counter) and the
/// session (score + kill tally), in that order.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyKilled {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub points: u32,
}

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub points: u32,
}

/// Moves toward the player once it is within `proximity_range`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Seeker {
    pub move_speed: f32,
    pub proximity_range: f32,
    pub rotation_offset_degrees: f32,
}

/// Rate-limited damage while overlapping the player.
///
/// The cooldown counts down every tick and is only re-armed when a hit lands,
/// so the rate cap holds however long the overlap lasts.
#[derive(Component, Debug, Clone)]
pub struct ContactDamage {
    pub damage: f32,
    pub rate: f32,
    cooldown: f32,
    touching: bool,
}

impl ContactDamage {
    pub fn new(damage: f32, rate: f32) -> Self {
        Self { damage, rate: rate.max(0.0), cooldown: 0.0, touching: false }
    }

    #[inline]
    pub fn is_touching(&self) -> bool {
        self.touching
    }

    #[inline]
    pub fn set_touching(&mut self, touching: bool) {
        self.touching = touching;
    }

    #[inline]
    pub fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Advance the cooldown. Returns `true` when a hit should land now.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.touching && self.cooldown <= 0.0 {
            self.cooldown = self.rate;
            return true;
        }
        false
    }
}

/// Knockback: a fixed displacement spread linearly over a fixed duration.
/// Seeking is suspended while it is active.
#[derive(Component, Debug, Clone, Default)]
pub struct Knockback {
    offset: Vec2,
    duration: f32,
    elapsed: f32,
}

impl Knockback {
    pub fn start(&mut self, offset: Vec2, duration: f32) {
        self.offset = offset;
        self.duration = duration.max(0.0);
        self.elapsed = 0.0;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.elapsed < self.duration
    }

    /// Displacement for this tick.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        if !self.is_active() {
            return Vec2::ZERO;
        }
        let t0 = self.elapsed / self.duration;
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        let t1 = self.elapsed / self.duration;
        self.offset * (t1 - t0)
    }
}

/// Enemy lifecycle state machine.
#[derive(Component, Debug, Clone)]
pub enum EnemyLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

// -----------------------------------------------------------------------------
// Pure helpers
// -----------------------------------------------------------------------------

/// Step toward `to` for one tick, or `None` when the target is out of range.
/// The step never overshoots the target.
pub fn seek_step(from: Vec2, to: Vec2, speed: f32, dt: f32, range: f32) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > range {
        return None;
    }
    if dist <= f32::EPSILON {
        return Some(Vec2::ZERO);
    }
    Some(delta / dist * (speed * dt).max(0.0).min(dist))
}

/// Facing angle (radians, about Z) from `from` toward `to`.
#[inline]
pub fn facing_angle(from: Vec2, to: Vec2, rotation_offset_degrees: f32) -> f32 {
    (to - from).to_angle() + rotation_offset_degrees.to_radians()
}

/// Velocity that covers `displacement` in `dt`.
#[inline]
fn velocity_for(displacement: Vec2, dt: f32) -> Vec2 {
    if dt > 0.0 { displacement / dt } else { Vec2::ZERO }
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

/// Register enemy systems.
///
/// Schedules:
/// - FixedUpdate: spawn requests, seeking, contact damage.
/// - FixedPostUpdate: contact tracking, knockback and death after collision resolution.
pub fn plugin(app: &mut App) {
    app.add_message::<SpawnEnemyRequest>()
        .add_message::<EnemyKilled>();

    app.add_systems(Update, report_inert_enemies);

    app.add_systems(
        FixedUpdate,
        (spawn_enemies, seek_player, apply_contact_damage)
            .chain()
            .after(crate::plugins::spawner::run_spawner)
            .run_if(in_state(GameState::Playing)),
    );

    app.add_systems(
        FixedPostUpdate,
        track_player_contacts
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::Playing)),
    );

    app.add_systems(
        FixedPostUpdate,
        (start_knockback, begin_dying, progress_dying)
            .chain()
            .after(ProjectileSystems::Resolve)
            .run_if(in_state(GameState::Playing)),
    );
}

// -----------------------------------------------------------------------------
// Spawn
// -----------------------------------------------------------------------------

/// Consumer: one enemy per request, stats from the archetype table.
pub fn spawn_enemies(mut commands: Commands, mut reader: MessageReader<SpawnEnemyRequest>) {
    for req in reader.read() {
        let a = req.kind.archetype();

        commands.spawn((
            (
                Name::new(a.name),
                Enemy { kind: req.kind, points: a.points },
                Health::new(a.max_health),
                Seeker {
                    move_speed: a.move_speed,
                    proximity_range: a.proximity_range,
                    rotation_offset_degrees: a.rotation_offset_degrees,
                },
                ContactDamage::new(a.contact_damage, a.damage_rate),
                Knockback::default(),
                EnemyLifeState::Alive,
                RunScoped,
            ),
            Sprite {
                color: a.color,
                custom_size: Some(Vec2::splat(a.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(req.position.extend(1.0)),
            // Dynamic so enemies shove each other and the player instead of stacking.
            RigidBody::Dynamic,
            Collider::circle(a.radius),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
            enemy_layers(),
            CollisionEventsEnabled,
        ));
    }
}

/// An enemy without Health can never die; flag it once and leave it alone.
pub fn report_inert_enemies(
    mut issues: ResMut<ReportedIssues>,
    q: Query<Option<&Name>, (Added<Enemy>, Without<Health>)>,
) {
    for name in &q {
        let name = name.map(|n| n.as_str().to_string()).unwrap_or_else(|| "unnamed".into());
        issues.report(ConfigIssue::EnemyWithoutHealth(name));
    }
}

// -----------------------------------------------------------------------------
// Rules: movement
// -----------------------------------------------------------------------------

/// Seek the player, or play out an active knockback instead.
pub fn seek_player(
    time: Res<Time>,
    q_player: Query<&Transform, (With<Player>, Without<Respawning>, Without<Enemy>)>,
    mut q: Query<
        (&Seeker, &EnemyLifeState, &mut Knockback, &mut LinearVelocity, &mut Transform),
        (With<Enemy>, With<Health>),
    >,
) {
    let dt = time.delta_secs();
    let target = match q_player.single() {
        Ok(tf) => Some(tf.translation.truncate()),
        Err(e) => {
            debug!("No seek target: {e:?}");
            None
        }
    };

    for (seeker, life, mut knockback, mut vel, mut tf) in &mut q {
        if !matches!(life, EnemyLifeState::Alive) {
            vel.0 = Vec2::ZERO;
            continue;
        }

        if knockback.is_active() {
            vel.0 = velocity_for(knockback.advance(dt), dt);
            continue;
        }

        let Some(target) = target else {
            vel.0 = Vec2::ZERO;
            continue;
        };

        let pos = tf.translation.truncate();
        match seek_step(pos, target, seeker.move_speed, dt, seeker.proximity_range) {
            Some(step) => {
                vel.0 = velocity_for(step, dt);
                if step != Vec2::ZERO {
                    let angle = facing_angle(pos, target, seeker.rotation_offset_degrees);
                    tf.rotation = Quat::from_rotation_z(angle);
                }
            }
            None => vel.0 = Vec2::ZERO,
        }
    }
}

// -----------------------------------------------------------------------------
// Rules: contact damage
// -----------------------------------------------------------------------------

/// Mirror avian's start/end overlap messages into `ContactDamage::touching`.
pub fn track_player_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    q_player: Query<(), With<Player>>,
    mut q_contact: Query<&mut ContactDamage, (With<Enemy>, With<Health>)>,
) {
    let mut apply = |pair: (ContactSide, ContactSide), touching: bool| {
        let Some((enemy, other)) = split_pair(pair, |s| q_contact.contains(s.owner())) else {
            return;
        };
        if !q_player.contains(other.owner()) {
            return;
        }
        if let Ok(mut contact) = q_contact.get_mut(enemy.owner()) {
            contact.set_touching(touching);
        }
    };

    for ev in started.read() {
        apply(started_sides(ev), true);
    }
    for ev in ended.read() {
        apply(ended_sides(ev), false);
    }
}

/// Hurt the player at each touching enemy's capped rate.
///
/// A respawning player is out of reach; contacts with it are forgotten so the
/// player does not reappear already "touched".
pub fn apply_contact_damage(
    time: Res<Time>,
    mut q_player: Query<(Entity, &mut Health, Has<Respawning>), With<Player>>,
    mut q: Query<(&mut ContactDamage, &EnemyLifeState), (With<Enemy>, With<Health>)>,
    mut died: MessageWriter<Died>,
) {
    let dt = time.delta_secs();
    let mut player = q_player.single_mut().ok();

    for (mut contact, life) in &mut q {
        if !matches!(life, EnemyLifeState::Alive) {
            continue;
        }

        let Some((player_e, hp, respawning)) = player.as_mut() else {
            contact.set_touching(false);
            continue;
        };
        if *respawning {
            contact.set_touching(false);
            continue;
        }

        if contact.tick(dt) {
            strike(*player_e, hp, contact.damage, &mut died);
        }
    }
}

/// Push the enemy along the projectile's direction.
pub fn start_knockback(
    tunables: Res<Tunables>,
    mut hits: MessageReader<ProjectileHit>,
    mut q: Query<(&mut Knockback, &EnemyLifeState), With<Enemy>>,
) {
    for hit in hits.read() {
        let Ok((mut knockback, life)) = q.get_mut(hit.target) else {
            continue;
        };
        if matches!(life, EnemyLifeState::Alive) {
            knockback.start(hit.direction * tunables.knockback_distance, tunables.knockback_duration);
        }
    }
}

// -----------------------------------------------------------------------------
// Rules: enemy death lifecycle
// -----------------------------------------------------------------------------

/// Transition Alive -> Dying on `Died` and announce the kill.
///
/// Stops collision interaction right away; removal is delayed.
pub fn begin_dying(
    tunables: Res<Tunables>,
    mut deaths: MessageReader<Died>,
    mut killed: MessageWriter<EnemyKilled>,
    mut q: Query<(
        &Enemy,
        &mut EnemyLifeState,
        &mut CollisionLayers,
        &mut LinearVelocity,
        &mut ContactDamage,
        &mut Sprite,
    )>,
) {
    for death in deaths.read() {
        let Ok((enemy, mut life, mut layers, mut vel, mut contact, mut sprite)) = q.get_mut(death.entity)
        else {
            continue; // not an enemy
        };
        if !matches!(*life, EnemyLifeState::Alive) {
            continue;
        }

        *life = EnemyLifeState::Dying {
            timer: Timer::from_seconds(tunables.corpse_linger, TimerMode::Once),
        };
        *layers = non_interacting(Layer::Enemy);
        vel.0 = Vec2::ZERO;
        contact.set_touching(false);
        sprite.color = Color::srgba(0.8, 0.8, 0.8, 1.0);

        killed.write(EnemyKilled {
            entity: death.entity,
            kind: enemy.kind,
            points: enemy.points,
        });
    }
}

/// Fade the corpse and mark PendingDespawn once the timer runs out.
pub fn progress_dying(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut EnemyLifeState, &mut Sprite, &mut Transform), (With<Enemy>, Without<PendingDespawn>)>,
) {
    for (e, mut life, mut sprite, mut tf) in &mut q {
        let EnemyLifeState::Dying { timer } = &mut *life else {
            continue;
        };

        timer.tick(time.delta());

        let dur = timer.duration().as_secs_f32().max(0.0001);
        let t = (timer.elapsed_secs() / dur).clamp(0.0, 1.0);

        tf.scale = Vec3::splat(1.0 - t);
        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - t;
        sprite.color = c.into();

        if timer.is_finished() {
            *life = EnemyLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}
