//! Projectiles plugin: **message-based producer → consumer** spawning.
//!
//! # Data flow
//! ```text
//!   FixedUpdate (fixed dt)
//!┌──────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: player::fire_weapon                                   │
//!│      - writes: SpawnProjectileRequest (one per pellet)               │
//!│                                                                      │
//!│  (B) Consumer: spawn::spawn_projectiles                              │
//!│      - reads: SpawnProjectileRequest                                 │
//!│      - spawns: kinematic sensor with Projectile                      │
//!│                                                                      │
//!│  (C) motion::advance_projectiles                                     │
//!│      - moves along the fixed direction, clamps to range              │
//!│      - marks PendingDespawn once the range is used up                │
//!└──────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (fixed dt)
//!┌──────────────────────────────────────────────────────────────────────┐
//!│  (D) Physics writes CollisionStart messages (Avian)                  │
//!│                                                                      │
//!│  (E) collision::resolve_projectile_hits                              │
//!│      - first health-bearing contact takes the damage                 │
//!│      - writes: Died (killing blow), ProjectileHit (knockback)        │
//!│      - marks PendingDespawn                                          │
//!└──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Removal happens at the earliest of range exhaustion or first damaging
//! contact. Despawning itself is deferred to PostUpdate (`lifecycle`).

pub mod components;
pub mod collision;
pub mod messages;
pub mod motion;
pub mod spawn;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

/// Fixed-step ordering anchor for projectile work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectileSystems {
    Spawn,
    Resolve,
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<messages::SpawnProjectileRequest>()
            .add_message::<messages::ProjectileHit>();

        app.add_systems(
            FixedUpdate,
            (spawn::spawn_projectiles, motion::advance_projectiles)
                .chain()
                .in_set(ProjectileSystems::Spawn)
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            FixedPostUpdate,
            collision::resolve_projectile_hits
                .in_set(ProjectileSystems::Resolve)
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::Playing)),
        );
    }
}
