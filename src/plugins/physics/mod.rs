//! Physics plugin: avian setup plus the one helper every contact consumer
//! shares (mapping a collider pair back to gameplay entities).

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
}

/// One side of a contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactSide {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl ContactSide {
    /// Gameplay components live on the body when a collider is a child.
    #[inline]
    pub fn owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub fn started_sides(ev: &CollisionStart) -> (ContactSide, ContactSide) {
    (
        ContactSide { collider: ev.collider1, body: ev.body1 },
        ContactSide { collider: ev.collider2, body: ev.body2 },
    )
}

#[inline]
pub fn ended_sides(ev: &CollisionEnd) -> (ContactSide, ContactSide) {
    (
        ContactSide { collider: ev.collider1, body: ev.body1 },
        ContactSide { collider: ev.collider2, body: ev.body2 },
    )
}

/// Order a pair so the side matching `is_a` comes first.
///
/// Returns `None` unless exactly one side matches.
#[inline]
pub fn split_pair(
    (s1, s2): (ContactSide, ContactSide),
    is_a: impl Fn(ContactSide) -> bool,
) -> Option<(ContactSide, ContactSide)> {
    match (is_a(s1), is_a(s2)) {
        (true, false) => Some((s1, s2)),
        (false, true) => Some((s2, s1)),
        _ => None,
    }
}
