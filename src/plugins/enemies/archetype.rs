//! Enemy archetypes: the data a wave refers to by kind.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Zombie,
    Runner,
    Brute,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyArchetype {
    pub name: &'static str,
    pub max_health: f32,
    pub move_speed: f32,
    /// Distance below which the enemy starts seeking the player.
    pub proximity_range: f32,
    pub contact_damage: f32,
    /// Seconds between contact damage ticks.
    pub damage_rate: f32,
    pub points: u32,
    /// Sprite art faces up; rotate so the top points at the target.
    pub rotation_offset_degrees: f32,
    pub radius: f32,
    pub color: Color,
}

impl EnemyKind {
    pub fn archetype(self) -> EnemyArchetype {
        match self {
            Self::Zombie => EnemyArchetype {
                name: "Zombie",
                max_health: 50.0,
                move_speed: 90.0,
                proximity_range: 700.0,
                contact_damage: 10.0,
                damage_rate: 1.0,
                points: 10,
                rotation_offset_degrees: -90.0,
                radius: 16.0,
                color: Color::srgb(0.45, 0.75, 0.3),
            },
            Self::Runner => EnemyArchetype {
                name: "Runner",
                max_health: 25.0,
                move_speed: 170.0,
                proximity_range: 900.0,
                contact_damage: 5.0,
                damage_rate: 0.5,
                points: 15,
                rotation_offset_degrees: -90.0,
                radius: 12.0,
                color: Color::srgb(0.9, 0.6, 0.2),
            },
            Self::Brute => EnemyArchetype {
                name: "Brute",
                max_health: 150.0,
                move_speed: 55.0,
                proximity_range: 600.0,
                contact_damage: 25.0,
                damage_rate: 1.5,
                points: 40,
                rotation_offset_degrees: -90.0,
                radius: 24.0,
                color: Color::srgb(0.9, 0.25, 0.25),
            },
        }
    }
}
