//! Lighting plugin (Firefly) (render-only).
//!
//! A point light rides on the player and flares briefly on every volley.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

use crate::common::lifecycle::RunScoped;
use crate::common::state::GameState;
use crate::plugins::player::Player;
use crate::plugins::weapons::WeaponFired;

const BASE_RANGE: f32 = 450.0;
const FLASH_RANGE: f32 = 160.0;
const FLASH_SECS: f32 = 0.06;

#[derive(Component, Default)]
pub struct PlayerLight {
    flash: f32,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::Playing), setup)
        .add_systems(Update, (muzzle_flash, follow_player_light).chain());
}

fn setup(mut commands: Commands, q_existing: Query<(), With<PlayerLight>>) {
    if !q_existing.is_empty() {
        return;
    }
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight::default(),
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: BASE_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        Visibility::Visible,
        RunScoped,
    ));
}

fn muzzle_flash(
    time: Res<Time>,
    mut fired: MessageReader<WeaponFired>,
    mut q_light: Query<(&mut PlayerLight, &mut PointLight2d)>,
) {
    let shots = fired.read().count();
    for (mut light, mut point) in &mut q_light {
        if shots > 0 {
            light.flash = FLASH_SECS;
        } else {
            light.flash = (light.flash - time.delta_secs()).max(0.0);
        }
        point.radius = BASE_RANGE + FLASH_RANGE * (light.flash / FLASH_SECS);
    }
}

fn follow_player_light(
    q_player: Query<(&Transform, &Visibility), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut Visibility), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, vis_player)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut vis_light)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
    *vis_light = *vis_player;
}
