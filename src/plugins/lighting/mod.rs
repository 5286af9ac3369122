//! Lighting plugin (Firefly) (render-only).
//!
//! A warm light follows the player; each gunshot briefly widens it as a muzzle flash.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::feedback::messages::{Cue, CueKind};
use crate::plugins::player::Player;

const BASE_RANGE: f32 = 450.0;
const FLASH_RANGE: f32 = 140.0;
const FLASH_DECAY_PER_SEC: f32 = 9.0;

#[derive(Component, Default)]
pub struct PlayerLight {
    flash: f32,
}

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, (follow_player_light, muzzle_flash).run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight::default(),
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: BASE_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<&Transform, (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<&mut Transform, (With<PlayerLight>, Without<Player>)>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
}

/// Consumes every cue of the frame; true if any gunshot left from near the light.
fn player_shot<'a>(cues: impl Iterator<Item = &'a Cue>, light_at: Vec2) -> bool {
    cues.filter(|c| c.kind == CueKind::Gunshot && c.at.distance(light_at) < 32.0)
        .count()
        > 0
}

/// Only the player's own shots flash; enemy gunshots are too far from the light.
fn muzzle_flash(
    time: Res<Time>,
    mut cues: MessageReader<Cue>,
    mut q_light: Query<(&mut PlayerLight, &mut PointLight2d, &Transform)>,
) {
    let Ok((mut light, mut point, tf)) = q_light.single_mut() else {
        cues.clear();
        return;
    };

    if player_shot(cues.read(), tf.translation.truncate()) {
        light.flash = 1.0;
    }

    light.flash = (light.flash - FLASH_DECAY_PER_SEC * time.delta_secs()).max(0.0);
    point.radius = BASE_RANGE + FLASH_RANGE * light.flash;
}
