//! Camera plugin (render-only): smooth follow plus shake on `CameraShake` cues.
//!
//! Follow and shake both write the camera transform, so they live in one system.
//! The shake offset from the previous frame is removed before the new one is
//! applied, so the follow target never drifts.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera
//! PostUpdate:      read cues -> follow player -> apply shake
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::feedback::messages::{Cue, CueKind};
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

/// Shake state. `remaining` counts down in real seconds.
#[derive(Component, Debug, Default)]
pub struct CameraShake {
    remaining: f32,
    duration: f32,
    phase: f32,
    offset: Vec2,
}

impl CameraShake {
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(self.remaining);
        self.remaining = self.duration;
    }

    /// Intensity in [0..1], easing out over the shake.
    fn strength(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        let r = (self.remaining / self.duration).clamp(0.0, 1.0);
        r * r
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_and_shake
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        CameraShake::default(),
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Consumes every cue, so several shakes in one frame start a single shake.
fn shake_requested<'a>(cues: impl Iterator<Item = &'a Cue>) -> bool {
    cues.filter(|c| c.kind == CueKind::CameraShake).count() > 0
}

fn follow_and_shake(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut cues: MessageReader<Cue>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera, &mut CameraShake), Without<Player>>,
) {
    let Ok((mut tf_cam, main_cam, mut shake)) = q_cam.single_mut() else {
        return;
    };

    if shake_requested(cues.read()) {
        shake.start(tunables.feedback.camera_shake_duration);
    }

    let dt = time.delta_secs();

    tf_cam.translation.x -= shake.offset.x;
    tf_cam.translation.y -= shake.offset.y;
    shake.offset = Vec2::ZERO;

    if let Ok(tf_player) = q_player.single() {
        let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();
        tf_cam.translation.x += (tf_player.translation.x - tf_cam.translation.x) * alpha;
        tf_cam.translation.y += (tf_player.translation.y - tf_cam.translation.y) * alpha;
    }

    if shake.remaining <= 0.0 {
        return;
    }
    shake.remaining = (shake.remaining - dt).max(0.0);
    shake.phase += dt;

    // Deterministic pseudo-noise.
    let x = (shake.phase * 37.0 * std::f32::consts::TAU).sin()
        + 0.5 * (shake.phase * 61.0 * std::f32::consts::TAU).sin();
    let y = (shake.phase * 41.0 * std::f32::consts::TAU).cos()
        + 0.5 * (shake.phase * 53.0 * std::f32::consts::TAU).cos();
    let offset = Vec2::new(x, y).clamp_length_max(1.0) * tunables.feedback.camera_shake_amplitude * shake.strength();

    tf_cam.translation.x += offset.x;
    tf_cam.translation.y += offset.y;
    shake.offset = offset;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::test_utils::ensure_messages;

    fn read_shakes(mut cues: MessageReader<Cue>) -> bool {
        shake_requested(cues.read())
    }

    #[test]
    fn every_cue_of_a_frame_is_consumed() {
        let mut world = World::new();
        ensure_messages::<Cue>(&mut world);
        let reader = world.register_system(read_shakes);

        world.write_message(Cue::new(CueKind::CameraShake, Vec2::ZERO));
        world.write_message(Cue::new(CueKind::Gunshot, Vec2::ZERO));
        world.write_message(Cue::new(CueKind::CameraShake, Vec2::ZERO));

        assert!(world.run_system(reader).unwrap());
        // Nothing left over to re-trigger on the next frame.
        assert!(!world.run_system(reader).unwrap());
    }

    #[test]
    fn shake_eases_out_and_keeps_the_longer_duration() {
        let mut shake = CameraShake::default();
        assert_eq!(shake.strength(), 0.0);
        shake.start(0.3);
        assert_eq!(shake.strength(), 1.0);
        shake.remaining = 0.15;
        assert!((shake.strength() - 0.25).abs() < 1e-6);
        shake.start(0.1);
        assert_eq!(shake.duration, 0.15);
    }
}
