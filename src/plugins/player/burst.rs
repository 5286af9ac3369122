//! Burst fire: N shots at a fixed interval, then a cooldown.
//!
//! ```text
//!   Ready --trigger--> Firing{1} --gap--> Firing{2} ... Firing{N} --gap--> Cooldown --> Ready
//! ```
//! Shot 1 leaves on the trigger tick. Triggers are ignored outside `Ready`.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::input::PlayerInput;
use super::locomotion::{shot_from, Locomotion, Muzzles};
use super::Player;
use crate::common::actor::{AimPose, Facing};
use crate::common::timer::{ActionTimer, TimerStatus};
use crate::common::tunables::{anchor, PlayerTunables, Tunables};
use crate::plugins::core::SpreadRng;
use crate::plugins::feedback::messages::{AnimationEvent, Cue, CueKind};
use crate::plugins::health::Health;
use crate::plugins::projectiles::components::ProjectileOwner;
use crate::plugins::projectiles::messages::SpawnProjectileRequest;

#[derive(Component, Debug, Clone, Default)]
pub enum BurstFire {
    #[default]
    Ready,
    Firing { shots_fired: u32, gap: ActionTimer },
    Cooldown(ActionTimer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstStep {
    Idle,
    Shoot,
    /// Last gap done; cooldown started.
    Finished,
    /// Owner died mid-sequence; nothing was fired.
    Aborted,
}

impl BurstFire {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn is_firing(&self) -> bool {
        matches!(self, Self::Firing { .. })
    }

    /// Start a burst. Returns true when the first shot should leave now.
    pub fn trigger(&mut self, t: &PlayerTunables) -> bool {
        if !self.is_ready() || t.shots_per_burst == 0 {
            return false;
        }
        *self = Self::Firing { shots_fired: 1, gap: ActionTimer::start(t.time_between_shots) };
        true
    }

    pub fn advance(&mut self, dt: Duration, alive: bool, t: &PlayerTunables) -> BurstStep {
        if !alive {
            let was_active = !self.is_ready();
            *self = Self::Ready;
            return if was_active { BurstStep::Aborted } else { BurstStep::Idle };
        }

        match self {
            Self::Ready => BurstStep::Idle,
            Self::Firing { shots_fired, gap } => {
                if gap.tick(dt) != TimerStatus::Elapsed {
                    return BurstStep::Idle;
                }
                if *shots_fired < t.shots_per_burst {
                    *shots_fired += 1;
                    *gap = ActionTimer::start(t.time_between_shots);
                    BurstStep::Shoot
                } else {
                    *self = Self::Cooldown(ActionTimer::start(t.time_between_bursts));
                    BurstStep::Finished
                }
            }
            Self::Cooldown(timer) => {
                if timer.tick(dt) == TimerStatus::Elapsed {
                    *self = Self::Ready;
                }
                BurstStep::Idle
            }
        }
    }
}

/// Resolve one shot: origin and spread-rotated direction, or `None` when the stance
/// has no muzzle.
pub fn aim_shot(
    t: &PlayerTunables,
    muzzles: &Muzzles,
    grounded: bool,
    origin: Vec2,
    facing: Facing,
    aim_angle: f32,
    spread_degrees: f32,
) -> Option<(Vec2, Vec2)> {
    let muzzle = muzzles.for_stance(grounded)?;
    let (at, dir) = shot_from(muzzle, origin, facing, aim_angle, anchor(t.aim_pivot));
    Some((at, Vec2::from_angle(spread_degrees.to_radians()).rotate(dir)))
}

pub fn player_burst_fire(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut rng: ResMut<SpreadRng>,
    mut requests: MessageWriter<SpawnProjectileRequest>,
    mut anims: MessageWriter<AnimationEvent>,
    mut cues: MessageWriter<Cue>,
    mut q: Query<(Entity, &mut BurstFire, &mut Locomotion, &Muzzles, &Transform, &Facing, &AimPose, &Health), With<Player>>,
) {
    let t = &tunables.player;
    let dt = time.delta();

    for (e, mut burst, mut loco, muzzles, tf, facing, aim, health) in &mut q {
        let alive = health.is_alive() && loco.enabled;

        let mut shoot = match burst.advance(dt, alive, t) {
            BurstStep::Shoot => true,
            BurstStep::Finished | BurstStep::Aborted => {
                loco.halted = false;
                anims.write(AnimationEvent::set_bool(e, "isFiring", false));
                false
            }
            BurstStep::Idle => false,
        };

        if alive && input.fire_pressed && !loco.crouching && burst.trigger(t) {
            loco.halted = loco.grounded;
            anims.write(AnimationEvent::set_bool(e, "isFiring", true));
            shoot = true;
        }

        if !shoot {
            continue;
        }

        let half = if loco.grounded { t.bullet_spread_degrees } else { t.bullet_spread_degrees * 2.0 };
        let spread = rng.offset(half);
        let origin = tf.translation.truncate();
        let Some((at, direction)) = aim_shot(t, muzzles, loco.grounded, origin, *facing, aim.angle, spread) else {
            continue;
        };

        requests.write(SpawnProjectileRequest { owner: ProjectileOwner::Player, origin: at, direction });
        cues.write(Cue::new(CueKind::Gunshot, at));
    }
}

/// Keep the linear velocity of a halted player flat on the ground.
pub fn hold_halted_player(mut q: Query<(&Locomotion, &mut LinearVelocity), With<Player>>) {
    for (loco, mut vel) in &mut q {
        if loco.halted && loco.grounded && loco.enabled {
            vel.x = 0.0;
        }
    }
}
