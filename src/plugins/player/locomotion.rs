//! Player locomotion: grounded probe, crouch, jump squat, fast fall, facing, aim.
//!
//! [`Locomotion::step`] is the whole per-tick state machine. It reads physics
//! through [`PhysicsQueries`] and returns what the system should write back, so it
//! runs unchanged against avian in the game and against a fake in tests.

use std::f32::consts::PI;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::input::PlayerInput;
use super::Player;
use crate::common::actor::{AimPose, Facing, MuzzleAnchor};
use crate::common::layers::walkable;
use crate::common::queries::PhysicsQueries;
use crate::common::tunables::{anchor, PlayerTunables, Tunables};
use crate::plugins::feedback::messages::{AnimationEvent, Cue, CueKind};
use crate::plugins::health::Health;

/// Rising faster than this never counts as standing.
const GROUNDED_MAX_RISE: f32 = 1.0;

#[derive(Component, Debug, Clone)]
pub struct Locomotion {
    pub enabled: bool,
    pub grounded: bool,
    pub crouching: bool,
    /// Fixed ticks left in the jump squat; zero when not charging.
    pub squat_ticks: u32,
    pub full_hop: bool,
    /// Set by burst fire for bursts started on the ground.
    pub halted: bool,
    pub base_gravity: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            enabled: true,
            grounded: false,
            crouching: false,
            squat_ticks: 0,
            full_hop: false,
            halted: false,
            base_gravity: 1.0,
        }
    }
}

/// Ground and air firing points. Either may be missing from the configuration,
/// in which case shots from that stance are skipped.
#[derive(Component, Debug, Clone, Copy)]
pub struct Muzzles {
    pub ground: Option<MuzzleAnchor>,
    pub air: Option<MuzzleAnchor>,
}

impl Muzzles {
    pub fn from_tunables(t: &PlayerTunables) -> Self {
        Self {
            ground: t.muzzle_ground.map(|v| MuzzleAnchor::new(anchor(v))),
            air: t.muzzle_air.map(|v| MuzzleAnchor::new(anchor(v))),
        }
    }

    pub fn for_stance(&self, grounded: bool) -> Option<MuzzleAnchor> {
        if grounded { self.ground } else { self.air }
    }

    pub fn flip(&mut self) {
        self.ground.iter_mut().chain(self.air.iter_mut()).for_each(MuzzleAnchor::flip);
    }
}

/// World-space origin and direction of a shot from `muzzle`, with the visual rotated
/// by `aim_angle` about `pivot`.
pub fn shot_from(muzzle: MuzzleAnchor, origin: Vec2, facing: Facing, aim_angle: f32, pivot: Vec2) -> (Vec2, Vec2) {
    let pivot = facing.mirror(pivot);
    let local = facing.mirror(muzzle.offset);
    let rotated = Vec2::from_angle(aim_angle).rotate(local - pivot) + pivot;
    let direction = Vec2::from_angle(muzzle.rotation + aim_angle);
    (origin + rotated, direction)
}

/// One tick of input, already reduced to what locomotion needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub movement: Vec2,
    pub aim: Vec2,
    pub crouch_held: bool,
    pub jump_pressed: bool,
    pub jump_released: bool,
}

impl From<&PlayerInput> for TickInput {
    fn from(i: &PlayerInput) -> Self {
        Self {
            movement: i.movement,
            aim: i.aim,
            crouch_held: i.crouch_held,
            jump_pressed: i.jump_pressed,
            jump_released: i.jump_released,
        }
    }
}

/// Everything a tick decided, for the system to write back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub velocity: Vec2,
    pub gravity_scale: f32,
    /// New vertical position when the landing ray snapped the actor to the ground.
    pub snap_y: Option<f32>,
    pub facing: Facing,
    pub flipped: bool,
    pub jumped: bool,
    pub aim_angle: f32,
    /// |horizontal intent| after crouch/halt zeroing.
    pub speed: f32,
}

impl Locomotion {
    pub fn new(base_gravity: f32) -> Self {
        Self { base_gravity, ..default() }
    }

    /// Advance one fixed tick.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        t: &PlayerTunables,
        input: TickInput,
        position: Vec2,
        velocity: Vec2,
        gravity_scale: f32,
        facing: Facing,
        aim_angle: f32,
        queries: &impl PhysicsQueries,
    ) -> StepOutcome {
        let mut out = StepOutcome {
            velocity,
            gravity_scale,
            snap_y: None,
            facing,
            flipped: false,
            jumped: false,
            aim_angle,
            speed: 0.0,
        };
        if !self.enabled {
            return out;
        }

        // Ground probe.
        let foot = anchor(t.ground_check_offset);
        let was_grounded = self.grounded;
        let mut grounded = velocity.y <= GROUNDED_MAX_RISE
            && queries.overlap_circle(position + foot, t.ground_check_radius, walkable());
        if !grounded && !was_grounded && velocity.y <= 0.0 {
            let from = position + anchor(t.air_check_offset);
            if let Some(hit) = queries.raycast(from, Dir2::NEG_Y, t.grounded_ray_length, walkable()) {
                grounded = true;
                out.snap_y = Some(hit.point.y - foot.y);
                out.velocity.y = 0.0;
            }
        }
        self.grounded = grounded;

        // Gravity: base on the ground, doubled while fast-falling.
        let down_tilt = input.movement.y < -t.tilt_dead_zone;
        if grounded {
            out.gravity_scale = self.base_gravity;
        } else if down_tilt && velocity.y <= 0.0 {
            out.gravity_scale = self.base_gravity * 2.0;
        }

        self.crouching = grounded && (down_tilt || input.crouch_held);

        // Jump squat. The press tick counts as the first squat tick.
        if self.squat_ticks == 0 && input.jump_pressed && grounded {
            self.squat_ticks = t.jump_squat_ticks.max(1);
            self.full_hop = true;
        }
        if self.squat_ticks > 0 && input.jump_released {
            self.full_hop = false;
        }
        if self.squat_ticks > 0 {
            self.squat_ticks -= 1;
            if self.squat_ticks == 0 {
                let hop = if self.full_hop { t.full_hop } else { t.short_hop };
                let crouch = if self.crouching { t.crouch_jump_multiplier } else { 1.0 };
                out.velocity.y = t.base_jump_force * hop * crouch;
                out.jumped = true;
                self.crouching = false;
                self.grounded = false;
            }
        }

        // Horizontal.
        let horizontal = if self.crouching || self.halted { 0.0 } else { input.movement.x };
        out.velocity.x = horizontal * t.move_speed;
        out.speed = horizontal.abs();

        if self.grounded && facing.disagrees_with(horizontal) {
            out.facing = facing.flipped();
            out.flipped = true;
        }

        // Aim.
        let aim = if input.aim.length() > t.aim_dead_zone { input.aim } else { Vec2::ZERO };
        if self.grounded {
            out.aim_angle = 0.0;
        } else if aim != Vec2::ZERO {
            let flip = if out.facing == Facing::Left { PI } else { 0.0 };
            out.aim_angle = aim.y.atan2(aim.x) + flip;
        }

        out
    }

    /// True while the squat counter runs; presented as crouch.
    pub fn in_squat(&self) -> bool {
        self.squat_ticks > 0
    }
}

pub fn player_locomotion(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    spatial: SpatialQuery,
    mut anims: MessageWriter<AnimationEvent>,
    mut cues: MessageWriter<Cue>,
    mut q: Query<
        (
            Entity,
            &mut Locomotion,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Facing,
            &mut Muzzles,
            &mut AimPose,
            &Health,
        ),
        With<Player>,
    >,
) {
    let t = &tunables.player;
    let tick_input = TickInput::from(&*input);

    for (e, mut loco, mut tf, mut vel, mut gravity, mut facing, mut muzzles, mut aim, health) in &mut q {
        if !health.is_alive() || !loco.enabled {
            continue;
        }

        let pos = tf.translation.truncate();
        let out = loco.step(t, tick_input, pos, vel.0, gravity.0, *facing, aim.angle, &spatial);

        if let Some(y) = out.snap_y {
            tf.translation.y = y;
        }
        vel.0 = out.velocity;
        gravity.0 = out.gravity_scale;
        if out.flipped {
            *facing = out.facing;
            muzzles.flip();
        }
        aim.angle = out.aim_angle;

        if out.jumped {
            cues.write(Cue::new(CueKind::Jump, pos));
        }
        anims.write(AnimationEvent::set_bool(e, "isGrounded", loco.grounded));
        anims.write(AnimationEvent::set_bool(e, "isCrouching", loco.crouching || loco.in_squat()));
        anims.write(AnimationEvent::set_float(e, "playerSpeed", out.speed));
        anims.write(AnimationEvent::set_float(e, "horizontalVelocity", out.velocity.x));
    }
}
