//! Enemy behaviour: patrol, detect, telegraph, fire, recover.
//!
//! ```text
//!   Patrol --player seen & cooldown ready--> Telegraph --delay--> (fire) Recover --anim--> Patrol
//!      \__________________________ lethal damage from any phase __________________________> Dead
//! ```
//!
//! Sensing needs physics queries and runs in [`enemy_patrol`]. The timed phases only
//! need the clock and run in [`enemy_sequences`], which is also where a death that
//! landed mid-telegraph is noticed and the pending shot dropped.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::{Enemy, EnemyMuzzle};
use crate::common::actor::Facing;
use crate::common::layers::{walkable, Layer};
use crate::common::queries::PhysicsQueries;
use crate::common::timer::{ActionTimer, TimerStatus};
use crate::common::tunables::{EnemyTunables, Tunables};
use crate::plugins::feedback::messages::{AnimationEvent, Cue, CueKind};
use crate::plugins::health::Health;
use crate::plugins::player::PlayerHurtBox;
use crate::plugins::projectiles::components::ProjectileOwner;
use crate::plugins::projectiles::messages::SpawnProjectileRequest;

#[derive(Debug, Clone, Default)]
pub enum EnemyPhase {
    #[default]
    Patrol,
    Telegraph(ActionTimer),
    Recover(ActionTimer),
    Dead,
}

#[derive(Component, Debug, Clone, Default)]
pub struct EnemyBrain {
    pub phase: EnemyPhase,
    /// Fixed-clock time of the last shot.
    pub last_fired_at: Option<f32>,
}

/// What patrol sensing decided for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolDecision {
    Walk,
    /// No footing ahead: turn around, then walk.
    Flip,
    BeginTelegraph,
    /// Keep the current velocity.
    Hold,
    Inactive,
}

/// Result of advancing the timed phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    Idle,
    Fire,
    Recovered,
    /// The owner died before the pending action ran.
    Aborted,
}

impl EnemyBrain {
    pub fn is_dead(&self) -> bool {
        matches!(self.phase, EnemyPhase::Dead)
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, EnemyPhase::Telegraph(_) | EnemyPhase::Recover(_))
    }

    pub fn cooldown_ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_fired_at.is_none_or(|last| now > last + cooldown)
    }

    pub fn decide(&mut self, player_seen: bool, ground_ahead: bool, now: f32, t: &EnemyTunables) -> PatrolDecision {
        if self.is_dead() {
            return PatrolDecision::Inactive;
        }
        if player_seen {
            if matches!(self.phase, EnemyPhase::Patrol) && self.cooldown_ready(now, t.shooting_cooldown) {
                self.phase = EnemyPhase::Telegraph(ActionTimer::start(t.telegraph_duration));
                return PatrolDecision::BeginTelegraph;
            }
            return PatrolDecision::Hold;
        }
        if self.is_busy() {
            return PatrolDecision::Hold;
        }
        if ground_ahead { PatrolDecision::Walk } else { PatrolDecision::Flip }
    }

    /// Resume the timed phases. `alive` is checked before any pending action runs.
    pub fn advance(&mut self, dt: Duration, alive: bool, now: f32, t: &EnemyTunables) -> SequenceStep {
        if !alive {
            let interrupted = self.is_busy();
            self.phase = EnemyPhase::Dead;
            return if interrupted { SequenceStep::Aborted } else { SequenceStep::Idle };
        }

        match &mut self.phase {
            EnemyPhase::Telegraph(timer) => {
                if timer.tick(dt) != TimerStatus::Elapsed {
                    return SequenceStep::Idle;
                }
                self.last_fired_at = Some(now);
                self.phase = EnemyPhase::Recover(ActionTimer::start(t.shoot_animation_duration));
                SequenceStep::Fire
            }
            EnemyPhase::Recover(timer) => {
                if timer.tick(dt) != TimerStatus::Elapsed {
                    return SequenceStep::Idle;
                }
                self.phase = EnemyPhase::Patrol;
                SequenceStep::Recovered
            }
            EnemyPhase::Patrol | EnemyPhase::Dead => SequenceStep::Idle,
        }
    }
}

/// Forward sight ray and downward ledge probe, both cast from the muzzle.
/// Without a muzzle the enemy is blind and never turns at ledges.
pub fn sense(
    queries: &impl PhysicsQueries,
    muzzle: Option<Vec2>,
    facing: Facing,
    t: &EnemyTunables,
    is_player: impl Fn(Entity) -> bool,
) -> (bool, bool) {
    let Some(from) = muzzle else {
        return (false, true);
    };
    let Ok(forward) = Dir2::new(facing.axis()) else {
        return (false, true);
    };

    let sight = LayerMask::from([Layer::Ground, Layer::PlayerHurtBox]);
    let seen = queries
        .raycast(from, forward, t.detect_range, sight)
        .is_some_and(|hit| is_player(hit.entity));
    let ground_ahead = queries
        .raycast(from, Dir2::NEG_Y, t.ground_probe_length, walkable())
        .is_some();

    (seen, ground_ahead)
}

pub fn enemy_sequences(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut requests: MessageWriter<SpawnProjectileRequest>,
    mut anims: MessageWriter<AnimationEvent>,
    mut cues: MessageWriter<Cue>,
    mut q: Query<(Entity, &mut EnemyBrain, &Health, &Transform, &Facing, &EnemyMuzzle), With<Enemy>>,
) {
    let t = &tunables.enemy;
    let dt = time.delta();
    let now = time.elapsed_secs();

    for (e, mut brain, health, tf, facing, muzzle) in &mut q {
        match brain.advance(dt, health.is_alive(), now, t) {
            SequenceStep::Fire => {
                anims.write(AnimationEvent::trigger(e, "shoot"));
                let Some(m) = muzzle.0 else {
                    continue;
                };
                let at = m.world_position(tf.translation.truncate(), *facing);
                requests.write(SpawnProjectileRequest {
                    owner: ProjectileOwner::Enemy,
                    origin: at,
                    direction: facing.axis(),
                });
                cues.write(Cue::new(CueKind::Gunshot, at));
            }
            SequenceStep::Recovered => {
                anims.write(AnimationEvent::set_bool(e, "isShooting", false));
            }
            SequenceStep::Aborted => {
                debug!("enemy {e:?} died mid-sequence; shot dropped");
            }
            SequenceStep::Idle => {}
        }
    }
}

pub fn enemy_patrol(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    spatial: SpatialQuery,
    q_hurt_box: Query<(), With<PlayerHurtBox>>,
    mut anims: MessageWriter<AnimationEvent>,
    mut q: Query<(Entity, &mut EnemyBrain, &mut EnemyMuzzle, &mut Facing, &mut LinearVelocity, &Transform), With<Enemy>>,
) {
    let t = &tunables.enemy;
    let now = time.elapsed_secs();

    for (e, mut brain, mut muzzle, mut facing, mut vel, tf) in &mut q {
        if brain.is_dead() {
            continue;
        }

        let origin = tf.translation.truncate();
        let from = muzzle.0.map(|m| m.world_position(origin, *facing));
        let (seen, ground_ahead) = sense(&spatial, from, *facing, t, |hit| q_hurt_box.contains(hit));

        match brain.decide(seen, ground_ahead, now, t) {
            PatrolDecision::BeginTelegraph => {
                vel.x = 0.0;
                anims.write(AnimationEvent::trigger(e, "telegraph"));
                anims.write(AnimationEvent::set_bool(e, "isShooting", true));
            }
            PatrolDecision::Flip => {
                *facing = facing.flipped();
                if let Some(m) = muzzle.0.as_mut() {
                    m.flip();
                }
                vel.x = facing.sign() * t.walking_speed;
            }
            PatrolDecision::Walk => {
                vel.x = facing.sign() * t.walking_speed;
            }
            PatrolDecision::Hold | PatrolDecision::Inactive => {}
        }
        anims.write(AnimationEvent::set_float(e, "horizontalVelocity", vel.x));
    }
}
