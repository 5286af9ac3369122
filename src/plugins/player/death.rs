//! Player death: knockback, terminal animation, then game over.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::burst::BurstFire;
use super::locomotion::Locomotion;
use super::Player;
use crate::common::actor::{CharacterKind, Facing, HitSide};
use crate::common::timer::{ActionTimer, TimerStatus};
use crate::common::tunables::Tunables;
use crate::plugins::feedback::messages::{AnimationEvent, Cue, CueKind};
use crate::plugins::health::Died;

/// The player's death sequence has finished. UI shows its game-over screen on this.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub player: Entity,
}

#[derive(Component, Debug, Clone, Default)]
pub enum PlayerLife {
    #[default]
    Alive,
    Dying(ActionTimer),
    Dead,
}

pub fn player_death(
    tunables: Res<Tunables>,
    mut died: MessageReader<Died>,
    mut anims: MessageWriter<AnimationEvent>,
    mut cues: MessageWriter<Cue>,
    mut q: Query<(&mut Locomotion, &mut BurstFire, &mut PlayerLife, &mut LinearVelocity, &Facing), With<Player>>,
) {
    let t = &tunables.player;

    for death in died.read() {
        if death.kind != CharacterKind::Player {
            continue;
        }
        let Ok((mut loco, mut burst, mut life, mut vel, facing)) = q.get_mut(death.entity) else {
            continue;
        };
        if !matches!(*life, PlayerLife::Alive) {
            continue;
        }

        loco.enabled = false;
        loco.halted = false;
        loco.squat_ticks = 0;
        *burst = BurstFire::Ready;

        let side = HitSide::classify(death.hit_direction, *facing);
        vel.x = side.knockback_axis(*facing).x * t.knockback_impulse;

        let fall = match side {
            HitSide::Front => "dieBackward",
            HitSide::Back => "dieForward",
        };
        anims.write(AnimationEvent::set_bool(death.entity, "isFiring", false));
        anims.write(AnimationEvent::trigger(death.entity, fall));
        anims.write(AnimationEvent::trigger(death.entity, "death"));
        cues.write(Cue::new(CueKind::Death, death.at));
        cues.write(Cue::new(CueKind::CameraShake, death.at));

        *life = PlayerLife::Dying(ActionTimer::start(t.death_sequence_duration));
        debug!("player {:?} dying ({side:?} hit)", death.entity);
    }
}

pub fn advance_player_death(
    time: Res<Time<Fixed>>,
    mut game_over: MessageWriter<GameOver>,
    mut q: Query<(Entity, &mut PlayerLife), With<Player>>,
) {
    let dt = time.delta();
    for (e, mut life) in &mut q {
        let PlayerLife::Dying(timer) = &mut *life else {
            continue;
        };
        if timer.tick(dt) == TimerStatus::Elapsed {
            *life = PlayerLife::Dead;
            info!("game over");
            game_over.write(GameOver { player: e });
        }
    }
}
