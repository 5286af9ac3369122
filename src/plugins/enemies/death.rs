//! Enemy death lifecycle.
//!
//! Alive -> Flashing (red pulse) -> Fading (alpha to zero) -> Dead + `PendingDespawn`.
//!
//! The body keeps its collider and layers while it fades, so projectiles already in
//! flight still stop on the corpse (without dealing damage). Despawning waits for
//! `PostUpdate`, outside the fixed step.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::brain::{EnemyBrain, EnemyPhase};
use super::Enemy;
use crate::common::actor::{CharacterKind, Facing, HitSide};
use crate::common::timer::{ActionTimer, TimerStatus};
use crate::common::tunables::Tunables;
use crate::plugins::feedback::messages::AnimationEvent;
use crate::plugins::feedback::Opacity;
use crate::plugins::health::{Died, HitFlash};

pub const DEATH_FLASH_COLOR: Color = Color::srgb(1.0, 0.1, 0.1);

#[derive(Component, Debug, Clone, Default)]
pub enum EnemyLifeState {
    #[default]
    Alive,
    Flashing(ActionTimer),
    Fading(ActionTimer),
    Dead,
}

/// Marker: enemy should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn enemy_death_trigger(
    tunables: Res<Tunables>,
    mut died: MessageReader<Died>,
    mut anims: MessageWriter<AnimationEvent>,
    mut q: Query<(&mut EnemyBrain, &mut EnemyLifeState, &mut HitFlash, &mut LinearVelocity, &Facing), With<Enemy>>,
) {
    let t = &tunables.enemy;

    for death in died.read() {
        if death.kind != CharacterKind::Enemy {
            continue;
        }
        let Ok((mut brain, mut life, mut flash, mut vel, facing)) = q.get_mut(death.entity) else {
            continue;
        };
        if !matches!(*life, EnemyLifeState::Alive) {
            continue;
        }

        brain.phase = EnemyPhase::Dead;

        let side = HitSide::classify(death.hit_direction, *facing);
        vel.x = side.knockback_axis(*facing).x * t.knockback_impulse;

        let fall = match side {
            HitSide::Front => "fallBackward",
            HitSide::Back => "fallForward",
        };
        anims.write(AnimationEvent::set_bool(death.entity, "isShooting", false));
        anims.write(AnimationEvent::trigger(death.entity, fall));
        anims.write(AnimationEvent::trigger(death.entity, "death"));

        flash.pulse(DEATH_FLASH_COLOR, t.death_flash_duration);
        *life = EnemyLifeState::Flashing(ActionTimer::start(t.death_flash_duration));
    }
}

pub fn enemy_death_progress(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut EnemyLifeState, &mut Opacity), (With<Enemy>, Without<PendingDespawn>)>,
) {
    let dt = time.delta();

    for (e, mut life, mut opacity) in &mut q {
        match &mut *life {
            EnemyLifeState::Flashing(timer) => {
                if timer.tick(dt) == TimerStatus::Elapsed {
                    *life = EnemyLifeState::Fading(ActionTimer::start(tunables.enemy.death_fade_duration));
                }
            }
            EnemyLifeState::Fading(timer) => {
                let status = timer.tick(dt);
                opacity.0 = 1.0 - timer.fraction();
                if status == TimerStatus::Elapsed {
                    opacity.0 = 0.0;
                    *life = EnemyLifeState::Dead;
                    commands.entity(e).insert(PendingDespawn);
                }
            }
            EnemyLifeState::Alive | EnemyLifeState::Dead => {}
        }
    }
}

/// Centralized structural cleanup, outside the fixed step.
pub fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
