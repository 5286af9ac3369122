//! Health plugin: hit points, damage application, death reporting, hit flash.
//!
//! `Health` is the only writer of hit points. Whoever deals damage calls
//! [`Health::take_damage`] and forwards the outcome through [`DamageReports`]; the
//! owning controller listens for [`Died`] and runs its own death handler.
//!
//! Death is terminal. The health component flips its dead flag inside
//! `take_damage`, so anything reading it later in the same tick (sequences resuming,
//! a second projectile arriving) already sees a dead actor.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::actor::CharacterKind;
use crate::common::state::GameState;
use crate::common::timer::{ActionTimer, TimerStatus};
use crate::common::tunables::Tunables;
use crate::plugins::feedback::messages::{Cue, CueKind};

#[derive(Component, Debug, Clone)]
pub struct Health {
    max: i32,
    hp: i32,
    kind: CharacterKind,
    dead: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DamageOutcome {
    /// Zero/negative damage, or the actor was already dead.
    Unaffected,
    Hurt { remaining: i32 },
    Killed,
}

impl Health {
    pub fn new(max: i32, kind: CharacterKind) -> Self {
        Self { max, hp: max, kind, dead: false }
    }

    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Raw hit points. Not clamped: the killing blow may leave this below zero.
    #[inline]
    pub fn current(&self) -> i32 {
        self.hp
    }

    /// Hit points for display, within [0, max].
    #[inline]
    pub fn remaining(&self) -> i32 {
        self.hp.clamp(0, self.max)
    }

    #[inline]
    pub fn kind(&self) -> CharacterKind {
        self.kind
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Subtract `amount`. Crossing zero kills the actor exactly once; every later
    /// call is a no-op. `hit_direction` is only carried to the death handler.
    pub fn take_damage(&mut self, amount: i32, _hit_direction: Vec2) -> DamageOutcome {
        if self.dead || amount <= 0 {
            return DamageOutcome::Unaffected;
        }

        self.hp -= amount;
        if self.hp <= 0 {
            self.dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Hurt { remaining: self.hp }
        }
    }
}

/// Non-lethal damage landed.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct DamageTaken {
    pub entity: Entity,
    pub kind: CharacterKind,
    pub amount: i32,
    pub remaining: i32,
    pub hit_direction: Vec2,
    pub at: Vec2,
}

/// Lethal damage landed. Written once per actor.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct Died {
    pub entity: Entity,
    pub kind: CharacterKind,
    pub hit_direction: Vec2,
    pub at: Vec2,
}

/// Writers for damage outcomes, bundled so damage dealers take one parameter.
#[derive(SystemParam)]
pub struct DamageReports<'w> {
    taken: MessageWriter<'w, DamageTaken>,
    died: MessageWriter<'w, Died>,
}

impl DamageReports<'_> {
    pub fn report(&mut self, entity: Entity, health: &Health, outcome: DamageOutcome, amount: i32, hit_direction: Vec2, at: Vec2) {
        match outcome {
            DamageOutcome::Unaffected => {}
            DamageOutcome::Hurt { remaining } => {
                self.taken.write(DamageTaken {
                    entity,
                    kind: health.kind(),
                    amount,
                    remaining,
                    hit_direction,
                    at,
                });
            }
            DamageOutcome::Killed => {
                info!("{} {entity:?} died", health.kind().label());
                self.died.write(Died { entity, kind: health.kind(), hit_direction, at });
            }
        }
    }
}

/// Brief tint pulse. Always present on actors so pulses never change archetypes.
#[derive(Component, Debug, Clone, Default)]
pub struct HitFlash {
    color: Color,
    timer: Option<ActionTimer>,
}

impl HitFlash {
    pub fn pulse(&mut self, color: Color, seconds: f32) {
        self.color = color;
        self.timer = Some(ActionTimer::start(seconds));
    }

    pub fn tick(&mut self, dt: std::time::Duration) {
        if let Some(timer) = &mut self.timer {
            if timer.tick(dt) != TimerStatus::Running {
                self.timer = None;
            }
        }
    }

    /// Tint to show right now, if a pulse is running.
    pub fn active_color(&self) -> Option<Color> {
        self.timer.as_ref().map(|_| self.color)
    }
}

pub const PLAYER_HURT_COLOR: Color = Color::srgb(1.0, 0.15, 0.15);
pub const ENEMY_HURT_COLOR: Color = Color::WHITE;

pub fn plugin(app: &mut App) {
    app.add_message::<DamageTaken>().add_message::<Died>();

    app.add_systems(
        FixedUpdate,
        tick_hit_flash.run_if(in_state(GameState::InGame)),
    );
    app.add_systems(
        FixedPostUpdate,
        react_to_damage
            .after(crate::plugins::projectiles::collision::resolve_projectile_contacts)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Feedback for landed damage: hit flash on survivors, a damage cue for the player
/// on every hit including the lethal one.
pub fn react_to_damage(
    tunables: Res<Tunables>,
    mut taken: MessageReader<DamageTaken>,
    mut died: MessageReader<Died>,
    mut cues: MessageWriter<Cue>,
    mut q_flash: Query<&mut HitFlash>,
) {
    let flash_secs = tunables.feedback.hit_flash_duration;

    for hit in taken.read() {
        if let Ok(mut flash) = q_flash.get_mut(hit.entity) {
            let color = match hit.kind {
                CharacterKind::Player => PLAYER_HURT_COLOR,
                CharacterKind::Enemy => ENEMY_HURT_COLOR,
            };
            flash.pulse(color, flash_secs);
        }
        if hit.kind == CharacterKind::Player {
            cues.write(Cue::new(CueKind::Damage, hit.at));
        }
    }

    for death in died.read() {
        if death.kind == CharacterKind::Player {
            cues.write(Cue::new(CueKind::Damage, death.at));
        }
    }
}

pub fn tick_hit_flash(time: Res<Time<Fixed>>, mut q: Query<&mut HitFlash>) {
    let dt = time.delta();
    for mut flash in &mut q {
        flash.tick(dt);
    }
}
