//! Feedback plugin: the presentation side of the simulation.
//!
//! Gameplay writes [`AnimationEvent`] and [`Cue`] messages and never reads anything
//! back. This plugin folds animation events into each actor's [`AnimatorState`],
//! logs cues for whatever audio/particle backend is attached, and derives the child
//! sprite's transform and tint from gameplay facts (facing, aim, hit flash, opacity).

pub mod messages;

use std::collections::HashMap;

use bevy::prelude::*;

use crate::common::actor::{AimPose, Facing};
use crate::plugins::health::HitFlash;
use messages::{AnimationEvent, Cue};

/// Latest animator inputs for one actor.
#[derive(Component, Debug, Clone, Default)]
pub struct AnimatorState {
    pub bools: HashMap<&'static str, bool>,
    pub floats: HashMap<&'static str, f32>,
    /// Triggers received since the last flush.
    pub pending: Vec<&'static str>,
    pub last_trigger: Option<&'static str>,
}

impl AnimatorState {
    pub fn bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// True if `name` fired and has not been flushed yet.
    pub fn has_pending(&self, name: &str) -> bool {
        self.pending.iter().any(|t| *t == name)
    }

    fn apply(&mut self, event: &AnimationEvent) {
        match *event {
            AnimationEvent::Trigger { name, .. } => self.pending.push(name),
            AnimationEvent::Bool { name, value, .. } => {
                self.bools.insert(name, value);
            }
            AnimationEvent::Float { name, value, .. } => {
                self.floats.insert(name, value);
            }
        }
    }
}

/// Child sprite of an actor. Never carries gameplay state.
#[derive(Component, Debug, Clone, Copy)]
pub struct ActorVisual {
    pub base_color: Color,
    /// Rotation pivot for aiming, in the actor's right-facing local space.
    pub pivot: Vec2,
}

/// Actor-wide alpha, driven by fade-out sequences.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Opacity(pub f32);

impl Default for Opacity {
    fn default() -> Self {
        Self(1.0)
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<AnimationEvent>().add_message::<Cue>();

    app.add_systems(
        Update,
        (record_animation_events, flush_animation_triggers).chain(),
    );
    app.add_systems(Update, log_cues);
    app.add_systems(PostUpdate, sync_actor_visuals);
}

pub fn record_animation_events(
    mut events: MessageReader<AnimationEvent>,
    mut q: Query<&mut AnimatorState>,
) {
    for event in events.read() {
        // Actors despawned since the event was written are skipped.
        let Ok(mut animator) = q.get_mut(event.entity()) else {
            continue;
        };
        animator.apply(event);
    }
}

/// Hand pending triggers to the animator. Without sprite sheets the hand-off is a trace.
pub fn flush_animation_triggers(mut q: Query<(Entity, &mut AnimatorState)>) {
    for (entity, mut animator) in &mut q {
        if animator.pending.is_empty() {
            continue;
        }
        for name in &animator.pending {
            trace!("anim {entity:?} <- {name}");
        }
        animator.last_trigger = animator.pending.last().copied();
        animator.pending.clear();
    }
}

pub fn log_cues(mut cues: MessageReader<Cue>) {
    for cue in cues.read() {
        trace!("cue {:?} at {}", cue.kind, cue.at);
    }
}

/// Mirror, rotate and tint actor visuals from their parent's state.
pub fn sync_actor_visuals(
    q_actor: Query<(&Facing, &HitFlash, Option<&AimPose>, Option<&Opacity>, &Children)>,
    mut q_visual: Query<(&ActorVisual, &mut Transform, &mut Sprite)>,
) {
    for (facing, flash, aim, opacity, children) in &q_actor {
        let angle = aim.map_or(0.0, |a| a.angle);
        let alpha = opacity.map_or(1.0, |o| o.0);

        for child in children.iter() {
            let Ok((visual, mut tf, mut sprite)) = q_visual.get_mut(child) else {
                continue;
            };

            tf.scale.x = facing.sign() * tf.scale.x.abs();

            let rotation = Quat::from_rotation_z(angle);
            let pivot = facing.mirror(visual.pivot).extend(0.0);
            let offset = pivot - rotation * pivot;
            tf.rotation = rotation;
            tf.translation.x = offset.x;
            tf.translation.y = offset.y;

            let tint = flash.active_color().unwrap_or(visual.base_color);
            sprite.color = tint.with_alpha(alpha);
        }
    }
}
