//! Fire-and-forget output of the simulation.
//!
//! The core never waits on presentation. It writes what happened; animation, audio,
//! particles and camera code read these queues at their own pace.

use bevy::prelude::*;

/// Named animator input for one actor.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum AnimationEvent {
    Trigger { entity: Entity, name: &'static str },
    Bool { entity: Entity, name: &'static str, value: bool },
    Float { entity: Entity, name: &'static str, value: f32 },
}

impl AnimationEvent {
    pub fn trigger(entity: Entity, name: &'static str) -> Self {
        Self::Trigger { entity, name }
    }

    pub fn set_bool(entity: Entity, name: &'static str, value: bool) -> Self {
        Self::Bool { entity, name, value }
    }

    pub fn set_float(entity: Entity, name: &'static str, value: f32) -> Self {
        Self::Float { entity, name, value }
    }

    pub fn entity(&self) -> Entity {
        match self {
            Self::Trigger { entity, .. } | Self::Bool { entity, .. } | Self::Float { entity, .. } => *entity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CueKind {
    Damage,
    Death,
    Jump,
    Gunshot,
    Impact,
    CameraShake,
}

/// Audio / particle / camera request at a world position.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct Cue {
    pub kind: CueKind,
    pub at: Vec2,
}

impl Cue {
    pub fn new(kind: CueKind, at: Vec2) -> Self {
        Self { kind, at }
    }
}
