use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::actor::CharacterKind;
use crate::common::layers::Layer;
use crate::common::timer::ActionTimer;

/// Which side fired a projectile. Decides what it may hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

impl ProjectileOwner {
    /// No friendly fire.
    #[inline]
    pub fn may_damage(self, victim: CharacterKind) -> bool {
        matches!(
            (self, victim),
            (Self::Player, CharacterKind::Enemy) | (Self::Enemy, CharacterKind::Player)
        )
    }

    pub fn layers(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::new(Layer::PlayerProjectile, [Layer::Enemy]),
            Self::Enemy => CollisionLayers::new(Layer::EnemyProjectile, [Layer::PlayerHurtBox]),
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Projectile {
    pub owner: ProjectileOwner,
    pub damage: i32,
}

/// `Active` until the first valid contact or expiry; `Spent` is terminal and gets
/// committed (despawned) later in the same fixed step.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Active,
    Spent,
}

/// Time-to-live countdown.
#[derive(Component, Debug, Clone)]
pub struct Lifetime(pub ActionTimer);
