//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Ground,
    OneWayPlatform,
    Player,
    PlayerHurtBox,
    Enemy,
    PlayerProjectile,
    EnemyProjectile,
}

/// Layers an actor can stand on.
#[inline]
pub fn walkable() -> LayerMask {
    LayerMask::from([Layer::Ground, Layer::OneWayPlatform])
}
