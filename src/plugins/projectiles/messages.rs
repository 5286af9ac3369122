//! Buffered spawn requests.
//!
//! Shooters only describe the shot. The allocator is the single place that builds
//! projectile entities, so every projectile gets the same physics setup.

use bevy::prelude::*;

use super::components::ProjectileOwner;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnProjectileRequest {
    pub owner: ProjectileOwner,
    pub origin: Vec2,
    /// Travel direction. Need not be normalized; zero vectors are dropped.
    pub direction: Vec2,
}
