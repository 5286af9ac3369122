//! Commit: remove spent projectiles.
//!
//! Resolution and expiry only flip `ProjectileState`; this is the single system that
//! turns that decision into a despawn.

use bevy::prelude::*;

use super::components::ProjectileState;

pub fn despawn_spent_projectiles(mut commands: Commands, q: Query<(Entity, &ProjectileState)>) {
    for (e, state) in &q {
        if *state == ProjectileState::Spent {
            commands.entity(e).despawn();
        }
    }
}
