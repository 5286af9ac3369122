//! Projectiles plugin: message-based spawning, TTL expiry, contact resolution.
//!
//! # Data flow
//! ```text
//!   FixedUpdate
//!     controllers ── SpawnProjectileRequest ──┐
//!     expire_projectiles (Active -> Spent)    │
//!                                             │
//!   FixedPostUpdate                           │
//!     avian step ── CollisionStart            │
//!     resolve_projectile_contacts             │   Health::take_damage, Impact cue
//!     despawn_spent_projectiles               │
//!     spawn_requested_projectiles  <──────────┘
//! ```
//!
//! Requests are allocated at the end of the fixed step, so a new projectile first
//! moves (and can first collide) on the following tick. Every contact resolved in a
//! tick therefore belongs to a projectile spawned in an earlier one.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod lifetime;
pub mod messages;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<messages::SpawnProjectileRequest>();

        app.add_systems(
            FixedUpdate,
            lifetime::expire_projectiles.run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::resolve_projectile_contacts.after(CollisionEventSystems),
                commit::despawn_spent_projectiles,
                allocator::spawn_requested_projectiles,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
