//! Test helpers.
//!
//! Systems are exercised with `World::run_system_once` (via `RunSystemOnce`) instead of
//! a full schedule. Systems that use `Commands` enqueue structural changes, so we flush
//! the world after running to apply them before assertions.

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A `Time<Fixed>` whose last step was `dt` long.
pub fn fixed_time_with_delta(dt: Duration) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(dt);
    t
}

/// Make sure a message queue exists so readers/writers can be built.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Drain everything currently queued for `M`.
pub fn drain_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    world
        .resource_mut::<Messages<M>>()
        .drain()
        .collect()
}
