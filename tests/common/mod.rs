//! Integration test harness.
//!
//! Headless only: `MinimalPlugins` for the ECS runtime, then
//! `run_and_gun::game::configure_headless` for the gameplay plugins.
//! Tunables are pinned to defaults so a local `tunables.toml` cannot leak in,
//! and time advances one fixed step per update.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::mesh::MeshPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use run_and_gun::common::tunables::Tunables;

/// One fixed step at `FIXED_HZ`.
pub fn step() -> Duration {
    Duration::from_secs_f64(1.0 / run_and_gun::game::FIXED_HZ)
}

pub fn app_headless() -> App {
    let mut app = App::new();

    // Transform propagation and mesh assets are what avian needs to step headless;
    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        StatesPlugin,
        AssetPlugin::default(),
        MeshPlugin,
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step()));
    app.insert_resource(Tunables::default());

    run_and_gun::game::configure_headless(&mut app);
    app.finish();
    app.cleanup();
    app
}

/// Update until `done` holds, at most `max` frames. Returns whether it held.
pub fn update_until(app: &mut App, max: usize, mut done: impl FnMut(&mut World) -> bool) -> bool {
    for _ in 0..max {
        app.update();
        if done(app.world_mut()) {
            return true;
        }
    }
    false
}

pub fn count<F: bevy::ecs::query::QueryFilter>(world: &mut World) -> usize {
    world.query_filtered::<Entity, F>().iter(world).count()
}
