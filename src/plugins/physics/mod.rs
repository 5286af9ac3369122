//! Physics plugin: avian setup and per-actor one-way platform filtering.

pub mod platforms;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>();
    let ppm = tunables.pixels_per_meter;
    let gravity = tunables.gravity;

    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::new(0.0, -gravity)));

    // After every controller has written this tick's velocity.
    app.add_systems(
        FixedUpdate,
        platforms::update_platform_filters
            .after(crate::plugins::player::input::consume_input_edges)
            .after(crate::plugins::enemies::brain::enemy_patrol)
            .run_if(in_state(GameState::InGame)),
    );
}
