//! Game composition root.
//!
//! - `configure_full`: window, renderer and logging, then every game plugin.
//! - `configure_headless`: gameplay only, for integration tests.

use bevy::app::PluginGroupBuilder;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

/// Simulation rate. Timers, jump squat and burst spacing are all counted in these ticks.
pub const FIXED_HZ: f64 = 64.0;

const LOG_FILTER: &str = "wgpu=error,naga=warn,run_and_gun=debug";

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(platform_plugins());

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// No DefaultPlugins and no render-only plugins (Firefly, camera).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

fn configure_game(app: &mut App) {
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ));
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}

fn platform_plugins() -> PluginGroupBuilder {
    let plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Run and Gun".into(),
                resolution: WindowResolution::new(1280, 720),
                ..default()
            }),
            ..default()
        })
        .set(LogPlugin {
            filter: LOG_FILTER.into(),
            ..default()
        });

    // Vulkan is unreliable on some Windows drivers; force DX12 on the discrete GPU.
    #[cfg(target_os = "windows")]
    let plugins = plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    plugins
}
