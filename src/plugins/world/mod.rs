//! World plugin: level geometry.
//!
//! A solid ground strip, two side walls and a handful of one-way platforms. Walls and
//! ground are `Ground`; platforms are `OneWayPlatform`, which actors ignore while
//! moving upward.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;

pub const HALF_WIDTH: f32 = 640.0;
pub const GROUND_TOP: f32 = -160.0;
const GROUND_THICKNESS: f32 = 32.0;
const WALL_THICKNESS: f32 = 32.0;
const WALL_HEIGHT: f32 = 720.0;
const PLATFORM_THICKNESS: f32 = 8.0;

/// Center and width of each one-way platform.
pub const PLATFORMS: [(Vec2, f32); 4] = [
    (Vec2::new(-160.0, -84.0), 160.0),
    (Vec2::new(160.0, -24.0), 192.0),
    (Vec2::new(0.0, 56.0), 160.0),
    (Vec2::new(420.0, -94.0), 128.0),
];

#[derive(Component)]
pub struct OneWayPlatform;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_ground, spawn_platforms));
}

fn solid_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Ground, [Layer::Player, Layer::Enemy])
}

fn spawn_ground(mut commands: Commands) {
    let color = Color::srgb(0.25, 0.27, 0.33);

    let mut spawn_block = |name: &'static str, center: Vec2, size: Vec2| {
        commands.spawn((
            Name::new(name),
            Sprite::from_color(color, size),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            solid_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    };

    spawn_block(
        "Ground",
        Vec2::new(0.0, GROUND_TOP - GROUND_THICKNESS * 0.5),
        Vec2::new(HALF_WIDTH * 2.0 + WALL_THICKNESS * 2.0, GROUND_THICKNESS),
    );
    for (name, side) in [("WallLeft", -1.0), ("WallRight", 1.0)] {
        spawn_block(
            name,
            Vec2::new(side * (HALF_WIDTH + WALL_THICKNESS * 0.5), GROUND_TOP + WALL_HEIGHT * 0.5),
            Vec2::new(WALL_THICKNESS, WALL_HEIGHT),
        );
    }
}

fn spawn_platforms(mut commands: Commands) {
    let color = Color::srgb(0.45, 0.38, 0.28);
    let layers = CollisionLayers::new(Layer::OneWayPlatform, [Layer::Player, Layer::Enemy]);

    for (i, (center, width)) in PLATFORMS.into_iter().enumerate() {
        commands.spawn((
            Name::new(format!("Platform{i}")),
            OneWayPlatform,
            Sprite::from_color(color, Vec2::new(width, PLATFORM_THICKNESS)),
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(width, PLATFORM_THICKNESS),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    }
}
