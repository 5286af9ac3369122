//! Enemies plugin: patrolling gunners.
//!
//! Schedules:
//! - FixedUpdate: timed phases (telegraph/recover), then patrol sensing, then the
//!   death flash/fade.
//! - FixedPostUpdate: react to lethal damage after projectile contacts resolve.
//! - PostUpdate: despawn enemies whose death sequence finished.

pub mod brain;
pub mod death;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::actor::{CharacterKind, Facing, MuzzleAnchor};
use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::{anchor, Tunables};
use crate::plugins::feedback::{ActorVisual, AnimatorState, Opacity};
use crate::plugins::health::{Health, HitFlash};
use crate::plugins::physics::platforms::PlatformPassThrough;

#[derive(Component)]
pub struct Enemy;

/// Firing point; `None` when the configuration has no enemy muzzle.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyMuzzle(pub Option<MuzzleAnchor>);

pub const ENEMY_SIZE: Vec2 = Vec2::new(16.0, 28.0);

/// Spawn points and initial facing: one on the ground, two on platforms.
const SPAWNS: [(Vec2, Facing); 3] = [
    (Vec2::new(220.0, -140.0), Facing::Left),
    (Vec2::new(160.0, 2.0), Facing::Right),
    (Vec2::new(0.0, 82.0), Facing::Left),
];

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_enemies);

    app.add_systems(
        FixedUpdate,
        (brain::enemy_sequences, brain::enemy_patrol, death::enemy_death_progress)
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        death::enemy_death_trigger
            .after(crate::plugins::projectiles::collision::resolve_projectile_contacts)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        death::despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}

pub fn spawn_enemy(commands: &mut Commands, tunables: &Tunables, at: Vec2, facing: Facing) -> Entity {
    let t = &tunables.enemy;

    let mut muzzle = t.muzzle.map(|v| MuzzleAnchor::new(anchor(v)));
    if facing == Facing::Left {
        if let Some(m) = muzzle.as_mut() {
            m.flip();
        }
    }

    commands
        .spawn((
            Name::new("Enemy"),
            Enemy,
            Health::new(t.max_health, CharacterKind::Enemy),
            HitFlash::default(),
            Opacity::default(),
            brain::EnemyBrain::default(),
            death::EnemyLifeState::default(),
            EnemyMuzzle(muzzle),
            facing,
            AnimatorState::default(),
            PlatformPassThrough::default(),
            (
                Transform::from_translation(at.extend(1.0)),
                RigidBody::Dynamic,
                Collider::rectangle(ENEMY_SIZE.x, ENEMY_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                CollisionLayers::new(
                    Layer::Enemy,
                    [Layer::Ground, Layer::OneWayPlatform, Layer::PlayerProjectile],
                ),
                LinearVelocity::ZERO,
                Occluder2d::circle(ENEMY_SIZE.x * 0.5),
                DespawnOnExit(GameState::InGame),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("EnemyVisual"),
                ActorVisual { base_color: Color::srgb(0.9, 0.25, 0.25), pivot: Vec2::ZERO },
                Sprite {
                    color: Color::srgb(0.9, 0.25, 0.25),
                    custom_size: Some(ENEMY_SIZE),
                    ..default()
                },
                Transform::default(),
            ));
        })
        .id()
}

fn spawn_enemies(mut commands: Commands, tunables: Res<Tunables>) {
    for (at, facing) in SPAWNS {
        spawn_enemy(&mut commands, &tunables, at, facing);
    }
}
