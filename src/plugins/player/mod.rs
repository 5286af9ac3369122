//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input into the `PlayerInput` resource
//! - FixedUpdate: death sequence -> locomotion -> burst fire -> halt -> consume input edges
//! - FixedPostUpdate: react to lethal damage (after projectile contacts resolve)

pub mod burst;
pub mod death;
pub mod input;
pub mod locomotion;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::actor::{AimPose, CharacterKind, Facing};
use crate::common::layers::{walkable, Layer};
use crate::common::state::GameState;
use crate::common::tunables::{anchor, Tunables};
use crate::plugins::feedback::{ActorVisual, AnimatorState};
use crate::plugins::health::{Health, HitFlash};
use crate::plugins::physics::platforms::PlatformPassThrough;

#[derive(Component)]
pub struct Player;

/// The sensor enemies shoot at and look for. Child of the player body.
#[derive(Component)]
pub struct PlayerHurtBox;

pub const PLAYER_SIZE: Vec2 = Vec2::new(14.0, 32.0);
pub const PLAYER_SPAWN: Vec2 = Vec2::new(-320.0, -120.0);

pub fn plugin(app: &mut App) {
    app.insert_resource(input::PlayerInput::default())
        .add_message::<death::GameOver>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, input::gather_input);

    app.add_systems(
        FixedUpdate,
        (
            death::advance_player_death,
            locomotion::player_locomotion,
            burst::player_burst_fire,
            burst::hold_halted_player,
            input::consume_input_edges,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        death::player_death
            .after(crate::plugins::projectiles::collision::resolve_projectile_contacts)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let t = &tunables.player;

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Health::new(t.max_health, CharacterKind::Player),
            HitFlash::default(),
            locomotion::Locomotion::new(1.0),
            locomotion::Muzzles::from_tunables(t),
            burst::BurstFire::default(),
            death::PlayerLife::default(),
            Facing::Right,
            AimPose::default(),
            AnimatorState::default(),
            PlatformPassThrough::default(),
            (
                Transform::from_translation(PLAYER_SPAWN.extend(1.0)),
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                GravityScale(1.0),
                CollisionLayers::new(Layer::Player, walkable()),
                LinearVelocity::ZERO,
                TranslationInterpolation,
                DespawnOnExit(GameState::InGame),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("PlayerHurtBox"),
                PlayerHurtBox,
                Transform::default(),
                Collider::rectangle(PLAYER_SIZE.x - 4.0, PLAYER_SIZE.y - 6.0),
                Sensor,
                CollisionLayers::new(Layer::PlayerHurtBox, [Layer::EnemyProjectile]),
            ));
            parent.spawn((
                Name::new("PlayerVisual"),
                ActorVisual {
                    base_color: Color::srgb(0.2, 0.75, 0.9),
                    pivot: anchor(t.aim_pivot),
                },
                Sprite {
                    color: Color::srgb(0.2, 0.75, 0.9),
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                Transform::default(),
            ));
        });
}
