//! Spawn consumer: turn requests into projectile entities.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::components::{Lifetime, Projectile, ProjectileOwner, ProjectileState};
use super::messages::SpawnProjectileRequest;
use crate::common::state::GameState;
use crate::common::timer::ActionTimer;
use crate::common::tunables::Tunables;

pub fn spawn_requested_projectiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut reader: MessageReader<SpawnProjectileRequest>,
) {
    for req in reader.read() {
        let Some(direction) = req.direction.try_normalize() else {
            debug!("dropping {:?} projectile with no direction", req.owner);
            continue;
        };

        let (spec, color) = match req.owner {
            ProjectileOwner::Player => (tunables.projectiles.player, Color::srgb(1.0, 0.9, 0.3)),
            ProjectileOwner::Enemy => (tunables.projectiles.enemy, Color::srgb(1.0, 0.35, 0.2)),
        };

        // Kinematic sensor: constant velocity, no gravity, no pushing.
        commands.spawn((
            Name::new("Projectile"),
            Projectile { owner: req.owner, damage: spec.damage },
            ProjectileState::Active,
            Lifetime(ActionTimer::start(spec.time_to_live)),
            Sprite {
                color,
                custom_size: Some(Vec2::splat(spec.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(req.origin.extend(2.0))
                .with_rotation(Quat::from_rotation_z(direction.to_angle())),
            RigidBody::Kinematic,
            Collider::circle(spec.radius),
            Sensor,
            CollisionEventsEnabled,
            req.owner.layers(),
            LinearVelocity(direction * spec.speed),
            DespawnOnExit(GameState::InGame),
        ));
    }
}
