//! Shots and sight lines through the real avian pipeline: no hand-written contacts.

mod common;

use avian2d::prelude::*;
use bevy::prelude::*;

use run_and_gun::common::actor::Facing;
use run_and_gun::common::tunables::Tunables;
use run_and_gun::plugins::enemies::Enemy;
use run_and_gun::plugins::health::Health;
use run_and_gun::plugins::player::Player;
use run_and_gun::plugins::projectiles::components::{Projectile, ProjectileOwner};
use run_and_gun::plugins::projectiles::messages::SpawnProjectileRequest;

/// Let bodies settle onto the ground and platforms.
fn settled() -> App {
    let mut app = common::app_headless();
    for _ in 0..30 {
        app.update();
    }
    app
}

/// The enemy standing on the ground strip (lowest of the three).
fn ground_enemy(app: &mut App) -> (Entity, Vec2, Facing) {
    let world = app.world_mut();
    let mut q = world.query_filtered::<(Entity, &Transform, &Facing), With<Enemy>>();
    let (e, tf, facing) = q
        .iter(world)
        .min_by(|a, b| a.1.translation.y.total_cmp(&b.1.translation.y))
        .expect("enemies spawned");
    (e, tf.translation.truncate(), *facing)
}

#[test]
fn requested_player_shot_damages_the_enemy_it_flies_into() {
    let mut app = settled();
    let (enemy, at, _) = ground_enemy(&mut app);
    let max = app.world().get::<Health>(enemy).unwrap().max();

    app.world_mut().write_message(SpawnProjectileRequest {
        owner: ProjectileOwner::Player,
        origin: at - Vec2::X * 48.0,
        direction: Vec2::X,
    });

    let hit = common::update_until(&mut app, 120, |world| {
        world.get::<Health>(enemy).is_some_and(|h| h.current() < max)
    });
    assert!(hit, "projectile never reached the enemy");

    let damage = app.world().resource::<Tunables>().projectiles.player.damage;
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current(), max - damage);

    // Consumed on contact.
    app.update();
    let world = app.world_mut();
    let left = world
        .query::<&Projectile>()
        .iter(world)
        .filter(|p| p.owner == ProjectileOwner::Player)
        .count();
    assert_eq!(left, 0);
}

#[test]
fn enemy_fires_at_a_player_in_its_sight_line() {
    let mut app = settled();
    let (_, at, facing) = ground_enemy(&mut app);

    let player = {
        let world = app.world_mut();
        let mut q = world.query_filtered::<Entity, With<Player>>();
        q.single(world).expect("one player")
    };
    // Teleport through the physics position; the transform follows on write-back.
    let target = Vec2::new(at.x + facing.sign() * 80.0, at.y + 2.0);
    {
        let mut p = app.world_mut().entity_mut(player);
        p.get_mut::<Position>().unwrap().0 = target;
        p.get_mut::<Transform>().unwrap().translation = target.extend(1.0);
        p.get_mut::<LinearVelocity>().unwrap().0 = Vec2::ZERO;
    }

    // Telegraph delay plus a margin.
    let fired = common::update_until(&mut app, 120, |world| {
        world
            .query::<&Projectile>()
            .iter(world)
            .any(|p| p.owner == ProjectileOwner::Enemy)
    });
    assert!(fired, "enemy never fired at the player in front of it");
}
