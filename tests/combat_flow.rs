mod common;

use avian2d::prelude::*;
use bevy::prelude::*;

use run_and_gun::plugins::enemies::death::EnemyLifeState;
use run_and_gun::plugins::enemies::Enemy;
use run_and_gun::plugins::health::Health;
use run_and_gun::plugins::player::death::{GameOver, PlayerLife};
use run_and_gun::plugins::player::{Player, PlayerHurtBox};
use run_and_gun::plugins::projectiles::components::{Projectile, ProjectileOwner, ProjectileState};

#[derive(Resource, Default)]
struct GameOvers(usize);

fn count_game_overs(mut reader: MessageReader<GameOver>, mut seen: ResMut<GameOvers>) {
    seen.0 += reader.read().count();
}

fn booted() -> App {
    let mut app = common::app_headless();
    app.init_resource::<GameOvers>()
        .add_systems(Update, count_game_overs);
    for _ in 0..3 {
        app.update();
    }
    app
}

fn first<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> Entity {
    let world = app.world_mut();
    let mut q = world.query_filtered::<Entity, F>();
    q.iter(world).next().expect("entity present")
}

fn fire_at(app: &mut App, owner: ProjectileOwner, damage: i32, collider: Entity, body: Entity) -> Entity {
    let at = app.world().get::<Transform>(body).map(|tf| tf.translation).unwrap_or_default();
    let world = app.world_mut();
    let projectile = world
        .spawn((
            Projectile { owner, damage },
            ProjectileState::Active,
            Transform::from_translation(at - Vec3::X * 8.0),
            LinearVelocity(Vec2::X * 400.0),
        ))
        .id();
    world.write_message(CollisionStart {
        collider1: projectile,
        collider2: collider,
        body1: Some(projectile),
        body2: Some(body),
    });
    projectile
}

#[test]
fn lethal_player_shot_kills_and_removes_one_enemy() {
    let mut app = booted();
    let enemy = first::<With<Enemy>>(&mut app);

    let projectile = fire_at(&mut app, ProjectileOwner::Player, 100, enemy, enemy);

    let died = common::update_until(&mut app, 5, |world| {
        !matches!(world.get::<EnemyLifeState>(enemy), Some(EnemyLifeState::Alive))
    });
    assert!(died);
    assert!(app.world().get_entity(projectile).is_err());
    assert!(!app.world().get::<Health>(enemy).unwrap().is_alive());

    // Flash + fade, then the corpse is removed; the other two keep patrolling.
    let removed = common::update_until(&mut app, 120, |world| world.get_entity(enemy).is_err());
    assert!(removed);
    assert_eq!(common::count::<With<Enemy>>(app.world_mut()), 2);
}

#[test]
fn lethal_enemy_shot_on_hurt_box_ends_the_game_once() {
    let mut app = booted();
    let player = first::<With<Player>>(&mut app);
    let hurt_box = first::<With<PlayerHurtBox>>(&mut app);

    fire_at(&mut app, ProjectileOwner::Enemy, 100, hurt_box, player);

    let dying = common::update_until(&mut app, 5, |world| {
        matches!(world.get::<PlayerLife>(player), Some(PlayerLife::Dying(_)))
    });
    assert!(dying);
    assert_eq!(app.world().resource::<GameOvers>().0, 0);

    let dead = common::update_until(&mut app, 200, |world| {
        matches!(world.get::<PlayerLife>(player), Some(PlayerLife::Dead))
    });
    assert!(dead);

    for _ in 0..3 {
        app.update();
    }
    assert_eq!(app.world().resource::<GameOvers>().0, 1);
}

#[test]
fn friendly_contact_passes_through() {
    let mut app = booted();
    let player = first::<With<Player>>(&mut app);
    let hurt_box = first::<With<PlayerHurtBox>>(&mut app);
    let before = app.world().get::<Health>(player).unwrap().current();

    let projectile = fire_at(&mut app, ProjectileOwner::Player, 100, hurt_box, player);
    app.update();
    app.update();

    assert_eq!(app.world().get::<ProjectileState>(projectile), Some(&ProjectileState::Active));
    assert_eq!(app.world().get::<Health>(player).unwrap().current(), before);
}
