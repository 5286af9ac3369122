use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Projectile, ProjectileState};
use crate::plugins::feedback::messages::{Cue, CueKind};
use crate::plugins::health::{DamageReports, Health};

#[derive(Clone, Copy, Debug)]
struct CollisionTarget {
    collider: Entity,
    body: Option<Entity>,
}

impl CollisionTarget {
    /// Health lives on the rigid body; hurt boxes are child colliders.
    #[inline]
    fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: ev.collider1, body: ev.body1 },
        CollisionTarget { collider: ev.collider2, body: ev.body2 },
    )
}

/// Attacker-to-victim direction. Falls back to the projectile's travel direction
/// when both sit on the same point.
#[inline]
pub fn hit_direction(projectile_pos: Vec2, victim_pos: Vec2, velocity: Vec2) -> Vec2 {
    (victim_pos - projectile_pos)
        .try_normalize()
        .unwrap_or_else(|| velocity.normalize_or_zero())
}

/// First valid contact consumes the projectile.
///
/// - friendly contacts are ignored and do not consume
/// - a victim that is already dead absorbs the projectile without damage
/// - otherwise damage is applied and reported, and an impact cue is written
pub fn resolve_projectile_contacts(
    mut started: MessageReader<CollisionStart>,
    q_is_projectile: Query<(), With<Projectile>>,
    mut q_projectiles: Query<(&Projectile, &mut ProjectileState, &Transform, &LinearVelocity)>,
    mut q_victims: Query<(&mut Health, &Transform), Without<Projectile>>,
    mut reports: DamageReports,
    mut cues: MessageWriter<Cue>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let p1 = q_is_projectile.contains(t1.collider);
        let p2 = q_is_projectile.contains(t2.collider);
        if !(p1 ^ p2) {
            continue;
        }
        let (projectile_side, other_side) = if p1 { (t1, t2) } else { (t2, t1) };

        let Ok((projectile, mut state, p_tf, velocity)) = q_projectiles.get_mut(projectile_side.collider) else {
            continue;
        };
        if *state != ProjectileState::Active {
            continue;
        }

        let victim = other_side.gameplay_owner();
        let Ok((mut health, v_tf)) = q_victims.get_mut(victim) else {
            continue;
        };
        if !projectile.owner.may_damage(health.kind()) {
            continue;
        }

        *state = ProjectileState::Spent;

        if !health.is_alive() {
            continue;
        }

        let at = p_tf.translation.truncate();
        let dir = hit_direction(at, v_tf.translation.truncate(), velocity.0);
        let outcome = health.take_damage(projectile.damage, dir);
        reports.report(victim, &health, outcome, projectile.damage, dir, at);
        cues.write(Cue::new(CueKind::Impact, at));
    }
}
