//! Shared actor vocabulary: who an actor is, which way it faces, and which side a
//! hit landed on.

use std::f32::consts::PI;

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharacterKind {
    Player,
    Enemy,
}

impl CharacterKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

/// Horizontal orientation. The visual mirrors its x scale by [`Facing::sign`].
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    #[inline]
    pub fn axis(self) -> Vec2 {
        Vec2::new(self.sign(), 0.0)
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True when a horizontal intent points away from this facing.
    #[inline]
    pub fn disagrees_with(self, horizontal: f32) -> bool {
        (horizontal < 0.0 && self == Self::Right) || (horizontal > 0.0 && self == Self::Left)
    }

    /// Mirror a local offset into world space for this facing.
    #[inline]
    pub fn mirror(self, local: Vec2) -> Vec2 {
        Vec2::new(local.x * self.sign(), local.y)
    }
}

/// Which side of the victim a hit came from.
///
/// `hit_direction` points from the attacker to the victim. A hit travelling against
/// the victim's facing arrived from the front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitSide {
    Front,
    Back,
}

impl HitSide {
    pub fn classify(hit_direction: Vec2, facing: Facing) -> Self {
        if hit_direction.dot(facing.axis()) < 0.0 {
            Self::Front
        } else {
            Self::Back
        }
    }

    /// Direction the victim gets shoved: away from the blow.
    pub fn knockback_axis(self, facing: Facing) -> Vec2 {
        match self {
            Self::Front => -facing.axis(),
            Self::Back => facing.axis(),
        }
    }
}

/// Current aim rotation of an actor's visual, radians. Zero is neutral.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct AimPose {
    pub angle: f32,
}

/// A firing point relative to the actor origin, authored for a right-facing actor.
///
/// Flipping the actor rotates the anchor by 180°, so `rotation` always points the
/// way shots leave the barrel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MuzzleAnchor {
    pub offset: Vec2,
    pub rotation: f32,
}

impl MuzzleAnchor {
    pub fn new(offset: Vec2) -> Self {
        Self { offset, rotation: 0.0 }
    }

    pub fn flip(&mut self) {
        self.rotation = (self.rotation + PI).rem_euclid(2.0 * PI);
    }

    pub fn world_position(&self, origin: Vec2, facing: Facing) -> Vec2 {
        origin + facing.mirror(self.offset)
    }

    pub fn forward(&self) -> Vec2 {
        Vec2::from_angle(self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_side_for_all_sign_combinations() {
        // facing right, hit travelling left (attacker in front)
        assert_eq!(HitSide::classify(Vec2::new(-1.0, 0.0), Facing::Right), HitSide::Front);
        // facing right, hit travelling right (attacker behind)
        assert_eq!(HitSide::classify(Vec2::new(1.0, 0.0), Facing::Right), HitSide::Back);
        // facing left, hit travelling right (attacker in front)
        assert_eq!(HitSide::classify(Vec2::new(1.0, 0.0), Facing::Left), HitSide::Front);
        // facing left, hit travelling left (attacker behind)
        assert_eq!(HitSide::classify(Vec2::new(-1.0, 0.0), Facing::Left), HitSide::Back);
    }

    #[test]
    fn knockback_moves_along_the_blow() {
        let facing = Facing::Right;
        let front = HitSide::classify(Vec2::NEG_X, facing);
        assert_eq!(front.knockback_axis(facing), Vec2::NEG_X);
        let back = HitSide::classify(Vec2::X, facing);
        assert_eq!(back.knockback_axis(facing), Vec2::X);
    }

    #[test]
    fn muzzle_flip_reverses_forward_and_mirrors_offset() {
        let mut m = MuzzleAnchor::new(Vec2::new(10.0, 2.0));
        assert!((m.forward() - Vec2::X).length() < 1e-5);
        m.flip();
        assert!((m.forward() - Vec2::NEG_X).length() < 1e-5);
        assert_eq!(m.world_position(Vec2::ZERO, Facing::Left), Vec2::new(-10.0, 2.0));
        m.flip();
        assert!(m.rotation.abs() < 1e-5);
    }

    #[test]
    fn facing_disagreement() {
        assert!(Facing::Right.disagrees_with(-1.0));
        assert!(!Facing::Right.disagrees_with(0.0));
        assert!(Facing::Left.disagrees_with(0.5));
    }
}
