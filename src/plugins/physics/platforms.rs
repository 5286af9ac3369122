//! One-way platforms.
//!
//! Each actor decides for itself whether one-way platforms are solid: passable while
//! rising, solid otherwise. The decision only touches that actor's own collision
//! filters, so actors never interfere with each other.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformPassThrough {
    pub passable: bool,
}

impl PlatformPassThrough {
    /// Recompute from vertical velocity. Returns true when the state flipped.
    pub fn update(&mut self, vy: f32) -> bool {
        let passable = vy > 0.0;
        let changed = passable != self.passable;
        self.passable = passable;
        changed
    }
}

pub fn update_platform_filters(
    mut q: Query<(&LinearVelocity, &mut PlatformPassThrough, &mut CollisionLayers)>,
) {
    for (vel, mut pass, mut layers) in &mut q {
        if !pass.update(vel.y) {
            continue;
        }
        if pass.passable {
            layers.filters.remove(Layer::OneWayPlatform);
        } else {
            layers.filters.add(Layer::OneWayPlatform);
        }
    }
}
