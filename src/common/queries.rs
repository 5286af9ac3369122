//! Physics query seam.
//!
//! Controllers ask the world two questions: "what does this ray hit first?" and
//! "is anything overlapping this circle?". Gameplay code is written against
//! [`PhysicsQueries`]; systems hand it avian's [`SpatialQuery`], tests hand it a
//! scripted fake.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayContact {
    pub entity: Entity,
    pub point: Vec2,
}

pub trait PhysicsQueries {
    fn raycast(&self, origin: Vec2, direction: Dir2, max_distance: f32, mask: LayerMask) -> Option<RayContact>;

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool;
}

impl PhysicsQueries for SpatialQuery<'_, '_> {
    fn raycast(&self, origin: Vec2, direction: Dir2, max_distance: f32, mask: LayerMask) -> Option<RayContact> {
        let filter = SpatialQueryFilter::from_mask(mask);
        self.cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| RayContact {
                entity: hit.entity,
                point: origin + *direction * hit.distance,
            })
    }

    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> bool {
        let filter = SpatialQueryFilter::from_mask(mask);
        !self
            .shape_intersections(&Collider::circle(radius), center, 0.0, &filter)
            .is_empty()
    }
}
