use bevy::prelude::*;

use super::components::{Lifetime, ProjectileState};
use crate::common::timer::TimerStatus;

/// Expire projectiles whose time-to-live ran out. Expiry is silent: no cue, no damage.
pub fn expire_projectiles(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Lifetime, &mut ProjectileState)>,
) {
    let dt = time.delta();
    for (mut lifetime, mut state) in &mut q {
        if *state != ProjectileState::Active {
            continue;
        }
        if lifetime.0.tick(dt) == TimerStatus::Elapsed {
            *state = ProjectileState::Spent;
        }
    }
}
