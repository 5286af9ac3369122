//! Core plugin: tunables, seeded randomness, scene restart.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::input::PlayerInput;

/// Deterministic source for shot spread.
#[derive(Resource, Debug, Clone)]
pub struct SpreadRng(pub ChaCha8Rng);

impl SpreadRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform offset in [-half_width, half_width].
    pub fn offset(&mut self, half_width: f32) -> f32 {
        if half_width > 0.0 {
            self.0.gen_range(-half_width..=half_width)
        } else {
            0.0
        }
    }
}

pub fn plugin(app: &mut App) {
    // Tests may pre-insert their own values.
    if !app.world().contains_resource::<Tunables>() {
        app.insert_resource(load_tunables());
    }

    let tunables = app.world().resource::<Tunables>();
    for problem in tunables.validate() {
        error!("tunables: {problem}");
    }
    let seed = tunables.rng_seed;

    app.insert_resource(SpreadRng::from_seed(seed));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.add_systems(Update, restart_on_cancel.run_if(in_state(GameState::InGame)));
    app.add_systems(OnEnter(GameState::Restarting), finish_restart);
}

/// Defaults, overridden by the tunables file when one is present and readable.
pub fn load_tunables() -> Tunables {
    let Some(path) = Tunables::override_path() else {
        debug!("tunables: using defaults");
        return Tunables::default();
    };

    match Tunables::load(&path) {
        Ok(tunables) => {
            info!("tunables: loaded {}", path.display());
            tunables
        }
        Err(err) => {
            warn!("tunables: {err}; using defaults");
            Tunables::default()
        }
    }
}

fn restart_on_cancel(input: Res<PlayerInput>, mut next: ResMut<NextState<GameState>>) {
    if input.cancel {
        info!("restarting scene");
        next.set(GameState::Restarting);
    }
}

/// Everything scoped to `InGame` is gone by now; go straight back in.
fn finish_restart(mut next: ResMut<NextState<GameState>>) {
    next.set(GameState::InGame);
}
