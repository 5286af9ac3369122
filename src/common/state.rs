//! Global state machine.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    /// Transient state used to reload the scene: everything scoped to `InGame`
    /// despawns on exit and respawns on the way back in.
    Restarting,
}
