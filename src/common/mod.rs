//! Common, shared types.

pub mod actor;
pub mod layers;
pub mod queries;
pub mod state;
pub mod timer;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
