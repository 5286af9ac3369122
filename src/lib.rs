//! Run-and-gun combat core.
//!
//! Integration tests in `tests/` are separate crates and import from here.

pub mod common;
pub mod game;
pub mod plugins;
