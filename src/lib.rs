//! Voxtris: a falling-block puzzle in a 10x20x10 voxel field.
//!
//! `core` holds the deterministic game logic; `term` and `input` form the
//! terminal front end.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
