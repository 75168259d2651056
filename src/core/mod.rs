//! Core game logic: field, pieces, clearing, scoring, persistence.
//!
//! Everything here is deterministic and free of terminal or timing concerns;
//! the binary drives it through [`GameState`].

pub mod clearing;
pub mod game_state;
pub mod grid;
pub mod leveling;
pub mod piece;
pub mod snapshot;
pub mod spawner;
pub mod stats;

pub use clearing::{compact, scan_and_mark, ClearOutcome};
pub use game_state::{GameEvent, GameState};
pub use grid::{Cell, Grid};
pub use leveling::Leveling;
pub use piece::{spawn_cells, ActivePiece};
pub use snapshot::{load, save, CellRecord};
pub use spawner::{SimpleRng, Spawner};
pub use stats::FieldStats;
