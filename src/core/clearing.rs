//! Line clearing and row compaction
//!
//! `scan_and_mark` runs right after a landing: every full row is worth
//! [`ROW_CLEAR_POINTS`] and gets flagged mid-destroy for the flash.
//! `compact` runs once the flash resolves and shifts rows downward,
//! bottom-up, until no row can fall further.

use arrayvec::ArrayVec;

use crate::core::Grid;
use crate::types::{GRID_HEIGHT, ROW_CLEAR_POINTS};

/// Result of scanning the field after a landing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Full rows found, ascending. At most one per field row.
    pub rows: ArrayVec<i32, { GRID_HEIGHT as usize }>,
    /// Points awarded for this scan.
    pub points: u32,
}

impl ClearOutcome {
    pub fn rows_cleared(&self) -> u32 {
        self.rows.len() as u32
    }
}

/// Scan all rows bottom to top; mark each full row destroyed and award
/// points. The grid keeps the marked cells Solid until the flash resolves.
pub fn scan_and_mark(grid: &mut Grid) -> ClearOutcome {
    let mut outcome = ClearOutcome::default();
    for y in 0..GRID_HEIGHT {
        if grid.is_row_full(y) {
            grid.mark_row_destroyed(y);
            outcome.rows.push(y);
            outcome.points += ROW_CLEAR_POINTS;
        }
    }
    outcome
}

/// Shift rows downward to close gaps left by cleared rows.
///
/// A row falls when the row directly below it is entirely empty and the row
/// itself holds at least one Solid cell. Rows are processed bottom-up so a
/// multi-row clear collapses in one pass; the outer loop repeats until a
/// fixpoint in case a fall opens a new gap further up.
pub fn compact(grid: &mut Grid) {
    loop {
        let mut moved = false;
        for y in 1..GRID_HEIGHT {
            if grid.is_row_empty(y - 1) && grid.row_has_solid(y) {
                grid.shift_row_down(y);
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
}
