//! Active piece module - the falling tetromino
//!
//! A piece is four grid coordinates plus a kind tag and an optional pivot
//! (an index into the four cells). Piece-vs-grid ownership is decided by
//! comparing coordinates by value: a candidate cell is passable when it is
//! either empty or part of the piece's own footprint.
//!
//! Every move is validate-then-apply as one atomic unit; a rejected move
//! leaves the piece bit-for-bit unchanged.

use crate::core::Grid;
use crate::types::{Axis, CellColor, Coord, PieceKind, SPAWN_ANCHOR};

/// Spawn-relative offsets for the three non-anchor cells of each kind.
const fn spawn_offsets(kind: PieceKind) -> [(i32, i32, i32); 3] {
    match kind {
        PieceKind::I => [(-1, 0, 0), (-2, 0, 0), (-3, 0, 0)],
        PieceKind::L => [(-1, 0, 0), (-2, 0, 0), (-2, -1, 0)],
        PieceKind::O => [(1, 0, 0), (0, -1, 0), (1, -1, 0)],
        PieceKind::T => [(-1, 0, 0), (-2, 0, 0), (-1, -1, 0)],
        PieceKind::J => [(-1, 0, 0), (-2, 0, 0), (0, -1, 0)],
        PieceKind::Z => [(-1, 0, 0), (0, -1, 0), (1, -1, 0)],
        PieceKind::S => [(1, 0, 0), (0, -1, 0), (-1, -1, 0)],
    }
}

/// Which of the four cells rotations pivot around. O has no pivot and
/// never rotates.
const fn pivot_index(kind: PieceKind) -> Option<usize> {
    match kind {
        PieceKind::I => Some(2),
        PieceKind::L | PieceKind::T | PieceKind::J => Some(1),
        PieceKind::Z | PieceKind::S => Some(0),
        PieceKind::O => None,
    }
}

/// Spawn geometry for a kind: anchor cell first, then the three offsets.
pub fn spawn_cells(kind: PieceKind) -> [Coord; 4] {
    let offsets = spawn_offsets(kind);
    [
        SPAWN_ANCHOR,
        SPAWN_ANCHOR.offset(offsets[0].0, offsets[0].1, offsets[0].2),
        SPAWN_ANCHOR.offset(offsets[1].0, offsets[1].1, offsets[1].2),
        SPAWN_ANCHOR.offset(offsets[2].0, offsets[2].1, offsets[2].2),
    ]
}

/// Rotate a relative vector by `turns` exact quarter turns about an axis.
///
/// Row-vector convention: one positive quarter about X maps (x, y, z)
/// to (x, -z, y).
fn rotate_quarter(v: Coord, axis: Axis, turns: i32) -> Coord {
    let steps = turns.rem_euclid(4);
    let mut out = v;
    for _ in 0..steps {
        out = match axis {
            Axis::X => Coord::new(out.x, -out.z, out.y),
            Axis::Y => Coord::new(out.z, out.y, -out.x),
            Axis::Z => Coord::new(-out.y, out.x, out.z),
        };
    }
    out
}

/// The currently falling piece.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePiece {
    kind: PieceKind,
    color: CellColor,
    cells: [Coord; 4],
    pivot: Option<usize>,
    drop_timer: f32,
    landed: bool,
}

impl ActivePiece {
    /// Place a new piece of the given kind at the spawn anchor, occupying
    /// its cells in the grid.
    pub fn spawn(kind: PieceKind, color: CellColor, grid: &mut Grid) -> Self {
        let cells = spawn_cells(kind);
        for &c in &cells {
            grid.occupy(c, color);
        }
        Self {
            kind,
            color,
            cells,
            pivot: pivot_index(kind),
            drop_timer: 0.0,
            landed: false,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> CellColor {
        self.color
    }

    pub fn cells(&self) -> [Coord; 4] {
        self.cells
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    /// Whether `c` is one of the piece's own cells (compared by value).
    fn contains(&self, c: Coord) -> bool {
        self.cells.iter().any(|&own| own == c)
    }

    /// A candidate cell is passable when in bounds and either inside the
    /// piece's footprint or not Solid.
    fn is_free(&self, grid: &Grid, c: Coord) -> bool {
        c.in_bounds() && (self.contains(c) || !grid.is_solid(c))
    }

    /// Translate the whole piece by `delta` if every destination is free.
    /// All-or-nothing: on rejection nothing changes.
    fn try_shift(&mut self, grid: &mut Grid, delta: Coord) -> bool {
        let mut targets = [Coord::new(0, 0, 0); 4];
        for (i, &c) in self.cells.iter().enumerate() {
            let t = c + delta;
            if !self.is_free(grid, t) {
                return false;
            }
            targets[i] = t;
        }

        for &c in &self.cells {
            grid.vacate(c);
        }
        for &t in &targets {
            grid.occupy(t, self.color);
        }
        self.cells = targets;
        true
    }

    /// Axis-aligned horizontal shift by one cell. Rejected moves are a
    /// silent no-op.
    pub fn move_horizontal(&mut self, grid: &mut Grid, dx: i32, dz: i32) -> bool {
        if self.landed {
            return false;
        }
        self.try_shift(grid, Coord::new(dx, 0, dz))
    }

    /// Advance the gravity timer; once it crosses `drop_interval`, attempt a
    /// one-step descent. Returns true when the piece lands on this tick.
    pub fn gravity_tick(&mut self, grid: &mut Grid, delta_time: f32, drop_interval: f32) -> bool {
        if self.landed {
            return false;
        }

        self.drop_timer += delta_time;
        if self.drop_timer < drop_interval {
            return false;
        }
        self.drop_timer = 0.0;

        let on_floor = self.cells.iter().any(|c| c.y == 0);
        if on_floor || !self.try_shift(grid, Coord::new(0, -1, 0)) {
            self.landed = true;
            return true;
        }
        false
    }

    /// Quarter-turn rotation about a world axis. No-op for pivotless kinds.
    /// Validates all three rotated cells before touching the grid; the pivot
    /// cell itself never moves.
    pub fn rotate(&mut self, grid: &mut Grid, axis: Axis, turns: i32) -> bool {
        if self.landed {
            return false;
        }
        let Some(pivot_idx) = self.pivot else {
            return false;
        };
        let pivot = self.cells[pivot_idx];

        let mut targets = self.cells;
        for (i, &c) in self.cells.iter().enumerate() {
            if i == pivot_idx {
                continue;
            }
            let relative = Coord::new(c.x - pivot.x, c.y - pivot.y, c.z - pivot.z);
            let t = pivot + rotate_quarter(relative, axis, turns);
            if !self.is_free(grid, t) {
                return false;
            }
            targets[i] = t;
        }

        for (i, &c) in self.cells.iter().enumerate() {
            if i != pivot_idx {
                grid.vacate(c);
            }
        }
        for (i, &t) in targets.iter().enumerate() {
            if i != pivot_idx {
                grid.occupy(t, self.color);
            }
        }
        self.cells = targets;
        true
    }

    /// Build a piece from explicit cells, occupying them in the grid.
    /// Test scaffolding for scenarios a spawn cannot reach.
    #[cfg(test)]
    pub(crate) fn from_cells(
        kind: PieceKind,
        color: CellColor,
        cells: [Coord; 4],
        grid: &mut Grid,
    ) -> Self {
        for &c in &cells {
            grid.occupy(c, color);
        }
        Self {
            kind,
            color,
            cells,
            pivot: pivot_index(kind),
            drop_timer: 0.0,
            landed: false,
        }
    }
}
