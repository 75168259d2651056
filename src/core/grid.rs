//! Grid module - the 10x20x10 voxel field
//!
//! Every coordinate triple in range maps to exactly one cell; cells are owned
//! by the grid and addressed positionally. Uses a flat array for cache
//! locality. Out-of-range writes are a caller contract violation and fail
//! fast; read-side queries return `Option` so tolerant callers (stats,
//! snapshot loading) can filter.

use crate::types::{CellColor, CellState, Coord, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells in the field.
const GRID_SIZE: usize = (GRID_WIDTH * GRID_HEIGHT * GRID_DEPTH) as usize;

/// A single addressable slot of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub state: CellState,
    /// Color of the occupying block; meaningless while `state` is `Empty`.
    pub color: Option<CellColor>,
    /// Transient flag set while the cell's row is mid-destroy.
    pub destroyed: bool,
}

impl Cell {
    const EMPTY: Cell = Cell {
        state: CellState::Empty,
        color: None,
        destroyed: false,
    };

    pub fn is_solid(&self) -> bool {
        self.state == CellState::Solid
    }
}

/// The playing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat storage, indexed as (y * DEPTH + z) * WIDTH + x.
    cells: Box<[Cell; GRID_SIZE]>,
}

impl Grid {
    /// Create a new field with every cell empty.
    pub fn new() -> Self {
        Self {
            cells: Box::new([Cell::EMPTY; GRID_SIZE]),
        }
    }

    #[inline]
    fn index(c: Coord) -> Option<usize> {
        if !c.in_bounds() {
            return None;
        }
        Some(((c.y * GRID_DEPTH + c.z) * GRID_WIDTH + c.x) as usize)
    }

    /// Flat index for a coordinate the caller has already validated.
    /// Panics on out-of-range input.
    #[inline]
    fn index_checked(c: Coord) -> usize {
        assert!(
            c.in_bounds(),
            "grid access out of bounds: ({}, {}, {})",
            c.x,
            c.y,
            c.z
        );
        ((c.y * GRID_DEPTH + c.z) * GRID_WIDTH + c.x) as usize
    }

    /// Read a cell. Returns `None` out of bounds.
    pub fn get(&self, c: Coord) -> Option<Cell> {
        Self::index(c).map(|i| self.cells[i])
    }

    /// Set a cell Solid with the given color.
    pub fn occupy(&mut self, c: Coord, color: CellColor) {
        let cell = &mut self.cells[Self::index_checked(c)];
        cell.state = CellState::Solid;
        cell.color = Some(color);
    }

    /// Set a cell Empty, clearing color and destroy flag.
    pub fn vacate(&mut self, c: Coord) {
        self.cells[Self::index_checked(c)] = Cell::EMPTY;
    }

    /// Whether the in-bounds cell at `c` is Solid.
    pub fn is_solid(&self, c: Coord) -> bool {
        self.cells[Self::index_checked(c)].is_solid()
    }

    /// True iff every (x, z) slot of row `y` is Solid.
    pub fn is_row_full(&self, y: i32) -> bool {
        Self::row_coords(y).all(|c| self.is_solid(c))
    }

    /// True iff no cell of row `y` is Solid.
    pub fn is_row_empty(&self, y: i32) -> bool {
        Self::row_coords(y).all(|c| !self.is_solid(c))
    }

    /// True iff at least one cell of row `y` is Solid.
    pub fn row_has_solid(&self, y: i32) -> bool {
        !self.is_row_empty(y)
    }

    /// Flag every cell of row `y` as mid-destroy and flash it neutral.
    pub fn mark_row_destroyed(&mut self, y: i32) {
        for c in Self::row_coords(y) {
            let cell = &mut self.cells[Self::index_checked(c)];
            cell.destroyed = true;
            cell.color = Some(CellColor::Neutral);
        }
    }

    /// True once no cell in the field is mid-destroy.
    pub fn all_destroy_flags_clear(&self) -> bool {
        !self.cells.iter().any(|cell| cell.destroyed)
    }

    /// Vacate every mid-destroy cell, ending the flash.
    pub fn resolve_destroyed(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.destroyed {
                *cell = Cell::EMPTY;
            }
        }
    }

    /// Copy row `y` into row `y - 1` and vacate row `y`.
    pub fn shift_row_down(&mut self, y: i32) {
        assert!(y > 0 && y < GRID_HEIGHT, "cannot shift row {y} down");
        for c in Self::row_coords(y) {
            let src = self.cells[Self::index_checked(c)];
            self.cells[Self::index_checked(c.offset(0, -1, 0))] = src;
            self.cells[Self::index_checked(c)] = Cell::EMPTY;
        }
    }

    /// Reset every cell to Empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Iterate every coordinate of row `y`.
    pub fn row_coords(y: i32) -> impl Iterator<Item = Coord> {
        (0..GRID_DEPTH).flat_map(move |z| (0..GRID_WIDTH).map(move |x| Coord::new(x, y, z)))
    }

    /// Iterate every (coordinate, cell) pair of the field.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        (0..GRID_HEIGHT).flat_map(move |y| {
            (0..GRID_DEPTH).flat_map(move |z| {
                (0..GRID_WIDTH).map(move |x| {
                    let c = Coord::new(x, y, z);
                    (c, self.cells[Self::index_checked(c)])
                })
            })
        })
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new();
        assert_eq!(grid.iter().count(), GRID_SIZE);
        assert!(grid.iter().all(|(_, cell)| !cell.is_solid()));
    }

    #[test]
    fn occupy_and_vacate() {
        let mut grid = Grid::new();
        let c = Coord::new(3, 7, 4);

        grid.occupy(c, CellColor::Red);
        assert!(grid.is_solid(c));
        assert_eq!(grid.get(c).unwrap().color, Some(CellColor::Red));

        grid.vacate(c);
        assert!(!grid.is_solid(c));
        assert_eq!(grid.get(c).unwrap().color, None);
    }

    #[test]
    fn get_out_of_bounds_is_none() {
        let grid = Grid::new();
        assert_eq!(grid.get(Coord::new(-1, 0, 0)), None);
        assert_eq!(grid.get(Coord::new(0, 20, 0)), None);
        assert_eq!(grid.get(Coord::new(0, 0, 10)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn occupy_out_of_bounds_panics() {
        let mut grid = Grid::new();
        grid.occupy(Coord::new(12, 0, 0), CellColor::Blue);
    }

    #[test]
    fn row_full_requires_all_hundred_cells() {
        let mut grid = Grid::new();
        let coords: Vec<Coord> = Grid::row_coords(5).collect();
        assert_eq!(coords.len(), 100);

        for &c in &coords[..99] {
            grid.occupy(c, CellColor::Green);
        }
        assert!(!grid.is_row_full(5));

        grid.occupy(coords[99], CellColor::Green);
        assert!(grid.is_row_full(5));
    }

    #[test]
    fn mark_and_resolve_destroyed() {
        let mut grid = Grid::new();
        for c in Grid::row_coords(2).collect::<Vec<_>>() {
            grid.occupy(c, CellColor::Blue);
        }

        grid.mark_row_destroyed(2);
        assert!(!grid.all_destroy_flags_clear());
        assert_eq!(
            grid.get(Coord::new(0, 2, 0)).unwrap().color,
            Some(CellColor::Neutral)
        );

        grid.resolve_destroyed();
        assert!(grid.all_destroy_flags_clear());
        assert!(grid.is_row_empty(2));
    }

    #[test]
    fn shift_row_down_moves_state_and_color() {
        let mut grid = Grid::new();
        let c = Coord::new(4, 6, 8);
        grid.occupy(c, CellColor::Purple);

        grid.shift_row_down(6);
        assert!(!grid.is_solid(c));
        let below = grid.get(c.offset(0, -1, 0)).unwrap();
        assert!(below.is_solid());
        assert_eq!(below.color, Some(CellColor::Purple));
    }
}
