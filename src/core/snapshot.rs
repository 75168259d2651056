//! Snapshot module - flat JSON persistence of the field
//!
//! A snapshot is the ordered list of non-empty cells, each serialized as
//! `{shape, x, y, z, state, color}`. The active piece object is not part of
//! the format; its cells are saved like any other solid cell.
//!
//! Loading is deliberately forgiving: a missing or unreadable file is a
//! no-op, a corrupt document is a no-op, and individual records with
//! out-of-range coordinates are skipped rather than aborting the load.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Grid;
use crate::types::{CellColor, CellState, Coord, RenderShape};

/// One persisted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub shape: RenderShape,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub state: CellState,
    pub color: CellColor,
}

/// Collect every non-empty cell of the field, in grid iteration order.
pub fn collect_records(grid: &Grid, shape: RenderShape) -> Vec<CellRecord> {
    grid.iter()
        .filter(|(_, cell)| cell.state != CellState::Empty)
        .map(|(coord, cell)| CellRecord {
            shape,
            x: coord.x,
            y: coord.y,
            z: coord.z,
            state: cell.state,
            color: cell.color.unwrap_or(CellColor::Neutral),
        })
        .collect()
}

/// Serialize the field to a JSON snapshot file.
pub fn save(grid: &Grid, shape: RenderShape, path: &Path) -> Result<()> {
    let records = collect_records(grid, shape);
    let json = serde_json::to_string_pretty(&records)?;
    fs::write(path, json).with_context(|| format!("writing snapshot to {}", path.display()))?;
    Ok(())
}

/// Restore the field from a snapshot file.
///
/// Returns `false` when nothing was applied (missing/unreadable/corrupt
/// source); in that case the grid is left exactly as it was. On success the
/// grid is cleared first and each valid record replayed onto it.
pub fn load(grid: &mut Grid, path: &Path) -> bool {
    let Ok(json) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(records) = serde_json::from_str::<Vec<CellRecord>>(&json) else {
        return false;
    };

    grid.clear();
    for record in records {
        let coord = Coord::new(record.x, record.y, record.z);
        if !coord.in_bounds() {
            continue;
        }
        if record.state == CellState::Solid {
            grid.occupy(coord, record.color);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

    fn occupied(grid: &Grid) -> Vec<(Coord, CellColor)> {
        grid.iter()
            .filter(|(_, cell)| cell.is_solid())
            .map(|(coord, cell)| (coord, cell.color.unwrap_or(CellColor::Neutral)))
            .collect()
    }

    #[test]
    fn records_cover_only_occupied_cells() {
        let mut grid = Grid::new();
        grid.occupy(Coord::new(1, 2, 3), CellColor::Red);
        grid.occupy(Coord::new(9, 19, 9), CellColor::Blue);

        let records = collect_records(&grid, RenderShape::Cube);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.shape == RenderShape::Cube));
        assert!(records.iter().all(|r| r.state == CellState::Solid));
    }

    #[test]
    fn save_then_load_round_trips_occupied_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut grid = Grid::new();
        grid.occupy(Coord::new(0, 0, 0), CellColor::Green);
        grid.occupy(Coord::new(4, 10, 7), CellColor::Purple);
        grid.occupy(Coord::new(9, 19, 9), CellColor::Yellow);
        save(&grid, RenderShape::Sphere, &path).unwrap();

        let mut restored = Grid::new();
        assert!(load(&mut restored, &path));
        assert_eq!(occupied(&restored), occupied(&grid));
    }

    #[test]
    fn load_missing_file_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut grid = Grid::new();
        grid.occupy(Coord::new(2, 2, 2), CellColor::Blue);
        let before = occupied(&grid);

        assert!(!load(&mut grid, &dir.path().join("absent.json")));
        assert_eq!(occupied(&grid), before);
    }

    #[test]
    fn load_corrupt_document_is_a_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ not json ]").unwrap();

        let mut grid = Grid::new();
        grid.occupy(Coord::new(3, 3, 3), CellColor::Red);
        let before = occupied(&grid);

        assert!(!load(&mut grid, &path));
        assert_eq!(occupied(&grid), before);
    }

    #[test]
    fn out_of_range_records_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let records = vec![
            CellRecord {
                shape: RenderShape::Cube,
                x: 12,
                y: 0,
                z: 0,
                state: CellState::Solid,
                color: CellColor::Red,
            },
            CellRecord {
                shape: RenderShape::Cube,
                x: 5,
                y: 5,
                z: 5,
                state: CellState::Solid,
                color: CellColor::Blue,
            },
        ];
        fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        let mut grid = Grid::new();
        assert!(load(&mut grid, &path));
        assert_eq!(
            occupied(&grid),
            vec![(Coord::new(5, 5, 5), CellColor::Blue)]
        );
    }

    #[test]
    fn load_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut saved = Grid::new();
        saved.occupy(Coord::new(1, 1, 1), CellColor::Green);
        save(&saved, RenderShape::Cube, &path).unwrap();

        let mut grid = Grid::new();
        grid.occupy(Coord::new(8, 8, 8), CellColor::Red);
        assert!(load(&mut grid, &path));
        assert_eq!(occupied(&grid), vec![(Coord::new(1, 1, 1), CellColor::Green)]);
    }

    #[test]
    fn full_field_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let mut grid = Grid::new();
        for x in 0..GRID_WIDTH {
            for z in 0..GRID_DEPTH {
                grid.occupy(Coord::new(x, 0, z), CellColor::Blue);
            }
        }
        grid.occupy(Coord::new(0, GRID_HEIGHT - 1, 0), CellColor::Red);
        save(&grid, RenderShape::Cube, &path).unwrap();

        let mut restored = Grid::new();
        assert!(load(&mut restored, &path));
        assert_eq!(occupied(&restored).len(), 101);
    }
}
