//! Field statistics - aggregate occupancy report
//!
//! Operator-facing breakdown of the field: blocks on the floor, counts by
//! occupancy state, solid counts per row, counts per color.

use std::fmt;

use crate::types::{CellColor, CellState, GRID_HEIGHT};

use crate::core::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStats {
    /// Solid blocks resting at y = 0.
    pub on_floor: u32,
    pub empty_cells: u32,
    pub solid_cells: u32,
    /// Solid count per row, indexed by y.
    pub per_row: [u32; GRID_HEIGHT as usize],
    /// (color, solid count) for every color present, in enum order.
    pub per_color: Vec<(CellColor, u32)>,
}

impl FieldStats {
    pub fn collect(grid: &Grid) -> Self {
        let mut on_floor = 0;
        let mut empty_cells = 0;
        let mut solid_cells = 0;
        let mut per_row = [0u32; GRID_HEIGHT as usize];
        let mut color_counts = [0u32; 6];

        for (coord, cell) in grid.iter() {
            match cell.state {
                CellState::Empty => empty_cells += 1,
                CellState::Solid => {
                    solid_cells += 1;
                    per_row[coord.y as usize] += 1;
                    if coord.y == 0 {
                        on_floor += 1;
                    }
                    if let Some(color) = cell.color {
                        color_counts[color_ordinal(color)] += 1;
                    }
                }
            }
        }

        let per_color = ALL_COLORS
            .iter()
            .zip(color_counts.iter())
            .filter(|(_, &count)| count > 0)
            .map(|(&color, &count)| (color, count))
            .collect();

        Self {
            on_floor,
            empty_cells,
            solid_cells,
            per_row,
            per_color,
        }
    }
}

const ALL_COLORS: [CellColor; 6] = [
    CellColor::Blue,
    CellColor::Red,
    CellColor::Green,
    CellColor::Yellow,
    CellColor::Purple,
    CellColor::Neutral,
];

fn color_ordinal(color: CellColor) -> usize {
    ALL_COLORS
        .iter()
        .position(|&c| c == color)
        .unwrap_or_default()
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "1. Blocks on floor (y == 0): {}", self.on_floor)?;
        writeln!(f, "2. == Cell state breakdown ==")?;
        writeln!(f, "Empty: {}", self.empty_cells)?;
        writeln!(f, "Solid: {}", self.solid_cells)?;
        writeln!(f, "3. == Solid blocks per row ==")?;
        for (y, &count) in self.per_row.iter().enumerate() {
            if count > 0 {
                writeln!(f, "Row {y}: {count} blocks")?;
            }
        }
        writeln!(f, "4. Colors:")?;
        for &(color, count) in &self.per_color {
            writeln!(f, "   {}: {}", color.as_str(), count)?;
        }
        Ok(())
    }
}
