//! Core types shared across the application
//! This module contains pure data types with no external dependencies
//! beyond serde derives for the snapshot format.

use serde::{Deserialize, Serialize};

/// Field dimensions (x, y, z)
pub const GRID_WIDTH: i32 = 10;
pub const GRID_HEIGHT: i32 = 20;
pub const GRID_DEPTH: i32 = 10;

/// Spawn anchor for new pieces; also the game-over sentinel cell.
pub const SPAWN_ANCHOR: Coord = Coord::new(6, 19, 5);

/// Points awarded per cleared row.
pub const ROW_CLEAR_POINTS: u32 = 100;

/// Simulated time a destroyed row stays in its flash state before
/// compaction runs (seconds).
pub const DESTROY_ANIM_SECS: f32 = 0.4;

/// Gravity interval at level 1 (seconds between descents).
pub const BASE_DROP_SECS: f32 = 1.0;

/// Fastest gravity interval the level curve can reach.
pub const DROP_INTERVAL_FLOOR_SECS: f32 = 0.03;

/// Divisor applied to the drop interval while accelerated drop is held.
pub const ACCEL_DROP_DIVISOR: f32 = 10.0;

/// Main loop tick (milliseconds).
pub const TICK_MS: u32 = 16;

/// Integer coordinate in the 3D field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Whether this coordinate addresses a real grid cell.
    pub fn in_bounds(self) -> bool {
        (0..GRID_WIDTH).contains(&self.x)
            && (0..GRID_HEIGHT).contains(&self.y)
            && (0..GRID_DEPTH).contains(&self.z)
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl std::ops::Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    L,
    O,
    T,
    J,
    Z,
    S,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::L,
        PieceKind::O,
        PieceKind::T,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::J => "J",
            PieceKind::Z => "Z",
            PieceKind::S => "S",
        }
    }
}

/// Cell colors. `Neutral` is reserved for the destroy flash and is never
/// drawn by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Neutral,
}

impl CellColor {
    /// Colors the spawner may assign to a piece.
    pub const PLAYABLE: [CellColor; 5] = [
        CellColor::Blue,
        CellColor::Red,
        CellColor::Green,
        CellColor::Yellow,
        CellColor::Purple,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CellColor::Blue => "Blue",
            CellColor::Red => "Red",
            CellColor::Green => "Green",
            CellColor::Yellow => "Yellow",
            CellColor::Purple => "Purple",
            CellColor::Neutral => "Neutral",
        }
    }
}

/// Occupancy state of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    Empty,
    Solid,
}

/// Shape style the field renders as; carried in snapshot records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RenderShape {
    Cube,
    Sphere,
}

/// World axes for quarter-turn rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Game actions applied to the core state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift one cell toward -x.
    MoveLeft,
    /// Shift one cell toward +x.
    MoveRight,
    /// Shift one cell toward -z.
    MoveBack,
    /// Shift one cell toward +z.
    MoveForward,
    /// Quarter turn about a world axis; `turns` is +1 or -1.
    Rotate { axis: Axis, turns: i32 },
    /// Reinitialize the field and counters. Only valid once game over is set.
    Restart,
}
