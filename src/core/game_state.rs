//! Game state module - the owned aggregate tying the core together
//!
//! Single-threaded and frame-driven: one `update(delta_time)` call per frame
//! advances gravity, the destroy flash, clearing, compaction, and spawning.
//! Input handlers apply synchronous validate-then-apply moves. There are no
//! ambient statics; everything lives in this struct and is passed explicitly.
//!
//! Landing and row-resolution notifications are queued as [`GameEvent`]s and
//! drained by the caller after each update; the core never depends on a
//! response to them.

use std::path::Path;

use anyhow::Result;
use arrayvec::ArrayVec;

use crate::core::{
    clearing, snapshot, ActivePiece, FieldStats, Grid, Leveling, Spawner,
};
use crate::types::{
    CellColor, Coord, GameAction, PieceKind, RenderShape, ACCEL_DROP_DIVISOR, DESTROY_ANIM_SECS,
    GRID_HEIGHT, SPAWN_ANCHOR,
};

/// One-shot notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece could descend no further.
    PieceLanded { kind: PieceKind },
    /// The destroy flash for these rows finished and the field compacted.
    RowsResolved {
        rows: ArrayVec<i32, { GRID_HEIGHT as usize }>,
    },
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct GameState {
    grid: Grid,
    active: Option<ActivePiece>,
    spawner: Spawner,
    leveling: Leveling,
    points: u32,
    lines_cleared: u32,
    game_over: bool,
    /// Remaining flash time while cleared rows are mid-destroy.
    destroy_timer: Option<f32>,
    pending_rows: ArrayVec<i32, { GRID_HEIGHT as usize }>,
    shape_style: RenderShape,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and spawn the first piece.
    pub fn new(seed: u32) -> Self {
        let mut grid = Grid::new();
        let mut spawner = Spawner::new(seed);
        let (kind, color) = spawner.take();
        let active = ActivePiece::spawn(kind, color, &mut grid);

        Self {
            grid,
            active: Some(active),
            spawner,
            leveling: Leveling::new(),
            points: 0,
            lines_cleared: 0,
            game_over: false,
            destroy_timer: None,
            pending_rows: ArrayVec::new(),
            shape_style: RenderShape::Cube,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn current_level(&self) -> u32 {
        self.leveling.current_level()
    }

    pub fn drop_interval(&self) -> f32 {
        self.leveling.drop_interval()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn shape_style(&self) -> RenderShape {
        self.shape_style
    }

    /// Coordinates of the active piece, if one is falling.
    pub fn active_cells(&self) -> Option<[Coord; 4]> {
        self.active.as_ref().map(ActivePiece::cells)
    }

    pub fn active_color(&self) -> Option<CellColor> {
        self.active.as_ref().map(ActivePiece::color)
    }

    /// Next piece's kind and color.
    pub fn preview(&self) -> (PieceKind, CellColor) {
        self.spawner.preview()
    }

    /// Spawn geometry of the next piece, for the preview panel.
    pub fn preview_cells(&self) -> [Coord; 4] {
        crate::core::piece::spawn_cells(self.spawner.preview().0)
    }

    /// Whether cleared rows are currently mid-flash.
    pub fn rows_resolving(&self) -> bool {
        self.destroy_timer.is_some()
    }

    /// Drain queued one-shot notifications.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Aggregate field statistics.
    pub fn stats(&self) -> FieldStats {
        FieldStats::collect(&self.grid)
    }

    /// Advance the simulation by `delta_time` seconds. `accelerate` applies
    /// the held fast-drop divisor for this frame.
    pub fn update(&mut self, delta_time: f32, accelerate: bool) {
        if self.game_over {
            return;
        }

        // A pending destroy flash gates everything else.
        if let Some(remaining) = self.destroy_timer {
            let remaining = remaining - delta_time;
            if remaining > 0.0 {
                self.destroy_timer = Some(remaining);
            } else {
                self.destroy_timer = None;
                self.finish_row_resolution();
            }
            return;
        }

        let mut interval = self.leveling.drop_interval();
        if accelerate {
            interval /= ACCEL_DROP_DIVISOR;
        }

        let landed = match self.active.as_mut() {
            Some(piece) => piece.gravity_tick(&mut self.grid, delta_time, interval),
            None => false,
        };
        if landed {
            self.on_piece_landed();
        }
    }

    /// Apply an input-driven action. Rejected moves return false and leave
    /// the state untouched; while game over is set only `Restart` does
    /// anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return match action {
                GameAction::Restart => {
                    self.restart();
                    true
                }
                _ => false,
            };
        }

        let Some(piece) = self.active.as_mut() else {
            // Mid-flash or transitional state; moves are silently ignored.
            return false;
        };

        match action {
            GameAction::MoveLeft => piece.move_horizontal(&mut self.grid, -1, 0),
            GameAction::MoveRight => piece.move_horizontal(&mut self.grid, 1, 0),
            GameAction::MoveBack => piece.move_horizontal(&mut self.grid, 0, -1),
            GameAction::MoveForward => piece.move_horizontal(&mut self.grid, 0, 1),
            GameAction::Rotate { axis, turns } => piece.rotate(&mut self.grid, axis, turns),
            GameAction::Restart => false,
        }
    }

    /// Save the settled field to a snapshot file. The falling piece is not
    /// part of the snapshot; a later load respawns from the lookahead.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        match &self.active {
            Some(piece) => {
                let mut settled = self.grid.clone();
                for c in piece.cells() {
                    settled.vacate(c);
                }
                snapshot::save(&settled, self.shape_style, path)
            }
            None => snapshot::save(&self.grid, self.shape_style, path),
        }
    }

    /// Restore the field from a snapshot file, then spawn a fresh piece from
    /// the current lookahead pair. A missing or corrupt file changes nothing.
    pub fn load_snapshot(&mut self, path: &Path) -> bool {
        if !snapshot::load(&mut self.grid, path) {
            return false;
        }
        self.active = None;
        self.destroy_timer = None;
        self.pending_rows.clear();
        self.game_over = false;
        self.spawn_next();
        true
    }

    fn on_piece_landed(&mut self) {
        let kind = match self.active.as_ref() {
            Some(piece) => piece.kind(),
            None => return,
        };
        self.events.push(GameEvent::PieceLanded { kind });
        // The piece's cells stay in the grid; the handle is retired.
        self.active = None;

        let outcome = clearing::scan_and_mark(&mut self.grid);
        if outcome.points > 0 {
            self.points += outcome.points;
            self.lines_cleared += outcome.rows_cleared();
            self.leveling.on_points(self.points);
        }

        // Terminal check comes before compaction: a stack reaching the
        // sentinel ends the game even if rows were just cleared.
        if self.grid.is_solid(SPAWN_ANCHOR) {
            self.game_over = true;
            return;
        }

        if outcome.rows.is_empty() {
            self.spawn_next();
        } else {
            self.pending_rows = outcome.rows;
            self.destroy_timer = Some(DESTROY_ANIM_SECS);
        }
    }

    fn finish_row_resolution(&mut self) {
        self.grid.resolve_destroyed();
        clearing::compact(&mut self.grid);
        let rows = std::mem::take(&mut self.pending_rows);
        self.events.push(GameEvent::RowsResolved { rows });
        self.spawn_next();
    }

    fn spawn_next(&mut self) {
        let (kind, color) = self.spawner.take();
        self.active = Some(ActivePiece::spawn(kind, color, &mut self.grid));
    }

    /// Reinitialize the field and all counters, keeping the RNG sequence.
    fn restart(&mut self) {
        self.grid.clear();
        self.leveling = Leveling::new();
        self.points = 0;
        self.lines_cleared = 0;
        self.game_over = false;
        self.destroy_timer = None;
        self.pending_rows.clear();
        self.events.clear();
        self.spawn_next();
    }
}
