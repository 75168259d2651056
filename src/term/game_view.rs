//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! Two projections of the 3D field are drawn side by side: a front elevation
//! (x across, y up) where each screen cell shows the nearest solid block
//! along the depth axis, and a top-down plan (x across, z away) showing the
//! highest block in each column. Depth and height are conveyed by dimming.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameState;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellColor, Coord, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the voxel field.
pub struct GameView {
    /// Field cell width in terminal columns.
    cell_w: u16,
    /// Field cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render the current game state into a framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport, show_stats: bool) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let front_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let front_px_h = (GRID_HEIGHT as u16) * self.cell_h;
        let frame_w = front_px_w + 2;
        let frame_h = front_px_h + 2;

        let top_px_w = (GRID_WIDTH as u16) * self.cell_w;
        let top_px_h = (GRID_DEPTH as u16) * self.cell_h;

        let total_w = frame_w + 2 + top_px_w + 2;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(30, 30, 40),
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, front_px_w, front_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);
        self.draw_front_view(&mut fb, state, start_x + 1, start_y + 1);

        let top_x = start_x + frame_w + 2;
        let top_y = start_y;
        fb.fill_rect(top_x + 1, top_y + 1, top_px_w, top_px_h, ' ', bg);
        self.draw_border(&mut fb, top_x, top_y, top_px_w + 2, top_px_h + 2, border);
        self.draw_top_view(&mut fb, state, top_x + 1, top_y + 1);

        let panel_x = top_x;
        let panel_y = top_y + top_px_h + 3;
        self.draw_side_panel(&mut fb, state, viewport, panel_x, panel_y);

        if show_stats {
            self.draw_stats(&mut fb, state, viewport, start_x, start_y + frame_h);
        }

        if state.game_over() {
            self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
            self.draw_overlay_text(
                &mut fb,
                start_x,
                start_y + 2,
                frame_w,
                frame_h,
                "Enter to restart",
            );
        }

        fb
    }

    /// Front elevation: for each (x, y) the solid cell nearest the viewer
    /// wins; deeper cells render darker.
    fn draw_front_view(&self, fb: &mut FrameBuffer, state: &GameState, origin_x: u16, origin_y: u16) {
        let grid = state.grid();
        for y in 0..GRID_HEIGHT {
            for x in 0..GRID_WIDTH {
                let mut hit = None;
                for z in (0..GRID_DEPTH).rev() {
                    let c = Coord::new(x, y, z);
                    if let Some(cell) = grid.get(c) {
                        if cell.is_solid() {
                            hit = Some((cell, GRID_DEPTH - 1 - z));
                            break;
                        }
                    }
                }

                let col = x as u16;
                let row = (GRID_HEIGHT - 1 - y) as u16;
                match hit {
                    Some((cell, depth)) => {
                        let style = block_style(cell.color, cell.destroyed, depth);
                        self.fill_cell(fb, origin_x, origin_y, col, row, '█', style);
                    }
                    None => {
                        let style = CellStyle {
                            fg: Rgb::new(90, 90, 100),
                            bg: Rgb::new(30, 30, 40),
                            bold: false,
                            dim: true,
                        };
                        self.fill_cell(fb, origin_x, origin_y, col, row, '·', style);
                    }
                }
            }
        }
    }

    /// Top-down plan: for each (x, z) the highest solid cell wins; lower
    /// stacks render darker. The near face sits at the bottom edge.
    fn draw_top_view(&self, fb: &mut FrameBuffer, state: &GameState, origin_x: u16, origin_y: u16) {
        let grid = state.grid();
        for z in 0..GRID_DEPTH {
            for x in 0..GRID_WIDTH {
                let mut hit = None;
                for y in (0..GRID_HEIGHT).rev() {
                    let c = Coord::new(x, y, z);
                    if let Some(cell) = grid.get(c) {
                        if cell.is_solid() {
                            hit = Some((cell, GRID_HEIGHT - 1 - y));
                            break;
                        }
                    }
                }

                let col = x as u16;
                let row = (GRID_DEPTH - 1 - z) as u16;
                match hit {
                    Some((cell, drop)) => {
                        // Height scale is twice the depth scale; clamp keeps
                        // tall empty columns visible.
                        let style = block_style(cell.color, cell.destroyed, (drop / 2).min(9));
                        self.fill_cell(fb, origin_x, origin_y, col, row, '█', style);
                    }
                    None => {
                        let style = CellStyle {
                            fg: Rgb::new(90, 90, 100),
                            bg: Rgb::new(30, 30, 40),
                            bold: false,
                            dim: true,
                        };
                        self.fill_cell(fb, origin_x, origin_y, col, row, '·', style);
                    }
                }
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        origin_x: u16,
        origin_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = origin_x + cell_x * self.cell_w;
        let py = origin_y + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        panel_x: u16,
        panel_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let hint = CellStyle { dim: true, ..value };

        let mut y = panel_y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_str(panel_x + 7, y, &format!("{}", state.points()), value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "LEVEL", label);
        fb.put_str(panel_x + 7, y, &format!("{}", state.current_level()), value);
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "ROWS", label);
        fb.put_str(panel_x + 7, y, &format!("{}", state.lines_cleared()), value);
        y = y.saturating_add(2);

        let (kind, color) = state.preview();
        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x + 7, y, kind.as_str(), value);
        y = y.saturating_add(1);
        self.draw_preview(fb, state, panel_x, y, color);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "arrows move  x/c/z rotate", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "space drop  F2/F3 save/load", hint);
    }

    /// Mini front projection of the next piece, normalized to its own
    /// bounding box.
    fn draw_preview(&self, fb: &mut FrameBuffer, state: &GameState, x: u16, y: u16, color: CellColor) {
        let cells = state.preview_cells();
        let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0);
        let max_y = cells.iter().map(|c| c.y).max().unwrap_or(0);

        let style = block_style(Some(color), false, 0);
        for c in cells {
            let col = (c.x - min_x) as u16;
            let row = (max_y - c.y) as u16;
            let px = x + col * self.cell_w;
            fb.fill_rect(px, y + row, self.cell_w, 1, '█', style);
        }
    }

    fn draw_stats(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) {
        let style = CellStyle {
            fg: Rgb::new(180, 180, 190),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let report = state.stats().to_string();
        let mut row = y.saturating_add(1);
        for line in report.lines() {
            if row >= viewport.height {
                break;
            }
            fb.put_str(x, row, line, style);
            row = row.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        fb.put_str(x, mid_y, text, style);
    }
}

fn color_rgb(color: CellColor) -> Rgb {
    match color {
        CellColor::Blue => Rgb::new(80, 120, 220),
        CellColor::Red => Rgb::new(220, 80, 80),
        CellColor::Green => Rgb::new(100, 220, 120),
        CellColor::Yellow => Rgb::new(240, 220, 80),
        CellColor::Purple => Rgb::new(200, 120, 220),
        CellColor::Neutral => Rgb::new(235, 235, 235),
    }
}

fn block_style(color: Option<CellColor>, destroyed: bool, depth: i32) -> CellStyle {
    if destroyed {
        // Mid-destroy flash: bright regardless of depth.
        return CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(30, 30, 40),
            bold: true,
            dim: false,
        };
    }

    let base = color_rgb(color.unwrap_or(CellColor::Neutral));
    let percent = 100u8.saturating_sub((depth as u8).saturating_mul(7));
    CellStyle {
        fg: base.darken(percent.max(30)),
        bg: Rgb::new(30, 30, 40),
        bold: depth == 0,
        dim: false,
    }
}
