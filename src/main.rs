//! Terminal voxtris runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer.

use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use voxtris::core::GameState;
use voxtris::input::{handle_key_event, should_quit, AccelHold, Command};
use voxtris::term::{GameView, TerminalRenderer, Viewport};
use voxtris::types::TICK_MS;

const SNAPSHOT_FILE: &str = "save.json";

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32)
        .unwrap_or(1);
    let mut game_state = GameState::new(seed);

    let view = GameView::default();
    let mut accel = AccelHold::new();
    let mut show_stats = false;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game_state, Viewport::new(w, h), show_stats);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        match handle_key_event(key) {
                            Some(Command::Action(action)) => {
                                game_state.apply_action(action);
                            }
                            Some(Command::Accelerate) => accel.press(),
                            Some(Command::Save) => {
                                // A failed save is not worth tearing the
                                // session down for.
                                let _ = game_state.save_snapshot(Path::new(SNAPSHOT_FILE));
                            }
                            Some(Command::Load) => {
                                game_state.load_snapshot(Path::new(SNAPSHOT_FILE));
                            }
                            Some(Command::ToggleStats) => show_stats = !show_stats,
                            None => {}
                        }
                    }
                    KeyEventKind::Release => {
                        if matches!(handle_key_event(key), Some(Command::Accelerate)) {
                            accel.release();
                        }
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            game_state.update(TICK_MS as f32 / 1000.0, accel.is_active());
            game_state.take_events();
        }
    }
}
