//! Keyboard mapping and held-key tracking for terminal environments.
//!
//! Terminals that do not emit key release events get a timeout-based
//! auto-release for the accelerated-drop key.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::{Axis, GameAction};

/// Everything a key press can ask of the main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Forwarded straight to the core.
    Action(GameAction),
    /// Hold accelerated drop for this frame (and the grace window after).
    Accelerate,
    /// Write the field to the snapshot file.
    Save,
    /// Restore the field from the snapshot file.
    Load,
    /// Toggle the field statistics overlay.
    ToggleStats,
}

/// Map keyboard input to commands.
///
/// Arrow keys move in the horizontal plane: left/right along x, up/down
/// along z (up pushes the piece away from the viewer). X, C and Z rotate a
/// quarter turn about the matching world axis; holding Ctrl reverses the
/// turn direction.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    let turns = if key.modifiers.contains(KeyModifiers::CONTROL) {
        -1
    } else {
        1
    };

    match key.code {
        KeyCode::Left => Some(Command::Action(GameAction::MoveLeft)),
        KeyCode::Right => Some(Command::Action(GameAction::MoveRight)),
        KeyCode::Up => Some(Command::Action(GameAction::MoveBack)),
        KeyCode::Down => Some(Command::Action(GameAction::MoveForward)),

        KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(Command::Action(GameAction::Rotate { axis: Axis::X, turns }))
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            Some(Command::Action(GameAction::Rotate { axis: Axis::Y, turns }))
        }
        KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(Command::Action(GameAction::Rotate { axis: Axis::Z, turns }))
        }

        KeyCode::Char(' ') => Some(Command::Accelerate),
        KeyCode::Enter => Some(Command::Action(GameAction::Restart)),

        KeyCode::F(1) => Some(Command::ToggleStats),
        KeyCode::F(2) => Some(Command::Save),
        KeyCode::F(3) => Some(Command::Load),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q'))
}

// In terminals without key-release events, a short timeout prevents a single
// tap of the accelerate key from turning into a sustained hold.
const ACCEL_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks the accelerated-drop key across frames.
#[derive(Debug, Clone)]
pub struct AccelHold {
    last_press: Option<Instant>,
    timeout_ms: u64,
}

impl AccelHold {
    pub fn new() -> Self {
        Self {
            last_press: None,
            timeout_ms: ACCEL_RELEASE_TIMEOUT_MS,
        }
    }

    /// Register a press (or terminal auto-repeat) of the accelerate key.
    pub fn press(&mut self) {
        self.last_press = Some(Instant::now());
    }

    /// Register an explicit release event.
    pub fn release(&mut self) {
        self.last_press = None;
    }

    /// Whether acceleration applies to the current frame.
    pub fn is_active(&self) -> bool {
        match self.last_press {
            Some(at) => at.elapsed().as_millis() as u64 <= self.timeout_ms,
            None => false,
        }
    }
}

impl Default for AccelHold {
    fn default() -> Self {
        Self::new()
    }
}
