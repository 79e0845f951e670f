//! Keyboard and mouse input for the game screen.
//!
//! Terminal events map onto a small set of controls, and every control maps
//! onto one `Game` mutator.

use crate::game::Game;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// UI-agnostic player controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Start from the start screen, otherwise jump.
    Primary,
    Restart,
    TogglePause,
    ToggleMute,
    Quit,
}

pub fn map_event(event: &Event) -> Option<Control> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => Some(Control::Primary),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Control> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Control::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Up => Some(Control::Primary),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => Some(Control::Restart),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Control::TogglePause),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Control::ToggleMute),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Control::Quit),
        _ => None,
    }
}

/// Apply a control. Returns false when the player asked to quit.
pub fn apply(game: &mut Game, control: Control, now_ms: u64) -> bool {
    match control {
        Control::Primary => {
            if game.is_start_screen() {
                game.start(now_ms);
            } else {
                game.jump();
            }
        }
        Control::Restart => {
            // Only offered once the run has ended
            if !game.is_running {
                game.start(now_ms);
            }
        }
        Control::TogglePause => {
            game.toggle_pause();
        }
        Control::ToggleMute => {
            let muted = game.toggle_mute();
            tracing::debug!(muted, "mute toggled");
        }
        Control::Quit => return false,
    }
    true
}
