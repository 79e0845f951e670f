//! Terminal screen: bordered play field, status bar and overlays.

pub mod hud;

use crate::game::{Game, GameStatus};
use crate::render::PixelCanvas;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Areas of the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    /// Pixel canvas area, inside the outer border.
    pub field: Rect,
    /// Two-line status bar under the field.
    pub status_bar: Rect,
}

/// Split the terminal into the play field and the status bar.
///
/// ```text
/// ┌─ Billy Run ─────────────────────┐
/// │                                 │
/// │   [field]                       │
/// │                                 │
/// │ [status bar - 2 lines]          │
/// └─────────────────────────────────┘
/// ```
pub fn game_layout(area: Rect) -> GameLayout {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);
    GameLayout {
        field: chunks[0],
        status_bar: chunks[1],
    }
}

/// Draw the whole screen. `canvas` must already hold the current frame.
pub fn render_game(frame: &mut Frame, game: &Game, canvas: &PixelCanvas) {
    let area = frame.size();
    let block = Block::default()
        .title(" Billy Run ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightYellow));
    frame.render_widget(block, area);

    let layout = game_layout(area);
    frame.render_widget(canvas, layout.field);

    match game.status() {
        GameStatus::Start => hud::render_start_prompt(frame, layout.field, game.high_score),
        GameStatus::Paused => hud::render_pause_banner(frame, layout.field),
        GameStatus::GameOver => {
            hud::render_game_over(frame, layout.field, game.score, game.high_score)
        }
        GameStatus::Running | GameStatus::Dying => {}
    }

    hud::render_status_bar(frame, layout.status_bar, game);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_reserves_border_and_status_bar() {
        let layout = game_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.field, Rect::new(1, 1, 78, 20));
        assert_eq!(layout.status_bar, Rect::new(1, 21, 78, 2));
    }
}
