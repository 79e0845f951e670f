//! Text overlays drawn on top of the pixel canvas.

use crate::game::{Game, GameStatus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Controls listed in the status bar for each state.
pub fn controls_for(status: GameStatus) -> &'static [(&'static str, &'static str)] {
    match status {
        GameStatus::Start => &[("[Space]", "Start"), ("[M]", "Mute"), ("[Q]", "Quit")],
        GameStatus::Running => &[
            ("[Space]", "Jump"),
            ("[P]", "Pause"),
            ("[M]", "Mute"),
            ("[Q]", "Quit"),
        ],
        GameStatus::Paused => &[("[P]", "Resume"), ("[M]", "Mute"), ("[Q]", "Quit")],
        GameStatus::Dying => &[("[Q]", "Quit")],
        GameStatus::GameOver => &[("[R]", "Restart"), ("[M]", "Mute"), ("[Q]", "Quit")],
    }
}

/// First status bar line.
pub fn status_text(game: &Game) -> String {
    match game.status() {
        GameStatus::Start => format!("High score {}", game.high_score),
        GameStatus::GameOver => format!("Final score {}   High score {}", game.score, game.high_score),
        _ => format!(
            "Score {}   High score {}   Speed {:.2}",
            game.score, game.high_score, game.game_speed
        ),
    }
}

fn status_color(status: GameStatus) -> Color {
    match status {
        GameStatus::GameOver | GameStatus::Dying => Color::Red,
        GameStatus::Paused => Color::Yellow,
        _ => Color::White,
    }
}

/// Status bar under the field: score line with a muted tag, then the key
/// hints for the current state.
pub fn render_status_bar(frame: &mut Frame, area: Rect, game: &Game) {
    if area.height == 0 {
        return;
    }
    let status = game.status();

    let mut score_line = vec![Span::styled(
        status_text(game),
        Style::default().fg(status_color(status)),
    )];
    if game.is_muted {
        score_line.push(Span::raw("  "));
        score_line.push(Span::styled(
            " muted ",
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(score_line)).alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height < 2 {
        return;
    }
    let hints: Vec<Span> = controls_for(status)
        .iter()
        .enumerate()
        .flat_map(|(i, (key, action))| {
            [
                Span::raw(if i == 0 { "" } else { "  " }),
                Span::styled(*key, Style::default().fg(Color::White)),
                Span::styled(format!(" {}", action), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(hints)).alignment(Alignment::Center),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

/// Centre a `width` x `height` box inside `area`, shrinking it to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_modal(frame: &mut Frame, area: Rect, color: Color, lines: Vec<Line>) {
    let modal = centered(area, 34, lines.len() as u16 + 2);
    frame.render_widget(Clear, modal);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

pub fn render_start_prompt(frame: &mut Frame, area: Rect, high_score: u32) {
    let lines = vec![
        Line::from(Span::styled(
            "BILLY RUN",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Catch birds and mice, dodge priests",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("High score: {}", high_score),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[Space] or click to start",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    render_modal(frame, area, Color::LightYellow, lines);
}

pub fn render_pause_banner(frame: &mut Frame, area: Rect) {
    let banner = centered(area, 12, 3);
    frame.render_widget(Clear, banner);
    let text = Paragraph::new(Span::styled(
        "PAUSED",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(text, banner);
}

pub fn render_game_over(frame: &mut Frame, area: Rect, score: u32, high_score: u32) {
    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", score),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("High score: {}", high_score),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if score > 0 && score == high_score {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default().fg(Color::Green),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[R] Restart  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    )));
    render_modal(frame, area, Color::Red, lines);
}
