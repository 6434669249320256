//! Stateless UI rendering for the reversi client.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use reversi_client::{GameView, PlayerPanel, SessionState};
use reversi_protocol::{BOARD_SIZE, Point, ROOM_CAPACITY, Token};

use super::app::{App, InputMode};

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(12),    // Rooms + board + players
            Constraint::Length(8),  // Message log
            Constraint::Length(3),  // Key help / prompt
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(32),
            Constraint::Length(BOARD_SIZE as u16 * 2 + 6),
            Constraint::Min(24),
        ])
        .split(chunks[1]);

    draw_rooms(frame, body[0], app);
    draw_board(frame, body[1], app);
    draw_players(frame, body[2], app);
    draw_log(frame, chunks[2], app);
    draw_footer(frame, chunks[3], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let who = app
        .player()
        .map(|p| format!("{} ({})", p.name, p.id))
        .unwrap_or_else(|| "not registered".to_string());
    let text = format!("Reversi - {} - {}", who, app.state());
    let header = Paragraph::new(text)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_rooms(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = match app.room() {
        Some(room) => {
            let count = app
                .room_count()
                .map(|c| format!("{}/{}", c, ROOM_CAPACITY))
                .unwrap_or_else(|| "?".to_string());
            vec![
                Line::from(Span::styled(
                    room.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Players: {}", count)),
            ]
        }
        None if app.rooms().is_empty() => vec![Line::from("No rooms yet")],
        None => app
            .rooms()
            .iter()
            .enumerate()
            .map(|(i, room)| {
                let style = if room.is_full() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Line::from(Span::styled(
                    format!("{}. {} ({}/{})", i + 1, room.name, room.count, ROOM_CAPACITY),
                    style,
                ))
            })
            .collect(),
    };
    let title = if app.room().is_some() { "Room" } else { "Rooms" };
    let panel = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn token_glyph(token: Token) -> &'static str {
    match token {
        Token::Empty => "·",
        Token::Black => "●",
        Token::White => "○",
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Board").borders(Borders::ALL);
    let Some(view) = app.view() else {
        frame.render_widget(Paragraph::new("No game").block(block), area);
        return;
    };

    let mut lines = Vec::with_capacity(BOARD_SIZE + 1);
    let header: String = (0..BOARD_SIZE)
        .map(|col| format!(" {}", (b'a' + col as u8) as char))
        .collect();
    lines.push(Line::from(format!("  {}", header)));

    for row in 0..BOARD_SIZE {
        let mut spans = vec![Span::raw(format!("{} ", row + 1))];
        for col in 0..BOARD_SIZE {
            let Some(point) = Point::at(row, col) else {
                continue;
            };
            spans.push(Span::raw(" "));
            spans.push(cell_span(view, point, app.cursor()));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn cell_span(view: &GameView, point: Point, cursor: Point) -> Span<'static> {
    let Some(cell) = view.cell(point) else {
        return Span::raw(" ");
    };
    let mut style = Style::default();
    if cell.selectable {
        style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
    }
    if point == cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let glyph = if cell.selectable && cell.token == Token::Empty {
        "+"
    } else {
        token_glyph(cell.token)
    };
    Span::styled(glyph, style)
}

fn panel_lines(panel: &PlayerPanel) -> Vec<Line<'static>> {
    let marker = if panel.highlighted { "▶ " } else { "  " };
    let you = if panel.is_local { " (you)" } else { "" };
    let style = if panel.highlighted {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    vec![
        Line::from(Span::styled(
            format!("{}{} {}{}", marker, token_glyph(panel.token), panel.name, you),
            style,
        )),
        Line::from(format!("    score {}", panel.score)),
    ]
}

fn draw_players(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Players").borders(Borders::ALL);
    let Some(view) = app.view() else {
        frame.render_widget(Paragraph::new("").block(block), area);
        return;
    };
    let mut lines = panel_lines(view.p1());
    lines.extend(panel_lines(view.p2()));
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Round {}  Turn {}", view.round(), view.turn())));
    let status = match (app.state(), *view.is_local_turn()) {
        (SessionState::InGame, true) => "Your move",
        (SessionState::InGame, false) => "Waiting for opponent",
        _ => "Game over",
    };
    lines.push(Line::from(status));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_log(frame: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.log().len().saturating_sub(visible);
    let lines: Vec<Line> = app
        .log()
        .iter()
        .skip(skip)
        .map(|line| Line::from(line.as_str()))
        .collect();
    let log = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Messages").borders(Borders::ALL));
    frame.render_widget(log, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    let text = match app.mode() {
        InputMode::NamingRoom(name) => format!("Room name: {}_   (Enter create, Esc cancel)", name),
        InputMode::Normal => match app.state() {
            SessionState::Unregistered => "r reconnect | q quit".to_string(),
            SessionState::Registering => "Registering... | q quit".to_string(),
            SessionState::Registered => "c create room | 1-9 join | q quit".to_string(),
            SessionState::InRoom if app.can_start() => "s START GAME | l leave | q quit".to_string(),
            SessionState::InRoom => "waiting for a second player | l leave | q quit".to_string(),
            SessionState::InGame => "arrows move | Enter play | q quit".to_string(),
        },
    };
    let style = if app.can_start() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let footer = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
