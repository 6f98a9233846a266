//! Stateless rendering of the screen model.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::screen::{BoardPanel, ScreenState};
use crate::tile::TileStyle;
use crate::view::CellView;

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, screen: &ScreenState) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + score
            Constraint::Min(8),    // Board + high scores
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    draw_header(frame, chunks[0], screen);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(32)])
        .split(chunks[1]);

    draw_board(frame, body[0], screen.board());
    draw_high_scores(frame, body[1], screen);

    let status = Paragraph::new(screen.status().as_deref().unwrap_or(""))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("←↑→↓ / wheel / drag: move   r: new game   q: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    if let Some(message) = screen.overlay() {
        draw_overlay(frame, body[0], message);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, screen: &ScreenState) {
    let line = Line::from(vec![
        Span::styled(
            "2048",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(screen.score().as_str(), Style::default().fg(Color::White)),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_board(frame: &mut Frame, area: Rect, board: &BoardPanel) {
    let block = Block::default().title("Board").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match board {
        BoardPanel::Blank => {}
        BoardPanel::Error(message) => {
            let error = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            frame.render_widget(error, inner);
        }
        BoardPanel::Grid(rows) => draw_grid(frame, inner, rows),
    }
}

fn draw_grid(frame: &mut Frame, area: Rect, rows: &[Vec<CellView>]) {
    let cols = rows.first().map_or(0, Vec::len) as u16;
    let grid = center_rect(
        area,
        cols.saturating_mul(CELL_WIDTH),
        (rows.len() as u16).saturating_mul(CELL_HEIGHT),
    );

    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let x = grid.x.saturating_add(c as u16 * CELL_WIDTH);
            let y = grid.y.saturating_add(r as u16 * CELL_HEIGHT);
            let cell_area = Rect::new(x, y, CELL_WIDTH, CELL_HEIGHT).intersection(grid);
            if cell_area.width == 0 || cell_area.height == 0 {
                continue;
            }
            draw_cell(frame, cell_area, cell);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: &CellView) {
    let (bg, fg) = tile_colors(*cell.style());
    let mut style = Style::default().bg(bg).fg(fg);
    if *cell.fresh() {
        style = style.add_modifier(Modifier::BOLD);
    }
    let text = vec![Line::from(""), Line::from(cell.text().as_str())];
    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Terminal colours for each tile style.
fn tile_colors(style: TileStyle) -> (Color, Color) {
    let dark = Color::Rgb(119, 110, 101);
    let light = Color::Rgb(249, 246, 242);
    match style {
        TileStyle::Empty => (Color::Rgb(205, 193, 180), dark),
        TileStyle::T2 => (Color::Rgb(238, 228, 218), dark),
        TileStyle::T4 => (Color::Rgb(237, 224, 200), dark),
        TileStyle::T8 => (Color::Rgb(242, 177, 121), light),
        TileStyle::T16 => (Color::Rgb(245, 149, 99), light),
        TileStyle::T32 => (Color::Rgb(246, 124, 95), light),
        TileStyle::T64 => (Color::Rgb(246, 94, 59), light),
        TileStyle::T128 => (Color::Rgb(237, 207, 114), light),
        TileStyle::T256 => (Color::Rgb(237, 204, 97), light),
        TileStyle::T512 => (Color::Rgb(237, 200, 80), light),
        TileStyle::T1024 => (Color::Rgb(237, 197, 63), light),
        TileStyle::T2048 => (Color::Rgb(237, 194, 46), light),
    }
}

fn draw_high_scores(frame: &mut Frame, area: Rect, screen: &ScreenState) {
    let block = Block::default()
        .title(screen.high_score_banner().as_str())
        .borders(Borders::ALL);
    let items: Vec<ListItem> = screen
        .high_scores()
        .iter()
        .enumerate()
        .map(|(i, entry)| ListItem::new(format!("{}. {}", i + 1, entry)))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_overlay(frame: &mut Frame, area: Rect, message: &str) {
    let popup = center_rect(area, area.width.min(40), 5);
    frame.render_widget(Clear, popup);
    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press r for a new game"),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White).bg(Color::Rgb(143, 122, 102))),
        );
    frame.render_widget(paragraph, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
