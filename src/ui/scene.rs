//! Scene rendering: the 288x512 logical world scaled to terminal cells.
//!
//! Entities are painted into a character grid in depth order, so the draw
//! order matches the original scene graph (background, pipes, bird, ground,
//! scoreboard, banners).

use crate::assets::{AnimationId, PipePalette, TextureId};
use crate::constants::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::session::{GameSession, Phase};
use crate::world::{Entity, World};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the game scene with a bordered play area and a two-line status bar.
pub fn render_game(frame: &mut Frame, area: Rect, world: &World, session: &GameSession) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Skyward ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(2)])
        .split(inner);

    render_play_area(frame, chunks[0], world);
    render_status_bar(frame, chunks[1], session);
}

struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<(char, Style)>,
}

impl CellGrid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', Style::default()); width * height],
        }
    }

    fn put(&mut self, col: i32, row: i32, ch: char, style: Style) {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return;
        }
        self.cells[row as usize * self.width + col as usize] = (ch, style);
    }

    fn fill(&mut self, ch: char, style: Style) {
        for cell in &mut self.cells {
            *cell = (ch, style);
        }
    }

    fn fill_rect(&mut self, c0: i32, r0: i32, c1: i32, r1: i32, ch: char, style: Style) {
        for row in r0.max(0)..r1.min(self.height as i32) {
            for col in c0.max(0)..c1.min(self.width as i32) {
                self.cells[row as usize * self.width + col as usize] = (ch, style);
            }
        }
    }

    fn put_text(&mut self, center_col: i32, row: i32, text: &str, style: Style) {
        let start = center_col - text.chars().count() as i32 / 2;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, style);
        }
    }

    fn into_lines(self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(self.height);
        for row in 0..self.height {
            let spans: Vec<Span> = self.cells[row * self.width..(row + 1) * self.width]
                .iter()
                .map(|(ch, style)| Span::styled(ch.to_string(), *style))
                .collect();
            lines.push(Line::from(spans));
        }
        lines
    }
}

fn render_play_area(frame: &mut Frame, area: Rect, world: &World) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let sx = width as f32 / VIEW_WIDTH;
    let sy = height as f32 / VIEW_HEIGHT;
    let mut grid = CellGrid::new(width, height);

    for entity in world.entities_by_depth() {
        if !entity.visible {
            continue;
        }
        paint_entity(&mut grid, entity, sx, sy);
    }

    frame.render_widget(Paragraph::new(grid.into_lines()), area);
}

fn paint_entity(grid: &mut CellGrid, entity: &Entity, sx: f32, sy: f32) {
    let col = (entity.x * sx).round() as i32;
    let row = (entity.y * sy).round() as i32;
    let c0 = ((entity.x - entity.width / 2.0) * sx).floor() as i32;
    let c1 = ((entity.x + entity.width / 2.0) * sx).ceil() as i32;
    let r0 = ((entity.y - entity.height / 2.0) * sy).floor() as i32;
    let r1 = ((entity.y + entity.height / 2.0) * sy).ceil() as i32;

    match entity.texture {
        TextureId::Background(index) => {
            grid.fill(' ', Style::default().bg(background_color(index)));
        }
        TextureId::PipeTop(palette) | TextureId::PipeBottom(palette) => {
            grid.fill_rect(c0, r0, c1, r1, '█', Style::default().fg(pipe_color(palette)));
        }
        TextureId::Ground => {
            let moving = matches!(entity.animation, Some((AnimationId::GroundMoving, _)));
            let fg = if moving { Color::Green } else { Color::DarkGray };
            grid.fill_rect(c0, r0, c1, r1, '▒', Style::default().fg(fg));
        }
        TextureId::Bird => {
            let glyph = if entity.angle < 0.0 {
                '▲'
            } else if entity.angle >= 45.0 {
                '▼'
            } else {
                '►'
            };
            grid.put(
                col,
                row,
                glyph,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }
        TextureId::Digit(d) => {
            grid.put(
                col,
                row,
                char::from(b'0' + d),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            );
        }
        TextureId::MessageInitial => {
            let style = Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD);
            grid.put_text(col, row - 1, "GET READY", style);
            grid.put_text(col, row + 1, "[Space] to flap", Style::default().fg(Color::Gray));
        }
        TextureId::GameOverBanner => {
            grid.put_text(
                col,
                row,
                " GAME OVER ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            );
        }
        TextureId::RestartButton => {
            grid.put_text(
                col,
                row,
                " [R] RESTART ",
                Style::default().fg(Color::Black).bg(Color::White),
            );
        }
        // Sensors are invisible; nothing to paint even when shown for debug.
        TextureId::GapMarker => {}
    }
}

/// Background tint for each score-cycled scene index (day through night).
fn background_color(index: u8) -> Color {
    match index % 8 {
        0 => Color::Cyan,
        1 => Color::LightBlue,
        2 => Color::Blue,
        3 => Color::LightMagenta,
        4 => Color::Magenta,
        5 => Color::DarkGray,
        6 => Color::Black,
        _ => Color::Blue,
    }
}

fn pipe_color(palette: PipePalette) -> Color {
    match palette {
        PipePalette::Green => Color::Green,
        PipePalette::Red => Color::Red,
    }
}

/// Two-line status bar: phase message plus key legend.
fn render_status_bar(frame: &mut Frame, area: Rect, session: &GameSession) {
    if area.height < 1 {
        return;
    }

    let (text, color) = match session.phase {
        Phase::Idle => ("Press Space to flap!".to_string(), Color::Yellow),
        Phase::Playing => (format!("Score: {}", session.score), Color::Green),
        Phase::GameOver => (
            format!("Game over - {} passed", session.score),
            Color::Red,
        ),
    };
    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 {
        let controls = [("[Space/Up]", "Flap"), ("[R]", "Restart"), ("[Q]", "Quit")];
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let legend = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            legend,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}
