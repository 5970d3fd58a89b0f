//! Stateless drawing helpers for the board and navigation bar.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::games::tictactoe::{GameStatus, Mode, Player, Position, Square};
use crate::render::{BoardRenderer, BoardView, CellHighlight, RenderError};

const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;

/// Width of the drawn grid.
pub const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
/// Height of the drawn grid.
pub const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;
/// Smallest area the board renderer accepts: grid, status box and score line.
pub const MIN_BOARD_AREA: (u16, u16) = (BOARD_WIDTH, BOARD_HEIGHT + 4);

const X_COLOR: Color = Color::Rgb(220, 50, 47);
const O_COLOR: Color = Color::Rgb(38, 139, 210);
const NEWEST_BG: Color = Color::Rgb(255, 165, 0);
const WINNING_BG: Color = Color::Rgb(76, 175, 80);
const OLDER_BG: Color = Color::Rgb(96, 96, 96);

/// Draws a [`BoardView`] into a region of a ratatui [`Frame`].
///
/// After a successful render, [`FrameRenderer::cells`] holds the screen
/// area of each cell for mouse hit-testing.
pub struct FrameRenderer<'a, 'f> {
    frame: &'a mut Frame<'f>,
    area: Rect,
    cursor: Option<Position>,
    cells: Option<[Rect; 9]>,
}

impl<'a, 'f> FrameRenderer<'a, 'f> {
    /// Creates a renderer targeting `area`.
    pub fn new(frame: &'a mut Frame<'f>, area: Rect) -> Self {
        Self {
            frame,
            area,
            cursor: None,
            cells: None,
        }
    }

    /// Highlights the keyboard cursor cell.
    pub fn with_cursor(mut self, cursor: Position) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Cell areas from the last successful render.
    pub fn cells(&self) -> Option<[Rect; 9]> {
        self.cells
    }
}

impl BoardRenderer for FrameRenderer<'_, '_> {
    #[instrument(skip_all, fields(area = ?self.area))]
    fn render(&mut self, view: &BoardView) -> Result<(), RenderError> {
        let (min_width, min_height) = MIN_BOARD_AREA;
        if self.area.width < min_width || self.area.height < min_height {
            self.cells = None;
            return Err(RenderError::TargetMissing {
                target: "board".to_string(),
            });
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Status
                Constraint::Min(BOARD_HEIGHT),    // Board
                Constraint::Length(1),            // Score
            ])
            .split(self.area);

        let status_style = match view.status() {
            GameStatus::InProgress => Style::default().fg(Color::Yellow),
            GameStatus::Won(_) => Style::default().fg(WINNING_BG).add_modifier(Modifier::BOLD),
            GameStatus::Draw => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        };
        let status = Paragraph::new(view.status_line())
            .style(status_style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(view.mode().label()),
            );
        self.frame.render_widget(status, chunks[0]);

        let cells = draw_board(self.frame, chunks[1], view, self.cursor);
        self.cells = Some(cells);

        let score = Paragraph::new(format!(
            "Score  X: {}  O: {}",
            view.scores().wins_x(),
            view.scores().wins_o()
        ))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
        self.frame.render_widget(score, chunks[2]);

        Ok(())
    }
}

/// Draws the grid and returns each cell's area, indexed row-major.
fn draw_board(
    frame: &mut Frame,
    area: Rect,
    view: &BoardView,
    cursor: Option<Position>,
) -> [Rect; 9] {
    let board_area = center_rect(area, BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    let mut cells = [Rect::default(); 9];
    for (row, row_area) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row_area);

        for (col, cell_area) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            let index = row * 3 + col;
            if let Some(pos) = Position::from_index(index) {
                draw_cell(frame, cell_area, view, pos, cursor == Some(pos));
            }
            cells[index] = cell_area;
        }
        draw_separator_vertical(frame, cols[1]);
        draw_separator_vertical(frame, cols[3]);
    }
    draw_separator(frame, rows[1]);
    draw_separator(frame, rows[3]);

    cells
}

fn draw_cell(frame: &mut Frame, area: Rect, view: &BoardView, pos: Position, cursor: bool) {
    let (symbol, fg) = match view.board().get(pos) {
        Square::Empty => (format!("{}", pos.to_index() + 1), Color::DarkGray),
        Square::Occupied(Player::X) => ("X".to_string(), X_COLOR),
        Square::Occupied(Player::O) => ("O".to_string(), O_COLOR),
    };

    let mut cell_style = Style::default();
    match view.cell_highlight(pos) {
        CellHighlight::Winning => cell_style = cell_style.bg(WINNING_BG),
        CellHighlight::Newest => cell_style = cell_style.bg(NEWEST_BG),
        CellHighlight::Placed if *view.mode() == Mode::Pro => cell_style = cell_style.bg(OLDER_BG),
        CellHighlight::Placed | CellHighlight::None => {}
    }
    if cursor {
        cell_style = cell_style.add_modifier(Modifier::REVERSED);
    }

    let mark = Span::styled(symbol, Style::default().fg(fg).add_modifier(Modifier::BOLD));
    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(mark)])
        .style(cell_style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new(vec![Line::from("│"); area.height as usize])
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

/// Draws the mode tabs. `active` is `None` while no board is selected yet.
pub fn draw_nav_bar(frame: &mut Frame, area: Rect, active: Option<Mode>, alpha: f32) {
    let titles = Mode::iter().map(|mode| mode.label()).collect::<Vec<_>>();
    let selected = active.and_then(|mode| Mode::iter().position(|m| m == mode));

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(fade(Color::Rgb(160, 160, 160), alpha)))
        .highlight_style(
            Style::default()
                .fg(fade(Color::Rgb(255, 255, 0), alpha))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Tab: switch | r: reset | n: new game | q: quit")
                .border_style(Style::default().fg(fade(Color::Rgb(96, 96, 96), alpha))),
        );
    frame.render_widget(tabs, area);
}

/// Blends an RGB colour toward black by `alpha` (0 is invisible).
///
/// Named colours pass through unchanged once `alpha` is above one half.
pub fn fade(color: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (f32::from(c) * alpha).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        _ if alpha > 0.5 => color,
        _ => Color::Black,
    }
}

/// Centers a `width` x `height` rectangle inside `area`, clipped to fit.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
