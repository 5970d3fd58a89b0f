//! Board screen: one mode's game, its score, and the controls.

use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use tracing::{debug, info, instrument, warn};

use crate::games::tictactoe::{GameStatus, Mode, MoveError, Placement, Position};
use crate::render::BoardRenderer;
use crate::session::ModeSession;
use crate::tui::input::{digit_cell, hit_test, move_cursor};
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::FrameRenderer;

/// Board screen for a single mode.
#[derive(Debug, Getters)]
pub struct BoardScreen {
    session: ModeSession,
    cursor: Position,
    notice: Option<String>,
    /// Cell areas from the last frame, for mouse clicks.
    #[getter(skip)]
    cell_areas: Cell<Option<[Rect; 9]>>,
    /// Set while the board does not fit, so the warning is logged once.
    #[getter(skip)]
    render_failed: Cell<bool>,
}

impl BoardScreen {
    /// Creates a board screen with a fresh session.
    #[instrument]
    pub fn new(mode: Mode) -> Self {
        debug!("Initializing BoardScreen");
        Self {
            session: ModeSession::new(mode),
            cursor: Position::Center,
            notice: None,
            cell_areas: Cell::new(None),
            render_failed: Cell::new(false),
        }
    }

    /// Ruleset of this screen.
    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    /// Taps `pos` and updates the notice.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn tap(&mut self, pos: Position) {
        self.cursor = pos;
        let result = self.session.tap(pos.row(), pos.col());
        self.notice = notice_for(&result);
    }

    /// "Reset" control.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn reset(&mut self) {
        self.session.reset_board();
        self.notice = Some(
            match self.mode() {
                Mode::Basic => "Game Reset!",
                Mode::Pro => "Pro Mode Game Reset!",
            }
            .to_string(),
        );
    }

    /// "New Game" control.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn new_game(&mut self) {
        self.session.new_game();
        self.notice = Some(
            match self.mode() {
                Mode::Basic => "New Game Started!",
                Mode::Pro => "New Pro Mode Game Started!",
            }
            .to_string(),
        );
    }
}

/// Notice text for the outcome of a tap, if any.
pub fn notice_for(result: &Result<Placement, MoveError>) -> Option<String> {
    match result {
        Ok(placement) => match placement.status {
            GameStatus::Won(player) => Some(format!(
                "Player {} Wins!\nPress 'r' to play again",
                player
            )),
            GameStatus::Draw => Some("It's a Draw!\nPress 'r' to play again".to_string()),
            GameStatus::InProgress => placement.evicted.map(|pos| {
                format!(
                    "Player {}'s oldest piece removed from ({}, {})",
                    placement.mov.player,
                    pos.row() + 1,
                    pos.col() + 1
                )
            }),
        },
        Err(MoveError::SquareOccupied(_)) => Some("Cell already occupied!".to_string()),
        Err(MoveError::OwnPiece(_)) => Some("You already have a piece here!".to_string()),
        Err(MoveError::GameOver) => Some("Game over! Press 'r' to play again".to_string()),
        Err(e) => Some(e.to_string()),
    }
}

impl Screen for BoardScreen {
    #[instrument(skip(self, frame), fields(mode = %self.mode()))]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(area);

        let view = self.session.view();
        let mut renderer = FrameRenderer::new(frame, chunks[0]).with_cursor(self.cursor);
        match renderer.render(&view) {
            Ok(()) => {
                self.cell_areas.set(renderer.cells());
                self.render_failed.set(false);
            }
            Err(e) => {
                self.cell_areas.set(None);
                if !self.render_failed.replace(true) {
                    warn!(error = %e, area = ?chunks[0], "Board could not be drawn");
                }
                let fallback = Paragraph::new(format!("{}\nEnlarge the terminal to play.", e))
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                frame.render_widget(fallback, chunks[0]);
            }
        }

        let notice = Paragraph::new(self.notice.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Notice"));
        frame.render_widget(notice, chunks[1]);
    }

    #[instrument(skip(self, key), fields(mode = %self.mode(), code = ?key.code))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Tab | KeyCode::BackTab => ScreenTransition::ToggleMode,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                info!("Quit requested from board");
                ScreenTransition::Quit
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key.code);
                ScreenTransition::Stay
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.tap(self.cursor);
                ScreenTransition::Stay
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset();
                ScreenTransition::Stay
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                self.new_game();
                ScreenTransition::Stay
            }
            KeyCode::Char(c) => {
                if let Some(pos) = digit_cell(c) {
                    self.tap(pos);
                }
                ScreenTransition::Stay
            }
            _ => ScreenTransition::Stay,
        }
    }

    #[instrument(skip(self, mouse), fields(mode = %self.mode()))]
    fn handle_mouse(&mut self, mouse: MouseEvent) -> ScreenTransition {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return ScreenTransition::Stay;
        }
        let Some(cells) = self.cell_areas.get() else {
            return ScreenTransition::Stay;
        };
        if let Some(pos) = hit_test(&cells, mouse.column, mouse.row) {
            debug!(?pos, "Cell clicked");
            self.tap(pos);
        }
        ScreenTransition::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;
    use crossterm::event::KeyModifiers;

    fn press(screen: &mut BoardScreen, code: KeyCode) -> ScreenTransition {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_digits_tap_cells() {
        let mut screen = BoardScreen::new(Mode::Basic);
        press(&mut screen, KeyCode::Char('5'));
        press(&mut screen, KeyCode::Char('5'));
        assert_eq!(screen.notice().as_deref(), Some("Cell already occupied!"));
        assert_eq!(screen.session().game().board().occupied(), 1);
    }

    #[test]
    fn test_cursor_and_enter() {
        let mut screen = BoardScreen::new(Mode::Basic);
        press(&mut screen, KeyCode::Up);
        press(&mut screen, KeyCode::Left);
        press(&mut screen, KeyCode::Enter);
        assert_eq!(*screen.cursor(), Position::TopLeft);
        assert!(screen.session().game().board().is_held_by(Position::TopLeft, Player::X));
    }

    #[test]
    fn test_pro_eviction_notice() {
        let mut screen = BoardScreen::new(Mode::Pro);
        for c in ['1', '5', '2', '9', '7', '4'] {
            press(&mut screen, KeyCode::Char(c));
        }
        press(&mut screen, KeyCode::Char('6'));
        assert_eq!(
            screen.notice().as_deref(),
            Some("Player X's oldest piece removed from (1, 1)")
        );
    }

    #[test]
    fn test_reset_and_new_game_notices() {
        let mut screen = BoardScreen::new(Mode::Pro);
        assert_eq!(press(&mut screen, KeyCode::Char('r')), ScreenTransition::Stay);
        assert_eq!(screen.notice().as_deref(), Some("Pro Mode Game Reset!"));
        press(&mut screen, KeyCode::Char('n'));
        assert_eq!(screen.notice().as_deref(), Some("New Pro Mode Game Started!"));
    }

    #[test]
    fn test_navigation_keys() {
        let mut screen = BoardScreen::new(Mode::Basic);
        assert_eq!(press(&mut screen, KeyCode::Tab), ScreenTransition::ToggleMode);
        assert_eq!(press(&mut screen, KeyCode::Char('q')), ScreenTransition::Quit);
    }

    #[test]
    fn test_click_without_layout_is_ignored() {
        let mut screen = BoardScreen::new(Mode::Basic);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(screen.handle_mouse(click), ScreenTransition::Stay);
        assert_eq!(screen.session().game().board().occupied(), 0);
    }

    #[test]
    fn test_win_notice() {
        let result = {
            let mut session = ModeSession::new(Mode::Basic);
            for (r, c) in [(0, 0), (1, 1), (0, 1), (2, 2)] {
                session.tap(r, c).unwrap();
            }
            session.tap(0, 2)
        };
        assert_eq!(
            notice_for(&result).as_deref(),
            Some("Player X Wins!\nPress 'r' to play again")
        );
    }

    #[test]
    fn test_draw_notice_offers_replay() {
        let mut session = ModeSession::new(Mode::Basic);
        for (r, c) in [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0)] {
            session.tap(r, c).unwrap();
        }
        let result = session.tap(2, 2);
        assert_eq!(
            notice_for(&result).as_deref(),
            Some("It's a Draw!\nPress 'r' to play again")
        );
    }
}
