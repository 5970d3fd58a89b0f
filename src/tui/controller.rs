//! App controller: the state machine driving the TUI.

use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
};
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument};

use crate::games::tictactoe::Mode;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::screens::{BoardScreen, WelcomeScreen, row_offset};
use crate::tui::ui::draw_nav_bar;

const NAV_HEIGHT: u16 = 3;

/// Active screen in the state machine.
#[derive(Debug)]
enum ActiveScreen {
    Welcome(WelcomeScreen),
    Board(Mode),
}

/// Controller that owns both board screens and the splash.
///
/// Each mode keeps its own board screen for the whole run, so switching
/// tabs never loses a game in progress.
#[derive(Debug)]
pub struct AppController {
    screen: ActiveScreen,
    basic: BoardScreen,
    pro: BoardScreen,
    running: bool,
}

impl AppController {
    /// Creates a controller that opens on the splash or directly on `start_mode`.
    #[instrument]
    pub fn new(start_mode: Mode, show_welcome: bool) -> Self {
        info!("Creating AppController");
        let screen = if show_welcome {
            ActiveScreen::Welcome(WelcomeScreen::new(start_mode))
        } else {
            ActiveScreen::Board(start_mode)
        };
        Self {
            screen,
            basic: BoardScreen::new(Mode::Basic),
            pro: BoardScreen::new(Mode::Pro),
            running: true,
        }
    }

    /// Returns false once the user has quit.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true while the splash is showing.
    pub fn is_welcome(&self) -> bool {
        matches!(self.screen, ActiveScreen::Welcome(_))
    }

    /// Mode of the board on screen, if any.
    pub fn active_mode(&self) -> Option<Mode> {
        match self.screen {
            ActiveScreen::Board(mode) => Some(mode),
            ActiveScreen::Welcome(_) => None,
        }
    }

    /// Board screen for `mode`.
    pub fn board(&self, mode: Mode) -> &BoardScreen {
        match mode {
            Mode::Basic => &self.basic,
            Mode::Pro => &self.pro,
        }
    }

    /// Advances the splash clock to `elapsed` since startup.
    pub fn advance(&mut self, elapsed: Duration) {
        if let ActiveScreen::Welcome(welcome) = &mut self.screen {
            let transition = welcome.tick(elapsed);
            self.apply_transition(transition);
        }
    }

    /// Routes one terminal event to the active screen.
    #[instrument(skip(self, event))]
    pub fn dispatch(&mut self, event: &Event) {
        let transition = match event {
            // Skip key release events (crossterm fires both press and release).
            Event::Key(key) if key.kind == KeyEventKind::Release => return,
            Event::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                ScreenTransition::Quit
            }
            Event::Key(key) => match &mut self.screen {
                ActiveScreen::Welcome(s) => s.handle_key(*key),
                ActiveScreen::Board(Mode::Basic) => self.basic.handle_key(*key),
                ActiveScreen::Board(Mode::Pro) => self.pro.handle_key(*key),
            },
            Event::Mouse(mouse) => match &mut self.screen {
                ActiveScreen::Welcome(s) => s.handle_mouse(*mouse),
                ActiveScreen::Board(Mode::Basic) => self.basic.handle_mouse(*mouse),
                ActiveScreen::Board(Mode::Pro) => self.pro.handle_mouse(*mouse),
            },
            _ => ScreenTransition::Stay,
        };
        self.apply_transition(transition);
    }

    /// Applies a screen transition.
    #[instrument(skip(self))]
    fn apply_transition(&mut self, transition: ScreenTransition) {
        if transition != ScreenTransition::Stay {
            debug!(?transition, "Applying screen transition");
        }
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::GoToMode(mode) => {
                info!(%mode, "Navigating to board");
                // Replacing the splash drops it, which cancels anything pending.
                self.screen = ActiveScreen::Board(mode);
            }
            ScreenTransition::ToggleMode => {
                if let ActiveScreen::Board(mode) = self.screen {
                    let next = mode.toggle();
                    info!(from = %mode, to = %next, "Switching mode tab");
                    self.screen = ActiveScreen::Board(next);
                }
            }
            ScreenTransition::Quit => {
                info!("Quit requested");
                self.running = false;
            }
        }
    }

    /// Draws the active screen and the navigation bar.
    pub fn draw(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(NAV_HEIGHT)])
            .split(frame.area());

        match &self.screen {
            ActiveScreen::Welcome(welcome) => {
                welcome.render(frame, chunks[0]);
                let nav = welcome.navigation();
                if nav.visible {
                    let rows = row_offset(nav.translation_y).max(0) as u16;
                    if rows < NAV_HEIGHT {
                        let area = Rect {
                            y: chunks[1].y + rows,
                            height: chunks[1].height.saturating_sub(rows),
                            ..chunks[1]
                        };
                        draw_nav_bar(frame, area, None, nav.alpha);
                    }
                }
            }
            ActiveScreen::Board(mode) => {
                self.board(*mode).render(frame, chunks[0]);
                draw_nav_bar(frame, chunks[1], Some(*mode), 1.0);
            }
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// Input is polled for up to `tick` per frame; the splash clock starts
    /// when the loop does.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        tick: Duration,
    ) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting event loop");
        let started = Instant::now();

        while self.running {
            self.advance(started.elapsed());
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(tick)? {
                let event = event::read()?;
                self.dispatch(&event);
            }

            sleep(Duration::from_millis(10)).await;
        }

        info!("Event loop finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_splash_hands_over_to_start_mode() {
        let mut app = AppController::new(Mode::Pro, true);
        assert!(app.is_welcome());
        app.advance(Duration::from_millis(6799));
        assert!(app.is_welcome());
        app.advance(Duration::from_millis(6800));
        assert_eq!(app.active_mode(), Some(Mode::Pro));
    }

    #[test]
    fn test_tab_keeps_both_sessions() {
        let mut app = AppController::new(Mode::Basic, false);
        app.dispatch(&key(KeyCode::Char('1')));
        app.dispatch(&key(KeyCode::Tab));
        assert_eq!(app.active_mode(), Some(Mode::Pro));
        app.dispatch(&key(KeyCode::Char('9')));
        app.dispatch(&key(KeyCode::Tab));

        assert_eq!(app.board(Mode::Basic).session().game().board().occupied(), 1);
        assert_eq!(app.board(Mode::Pro).session().game().board().occupied(), 1);
    }

    #[test]
    fn test_ctrl_c_quits_from_splash() {
        let mut app = AppController::new(Mode::Basic, true);
        app.dispatch(&Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(!app.is_running());
    }
}
