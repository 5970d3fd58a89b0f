//! Screen trait and transition type for the TUI state machine.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};

use crate::games::tictactoe::Mode;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`AppController`](super::AppController) state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Show the board for the given mode.
    GoToMode(Mode),
    /// Switch to the other mode's board.
    ToggleMode,
    /// Exit the application cleanly.
    Quit,
}

/// Trait implemented by each screen in the TUI state machine.
///
/// Each screen owns its own state, renders into the area it is given,
/// and handles input. The controller owns the navigation bar.
pub trait Screen {
    /// Renders the screen into `area` of the provided [`Frame`].
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition;

    /// Handles a mouse event. Ignored by default.
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> ScreenTransition {
        ScreenTransition::Stay
    }
}
