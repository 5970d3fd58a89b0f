//! Welcome screen: draws the splash sequence.
//!
//! Opacity is drawn as a fade toward black, horizontal scale as a centred
//! slice of the text, and vertical translation as a row offset. Any key
//! skips straight to the board.

use std::time::Duration;

use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
};
use tracing::{debug, info, instrument};

use crate::games::tictactoe::Mode;
use crate::tui::screen::{Screen, ScreenTransition};
use crate::tui::ui::{center_rect, fade};
use crate::tui::welcome::{Element, ElementState, WelcomeSequence};

const ICON: [&str; 3] = [" X │ O │ X ", "───┼───┼───", " O │ X │ O "];
const TITLE: &str = "Welcome to Tic Tac Toe";
const SUBTITLE: &str = "Basic rules or Pro rules: three pieces each";

/// Layout units per terminal row for vertical translation.
const UNITS_PER_ROW: f32 = 50.0;
const CONTENT_HEIGHT: u16 = 9;

/// Splash screen shown on startup.
#[derive(Debug)]
pub struct WelcomeScreen {
    sequence: WelcomeSequence,
    start_mode: Mode,
}

impl WelcomeScreen {
    /// Creates the splash; it hands over to `start_mode` when done.
    #[instrument]
    pub fn new(start_mode: Mode) -> Self {
        debug!("Initializing WelcomeScreen");
        Self {
            sequence: WelcomeSequence::new(),
            start_mode,
        }
    }

    /// Advances the splash to `elapsed` since it started.
    pub fn tick(&mut self, elapsed: Duration) -> ScreenTransition {
        if self.sequence.tick(elapsed) {
            ScreenTransition::GoToMode(self.start_mode)
        } else {
            ScreenTransition::Stay
        }
    }

    /// Navigation bar state while the splash is running.
    pub fn navigation(&self) -> ElementState {
        self.sequence.state(Element::Navigation)
    }

    /// Underlying sequence.
    pub fn sequence(&self) -> &WelcomeSequence {
        &self.sequence
    }
}

/// Centred slice of `text` covering `scale` of its width.
fn scaled_text(text: &str, scale: f32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let keep = ((chars.len() as f32) * scale.clamp(0.0, 1.0)).round() as usize;
    let skip = (chars.len() - keep) / 2;
    chars[skip..skip + keep].iter().collect()
}

/// Rows to shift down for a vertical translation.
pub(crate) fn row_offset(translation_y: f32) -> i32 {
    (translation_y / UNITS_PER_ROW).round() as i32
}

fn draw_element(
    frame: &mut Frame,
    area: Rect,
    row: u16,
    lines: &[&str],
    state: ElementState,
    color: Color,
) {
    if !state.visible || state.alpha <= 0.01 {
        return;
    }
    let y = i32::from(area.y) + i32::from(row) + row_offset(state.translation_y);
    let height = lines.len() as u16;
    let Ok(y) = u16::try_from(y) else { return };
    if y < area.y || y + height > area.y + area.height {
        return;
    }

    let mut style = Style::default().fg(fade(color, state.alpha));
    if state.scale_x > 1.0 {
        style = style.add_modifier(Modifier::BOLD);
    }
    let text = lines
        .iter()
        .map(|line| Line::from(scaled_text(line, state.scale_x)))
        .collect::<Vec<_>>();
    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, Rect::new(area.x, y, area.width, height));
}

impl Screen for WelcomeScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame, area: Rect) {
        let content = center_rect(area, area.width, CONTENT_HEIGHT + 4);
        let seq = &self.sequence;

        draw_element(
            frame,
            content,
            0,
            &ICON,
            seq.state(Element::Icon),
            Color::Rgb(255, 165, 0),
        );
        draw_element(
            frame,
            content,
            4,
            &[TITLE],
            seq.state(Element::Title),
            Color::Rgb(0, 200, 255),
        );
        draw_element(
            frame,
            content,
            6,
            &[SUBTITLE],
            seq.state(Element::Subtitle),
            Color::Rgb(200, 200, 200),
        );
        draw_element(
            frame,
            content,
            8,
            &[seq.loading_text()],
            seq.state(Element::Loading),
            Color::Rgb(160, 160, 160),
        );
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        let dropped = self.sequence.cancel();
        info!(code = ?key.code, dropped, "Welcome skipped");
        ScreenTransition::GoToMode(self.start_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_scaled_text_keeps_centre() {
        assert_eq!(scaled_text("abcdef", 1.0), "abcdef");
        assert_eq!(scaled_text("abcdef", 0.5), "bcd");
        assert_eq!(scaled_text("abcdef", 0.0), "");
        assert_eq!(scaled_text("abc", 1.2), "abc");
    }

    #[test]
    fn test_row_offset() {
        assert_eq!(row_offset(100.0), 2);
        assert_eq!(row_offset(-20.0), 0);
        assert_eq!(row_offset(200.0), 4);
    }

    #[test]
    fn test_finishes_into_start_mode() {
        let mut screen = WelcomeScreen::new(Mode::Pro);
        assert_eq!(screen.tick(Duration::from_millis(6000)), ScreenTransition::Stay);
        assert_eq!(
            screen.tick(Duration::from_millis(6800)),
            ScreenTransition::GoToMode(Mode::Pro)
        );
    }

    #[test]
    fn test_any_key_skips() {
        let mut screen = WelcomeScreen::new(Mode::Basic);
        screen.tick(Duration::from_millis(100));
        let key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(screen.handle_key(key), ScreenTransition::GoToMode(Mode::Basic));
        assert_eq!(screen.sequence().pending_cues(), 0);
    }
}
