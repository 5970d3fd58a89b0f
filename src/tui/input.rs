//! Cursor movement and pointer hit-testing.

use crate::games::tictactoe::Position;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

/// Moves the cursor one cell for an arrow key. Edges do not wrap.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => return cursor,
    };
    Position::from_row_col(row, col).unwrap_or(cursor)
}

/// Maps a digit key `1`-`9` onto a cell in row-major order.
pub fn digit_cell(c: char) -> Option<Position> {
    let digit = c.to_digit(10)? as usize;
    digit.checked_sub(1).and_then(Position::from_index)
}

/// Finds the cell whose drawn area contains the terminal cell (`column`, `row`).
pub fn hit_test(cells: &[Rect; 9], column: u16, row: u16) -> Option<Position> {
    cells
        .iter()
        .position(|rect| {
            column >= rect.x
                && column < rect.x.saturating_add(rect.width)
                && row >= rect.y
                && row < rect.y.saturating_add(rect.height)
        })
        .and_then(Position::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_moves_and_clamps() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Right), Position::MiddleRight);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::BottomRight, KeyCode::Right), Position::BottomRight);
        assert_eq!(move_cursor(Position::Center, KeyCode::Enter), Position::Center);
    }

    #[test]
    fn test_digit_cells() {
        assert_eq!(digit_cell('1'), Some(Position::TopLeft));
        assert_eq!(digit_cell('9'), Some(Position::BottomRight));
        assert_eq!(digit_cell('0'), None);
        assert_eq!(digit_cell('x'), None);
    }

    #[test]
    fn test_hit_test() {
        let cells: [Rect; 9] = std::array::from_fn(|i| {
            Rect::new((i % 3) as u16 * 10, (i / 3) as u16 * 4, 9, 3)
        });
        assert_eq!(hit_test(&cells, 0, 0), Some(Position::TopLeft));
        assert_eq!(hit_test(&cells, 25, 9), Some(Position::BottomRight));
        // Gap between columns.
        assert_eq!(hit_test(&cells, 9, 0), None);
        assert_eq!(hit_test(&cells, 100, 100), None);
    }
}
