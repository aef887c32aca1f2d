//! Phone-style numeric keypad
//!
//! ```text
//!  1  2  3
//!  4  5  6
//!  7  8  9
//!     0  ⌫
//! ```

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::Theme;

pub const KEYPAD_ROWS: usize = 4;
pub const KEYPAD_COLS: usize = 3;

/// A single keypad cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeypadButton {
    /// Enters a digit
    Digit(u8),
    /// Removes the last digit
    Delete,
    /// Blank or inactive cell
    Disabled,
}

impl KeypadButton {
    pub fn label(&self) -> &'static str {
        const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
        match self {
            KeypadButton::Digit(d) => DIGITS.get(*d as usize).copied().unwrap_or("?"),
            KeypadButton::Delete => "⌫",
            KeypadButton::Disabled => "",
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, KeypadButton::Disabled)
    }
}

/// Button grid for the current state
///
/// Digits turn into `Disabled` when input is blocked; Delete does so when
/// there is nothing to delete.
pub fn layout(accepts_input: bool, input_len: usize) -> [[KeypadButton; KEYPAD_COLS]; KEYPAD_ROWS] {
    let digit = |d: u8| {
        if accepts_input {
            KeypadButton::Digit(d)
        } else {
            KeypadButton::Disabled
        }
    };
    let delete = if accepts_input && input_len > 0 {
        KeypadButton::Delete
    } else {
        KeypadButton::Disabled
    };

    [
        [digit(1), digit(2), digit(3)],
        [digit(4), digit(5), digit(6)],
        [digit(7), digit(8), digit(9)],
        [KeypadButton::Disabled, digit(0), delete],
    ]
}

/// Keypad widget state
pub struct Keypad {
    pub buttons: [[KeypadButton; KEYPAD_COLS]; KEYPAD_ROWS],
    /// (row, col) of the highlighted button
    pub selected: (usize, usize),
}

impl Keypad {
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Ratio(1, KEYPAD_ROWS as u32); KEYPAD_ROWS])
            .split(area);

        for (r, row_area) in rows.iter().enumerate() {
            let cells = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, KEYPAD_COLS as u32); KEYPAD_COLS])
                .split(*row_area);

            for (c, cell) in cells.iter().enumerate() {
                let selected = self.selected == (r, c);
                render_button(frame, *cell, self.buttons[r][c], selected, theme);
            }
        }
    }
}

/// Draw one keypad button
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    button: KeypadButton,
    selected: bool,
    theme: &Theme,
) {
    let (style, border_style) = match button {
        KeypadButton::Digit(_) | KeypadButton::Delete => (
            theme.key(selected),
            if selected {
                theme.border_focused()
            } else {
                theme.border()
            },
        ),
        KeypadButton::Disabled => (theme.key_disabled(), theme.border()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let widget = Paragraph::new(button.label())
        .style(style)
        .alignment(Alignment::Center)
        .block(block);

    frame.render_widget(widget, area);
}
