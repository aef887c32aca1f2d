//! Keyboard bindings

use crossterm::event::KeyCode;

/// Something the user asked the app to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Digit(u8),
    Delete,
    /// Move the keypad highlight
    Move { rows: i8, cols: i8 },
    /// Press the highlighted keypad button
    Activate,
    Cancel,
    ConfirmReset,
    DeferReset,
}

/// Translate a key press into an action
///
/// While the lockout prompt is showing only the prompt answers are live.
pub fn map_key(code: KeyCode, lockout_visible: bool) -> Option<Action> {
    if lockout_visible {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::ConfirmReset),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::DeferReset),
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c) if c.is_ascii_digit() => Some(Action::Digit(c as u8 - b'0')),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::Delete),
        KeyCode::Up => Some(Action::Move { rows: -1, cols: 0 }),
        KeyCode::Down => Some(Action::Move { rows: 1, cols: 0 }),
        KeyCode::Left => Some(Action::Move { rows: 0, cols: -1 }),
        KeyCode::Right => Some(Action::Move { rows: 0, cols: 1 }),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyCode::Char('0'), Some(Action::Digit(0)))]
    #[case(KeyCode::Char('7'), Some(Action::Digit(7)))]
    #[case(KeyCode::Backspace, Some(Action::Delete))]
    #[case(KeyCode::Delete, Some(Action::Delete))]
    #[case(KeyCode::Up, Some(Action::Move { rows: -1, cols: 0 }))]
    #[case(KeyCode::Right, Some(Action::Move { rows: 0, cols: 1 }))]
    #[case(KeyCode::Enter, Some(Action::Activate))]
    #[case(KeyCode::Char(' '), Some(Action::Activate))]
    #[case(KeyCode::Esc, Some(Action::Cancel))]
    #[case(KeyCode::Char('q'), Some(Action::Cancel))]
    #[case(KeyCode::Char('x'), None)]
    #[case(KeyCode::Tab, None)]
    fn test_keypad_bindings(#[case] code: KeyCode, #[case] expected: Option<Action>) {
        assert_eq!(map_key(code, false), expected);
    }

    #[rstest]
    #[case(KeyCode::Char('y'), Some(Action::ConfirmReset))]
    #[case(KeyCode::Char('Y'), Some(Action::ConfirmReset))]
    #[case(KeyCode::Enter, Some(Action::ConfirmReset))]
    #[case(KeyCode::Char('n'), Some(Action::DeferReset))]
    #[case(KeyCode::Esc, Some(Action::DeferReset))]
    #[case(KeyCode::Char('5'), None)]
    #[case(KeyCode::Backspace, None)]
    fn test_lockout_prompt_bindings(#[case] code: KeyCode, #[case] expected: Option<Action>) {
        assert_eq!(map_key(code, true), expected);
    }
}
