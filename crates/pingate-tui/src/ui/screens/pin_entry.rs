//! PIN entry screen shared by all three modes

use pingate_core::{ConfigurePhase, PinMode, PIN_LENGTH};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::ui::components::Keypad;
use crate::ui::layout::centered_rect_fixed;

/// Dialog title for a mode
pub fn title(mode: PinMode) -> &'static str {
    match mode {
        PinMode::Set => " Set PIN ",
        PinMode::Authenticate => " Authentication Required ",
        PinMode::Reset => " Reset PIN ",
    }
}

/// Prompt line above the PIN dots
pub fn instructions(mode: PinMode, phase: ConfigurePhase) -> &'static str {
    match (mode, phase) {
        (PinMode::Authenticate, _) => "Enter your PIN to unlock",
        (_, ConfigurePhase::Confirm) => "Re-enter the PIN to confirm",
        (PinMode::Set, ConfigurePhase::Done) => "PIN saved",
        (PinMode::Reset, ConfigurePhase::Done) => "New PIN saved, [Esc] to close",
        (PinMode::Set, ConfigurePhase::Input) => "Choose a 4-digit PIN",
        (PinMode::Reset, ConfigurePhase::Input) => "Enter a new 4-digit PIN",
    }
}

/// Masked PIN, one dot per entered digit
pub fn pin_dots(len: usize) -> String {
    (0..PIN_LENGTH)
        .map(|i| if i < len { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Draw the PIN entry screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let controller = &app.controller;
    let mode = controller.mode();

    let dialog = centered_rect_fixed(40, 26, area);

    let block = Block::default()
        .title(title(mode))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),  // Instructions
            Constraint::Length(2),  // PIN dots
            Constraint::Length(2),  // Error or warning
            Constraint::Min(12),    // Keypad
            Constraint::Length(1),  // Help
        ])
        .split(inner);

    let instructions = Paragraph::new(instructions(mode, controller.phase()))
        .style(theme.text_secondary())
        .alignment(Alignment::Center);
    frame.render_widget(instructions, chunks[0]);

    let len = controller.input_len();
    let dots_style = if len > 0 {
        theme.pin_dot()
    } else {
        theme.pin_placeholder()
    };
    let dots = Paragraph::new(pin_dots(len))
        .style(dots_style)
        .alignment(Alignment::Center);
    frame.render_widget(dots, chunks[1]);

    // A fresh error wins over the standing retry warning
    let message = match &app.error_message {
        Some(error) => Some((error.clone(), theme.danger())),
        None if mode == PinMode::Authenticate => controller
            .policy()
            .describe(controller.retry_count())
            .map(|warning| (format!("⚠ {}", warning), theme.warning())),
        None => None,
    };
    if let Some((text, style)) = message {
        let widget = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center);
        frame.render_widget(widget, chunks[2]);
    }

    let keypad = Keypad {
        buttons: app.current_buttons(),
        selected: app.selected,
    };
    keypad.render(frame, chunks[3], theme);

    let help = Paragraph::new("[0-9] Digit  [⌫] Delete  [Esc] Close")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}
