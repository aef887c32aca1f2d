//! Lockout prompt shown once the retry limit is reached

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::App;
use crate::ui::layout::centered_rect_fixed;

/// Draw the lockout prompt over the current screen
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let dialog = centered_rect_fixed(46, 12, area);

    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Locked ")
        .title_style(theme.danger())
        .borders(Borders::ALL)
        .border_style(theme.danger());

    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Icon
            Constraint::Min(3),    // Message
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let icon = Paragraph::new("⚠  LOCKED  ⚠")
        .style(theme.danger())
        .alignment(Alignment::Center);
    frame.render_widget(icon, chunks[0]);

    let controller = &app.controller;
    let message = controller
        .policy()
        .describe(controller.retry_count())
        .unwrap_or_else(|| "Too many failed PIN attempts.".to_string());
    let message = Paragraph::new(message)
        .style(theme.text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[1]);

    let help = Paragraph::new("[y] Erase and restart   [n] Not now")
        .style(theme.text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
