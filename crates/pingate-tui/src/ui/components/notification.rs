//! Toasts for controller notices

use pingate_core::Notice;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::layout::top_right;
use crate::ui::Theme;

/// Ticks a toast stays up (~3 seconds at the app tick rate)
pub const TOAST_TICKS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
}

/// Short-lived message in the corner of the screen
#[derive(Clone, Debug)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks left before it disappears
    pub ttl: u64,
}

impl Notification {
    pub fn new(message: impl Into<String>, level: NotificationLevel) -> Self {
        Self {
            message: message.into(),
            level,
            ttl: TOAST_TICKS,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.ttl == 0
    }

    pub fn tick(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let (icon, style) = match self.level {
            NotificationLevel::Success => ("✓", theme.success()),
            NotificationLevel::Warning => ("⚠", theme.warning()),
        };

        let width = (self.message.chars().count() + 6).min(u16::MAX as usize) as u16;
        let toast_area = top_right(width, 3, area);

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(format!("{} {}", icon, self.message))
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            toast_area,
        );
    }
}

impl From<Notice> for Notification {
    fn from(notice: Notice) -> Self {
        let level = match notice {
            Notice::PinSaved => NotificationLevel::Success,
            Notice::PinMismatch => NotificationLevel::Warning,
        };
        Notification::new(notice.message(), level)
    }
}
