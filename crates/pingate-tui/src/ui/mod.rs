//! UI rendering

pub mod components;
pub mod layout;
pub mod screens;
mod theme;

pub use components::Notification;
pub use theme::Theme;

use ratatui::prelude::*;

use crate::app::App;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    screens::pin_entry::draw(frame, area, app);

    if app.controller.is_lockout_visible() {
        screens::lockout::draw(frame, area, app);
    }

    if let Some(notification) = &app.notification {
        notification.render(frame, area, &app.theme);
    }
}
