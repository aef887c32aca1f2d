//! Keypad palette

use ratatui::style::{Color, Modifier, Style};

/// Colors for the keypad dialog and its overlays
pub struct Theme {
    pub accent: Color,
    pub key_face: Color,
    pub key_highlight: Color,
    pub ink: Color,
    pub ink_dim: Color,
    pub ink_faint: Color,
    pub frame: Color,
    pub saved: Color,
    pub caution: Color,
    pub alarm: Color,
    pub notice: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(255, 193, 7),        // #FFC107 amber
            key_face: Color::Rgb(38, 38, 38),       // #262626
            key_highlight: Color::Rgb(64, 56, 32),  // #403820
            ink: Color::Rgb(240, 240, 240),         // #F0F0F0
            ink_dim: Color::Rgb(176, 176, 176),     // #B0B0B0
            ink_faint: Color::Rgb(110, 110, 110),   // #6E6E6E
            frame: Color::Rgb(80, 80, 80),          // #505050
            saved: Color::Rgb(102, 187, 106),       // #66BB6A
            caution: Color::Rgb(255, 167, 38),      // #FFA726
            alarm: Color::Rgb(239, 83, 80),         // #EF5350
            notice: Color::Rgb(79, 195, 247),       // #4FC3F7
        }
    }
}

impl Theme {
    fn fg(color: Color) -> Style {
        Style::default().fg(color)
    }

    pub fn text(&self) -> Style {
        Self::fg(self.ink)
    }

    pub fn text_secondary(&self) -> Style {
        Self::fg(self.ink_dim)
    }

    pub fn text_muted(&self) -> Style {
        Self::fg(self.ink_faint)
    }

    pub fn title(&self) -> Style {
        Self::fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Self::fg(self.frame)
    }

    /// Dialog frame and highlighted key outline
    pub fn border_focused(&self) -> Style {
        Self::fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Self::fg(self.saved)
    }

    pub fn warning(&self) -> Style {
        Self::fg(self.caution)
    }

    pub fn danger(&self) -> Style {
        Self::fg(self.alarm).add_modifier(Modifier::BOLD)
    }

    pub fn info(&self) -> Style {
        Self::fg(self.notice)
    }

    /// Face of an active key
    pub fn key(&self, selected: bool) -> Style {
        let base = Self::fg(self.ink).bg(self.key_face);
        if selected {
            base.bg(self.key_highlight)
                .fg(self.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            base
        }
    }

    pub fn key_disabled(&self) -> Style {
        Self::fg(self.ink_faint).bg(self.key_face)
    }

    /// Entered digit
    pub fn pin_dot(&self) -> Style {
        self.title()
    }

    /// Slot still to fill
    pub fn pin_placeholder(&self) -> Style {
        self.text_muted()
    }
}
