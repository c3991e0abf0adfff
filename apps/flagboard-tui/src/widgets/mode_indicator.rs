//! Mode indicator widget for the TUI.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::mode::Mode;

/// Displays the current interaction mode with color coding:
/// - Normal: Blue
/// - Search: Green
/// - Command: Magenta
pub struct ModeIndicator {
    mode: Mode,
}

impl ModeIndicator {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Get the display color for a mode.
    pub fn mode_color(mode: Mode) -> Color {
        match mode {
            Mode::Normal => Color::Blue,
            Mode::Search => Color::Green,
            Mode::Command => Color::Magenta,
        }
    }

    /// Render as a styled span (for embedding in other widgets).
    pub fn as_span(&self) -> Span<'static> {
        Span::styled(format!("[{}]", self.mode.short_code()), self.style())
    }

    fn style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::mode_color(self.mode))
            .add_modifier(Modifier::BOLD)
    }
}

impl Widget for ModeIndicator {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer) {
        let text = format!("[{}]", self.mode.short_code());

        // Only render if we have space
        if area.width >= text.len() as u16 && area.height >= 1 {
            buf.set_string(area.x, area.y, &text, self.style());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_colors() {
        assert_eq!(ModeIndicator::mode_color(Mode::Normal), Color::Blue);
        assert_eq!(ModeIndicator::mode_color(Mode::Search), Color::Green);
        assert_eq!(ModeIndicator::mode_color(Mode::Command), Color::Magenta);
    }

    #[test]
    fn test_span_text() {
        assert_eq!(ModeIndicator::new(Mode::Search).as_span().content, "[SRC]");
    }
}
