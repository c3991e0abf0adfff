//! Badge and rollout bar spans.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use flagboard_core::{Badge, BadgeTone, RolloutBar};

/// Terminal color for a badge tone.
pub fn tone_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Green => Color::Green,
        BadgeTone::Red => Color::Red,
        BadgeTone::Blue => Color::Blue,
        BadgeTone::Yellow => Color::Yellow,
        BadgeTone::Purple => Color::Magenta,
        BadgeTone::Indigo => Color::Indexed(99),
        BadgeTone::Gray => Color::Gray,
    }
}

/// A pill-style badge: ` Label ` in the tone color.
pub fn badge_span(badge: &Badge) -> Span<'static> {
    Span::styled(
        format!(" {} ", badge.label),
        Style::default()
            .fg(tone_color(badge.tone))
            .add_modifier(Modifier::BOLD),
    )
}

/// Filled cells in blue, remainder dim, then the percentage.
pub fn rollout_line(bar: &RolloutBar) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            "█".repeat(usize::from(bar.filled())),
            Style::default().fg(Color::Blue),
        ),
        Span::styled(
            "░".repeat(usize::from(bar.empty())),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {}", bar.label())),
    ])
}
