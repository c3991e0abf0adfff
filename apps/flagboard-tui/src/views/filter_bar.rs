//! Search box and the three filter selects.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use flagboard_core::{capitalize, CategoryFilter, QueryState};

use crate::mode::Mode;

pub struct FilterBar;

impl FilterBar {
    pub fn render(&self, frame: &mut Frame, area: Rect, query: &QueryState, mode: Mode) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Search
                Constraint::Percentage(20), // Environment
                Constraint::Percentage(20), // Type
                Constraint::Percentage(20), // Status
            ])
            .split(area);

        let searching = mode == Mode::Search;
        let search_text = if query.search_term.is_empty() && !searching {
            Line::from(Span::styled(
                "Search flags, descriptions, or tags...",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            let cursor = if searching { "_" } else { "" };
            Line::from(format!("{}{}", query.search_term, cursor))
        };
        frame.render_widget(
            Paragraph::new(search_text).block(select_block("/ Search", searching)),
            chunks[0],
        );

        let environment = category_label(&query.environment, "All Environments");
        frame.render_widget(
            Paragraph::new(environment).block(select_block("e Environment", false)),
            chunks[1],
        );

        let flag_type = category_label(&query.flag_type, "All Types");
        frame.render_widget(
            Paragraph::new(flag_type).block(select_block("t Type", false)),
            chunks[2],
        );

        frame.render_widget(
            Paragraph::new(query.status.label()).block(select_block("s Status", false)),
            chunks[3],
        );
    }
}

/// Selected option label: the sentinel text, or the capitalized value.
pub fn category_label<T: std::fmt::Display>(filter: &CategoryFilter<T>, all: &str) -> String {
    match filter {
        CategoryFilter::All => all.to_string(),
        CategoryFilter::Only(value) => capitalize(&value.to_string()),
    }
}

fn select_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagboard_core::{Environment, FlagType};

    #[test]
    fn test_category_labels() {
        assert_eq!(
            category_label(&CategoryFilter::<Environment>::All, "All Environments"),
            "All Environments"
        );
        assert_eq!(
            category_label(&CategoryFilter::Only(Environment::Staging), "All Environments"),
            "Staging"
        );
        assert_eq!(
            category_label(&CategoryFilter::Only(FlagType::Ui), "All Types"),
            "Ui"
        );
    }
}
