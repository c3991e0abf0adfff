//! Flag table
//!
//! One row per visible flag, in pipeline order:
//! - Flag name (display name, machine key, tag chips)
//! - Description
//! - Status, environment, and type badges
//! - Rollout bar
//! - Last modified date and creator
//! - Inert Edit / Settings actions
//!
//! An empty derived set renders the empty-state panel instead.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

use flagboard_core::{EmptyState, FlagBoard, Listing, RowView, SortField, SortState};

use crate::widgets::{badge_span, rollout_line};

/// Table view state
pub struct FlagTableView {
    /// Cells in a full rollout bar
    pub bar_width: u16,
}

impl FlagTableView {
    pub fn new(bar_width: u16) -> Self {
        Self { bar_width }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, board: &FlagBoard, selected: usize) {
        match Listing::build(&board.visible(), self.bar_width) {
            Listing::Empty(_) => render_empty(frame, area),
            Listing::Rows(rows) => self.render_rows(frame, area, &board.query().sort, &rows, selected),
        }
    }

    fn render_rows(
        &self,
        frame: &mut Frame,
        area: Rect,
        sort: &SortState,
        rows: &[RowView],
        selected: usize,
    ) {
        let header = Row::new(header_cells(sort))
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD),
            )
            .height(1);

        let body: Vec<Row> = rows.iter().map(table_row).collect();

        let widths = [
            Constraint::Min(26),                        // Flag name
            Constraint::Percentage(25),                 // Description
            Constraint::Length(12),                     // Status
            Constraint::Length(14),                     // Environment
            Constraint::Length(14),                     // Type
            Constraint::Length(self.bar_width + 6),     // Rollout
            Constraint::Length(15),                     // Last modified
            Constraint::Length(12),                     // Actions
        ];

        let table = Table::new(body, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL))
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .column_spacing(1);

        let mut state = TableState::default().with_selected(Some(selected));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Column titles with the sort arrow on the active column.
fn header_cells(sort: &SortState) -> Vec<Cell<'static>> {
    let sortable = |field: SortField| {
        let title = match sort.indicator(field) {
            Some(arrow) => format!("{} {}", field.label(), arrow),
            None => field.label().to_string(),
        };
        Cell::from(title.to_uppercase())
    };

    vec![
        sortable(SortField::Name),
        Cell::from("DESCRIPTION"),
        sortable(SortField::Enabled),
        sortable(SortField::Environment),
        sortable(SortField::Type),
        sortable(SortField::Rollout),
        sortable(SortField::LastModified),
        Cell::from("ACTIONS"),
    ]
}

fn table_row(row: &RowView) -> Row<'static> {
    let tags: Vec<Span> = row
        .tags
        .iter()
        .map(|t| Span::styled(format!("[{}] ", t), Style::default().fg(Color::DarkGray)))
        .collect();

    let name = Text::from(vec![
        Line::from(Span::styled(
            row.display_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(row.name.clone(), Style::default().fg(Color::Gray))),
        Line::from(tags),
    ]);

    let modified = Text::from(vec![
        Line::from(row.last_modified.format("%Y-%m-%d").to_string()),
        Line::from(Span::styled(
            row.created_by.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    let actions: Vec<Span> = row
        .actions
        .iter()
        .map(|a| Span::styled(format!("{} ", a.label()), Style::default().fg(Color::Cyan)))
        .collect();

    Row::new(vec![
        Cell::from(name),
        Cell::from(row.description.clone()),
        Cell::from(Line::from(badge_span(&row.status))),
        Cell::from(Line::from(badge_span(&row.environment))),
        Cell::from(Line::from(badge_span(&row.flag_type))),
        Cell::from(rollout_line(&row.rollout)),
        Cell::from(modified),
        Cell::from(Line::from(actions)),
    ])
    .height(3)
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let text = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            EmptyState::TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            EmptyState::HINT,
            Style::default().fg(Color::Gray),
        )),
    ]);

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
