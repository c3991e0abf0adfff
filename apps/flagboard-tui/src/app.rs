//! Application state and main render loop

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use flagboard_core::{parse_query, FlagBoard, QueryState, RowAction};

use crate::keybindings::{normal_mode_action, Action};
use crate::mode::Mode;
use crate::views::{FilterBar, FlagTableView};
use crate::widgets::ModeIndicator;

/// Main application state
pub struct App {
    /// Current mode (NORMAL, SEARCH, COMMAND)
    pub mode: Mode,
    /// Catalog, query, and derived rows
    pub board: FlagBoard,
    /// Selected row in the visible set
    pub selected: usize,
    /// Command input buffer
    pub command_buffer: String,
    /// Search term to restore when search mode is cancelled
    pub search_backup: String,
    /// Status message
    pub status_message: Option<String>,
    /// Whether to show the help overlay
    pub show_help: bool,
    pub table_view: FlagTableView,
}

impl App {
    /// Create a new application instance
    pub fn new(board: FlagBoard, bar_width: u16) -> Self {
        Self {
            mode: Mode::Normal,
            board,
            selected: 0,
            command_buffer: String::new(),
            search_backup: String::new(),
            status_message: None,
            show_help: false,
            table_view: FlagTableView::new(bar_width),
        }
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Title
                Constraint::Length(3), // Search and filters
                Constraint::Length(1), // Result count
                Constraint::Min(0),    // Table
                Constraint::Length(1), // Command line
            ])
            .split(size);

        self.render_title(frame, chunks[0]);
        FilterBar.render(frame, chunks[1], self.board.query(), self.mode);
        self.render_summary(frame, chunks[2]);
        self.table_view
            .render(frame, chunks[3], &self.board, self.selected);
        self.render_command_line(frame, chunks[4]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let title = vec![
            Line::from(Span::styled(
                "Feature Flags",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Manage and monitor feature flags across environments",
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(title), area);
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let summary = Paragraph::new(Span::styled(
            self.board.summary().to_string(),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(summary, area);
    }

    fn render_command_line(&self, frame: &mut Frame, area: Rect) {
        let content = match self.mode {
            Mode::Command => format!(":{}", self.command_buffer),
            _ => self.status_message.clone().unwrap_or_else(|| {
                "/ search | e t s filters | 1-6 sort | : query | ? help".to_string()
            }),
        };

        let line = Line::from(vec![
            ModeIndicator::new(self.mode).as_span(),
            Span::raw(" "),
            Span::raw(content),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let help_text = r#"
Flagboard - Help

Search and filters:
  /       - Search name, description, and tags (Enter keeps, Esc reverts)
  e       - Cycle environment filter
  t       - Cycle type filter
  s       - Cycle status filter
  c       - Clear search and filters

Sorting (press again to reverse):
  1 Flag Name  2 Status  3 Environment
  4 Type       5 Rollout 6 Last Modified

Navigation:
  j/k     - Move down/up
  g/G     - First/last row
  Enter   - Edit (not available)
  o       - Settings (not available)

Commands (: to enter command mode):
  :env:staging type:experiment status:off sort:-rollout <words>
  :reset  - Clear search and filters
  :q      - Quit

Other:
  ?       - Toggle this help
  q       - Quit
"#;

        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(70, 85, area);
        frame.render_widget(Clear, help_area);
        let paragraph = Paragraph::new(help_text).block(block);
        frame.render_widget(paragraph, help_area);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            return true;
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(code),
            Mode::Search => self.handle_search_key(code),
            Mode::Command => self.handle_command_key(code),
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> bool {
        let Some(action) = normal_mode_action(code) else {
            return false;
        };

        match action {
            Action::Quit => return true,
            Action::EnterSearchMode => {
                self.mode = Mode::Search;
                self.search_backup = self.board.query().search_term.clone();
                self.status_message = Some("Search mode".to_string());
            }
            Action::EnterCommandMode => {
                self.mode = Mode::Command;
                self.command_buffer.clear();
            }
            Action::Cancel => {
                self.show_help = false;
                self.status_message = None;
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
            }
            Action::MoveDown => self.navigate_down(),
            Action::MoveUp => self.navigate_up(),
            Action::MoveFirst => self.selected = 0,
            Action::MoveLast => self.selected = self.board.visible_len().saturating_sub(1),
            Action::CycleEnvironment => {
                self.board.cycle_environment_filter();
                self.after_query_change();
            }
            Action::CycleType => {
                self.board.cycle_type_filter();
                self.after_query_change();
            }
            Action::CycleStatus => {
                self.board.cycle_status_filter();
                self.after_query_change();
            }
            Action::ResetFilters => {
                self.board.reset_filters();
                self.after_query_change();
                self.status_message = Some("Filters cleared".to_string());
            }
            Action::SortBy(field) => {
                self.board.click_header(field);
                self.after_query_change();
                let sort = self.board.query().sort;
                self.status_message = Some(format!(
                    "Sorted by {} {}",
                    sort.field.label(),
                    sort.order.arrow()
                ));
            }
            Action::Edit => self.trigger(RowAction::Edit),
            Action::Settings => self.trigger(RowAction::Settings),
        }
        false
    }

    fn handle_search_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            KeyCode::Esc => {
                let previous = std::mem::take(&mut self.search_backup);
                self.board.set_search_term(previous);
                self.after_query_change();
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            KeyCode::Backspace => {
                let mut term = self.board.query().search_term.clone();
                term.pop();
                self.board.set_search_term(term);
                self.after_query_change();
            }
            KeyCode::Char(c) => {
                let mut term = self.board.query().search_term.clone();
                term.push(c);
                self.board.set_search_term(term);
                self.after_query_change();
            }
            _ => {}
        }
        false
    }

    fn handle_command_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.command_buffer.clear();
            }
            KeyCode::Enter => {
                let should_quit = self.execute_command();
                self.mode = Mode::Normal;
                self.command_buffer.clear();
                if should_quit {
                    return true;
                }
            }
            KeyCode::Backspace => {
                self.command_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
            }
            _ => {}
        }
        false
    }

    fn execute_command(&mut self) -> bool {
        let input = self.command_buffer.trim().to_string();
        match input.as_str() {
            "" => {}
            "q" | "quit" => return true,
            "reset" => {
                self.board.reset_filters();
                self.after_query_change();
                self.status_message = Some("Filters cleared".to_string());
            }
            expr => match apply_expression(self.board.query(), expr) {
                Ok(query) => {
                    self.board.set_query(query);
                    self.after_query_change();
                    self.status_message = Some(self.board.summary().to_string());
                }
                Err(e) => {
                    self.status_message = Some(format!("Invalid query: {}", e));
                }
            },
        }
        false
    }

    fn trigger(&mut self, action: RowAction) {
        if let Some(record) = self.board.row(self.selected) {
            action.invoke(record);
            self.status_message = Some(format!("{} is not available", action.label()));
        }
    }

    fn navigate_down(&mut self) {
        let count = self.board.visible_len();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    fn navigate_up(&mut self) {
        let count = self.board.visible_len();
        if count > 0 {
            if self.selected > 0 {
                self.selected -= 1;
            } else {
                self.selected = count - 1;
            }
        }
    }

    /// Keep the cursor inside the visible set.
    fn after_query_change(&mut self) {
        let count = self.board.visible_len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }
}

/// Parse a filter expression; the current sort is kept unless it names one.
pub fn apply_expression(
    current: &QueryState,
    expr: &str,
) -> Result<QueryState, flagboard_core::QueryParseError> {
    let mut query = parse_query(expr)?;
    let names_sort = expr
        .split_whitespace()
        .any(|t| t.to_ascii_lowercase().starts_with("sort:"));
    if !names_sort {
        query.sort = current.sort;
    }
    Ok(query)
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
