//! Keybinding definitions

use crossterm::event::KeyCode;
use flagboard_core::SortField;

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Enter search mode
    EnterSearchMode,
    /// Enter command mode
    EnterCommandMode,
    /// Close overlays
    Cancel,
    /// Move up in the table
    MoveUp,
    /// Move down in the table
    MoveDown,
    /// Jump to the first row
    MoveFirst,
    /// Jump to the last row
    MoveLast,
    /// Cycle the environment filter
    CycleEnvironment,
    /// Cycle the type filter
    CycleType,
    /// Cycle the status filter
    CycleStatus,
    /// Clear search and filters
    ResetFilters,
    /// Click a sortable column header
    SortBy(SortField),
    /// Edit the selected flag (no handler)
    Edit,
    /// Open settings for the selected flag (no handler)
    Settings,
    /// Toggle help
    ToggleHelp,
}

/// Get the action for a key in normal mode
pub fn normal_mode_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') => Some(Action::EnterSearchMode),
        KeyCode::Char(':') => Some(Action::EnterCommandMode),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::MoveFirst),
        KeyCode::Char('G') | KeyCode::End => Some(Action::MoveLast),
        KeyCode::Char('e') => Some(Action::CycleEnvironment),
        KeyCode::Char('t') => Some(Action::CycleType),
        KeyCode::Char('s') => Some(Action::CycleStatus),
        KeyCode::Char('c') => Some(Action::ResetFilters),
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            SortField::COLUMNS.get(index).copied().map(Action::SortBy)
        }
        KeyCode::Enter => Some(Action::Edit),
        KeyCode::Char('o') => Some(Action::Settings),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_map_to_columns() {
        assert_eq!(
            normal_mode_action(KeyCode::Char('1')),
            Some(Action::SortBy(SortField::Name))
        );
        assert_eq!(
            normal_mode_action(KeyCode::Char('5')),
            Some(Action::SortBy(SortField::Rollout))
        );
        assert_eq!(
            normal_mode_action(KeyCode::Char('6')),
            Some(Action::SortBy(SortField::LastModified))
        );
        assert_eq!(normal_mode_action(KeyCode::Char('7')), None);
    }

    #[test]
    fn test_filter_keys() {
        assert_eq!(
            normal_mode_action(KeyCode::Char('e')),
            Some(Action::CycleEnvironment)
        );
        assert_eq!(normal_mode_action(KeyCode::Char('s')), Some(Action::CycleStatus));
    }
}
