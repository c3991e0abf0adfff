//! Display model for listing rows: badges, rollout bar, empty state.
//!
//! Everything here is a pure function of a [`FlagRecord`]; front ends map
//! [`BadgeTone`] to their own colors.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::flag::{Environment, FlagRecord, FlagType, Rollout};

/// Color family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Green,
    Red,
    Blue,
    Yellow,
    Purple,
    Indigo,
    Gray,
}

/// A short styled label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub label: String,
    pub tone: BadgeTone,
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Uppercase the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn status_badge(enabled: bool) -> Badge {
    if enabled {
        Badge {
            label: "Enabled".to_string(),
            tone: BadgeTone::Green,
        }
    } else {
        Badge {
            label: "Disabled".to_string(),
            tone: BadgeTone::Red,
        }
    }
}

/// Known stages get their own tone; anything else falls back to gray.
pub fn environment_badge(environment: &Environment) -> Badge {
    let tone = match environment {
        Environment::Production => BadgeTone::Blue,
        Environment::Staging => BadgeTone::Yellow,
        Environment::Development => BadgeTone::Purple,
        Environment::Other(_) => BadgeTone::Gray,
    };
    Badge {
        label: capitalize(environment.as_str()),
        tone,
    }
}

pub fn type_badge(flag_type: &FlagType) -> Badge {
    Badge {
        label: capitalize(flag_type.as_str()),
        tone: BadgeTone::Indigo,
    }
}

/// Rollout shown as a proportional bar plus percentage text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RolloutBar {
    pub percent: u8,
    /// Cells in the full bar.
    pub width: u16,
}

impl RolloutBar {
    pub fn new(rollout: Rollout, width: u16) -> Self {
        Self {
            percent: rollout.percent(),
            width,
        }
    }

    /// Filled cells, rounded to nearest.
    pub fn filled(&self) -> u16 {
        let filled = (u32::from(self.width) * u32::from(self.percent) + 50) / 100;
        filled as u16
    }

    pub fn empty(&self) -> u16 {
        self.width - self.filled()
    }

    pub fn label(&self) -> String {
        format!("{}%", self.percent)
    }

    /// Text rendering, e.g. `████████░░ 85%`.
    pub fn render_text(&self) -> String {
        format!(
            "{}{} {}",
            "█".repeat(usize::from(self.filled())),
            "░".repeat(usize::from(self.empty())),
            self.label()
        )
    }
}

/// Per-row controls. Both are displayed and do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RowAction {
    Edit,
    Settings,
}

/// What happened when a row action was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// No handler is wired; catalog and query are unchanged.
    Inert,
}

impl RowAction {
    pub const ALL: [RowAction; 2] = [RowAction::Edit, RowAction::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Settings => "Settings",
        }
    }

    pub fn invoke(&self, record: &FlagRecord) -> ActionOutcome {
        tracing::debug!(action = self.label(), flag = %record.name, "Row action has no handler");
        ActionOutcome::Inert
    }
}

/// Everything one table row displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: u64,
    pub display_name: String,
    pub name: String,
    pub tags: Vec<String>,
    pub description: String,
    pub status: Badge,
    pub environment: Badge,
    pub flag_type: Badge,
    pub rollout: RolloutBar,
    pub last_modified: NaiveDate,
    pub created_by: String,
    pub actions: Vec<RowAction>,
}

impl RowView {
    pub fn from_record(record: &FlagRecord, bar_width: u16) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name.clone(),
            name: record.name.clone(),
            tags: record.tags.clone(),
            description: record.description.clone(),
            status: status_badge(record.enabled),
            environment: environment_badge(&record.environment),
            flag_type: type_badge(&record.flag_type),
            rollout: RolloutBar::new(record.rollout, bar_width),
            last_modified: record.last_modified,
            created_by: record.created_by.clone(),
            actions: RowAction::ALL.to_vec(),
        }
    }
}

/// Message shown in place of the table when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState;

impl EmptyState {
    pub const TITLE: &'static str = "No feature flags found";
    pub const HINT: &'static str = "Try adjusting your search terms or filters.";
}

/// `Showing X of Y feature flags`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
    pub visible: usize,
    pub total: usize,
}

impl fmt::Display for ResultSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Showing {} of {} feature flags",
            self.visible, self.total
        )
    }
}

/// What a front end should draw for a derived set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty(EmptyState),
    Rows(Vec<RowView>),
}

impl Listing {
    /// Rows map 1:1 to `records`, keeping their order.
    pub fn build(records: &[&FlagRecord], bar_width: u16) -> Self {
        if records.is_empty() {
            Self::Empty(EmptyState)
        } else {
            Self::Rows(
                records
                    .iter()
                    .map(|r| RowView::from_record(r, bar_width))
                    .collect(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlagCatalog;

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("production"), "Production");
        assert_eq!(capitalize("ui"), "Ui");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn status_badges() {
        assert_eq!(status_badge(true).label, "Enabled");
        assert_eq!(status_badge(true).tone, BadgeTone::Green);
        assert_eq!(status_badge(false).label, "Disabled");
        assert_eq!(status_badge(false).tone, BadgeTone::Red);
    }

    #[test]
    fn environment_badge_falls_back_to_gray() {
        let staging = environment_badge(&Environment::Staging);
        assert_eq!((staging.label.as_str(), staging.tone), ("Staging", BadgeTone::Yellow));

        let canary = environment_badge(&Environment::Other("canary".into()));
        assert_eq!((canary.label.as_str(), canary.tone), ("Canary", BadgeTone::Gray));
    }

    #[test]
    fn type_badge_is_indigo() {
        let badge = type_badge(&FlagType::Experiment);
        assert_eq!(badge.label, "Experiment");
        assert_eq!(badge.tone, BadgeTone::Indigo);
    }

    #[test]
    fn rollout_bar_proportions() {
        let bar = RolloutBar::new(Rollout::clamped(85), 10);
        assert_eq!((bar.filled(), bar.empty()), (9, 1));
        assert_eq!(bar.label(), "85%");
        assert_eq!(RolloutBar::new(Rollout::clamped(0), 10).filled(), 0);
        assert_eq!(RolloutBar::new(Rollout::clamped(100), 10).empty(), 0);
        assert_eq!(RolloutBar::new(Rollout::clamped(25), 4).render_text(), "█░░░ 25%");
    }

    #[test]
    fn actions_are_inert() {
        let catalog = FlagCatalog::sample();
        let before = catalog.clone();
        for action in RowAction::ALL {
            assert_eq!(action.invoke(&catalog.flags()[0]), ActionOutcome::Inert);
        }
        assert_eq!(catalog, before);
    }

    #[test]
    fn listing_empty_and_rows() {
        assert_eq!(Listing::build(&[], 10), Listing::Empty(EmptyState));

        let catalog = FlagCatalog::sample();
        let records: Vec<_> = catalog.flags().iter().rev().collect();
        let Listing::Rows(rows) = Listing::build(&records, 10) else {
            panic!("expected rows");
        };
        let ids: Vec<u64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(rows[0].tags, vec!["batch", "processing"]);
    }

    #[test]
    fn summary_text() {
        let summary = ResultSummary { visible: 2, total: 6 };
        assert_eq!(summary.to_string(), "Showing 2 of 6 feature flags");
    }
}
