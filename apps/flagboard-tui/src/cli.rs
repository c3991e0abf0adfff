//! Command-line interface and the non-interactive `list` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use flagboard_core::{
    BadgeTone, CategoryFilter, EmptyState, Environment, FlagBoard, FlagType, Listing,
    QueryParseError, QueryState, RowView, SortField, SortOrder, StatusFilter,
};

use crate::app::apply_expression;

/// Browse, search, filter, and sort a feature flag catalog.
#[derive(Debug, Parser)]
#[command(name = "flagboard", version, about)]
pub struct Cli {
    /// Config file (defaults to <config dir>/flagboard/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file (.json or .toml); overrides the config
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive terminal console (default)
    Tui,
    /// Print the filtered, sorted listing and exit
    List(ListArgs),
}

#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Filter expression, e.g. "env:staging status:off sort:-rollout bitrate"
    #[arg(long, short)]
    pub query: Option<String>,

    /// Case-insensitive search over name, description, and tags
    #[arg(long, short)]
    pub search: Option<String>,

    /// Only this environment ("all" for every environment)
    #[arg(long)]
    pub env: Option<String>,

    /// Only this flag type ("all" for every type)
    #[arg(long = "type")]
    pub flag_type: Option<String>,

    /// enabled, disabled, or all
    #[arg(long, value_parser = StatusFilter::parse)]
    pub status: Option<StatusFilter>,

    /// Sort field (name, status, env, type, rollout, modified, ...)
    #[arg(long, value_parser = SortField::parse)]
    pub sort: Option<SortField>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Print rows as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Build the query: `base`, then `--query`, then the individual flags.
    pub fn to_query(&self, base: QueryState) -> Result<QueryState, QueryParseError> {
        let mut query = match &self.query {
            Some(expr) => apply_expression(&base, expr)?,
            None => base,
        };

        if let Some(search) = &self.search {
            query.search_term = search.clone();
        }
        if let Some(env) = &self.env {
            query.environment = category(env, |v| Environment::from(v));
        }
        if let Some(flag_type) = &self.flag_type {
            query.flag_type = category(flag_type, |v| FlagType::from(v));
        }
        if let Some(status) = self.status {
            query.status = status;
        }
        if let Some(field) = self.sort {
            query.sort.field = field;
            query.sort.order = SortOrder::Asc;
        }
        if self.desc {
            query.sort.order = SortOrder::Desc;
        }
        Ok(query)
    }
}

fn category<T>(value: &str, make: impl FnOnce(&str) -> T) -> CategoryFilter<T> {
    if value.eq_ignore_ascii_case("all") {
        CategoryFilter::All
    } else {
        CategoryFilter::Only(make(value))
    }
}

/// Render the board's visible rows as a table (or JSON) plus the summary line.
pub fn render_list(board: &FlagBoard, bar_width: u16, json: bool) -> serde_json::Result<String> {
    let listing = Listing::build(&board.visible(), bar_width);

    if json {
        let rows = match listing {
            Listing::Rows(rows) => rows,
            Listing::Empty(_) => Vec::new(),
        };
        return serde_json::to_string_pretty(&rows);
    }

    let body = match listing {
        Listing::Empty(_) => format!("{}\n{}", EmptyState::TITLE, EmptyState::HINT),
        Listing::Rows(rows) => rows_table(&rows).to_string(),
    };
    Ok(format!("{}\n{}", body, board.summary()))
}

fn rows_table(rows: &[RowView]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Flag Name",
            "Description",
            "Status",
            "Environment",
            "Type",
            "Rollout",
            "Last Modified",
        ]);

    for row in rows {
        let mut name = format!("{}\n{}", row.display_name, row.name);
        if !row.tags.is_empty() {
            name.push('\n');
            name.push_str(&row.tags.join(", "));
        }
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&row.description),
            Cell::new(&row.status).fg(table_color(row.status.tone)),
            Cell::new(&row.environment).fg(table_color(row.environment.tone)),
            Cell::new(&row.flag_type).fg(table_color(row.flag_type.tone)),
            Cell::new(row.rollout.render_text()),
            Cell::new(format!("{}\n{}", row.last_modified, row.created_by)),
        ]);
    }
    table
}

fn table_color(tone: BadgeTone) -> Color {
    match tone {
        BadgeTone::Green => Color::Green,
        BadgeTone::Red => Color::Red,
        BadgeTone::Blue => Color::Blue,
        BadgeTone::Yellow => Color::Yellow,
        BadgeTone::Purple => Color::Magenta,
        BadgeTone::Indigo => Color::AnsiValue(99),
        BadgeTone::Gray => Color::Grey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagboard_core::{FlagCatalog, SortState};

    fn list(args: ListArgs) -> String {
        let query = args.to_query(QueryState::default()).unwrap();
        let board = FlagBoard::with_query(FlagCatalog::sample(), query);
        render_list(&board, 10, args.json).unwrap()
    }

    #[test]
    fn test_cli_parses_list_flags() {
        let cli = Cli::try_parse_from([
            "flagboard", "list", "--env", "staging", "--status", "off", "--sort", "rollout",
            "--desc",
        ])
        .unwrap();
        let Some(Command::List(args)) = cli.command else {
            panic!("expected list");
        };
        let query = args.to_query(QueryState::default()).unwrap();
        assert_eq!(query.environment, CategoryFilter::Only(Environment::Staging));
        assert_eq!(query.status, StatusFilter::Disabled);
        assert_eq!(query.sort, SortState::new(SortField::Rollout, SortOrder::Desc));
    }

    #[test]
    fn test_cli_rejects_bad_status() {
        assert!(Cli::try_parse_from(["flagboard", "list", "--status", "maybe"]).is_err());
    }

    #[test]
    fn test_flags_override_expression() {
        let args = ListArgs {
            query: Some("env:production sort:-rollout gpu".to_string()),
            env: Some("all".to_string()),
            ..ListArgs::default()
        };
        let query = args.to_query(QueryState::default()).unwrap();
        assert_eq!(query.environment, CategoryFilter::All);
        assert_eq!(query.search_term, "gpu");
        assert_eq!(query.sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_table_output() {
        let out = list(ListArgs {
            search: Some("h265".to_string()),
            ..ListArgs::default()
        });
        assert!(out.contains("H.265 Encoding Support"));
        assert!(out.contains("Enabled"));
        assert!(out.contains("100%"));
        assert!(!out.contains("adaptive_bitrate"));
        assert!(out.ends_with("Showing 1 of 6 feature flags"));
    }

    #[test]
    fn test_empty_output() {
        let out = list(ListArgs {
            search: Some("zzz-nonexistent".to_string()),
            ..ListArgs::default()
        });
        assert!(out.starts_with(EmptyState::TITLE));
        assert!(out.ends_with("Showing 0 of 6 feature flags"));
    }

    #[test]
    fn test_json_output() {
        let out = list(ListArgs {
            status: Some(StatusFilter::Disabled),
            json: true,
            ..ListArgs::default()
        });
        let rows: serde_json::Value = serde_json::from_str(&out).unwrap();
        let names: Vec<&str> = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["adaptive_bitrate", "realtime_preview"]);
    }
}
