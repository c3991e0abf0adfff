//! TUI views

mod filter_bar;
mod flag_table;

pub use filter_bar::FilterBar;
pub use flag_table::FlagTableView;
