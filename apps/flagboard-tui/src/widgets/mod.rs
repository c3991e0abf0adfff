//! TUI widgets

mod badge;
mod mode_indicator;

pub use badge::{badge_span, rollout_line};
pub use mode_indicator::ModeIndicator;
