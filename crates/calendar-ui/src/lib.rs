//! Terminal UI layer for the Launch Calendar.
//!
//! Provides themes, the filter bar, the calendar table view, the bar-chart
//! views, and the main application event loop built on top of [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod filter_bar;
pub mod table_view;
pub mod themes;

pub use calendar_core as core;
