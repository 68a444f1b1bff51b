//! Data loading layer for the Launch Calendar.
//!
//! Responsible for reading the launch grid CSV into a typed table and for
//! the process-wide cached table store with its explicit reload hook.

pub mod loader;
pub mod store;

pub use calendar_core as core;
