//! Domain core for the Launch Calendar.
//!
//! Holds the data model (brands, periods, cells, launch events), schema
//! derivation, the filter engine, the aggregation pipeline, CLI settings,
//! and the shared error type. Everything here is pure computation over an
//! in-memory table; file I/O lives in `calendar-data`.

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod models;
pub mod schema;
pub mod settings;
