//! Schema derivation: the selector domains offered by the UI.
//!
//! Inspects a loaded [`LaunchTable`] and produces the distinct years, the
//! months actually present (in calendar order), and the sorted distinct
//! brand labels. The UI only ever hands the filter engine values taken from
//! here, which discharges the filter engine's domain precondition.

use std::collections::BTreeSet;

use crate::models::{LaunchTable, Month};

/// Selector domains derived from the loaded table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    /// Distinct year tokens, lexicographically sorted (fixed-width years
    /// make that chronological).
    pub years: Vec<String>,
    /// Months with at least one period column, in calendar order.
    pub months: Vec<Month>,
    /// Distinct brand labels, sorted.
    pub brands: Vec<String>,
}

impl Schema {
    /// Derive the selector domains from `table`.
    ///
    /// When the table has no period columns, `years` and `months` come back
    /// empty and the chart views degrade to their informational state.
    pub fn derive(table: &LaunchTable) -> Schema {
        let years: BTreeSet<&str> = table.periods.iter().map(|p| p.year.as_str()).collect();

        let months: Vec<Month> = Month::ALL
            .into_iter()
            .filter(|m| table.periods.iter().any(|p| p.month == *m))
            .collect();

        let brands: BTreeSet<&str> = table.rows.iter().map(|r| r.brand.as_str()).collect();

        Schema {
            years: years.into_iter().map(String::from).collect(),
            months,
            brands: brands.into_iter().map(String::from).collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
