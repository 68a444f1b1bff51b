//! The filter engine: one [`FilterSet`] value drives both the wide-table
//! narrowing shown in the calendar view and the long-form event filtering
//! behind the charts, so the two passes cannot drift apart.

use crate::models::{LaunchEvent, LaunchTable, Month, Period};

// ── FilterSet ─────────────────────────────────────────────────────────────────

/// The four user-controlled constraints.
///
/// `None` stands for the UI's "All" choice; an empty `search` string is no
/// constraint. The concrete values must come from the derived
/// [`Schema`](crate::schema::Schema) — out-of-domain values are a caller
/// bug, not an error the engine reports. Narrowing is monotonic: adding any
/// constraint can only shrink the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Keep only period columns with this year token.
    pub year: Option<String>,
    /// Keep only period columns with this month.
    pub month: Option<Month>,
    /// Keep only rows with exactly this brand label.
    pub brand: Option<String>,
    /// Case-insensitive substring to search shoe names for.
    pub search: String,
}

impl FilterSet {
    /// `true` when no constraint is active.
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.brand.is_none() && self.search.is_empty()
    }

    /// Does `period` pass the year and month constraints?
    pub fn matches_period(&self, period: &Period) -> bool {
        if let Some(ref year) = self.year {
            if period.year != *year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if period.month != month {
                return false;
            }
        }
        true
    }

    /// Does `event` pass all four constraints?
    ///
    /// The search term applies to the shoe name only, matching what the
    /// table-side scan sees through the parsed cells.
    pub fn matches_event(&self, event: &LaunchEvent) -> bool {
        if let Some(ref year) = self.year {
            if event.year != *year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if event.month != month {
                return false;
            }
        }
        if let Some(ref brand) = self.brand {
            if event.brand != *brand {
                return false;
            }
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !event.shoe.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Narrow `table` to the active columns and rows.
    ///
    /// Columns: all period columns passing the year/month constraints, in
    /// original order. Rows: all rows passing the brand constraint whose
    /// *visible* cells (the active columns only) contain the search term.
    /// Because the scan covers visible columns only, changing the year or
    /// month selection can change which rows a fixed search term matches.
    pub fn apply(&self, table: &LaunchTable) -> TableView {
        let columns: Vec<usize> = table
            .periods
            .iter()
            .enumerate()
            .filter(|(_, p)| self.matches_period(p))
            .map(|(i, _)| i)
            .collect();

        let needle = self.search.to_lowercase();
        let rows: Vec<usize> = table
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| match self.brand {
                Some(ref brand) => row.brand == *brand,
                None => true,
            })
            .filter(|(_, row)| {
                needle.is_empty()
                    || columns
                        .iter()
                        .any(|&col| row.cells[col].contains_ci(&needle))
            })
            .map(|(i, _)| i)
            .collect();

        TableView { columns, rows }
    }
}

// ── TableView ─────────────────────────────────────────────────────────────────

/// Result of narrowing a table: index sets into the original table, both in
/// original order. The table itself is never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    /// Indices into [`LaunchTable::periods`] of the active columns.
    pub columns: Vec<usize>,
    /// Indices into [`LaunchTable::rows`] of the rows left after narrowing.
    pub rows: Vec<usize>,
}

impl TableView {
    /// `true` when no rows survived the narrowing.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
