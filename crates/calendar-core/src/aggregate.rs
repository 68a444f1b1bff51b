//! The aggregation pipeline: the summary count row for the calendar table,
//! the long-form launch event expansion, and the grouped counts behind the
//! two chart views.
//!
//! Chart aggregations return `None` for an empty filtered event collection
//! so the UI renders an explicit "no data" state instead of an empty chart.

use std::collections::{BTreeMap, BTreeSet};

use crate::filter::{FilterSet, TableView};
use crate::models::{LaunchEvent, LaunchTable, Quarter};

/// Label of the synthetic summary row prepended to the calendar table. It
/// is display-only and never part of the underlying table.
pub const SUMMARY_ROW_LABEL: &str = "Count";

// ── Summary row ───────────────────────────────────────────────────────────────

/// Per-column launch counts across the filtered rows, one entry per active
/// column in `view`, in column order.
pub fn summary_counts(table: &LaunchTable, view: &TableView) -> Vec<u64> {
    view.columns
        .iter()
        .map(|&col| view.rows.iter().map(|&row| table.cell(row, col).count()).sum())
        .collect()
}

// ── Long-form expansion ───────────────────────────────────────────────────────

/// Expand the *original* table into one [`LaunchEvent`] per shoe.
///
/// Expansion always runs over the unfiltered table; chart filters are
/// re-applied afterwards via [`filter_events`] so that both filtering
/// passes consume the same [`FilterSet`].
pub fn expand_events(table: &LaunchTable) -> Vec<LaunchEvent> {
    let mut events = Vec::new();
    for row in &table.rows {
        for (period, cell) in table.periods.iter().zip(&row.cells) {
            for shoe in cell.shoes() {
                events.push(LaunchEvent {
                    brand: row.brand.clone(),
                    year: period.year.clone(),
                    month: period.month,
                    shoe: shoe.clone(),
                });
            }
        }
    }
    events
}

/// Keep only the events passing every constraint in `filters`.
pub fn filter_events(events: &[LaunchEvent], filters: &FilterSet) -> Vec<LaunchEvent> {
    events
        .iter()
        .filter(|e| filters.matches_event(e))
        .cloned()
        .collect()
}

// ── Brand × Year ──────────────────────────────────────────────────────────────

/// Launch counts grouped by brand and year: one bar group per brand, one
/// bar per year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandYearChart {
    /// Distinct years present in the events, sorted.
    pub years: Vec<String>,
    /// One group per brand, sorted by brand label.
    pub groups: Vec<BrandYearGroup>,
}

/// Counts for one brand, aligned with [`BrandYearChart::years`] and
/// zero-filled for years the brand did not launch in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandYearGroup {
    /// Brand label.
    pub brand: String,
    /// One count per chart year.
    pub counts: Vec<u64>,
}

impl BrandYearChart {
    /// Largest single count, used by the UI for bar scaling.
    pub fn max_count(&self) -> u64 {
        self.groups
            .iter()
            .flat_map(|g| g.counts.iter().copied())
            .max()
            .unwrap_or(0)
    }
}

/// Group `events` by (brand, year). `None` when `events` is empty.
pub fn by_brand_year(events: &[LaunchEvent]) -> Option<BrandYearChart> {
    if events.is_empty() {
        return None;
    }

    let years: BTreeSet<&str> = events.iter().map(|e| e.year.as_str()).collect();
    let years: Vec<String> = years.into_iter().map(String::from).collect();

    let mut counts: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
    for event in events {
        let year_idx = years
            .iter()
            .position(|y| *y == event.year)
            .unwrap_or_default();
        counts
            .entry(event.brand.as_str())
            .or_insert_with(|| vec![0; years.len()])[year_idx] += 1;
    }

    let groups = counts
        .into_iter()
        .map(|(brand, counts)| BrandYearGroup {
            brand: brand.to_string(),
            counts,
        })
        .collect();

    Some(BrandYearChart { years, groups })
}

// ── Brand × Quarter × Year ────────────────────────────────────────────────────

/// The pivot shown by the quarter view: rows indexed by (brand, quarter),
/// one count column per year, zero-filled for absent combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterPivot {
    /// Distinct years present in the events, sorted.
    pub years: Vec<String>,
    /// One row per (brand, quarter) pair that has at least one launch,
    /// sorted by brand then quarter.
    pub rows: Vec<QuarterPivotRow>,
}

/// One pivot row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterPivotRow {
    /// Brand label.
    pub brand: String,
    /// Quarter this row covers.
    pub quarter: Quarter,
    /// One count per pivot year.
    pub counts: Vec<u64>,
}

/// Group `events` by (brand, quarter, year). `None` when `events` is empty.
pub fn by_brand_quarter(events: &[LaunchEvent]) -> Option<QuarterPivot> {
    if events.is_empty() {
        return None;
    }

    let years: BTreeSet<&str> = events.iter().map(|e| e.year.as_str()).collect();
    let years: Vec<String> = years.into_iter().map(String::from).collect();

    let mut counts: BTreeMap<(&str, Quarter), Vec<u64>> = BTreeMap::new();
    for event in events {
        let year_idx = years
            .iter()
            .position(|y| *y == event.year)
            .unwrap_or_default();
        counts
            .entry((event.brand.as_str(), event.quarter()))
            .or_insert_with(|| vec![0; years.len()])[year_idx] += 1;
    }

    let rows = counts
        .into_iter()
        .map(|((brand, quarter), counts)| QuarterPivotRow {
            brand: brand.to_string(),
            quarter,
            counts,
        })
        .collect();

    Some(QuarterPivot { years, rows })
}

/// Narrow the quarter grouping to a single quarter, reshaped to brand rows
/// and year columns for the focused bar chart. `None` when no launch falls
/// in `quarter`.
pub fn quarter_focus(events: &[LaunchEvent], quarter: Quarter) -> Option<BrandYearChart> {
    let in_quarter: Vec<LaunchEvent> = events
        .iter()
        .filter(|e| e.quarter() == quarter)
        .cloned()
        .collect();
    by_brand_year(&in_quarter)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
