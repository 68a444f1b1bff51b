use std::fmt;

/// Canonical label of the brand column. The input file's first column is
/// renamed to this at load time, whatever its original header says.
pub const BRAND_COLUMN: &str = "Brand";

// ── Month ─────────────────────────────────────────────────────────────────────

/// A calendar month, identified by its three-letter English abbreviation in
/// the period column headers (`"2024-Jan"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All twelve months in calendar order. Derived month lists preserve
    /// this order, never the input or alphabetical order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Three-letter abbreviation as used in column headers.
    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Parse an exact three-letter abbreviation. Case-sensitive; anything
    /// that is not one of the twelve known abbreviations returns `None`.
    pub fn from_abbrev(s: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.abbrev() == s)
    }

    /// The quarter this month belongs to. Total and fixed:
    /// Jan–Mar → Q1, Apr–Jun → Q2, Jul–Sep → Q3, Oct–Dec → Q4.
    pub fn quarter(self) -> Quarter {
        match self {
            Month::Jan | Month::Feb | Month::Mar => Quarter::Q1,
            Month::Apr | Month::May | Month::Jun => Quarter::Q2,
            Month::Jul | Month::Aug | Month::Sep => Quarter::Q3,
            Month::Oct | Month::Nov | Month::Dec => Quarter::Q4,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

// ── Quarter ───────────────────────────────────────────────────────────────────

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All four quarters in order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Display label, e.g. `"Q1"`.
    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Period ────────────────────────────────────────────────────────────────────

/// A (year, month) pair derived from a `"<year>-<mon3>"` column header.
///
/// Years stay strings: the input guarantees fixed-width year tokens, so
/// lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Period {
    /// Year token exactly as it appears in the header, e.g. `"2024"`.
    pub year: String,
    /// Month parsed from the header's month token.
    pub month: Month,
}

impl Period {
    /// Parse a column header into a period.
    ///
    /// A header qualifies when it splits on the first `-` into a non-empty
    /// year token and a known month abbreviation. Anything else (including
    /// the brand column, or headers like `"2024-Jan-extra"` whose remainder
    /// is not a bare month) returns `None` and is treated as a non-data
    /// column by the loader.
    pub fn parse_label(label: &str) -> Option<Period> {
        let (year, month) = label.split_once('-')?;
        if year.is_empty() {
            return None;
        }
        Some(Period {
            year: year.to_string(),
            month: Month::from_abbrev(month)?,
        })
    }

    /// Reconstruct the column label, e.g. `"2024-Jan"`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.year, self.month.abbrev())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.month.abbrev())
    }
}

// ── CellValue ─────────────────────────────────────────────────────────────────

/// Parsed content of one table cell, produced once at load time.
///
/// Replaces the original duck-typed cells (strings, NaN, the literal words
/// `"None"` / `"nan"`) with an explicit sum type so that missing-value
/// checks happen in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Blank cell, or a cell whose comma list contained no non-empty tokens.
    Empty,
    /// Cell holding one of the literal missing markers `"None"` or `"nan"`.
    Missing,
    /// One or more shoe names, trimmed, in cell order.
    Shoes(Vec<String>),
}

impl CellValue {
    /// Parse raw cell text.
    ///
    /// The missing-value blacklist is a deliberate narrow one: only the
    /// exact, untrimmed strings `"None"` and `"nan"` count as missing.
    /// Everything else is split on commas with each token trimmed and empty
    /// tokens dropped, so `"A, B,  C"` yields three shoes and `"A,,B"` two.
    pub fn parse(raw: &str) -> CellValue {
        if raw == "None" || raw == "nan" {
            return CellValue::Missing;
        }
        let shoes: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if shoes.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Shoes(shoes)
        }
    }

    /// Number of individual launches in this cell. Zero for empty and
    /// missing cells.
    pub fn count(&self) -> u64 {
        match self {
            CellValue::Empty | CellValue::Missing => 0,
            CellValue::Shoes(shoes) => shoes.len() as u64,
        }
    }

    /// Shoe names in this cell; empty slice for empty and missing cells.
    pub fn shoes(&self) -> &[String] {
        match self {
            CellValue::Empty | CellValue::Missing => &[],
            CellValue::Shoes(shoes) => shoes,
        }
    }

    /// Case-insensitive substring search over the shoe names.
    ///
    /// `needle_lower` must already be lowercased by the caller. Empty and
    /// missing cells never match.
    pub fn contains_ci(&self, needle_lower: &str) -> bool {
        self.shoes()
            .iter()
            .any(|shoe| shoe.to_lowercase().contains(needle_lower))
    }

    /// Display text for the table view: shoe names joined with `", "`,
    /// blank for empty and missing cells.
    pub fn display(&self) -> String {
        self.shoes().join(", ")
    }
}

// ── LaunchTable ───────────────────────────────────────────────────────────────

/// One row of the launch grid: a brand and its cells, aligned with
/// [`LaunchTable::periods`].
#[derive(Debug, Clone)]
pub struct BrandRow {
    /// Brand label from the first column. Not required to be unique.
    pub brand: String,
    /// One parsed cell per period column, in original column order.
    pub cells: Vec<CellValue>,
}

/// The loaded launch grid: one row per brand, one column per period.
#[derive(Debug, Clone, Default)]
pub struct LaunchTable {
    /// Period columns in their original file order.
    pub periods: Vec<Period>,
    /// Brand rows in their original file order.
    pub rows: Vec<BrandRow>,
}

impl LaunchTable {
    /// Cell at `(row, column)` by index into `rows` / `periods`.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        &self.rows[row].cells[col]
    }
}

// ── LaunchEvent ───────────────────────────────────────────────────────────────

/// One individual shoe launch, produced by expanding a cell's comma list
/// into the long form used for charting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEvent {
    /// Brand the shoe belongs to.
    pub brand: String,
    /// Year token of the period column the shoe came from.
    pub year: String,
    /// Month of the period column the shoe came from.
    pub month: Month,
    /// Trimmed shoe name.
    pub shoe: String,
}

impl LaunchEvent {
    /// Quarter derived from the event's month.
    pub fn quarter(&self) -> Quarter {
        self.month.quarter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
