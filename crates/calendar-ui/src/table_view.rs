//! The calendar table view: one column per active period, the synthetic
//! "Count" summary row first, then the filtered brand rows.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use calendar_core::aggregate::SUMMARY_ROW_LABEL;
use calendar_core::models::BRAND_COLUMN;

use crate::themes::Theme;

/// Widest a single cell is allowed to render.
const MAX_CELL_WIDTH: usize = 28;

/// One displayable brand row.
#[derive(Debug, Clone)]
pub struct CalendarRow {
    /// Brand label.
    pub brand: String,
    /// Display text per active column (shoe lists joined with `", "`).
    pub cells: Vec<String>,
}

/// Everything the calendar table needs, already narrowed and stringified.
#[derive(Debug, Clone)]
pub struct CalendarTableData {
    /// Labels of the active period columns, in original column order.
    pub columns: Vec<String>,
    /// Summary counts aligned with `columns`.
    pub counts: Vec<u64>,
    /// Filtered brand rows.
    pub rows: Vec<CalendarRow>,
}

/// Render the calendar table into `area`.
pub fn render_calendar_table(
    frame: &mut Frame,
    area: Rect,
    data: &CalendarTableData,
    theme: &Theme,
) {
    let header_cells = std::iter::once(BRAND_COLUMN.to_string())
        .chain(data.columns.iter().cloned())
        .map(|h| Cell::from(h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    // The summary row is display-only; it sits first, before any data row.
    let summary_cells = std::iter::once(Cell::from(SUMMARY_ROW_LABEL).style(theme.table_summary))
        .chain(
            data.counts
                .iter()
                .map(|c| Cell::from(c.to_string()).style(theme.table_summary)),
        );
    let summary_row = Row::new(summary_cells).style(theme.table_summary);

    let data_rows = data.rows.iter().enumerate().map(|(i, row)| {
        let style = if i % 2 == 0 {
            theme.table_row
        } else {
            theme.table_row_alt
        };
        let cells = std::iter::once(Cell::from(truncate_display(&row.brand, MAX_CELL_WIDTH)))
            .chain(
                row.cells
                    .iter()
                    .map(|c| Cell::from(truncate_display(c, MAX_CELL_WIDTH))),
            );
        Row::new(cells).style(style)
    });

    let mut all_rows = vec![summary_row];
    all_rows.extend(data_rows);

    let mut widths = vec![Constraint::Length(14)];
    widths.extend(std::iter::repeat(Constraint::Min(10)).take(data.columns.len()));

    let table = Table::new(all_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Launch Grid "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the informational placeholder when narrowing leaves nothing to
/// show (no matching rows, or no period columns at all).
pub fn render_no_rows(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No launches match the current filters.",
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Adjust the filters or press 'c' to clear them.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Launch Grid "),
        ),
        area,
    );
}

/// Truncate `s` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut.
fn truncate_display(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        width += ch_width;
    }
    out.push('…');
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────
