//! Bar-chart views: launches by brand per year, and the brand/quarter
//! pivot with its optional single-quarter focus chart.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use calendar_core::aggregate::{BrandYearChart, QuarterPivot};
use calendar_core::models::BRAND_COLUMN;

use crate::themes::Theme;

/// Render the grouped bar chart: one group per brand, one bar per year.
pub fn render_brand_year_chart(
    frame: &mut Frame,
    area: Rect,
    chart: &BrandYearChart,
    title: &str,
    theme: &Theme,
) {
    let mut widget = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {} ", title)),
        )
        .bar_width(6)
        .bar_gap(1)
        .group_gap(3)
        .label_style(theme.chart_label);

    for group in &chart.groups {
        let bars: Vec<Bar> = group
            .counts
            .iter()
            .enumerate()
            .map(|(year_idx, &count)| {
                Bar::default()
                    .value(count)
                    .label(Line::from(chart.years[year_idx].clone()))
                    .style(theme.series_style(year_idx))
                    .value_style(theme.bold)
            })
            .collect();
        widget = widget.data(
            BarGroup::default()
                .label(Line::from(group.brand.clone()))
                .bars(&bars),
        );
    }

    frame.render_widget(widget, area);
}

/// Render the (brand, quarter) × year pivot as a table, zero-filled cells
/// included.
pub fn render_quarter_pivot(frame: &mut Frame, area: Rect, pivot: &QuarterPivot, theme: &Theme) {
    let header_cells = [BRAND_COLUMN, "Quarter"]
        .into_iter()
        .map(String::from)
        .chain(pivot.years.iter().cloned())
        .map(|h| Cell::from(h).style(theme.table_header));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = pivot
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let cells = vec![
                Cell::from(row.brand.clone()),
                Cell::from(row.quarter.label()),
            ]
            .into_iter()
            .chain(row.counts.iter().map(|c| Cell::from(c.to_string())));
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Length(14), Constraint::Length(8)];
    widths.extend(std::iter::repeat(Constraint::Length(8)).take(pivot.years.len()));

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Launches by Brand per Quarter "),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the informational placeholder when the filtered event collection
/// is empty.
pub fn render_no_launches(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No launches to display for current filter.",
            theme.info,
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
                .title(" Charts "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
