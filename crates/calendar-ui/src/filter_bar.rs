//! The filter bar shown above every view: the four selector values, the
//! search box, and a key-binding help line.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Display values for the filter bar. Selector fields carry the literal
/// `"All"` sentinel when unconstrained, mirroring the selector domains.
#[derive(Debug, Clone)]
pub struct FilterBarData {
    /// Title of the active view, e.g. `"Calendar"`.
    pub view_title: String,
    /// Selected year or `"All"`.
    pub year: String,
    /// Selected month abbreviation or `"All"`.
    pub month: String,
    /// Selected brand or `"All"`.
    pub brand: String,
    /// Selected quarter label or `"All"` (focused chart only).
    pub quarter: String,
    /// Current search text, possibly empty.
    pub search: String,
    /// `true` while the user is typing into the search box.
    pub search_mode: bool,
}

/// Render the filter bar into `area` (expects a height of 4 rows: two text
/// lines inside a bordered block).
pub fn render_filter_bar(frame: &mut Frame, area: Rect, data: &FilterBarData, theme: &Theme) {
    let selector = |label: &str, value: &str| {
        vec![
            Span::styled(format!("{label}: "), theme.selector_label),
            Span::styled(value.to_string(), theme.selector_value),
            Span::raw("   "),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    spans.extend(selector("Year", &data.year));
    spans.extend(selector("Month", &data.month));
    spans.extend(selector("Brand", &data.brand));
    spans.extend(selector("Quarter", &data.quarter));

    spans.push(Span::styled("Search: ", theme.selector_label));
    let search_style = if data.search_mode {
        theme.search_active
    } else {
        theme.selector_value
    };
    if data.search.is_empty() && !data.search_mode {
        spans.push(Span::styled(
            "type / to search for a shoe".to_string(),
            theme.dim,
        ));
    } else {
        spans.push(Span::styled(data.search.clone(), search_style));
        if data.search_mode {
            // Block cursor while typing.
            spans.push(Span::styled("█", theme.search_active));
        }
    }

    let help = if data.search_mode {
        "Enter commit   Esc clear   Backspace delete"
    } else {
        "Tab view   y/m/b cycle filters   1-4 quarter   0 all quarters   / search   c clear   r reload   q quit"
    };

    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(help, theme.dim)),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.table_border)
            .title(format!(" Shoe Launch Calendar: {} ", data.view_title)),
    );
    frame.render_widget(paragraph, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn data() -> FilterBarData {
        FilterBarData {
            view_title: "Calendar".to_string(),
            year: "All".to_string(),
            month: "Jan".to_string(),
            brand: "Nike".to_string(),
            quarter: "All".to_string(),
            search: String::new(),
            search_mode: false,
        }
    }

    #[test]
    fn test_render_filter_bar_does_not_panic() {
        let backend = TestBackend::new(120, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_filter_bar(frame, area, &data(), &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_filter_bar_shows_selections() {
        let backend = TestBackend::new(120, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_filter_bar(frame, area, &data(), &theme);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect();
        assert!(content.contains("Year"));
        assert!(content.contains("Nike"));
        assert!(content.contains("Jan"));
    }

    #[test]
    fn test_render_filter_bar_search_mode_cursor() {
        let backend = TestBackend::new(120, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let mut d = data();
        d.search = "zoom".to_string();
        d.search_mode = true;

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_filter_bar(frame, area, &d, &theme);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect();
        assert!(content.contains("zoom"));
    }
}
