use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by calendar-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Filter bar ───────────────────────────────────────────────────────────
    /// Label of a selector (`Year:`, `Month:`, ...).
    pub selector_label: Style,
    /// Currently selected value of a selector.
    pub selector_value: Style,
    /// Search box while search-input mode is active.
    pub search_active: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    /// The synthetic "Count" summary row.
    pub table_summary: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Per-year bar colours, cycled when a chart spans more years.
    pub series: [Style; 6],
    /// Bar group (brand) labels.
    pub chart_label: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            selector_label: Style::default().fg(Color::Gray),
            selector_value: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            search_active: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_summary: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            series: [
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Red),
            ],
            chart_label: Style::default().fg(Color::Gray),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            selector_label: Style::default().fg(Color::DarkGray),
            selector_value: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            search_active: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_summary: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            series: [
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Magenta),
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Red),
            ],
            chart_label: Style::default().fg(Color::DarkGray),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Bar style for the year at `index` in a chart's year list.
    pub fn series_style(&self, index: usize) -> Style {
        self.series[index % self.series.len()]
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
