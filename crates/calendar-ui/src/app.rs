//! Main application state and TUI event loop for the Launch Calendar.
//!
//! [`App`] owns the theme, the active view, and the selector positions. It
//! recomputes the narrowed table and the chart aggregations from the cached
//! table on every frame; the passes are pure and the grids are small, so
//! there is no per-view cache to invalidate.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};

use calendar_core::aggregate::{
    self, by_brand_quarter, by_brand_year, expand_events, filter_events, quarter_focus,
};
use calendar_core::error::Result;
use calendar_core::filter::FilterSet;
use calendar_core::models::Quarter;
use calendar_core::schema::Schema;
use calendar_data::store::{LoadedTable, TableStore};

use crate::chart_view;
use crate::filter_bar::{self, FilterBarData};
use crate::table_view::{self, CalendarRow, CalendarTableData};
use crate::themes::Theme;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The wide launch grid with the summary count row.
    Calendar,
    /// Launch counts grouped by brand and year.
    BrandYear,
    /// The (brand, quarter) pivot, with an optional single-quarter chart.
    BrandQuarter,
}

impl ViewMode {
    /// The view reached by pressing Tab.
    pub fn next(self) -> Self {
        match self {
            ViewMode::Calendar => ViewMode::BrandYear,
            ViewMode::BrandYear => ViewMode::BrandQuarter,
            ViewMode::BrandQuarter => ViewMode::Calendar,
        }
    }

    /// Title shown in the filter bar.
    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Calendar => "Calendar",
            ViewMode::BrandYear => "Launches by Year",
            ViewMode::BrandQuarter => "Launches by Quarter",
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Launch Calendar TUI.
///
/// Selector positions are indices into the derived [`Schema`] domains,
/// shifted by one: position 0 is always the "All" choice.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Year selector position (0 = All).
    pub year_idx: usize,
    /// Month selector position (0 = All).
    pub month_idx: usize,
    /// Brand selector position (0 = All).
    pub brand_idx: usize,
    /// Quarter selector position (0 = All, 1..=4 = Q1..Q4).
    pub quarter_idx: usize,
    /// `true` while keystrokes edit the search text.
    pub search_mode: bool,
    /// Current search text, applied as it is typed.
    pub search_input: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, view_mode: ViewMode) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            year_idx: 0,
            month_idx: 0,
            brand_idx: 0,
            quarter_idx: 0,
            search_mode: false,
            search_input: String::new(),
            should_quit: false,
        }
    }

    // ── Selector state ────────────────────────────────────────────────────────

    /// The currently selected quarter, `None` for "All".
    pub fn selected_quarter(&self) -> Option<Quarter> {
        match self.quarter_idx {
            0 => None,
            i => Some(Quarter::ALL[i - 1]),
        }
    }

    /// Translate the selector positions into the filter engine's terms.
    ///
    /// Values are taken from `schema`, which keeps the engine's domain
    /// precondition discharged by construction.
    pub fn filter_set(&self, schema: &Schema) -> FilterSet {
        FilterSet {
            year: match self.year_idx {
                0 => None,
                i => schema.years.get(i - 1).cloned(),
            },
            month: match self.month_idx {
                0 => None,
                i => schema.months.get(i - 1).copied(),
            },
            brand: match self.brand_idx {
                0 => None,
                i => schema.brands.get(i - 1).cloned(),
            },
            search: self.search_input.clone(),
        }
    }

    /// Pull every selector back into range after a reload shrank a domain.
    pub fn clamp_selectors(&mut self, schema: &Schema) {
        if self.year_idx > schema.years.len() {
            self.year_idx = 0;
        }
        if self.month_idx > schema.months.len() {
            self.month_idx = 0;
        }
        if self.brand_idx > schema.brands.len() {
            self.brand_idx = 0;
        }
    }

    /// Reset every selector and the search text.
    pub fn clear_filters(&mut self) {
        self.year_idx = 0;
        self.month_idx = 0;
        self.brand_idx = 0;
        self.quarter_idx = 0;
        self.search_input.clear();
        self.search_mode = false;
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    ///
    /// Returns `true` when the key asked for a reload of the grid file; the
    /// event loop owns the store and performs the reload itself.
    pub fn handle_key(&mut self, key: KeyEvent, schema: &Schema) -> bool {
        // Ctrl+C quits from any mode, including search input.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return false;
        }

        if self.search_mode {
            match key.code {
                KeyCode::Enter => self.search_mode = false,
                KeyCode::Esc => {
                    self.search_input.clear();
                    self.search_mode = false;
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Char(c) => self.search_input.push(c),
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab => self.view_mode = self.view_mode.next(),
            KeyCode::Char('y') => cycle(&mut self.year_idx, schema.years.len(), true),
            KeyCode::Char('Y') => cycle(&mut self.year_idx, schema.years.len(), false),
            KeyCode::Char('m') => cycle(&mut self.month_idx, schema.months.len(), true),
            KeyCode::Char('M') => cycle(&mut self.month_idx, schema.months.len(), false),
            KeyCode::Char('b') => cycle(&mut self.brand_idx, schema.brands.len(), true),
            KeyCode::Char('B') => cycle(&mut self.brand_idx, schema.brands.len(), false),
            KeyCode::Char(c @ '1'..='4') => {
                self.quarter_idx = c.to_digit(10).unwrap_or(0) as usize;
            }
            KeyCode::Char('0') => self.quarter_idx = 0,
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Char('c') => self.clear_filters(),
            KeyCode::Char('r') => return true,
            _ => {}
        }
        false
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// the terminal event loop stays on the current thread. The store is
    /// borrowed for the whole loop; reloads happen in place when the user
    /// presses `r`.
    pub async fn run(mut self, store: &mut TableStore) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            let loaded = match store.get() {
                Ok(loaded) => loaded.clone(),
                Err(err) => break Err(err),
            };
            self.clamp_selectors(&loaded.schema);

            if let Err(err) = terminal.draw(|frame| self.render(frame, &loaded)) {
                break Err(err.into());
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        let reload = self.handle_key(key, &loaded.schema);
                        if reload {
                            if let Err(err) = store.reload() {
                                // Keep running; the next get() retries.
                                tracing::warn!(error = %err, "reload failed");
                            }
                        }
                    }
                    Ok(_) => {}
                    Err(err) => break Err(err.into()),
                },
                Ok(false) => {}
                Err(err) => break Err(err.into()),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame, loaded: &LoadedTable) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(frame.area());

        let filters = self.filter_set(&loaded.schema);
        self.render_filter_bar(frame, chunks[0], &loaded.schema);

        match self.view_mode {
            ViewMode::Calendar => self.render_calendar(frame, chunks[1], loaded, &filters),
            ViewMode::BrandYear => self.render_brand_year(frame, chunks[1], loaded, &filters),
            ViewMode::BrandQuarter => self.render_brand_quarter(frame, chunks[1], loaded, &filters),
        }
    }

    fn render_filter_bar(&self, frame: &mut Frame, area: Rect, schema: &Schema) {
        let pick = |idx: usize, domain: &[String]| match idx {
            0 => "All".to_string(),
            i => domain.get(i - 1).cloned().unwrap_or_else(|| "All".to_string()),
        };

        let data = FilterBarData {
            view_title: self.view_mode.title().to_string(),
            year: pick(self.year_idx, &schema.years),
            month: match self.month_idx {
                0 => "All".to_string(),
                i => schema
                    .months
                    .get(i - 1)
                    .map(|m| m.abbrev().to_string())
                    .unwrap_or_else(|| "All".to_string()),
            },
            brand: pick(self.brand_idx, &schema.brands),
            quarter: match self.selected_quarter() {
                Some(q) => q.label().to_string(),
                None => "All".to_string(),
            },
            search: self.search_input.clone(),
            search_mode: self.search_mode,
        };
        filter_bar::render_filter_bar(frame, area, &data, &self.theme);
    }

    fn render_calendar(
        &self,
        frame: &mut Frame,
        area: Rect,
        loaded: &LoadedTable,
        filters: &FilterSet,
    ) {
        let view = filters.apply(&loaded.table);
        if view.rows.is_empty() || view.columns.is_empty() {
            table_view::render_no_rows(frame, area, &self.theme);
            return;
        }

        let columns = view
            .columns
            .iter()
            .map(|&col| loaded.table.periods[col].label())
            .collect();
        let counts = aggregate::summary_counts(&loaded.table, &view);
        let rows = view
            .rows
            .iter()
            .map(|&row| CalendarRow {
                brand: loaded.table.rows[row].brand.clone(),
                cells: view
                    .columns
                    .iter()
                    .map(|&col| loaded.table.cell(row, col).display())
                    .collect(),
            })
            .collect();

        let data = CalendarTableData {
            columns,
            counts,
            rows,
        };
        table_view::render_calendar_table(frame, area, &data, &self.theme);
    }

    fn render_brand_year(
        &self,
        frame: &mut Frame,
        area: Rect,
        loaded: &LoadedTable,
        filters: &FilterSet,
    ) {
        let events = filter_events(&expand_events(&loaded.table), filters);
        match by_brand_year(&events) {
            Some(chart) => chart_view::render_brand_year_chart(
                frame,
                area,
                &chart,
                "Launches by Brand per Year",
                &self.theme,
            ),
            None => chart_view::render_no_launches(frame, area, &self.theme),
        }
    }

    fn render_brand_quarter(
        &self,
        frame: &mut Frame,
        area: Rect,
        loaded: &LoadedTable,
        filters: &FilterSet,
    ) {
        let events = filter_events(&expand_events(&loaded.table), filters);
        let pivot = match by_brand_quarter(&events) {
            Some(pivot) => pivot,
            None => {
                chart_view::render_no_launches(frame, area, &self.theme);
                return;
            }
        };

        match self.selected_quarter() {
            None => chart_view::render_quarter_pivot(frame, area, &pivot, &self.theme),
            Some(quarter) => {
                let halves = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                chart_view::render_quarter_pivot(frame, halves[0], &pivot, &self.theme);
                match quarter_focus(&events, quarter) {
                    Some(chart) => {
                        let title = format!("Launches in {}", quarter.label());
                        chart_view::render_brand_year_chart(
                            frame,
                            halves[1],
                            &chart,
                            &title,
                            &self.theme,
                        );
                    }
                    None => chart_view::render_no_launches(frame, halves[1], &self.theme),
                }
            }
        }
    }
}

/// Step a selector position through its domain plus the leading "All" slot,
/// wrapping at both ends.
fn cycle(idx: &mut usize, domain_len: usize, forward: bool) {
    let slots = domain_len + 1;
    *idx = if forward {
        (*idx + 1) % slots
    } else {
        (*idx + slots - 1) % slots
    };
}

// ── Tests ──────────────────────────────────────────────────────────────────────
