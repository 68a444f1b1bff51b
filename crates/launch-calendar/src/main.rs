mod bootstrap;

use anyhow::{Context, Result};
use calendar_core::error::CalendarError;
use calendar_core::settings::Settings;
use calendar_data::store::TableStore;
use calendar_ui::app::{App, ViewMode};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Launch Calendar v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let grid_path = match settings.data_file.clone() {
        Some(path) => path,
        None => bootstrap::discover_grid_file()
            .ok_or_else(|| {
                CalendarError::DataFileNotFound(bootstrap::DEFAULT_GRID_FILE.into())
            })
            .context("pass --data-file or place the grid in the current directory or in ~/.launch-calendar/")?,
    };
    tracing::info!(path = %grid_path.display(), "using launch grid");

    let mut store = TableStore::new(&grid_path);
    // Fail fast on an unreadable or malformed grid before touching the
    // terminal.
    store.get()?;

    let view_mode = match settings.view.as_str() {
        "brand-year" => ViewMode::BrandYear,
        "brand-quarter" => ViewMode::BrandQuarter,
        _ => ViewMode::Calendar,
    };

    let app = App::new(&settings.theme, view_mode);
    app.run(&mut store).await?;

    Ok(())
}
