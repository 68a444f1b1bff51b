//! Process-wide cached table store.
//!
//! The grid file is read at most once per process lifetime; every filter
//! and aggregation pass works on the cached [`LaunchTable`] because those
//! passes are pure and never mutate it. Invalidation is explicit: callers
//! either force a [`TableStore::reload`] (the UI's `r` key) or ask
//! [`TableStore::refresh_if_changed`] to compare the file's modification
//! time against the one recorded at load.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use calendar_core::error::{CalendarError, Result};
use calendar_core::models::LaunchTable;
use calendar_core::schema::Schema;
use tracing::{debug, info};

use crate::loader::load_table;

// ── LoadedTable ───────────────────────────────────────────────────────────────

/// The loaded grid plus its derived selector domains, cached together so
/// that the schema is derived exactly once per load.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// The parsed launch grid.
    pub table: LaunchTable,
    /// Selector domains derived from the grid.
    pub schema: Schema,
}

// ── TableStore ────────────────────────────────────────────────────────────────

/// Load-once cache around [`load_table`] with explicit invalidation.
pub struct TableStore {
    /// Path of the grid file.
    path: PathBuf,
    /// Cached table, `None` until the first [`TableStore::get`].
    cache: Option<LoadedTable>,
    /// Modification time of the file at the moment it was loaded.
    loaded_mtime: Option<SystemTime>,
}

impl TableStore {
    /// Create a store for the grid at `path`. Nothing is read until the
    /// first [`TableStore::get`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
            loaded_mtime: None,
        }
    }

    /// Path of the underlying grid file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached table, loading it on first call.
    pub fn get(&mut self) -> Result<&LoadedTable> {
        if self.cache.is_none() {
            self.load_into_cache()?;
        }
        match self.cache.as_ref() {
            Some(loaded) => Ok(loaded),
            None => Err(CalendarError::Config(
                "table cache empty after load".to_string(),
            )),
        }
    }

    /// Discard the cache so the next [`TableStore::get`] reads the file
    /// again.
    pub fn invalidate(&mut self) {
        self.cache = None;
        self.loaded_mtime = None;
        debug!("table cache invalidated");
    }

    /// Force a fresh read of the grid file.
    pub fn reload(&mut self) -> Result<&LoadedTable> {
        self.invalidate();
        self.get()
    }

    /// Reload only when the file's modification time differs from the one
    /// recorded at load. Returns `true` when a reload happened.
    pub fn refresh_if_changed(&mut self) -> Result<bool> {
        if self.cache.is_none() {
            self.get()?;
            return Ok(true);
        }

        let current = file_mtime(&self.path);
        if current == self.loaded_mtime {
            return Ok(false);
        }

        info!(path = %self.path.display(), "grid file changed on disk; reloading");
        self.reload()?;
        Ok(true)
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn load_into_cache(&mut self) -> Result<()> {
        let table = load_table(&self.path)?;
        let schema = Schema::derive(&table);
        debug!(
            brands = schema.brands.len(),
            years = schema.years.len(),
            "table cache populated"
        );
        self.loaded_mtime = file_mtime(&self.path);
        self.cache = Some(LoadedTable { table, schema });
        Ok(())
    }
}

/// Modification time of `path`, or `None` when unavailable (the next
/// comparison then always reloads, which is the safe direction).
fn file_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn grid_file(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("grid.csv");
        let mut file = std::fs::File::create(&path).expect("create grid");
        file.write_all(content.as_bytes()).expect("write grid");
        path
    }

    #[test]
    fn test_get_loads_once_and_caches() {
        let dir = TempDir::new().expect("tempdir");
        let path = grid_file(&dir, "brand,2024-Jan\nNike,AirMax\n");
        let mut store = TableStore::new(&path);

        {
            let loaded = store.get().expect("first load");
            assert_eq!(loaded.table.rows.len(), 1);
            assert_eq!(loaded.schema.brands, ["Nike"]);
        }

        // Rewriting the file does not affect the cache until invalidation.
        std::fs::write(&path, "brand,2024-Jan\nNike,AirMax\nAdidas,Samba\n").expect("rewrite");
        let loaded = store.get().expect("cached");
        assert_eq!(loaded.table.rows.len(), 1);
    }

    #[test]
    fn test_reload_picks_up_new_content() {
        let dir = TempDir::new().expect("tempdir");
        let path = grid_file(&dir, "brand,2024-Jan\nNike,AirMax\n");
        let mut store = TableStore::new(&path);
        store.get().expect("first load");

        std::fs::write(&path, "brand,2024-Jan\nNike,AirMax\nAdidas,Samba\n").expect("rewrite");
        let loaded = store.reload().expect("reload");
        assert_eq!(loaded.table.rows.len(), 2);
        assert_eq!(loaded.schema.brands, ["Adidas", "Nike"]);
    }

    #[test]
    fn test_invalidate_forces_next_get_to_read() {
        let dir = TempDir::new().expect("tempdir");
        let path = grid_file(&dir, "brand,2024-Jan\nNike,AirMax\n");
        let mut store = TableStore::new(&path);
        store.get().expect("first load");

        std::fs::write(&path, "brand,2024-Jan\nPuma,Velocity\n").expect("rewrite");
        store.invalidate();
        let loaded = store.get().expect("fresh load");
        assert_eq!(loaded.schema.brands, ["Puma"]);
    }

    #[test]
    fn test_refresh_if_changed_loads_initially() {
        let dir = TempDir::new().expect("tempdir");
        let path = grid_file(&dir, "brand,2024-Jan\nNike,AirMax\n");
        let mut store = TableStore::new(&path);

        assert!(store.refresh_if_changed().expect("initial load"));
        // Unchanged file: no reload.
        assert!(!store.refresh_if_changed().expect("no change"));
    }

    #[test]
    fn test_refresh_if_changed_detects_mtime_change() {
        let dir = TempDir::new().expect("tempdir");
        let path = grid_file(&dir, "brand,2024-Jan\nNike,AirMax\n");
        let mut store = TableStore::new(&path);
        store.get().expect("first load");

        // Rewrite and push the mtime forward explicitly so the test does
        // not depend on filesystem timestamp granularity.
        std::fs::write(&path, "brand,2024-Jan\nNike,\"AirMax, Zoom\"\n").expect("rewrite");
        let future = SystemTime::now() + std::time::Duration::from_secs(10);
        let file = std::fs::File::options()
            .append(true)
            .open(&path)
            .expect("open");
        file.set_modified(future).expect("set mtime");

        assert!(store.refresh_if_changed().expect("reload"));
        let loaded = store.get().expect("cached");
        assert_eq!(loaded.table.rows[0].cells[0].count(), 2);
    }

    #[test]
    fn test_load_failure_surfaces_error() {
        let mut store = TableStore::new("/definitely/not/here.csv");
        let err = store.get().unwrap_err();
        assert!(matches!(err, CalendarError::FileRead { .. }));
        // A later successful path can still be retried after invalidation.
        assert!(store.get().is_err());
    }
}
