use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Interactive shoe launch calendar browser
#[derive(Parser, Debug, Clone)]
#[command(
    name = "launch-calendar",
    about = "Browse shoe launches per brand per month in the terminal",
    version
)]
pub struct Settings {
    /// Path to the launch grid CSV file (auto-discovered if not specified)
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Initial view
    #[arg(long, default_value = "calendar", value_parser = ["calendar", "brand-year", "brand-quarter"])]
    pub view: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.launch-calendar/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.launch-calendar/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".launch-calendar").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent
    /// directories if needed.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default config file if it exists.
    pub fn clear() -> Result<(), std::io::Error> {
        Self::clear_at(&Self::config_path())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit
    /// CLI value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] but accepts an explicit
    /// argument list, enabling unit-testing without spawning subprocesses.
    pub fn load_with_last_used_from_args(args: Vec<std::ffi::OsString>) -> Self {
        Self::load_with_last_used_impl(args, &LastUsedParams::config_path())
    }

    /// Full implementation – accepts args and an explicit config path so
    /// that tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins). 'data_file' is never loaded
        // from last-used.
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }

        settings = Self::apply_debug(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.clone()),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Build the config path inside `tmp`.
    fn tmp_config_path(tmp: &TempDir) -> PathBuf {
        LastUsedParams::config_path_in(tmp.path())
    }

    // ── test_last_used_params_save_load ───────────────────────────────────────

    #[test]
    fn test_last_used_params_save_load() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);
        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("brand-year".to_string()),
        };

        params.save_to(&path).expect("save");
        let loaded = LastUsedParams::load_from(&path);

        assert_eq!(loaded.theme, Some("dark".to_string()));
        assert_eq!(loaded.view, Some("brand-year".to_string()));
    }

    #[test]
    fn test_last_used_params_clear() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("light".to_string()),
            ..Default::default()
        };
        params.save_to(&path).expect("save");
        assert!(path.exists(), "file must exist after save");

        LastUsedParams::clear_at(&path).expect("clear");
        assert!(!path.exists(), "file must be gone after clear");
    }

    #[test]
    fn test_last_used_params_default_when_missing() {
        let tmp = TempDir::new().expect("tempdir");
        let loaded = LastUsedParams::load_from(&tmp_config_path(&tmp));
        assert!(loaded.theme.is_none());
        assert!(loaded.view.is_none());
    }

    // ── test_settings_default_values ─────────────────────────────────────────

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::parse_from(["launch-calendar"]);

        assert!(settings.data_file.is_none());
        assert_eq!(settings.view, "calendar");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.debug);
        assert!(!settings.clear);
    }

    #[test]
    fn test_settings_cli_data_file() {
        let settings = Settings::parse_from(["launch-calendar", "--data-file", "/tmp/grid.csv"]);
        assert_eq!(settings.data_file, Some(PathBuf::from("/tmp/grid.csv")));
    }

    #[test]
    fn test_settings_cli_debug_flag() {
        let settings = Settings::parse_from(["launch-calendar", "--debug"]);
        assert!(settings.debug);
    }

    // ── test_load_with_last_used (uses config path injection) ─────────────────

    #[test]
    fn test_load_with_last_used_merges_persisted_theme() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("calendar".to_string()),
        };
        params.save_to(&config_path).expect("save");

        // Parse without --theme flag → should use persisted value.
        let settings =
            Settings::load_with_last_used_impl(vec!["launch-calendar".into()], &config_path);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_load_with_last_used_cli_overrides_persisted() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            view: Some("brand-quarter".to_string()),
        };
        params.save_to(&config_path).expect("save");

        let settings = Settings::load_with_last_used_impl(
            vec!["launch-calendar".into(), "--theme".into(), "light".into()],
            &config_path,
        );
        assert_eq!(settings.theme, "light");
        // View still comes from the persisted file.
        assert_eq!(settings.view, "brand-quarter");
    }

    #[test]
    fn test_load_with_last_used_clear_removes_file() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let params = LastUsedParams {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        params.save_to(&config_path).expect("save");
        assert!(config_path.exists(), "file must exist before clear");

        Settings::load_with_last_used_impl(
            vec!["launch-calendar".into(), "--clear".into()],
            &config_path,
        );

        assert!(!config_path.exists(), "file must be gone after --clear");
    }

    #[test]
    fn test_load_with_last_used_debug_overrides_log_level() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        let settings = Settings::load_with_last_used_impl(
            vec!["launch-calendar".into(), "--debug".into()],
            &config_path,
        );
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_load_with_last_used_persists_after_run() {
        let tmp = TempDir::new().expect("tempdir");
        let config_path = tmp_config_path(&tmp);

        Settings::load_with_last_used_impl(
            vec!["launch-calendar".into(), "--view".into(), "brand-year".into()],
            &config_path,
        );

        assert!(
            config_path.exists(),
            "config file must be persisted after run"
        );
        let loaded = LastUsedParams::load_from(&config_path);
        assert_eq!(loaded.view, Some("brand-year".to_string()));
    }
}
