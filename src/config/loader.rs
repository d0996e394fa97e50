//! Configuration file loading with precedence handling.

use crate::model::{AutoWidthStrategy, CellValue, ColumnConfigError, ColumnSpec};
use crate::sizing::{PluginOptions, PluginOptionsPatch, ViewportMode};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/gridfit/config.toml`:
///
/// ```toml
/// log_file_path = "/tmp/gridfit.log"
///
/// [plugin]
/// viewport_mode = "FitColsToViewport"
/// switch_to_scroll_threshold_percent = 0.25
///
/// [column_defaults]
/// strategy = "TOPN"
/// check_row_count = 50
///
/// [columns.id]
/// strategy = "Locked"
/// width_px = 6
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Plugin-level options.
    #[serde(default)]
    pub plugin: Option<PluginOptionsPatch>,

    /// Applied to every column before its own override.
    #[serde(default)]
    pub column_defaults: Option<ColumnOverride>,

    /// Per-column overrides keyed by column id.
    #[serde(default)]
    pub columns: HashMap<String, ColumnOverride>,
}

/// Sizing settings for one column (or all columns, as `[column_defaults]`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnOverride {
    /// Strategy name or short code (`"Locked"`, `"GU"`, `"TOPN"`, ...).
    #[serde(default)]
    pub strategy: Option<String>,
    /// Locked width or Guide floor.
    #[serde(default)]
    pub width_px: Option<u32>,
    /// Lower clamp.
    #[serde(default)]
    pub min_width_px: Option<u32>,
    /// Upper clamp.
    #[serde(default)]
    pub max_width_px: Option<u32>,
    /// Whether the column may be resized.
    #[serde(default)]
    pub resizable: Option<bool>,
    /// Skip the header when measuring.
    #[serde(default)]
    pub ignore_header_text: Option<bool>,
    /// Absorb leftover viewport space.
    #[serde(default)]
    pub size_to_remaining: Option<bool>,
    /// Share of leftover space.
    #[serde(default)]
    pub remaining_weight: Option<f64>,
    /// Rows sampled by TopNRows.
    #[serde(default)]
    pub check_row_count: Option<usize>,
    /// Measure each distinct value once.
    #[serde(default)]
    pub de_duplicate: Option<bool>,
    /// Widest expected values, measured instead of the rows.
    #[serde(default)]
    pub col_values: Option<Vec<String>>,
}

impl ColumnOverride {
    /// Apply every present field to `column`.
    ///
    /// # Errors
    ///
    /// [`ColumnConfigError::UnknownStrategy`] if the strategy name does not
    /// parse; `column` is left untouched in that case.
    pub fn apply_to(&self, column: &mut ColumnSpec) -> Result<(), ColumnConfigError> {
        let strategy = self
            .strategy
            .as_deref()
            .map(|name| name.parse::<AutoWidthStrategy>())
            .transpose()?;

        let opts = &mut column.auto_size;
        if let Some(strategy) = strategy {
            opts.strategy = strategy;
        }
        if let Some(width) = self.width_px {
            opts.width_px = Some(width);
        }
        if let Some(min) = self.min_width_px {
            opts.min_width_px = Some(min);
        }
        if let Some(max) = self.max_width_px {
            opts.max_width_px = Some(max);
        }
        if let Some(ignore) = self.ignore_header_text {
            opts.ignore_header_text = ignore;
        }
        if let Some(remaining) = self.size_to_remaining {
            opts.size_to_remaining = remaining;
        }
        if let Some(weight) = self.remaining_weight {
            opts.remaining_weight = Some(weight);
        }
        if let Some(count) = self.check_row_count {
            opts.check_row_count = count;
        }
        if let Some(dedup) = self.de_duplicate {
            opts.de_duplicate = dedup;
        }
        if let Some(values) = &self.col_values {
            opts.col_value_array = Some(values.iter().map(|v| CellValue::from(v.as_str())).collect());
        }
        if let Some(resizable) = self.resizable {
            column.resizable = resizable;
        }
        Ok(())
    }
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Plugin options after all layers were merged.
    pub plugin: PluginOptions,
    /// Overrides applied to every column first.
    pub column_defaults: Option<ColumnOverride>,
    /// Per-column overrides keyed by column id.
    pub columns: HashMap<String, ColumnOverride>,
    /// Fixed viewport width in terminal cells; `None` uses the terminal width.
    pub viewport_width_cells: Option<u16>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            plugin: PluginOptions::default(),
            column_defaults: None,
            columns: HashMap::new(),
            viewport_width_cells: None,
        }
    }
}

impl ResolvedConfig {
    /// Apply `[column_defaults]` and then `[columns.<id>]` to each column.
    ///
    /// A bad override is logged and skipped for that column only. Returns the
    /// problems found.
    pub fn configure_columns(&self, columns: &mut [ColumnSpec]) -> Vec<ColumnConfigError> {
        let mut problems = Vec::new();
        for column in columns.iter_mut() {
            let overrides = self
                .column_defaults
                .iter()
                .chain(self.columns.get(column.id.as_str()));
            for over in overrides {
                if let Err(err) = over.apply_to(column) {
                    warn!(column = %column.id, error = %err, "Skipping column override");
                    problems.push(err);
                }
            }
        }
        problems
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/gridfit/gridfit.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("gridfit").join("gridfit.log")
    } else {
        PathBuf::from("gridfit.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/gridfit/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gridfit").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `GRIDFIT_CONFIG` environment variable
/// 3. Default path `~/.config/gridfit/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("GRIDFIT_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `GRIDFIT_VIEWPORT_MODE`: Override viewport mode (ignored with a warning
///   if it does not parse)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("GRIDFIT_VIEWPORT_MODE") {
        match raw.parse::<ViewportMode>() {
            Ok(mode) => config.plugin.viewport_mode = mode,
            Err(err) => warn!(error = %err, "Ignoring GRIDFIT_VIEWPORT_MODE"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();

    let Some(config) = config_file else {
        return resolved;
    };

    if let Some(path) = config.log_file_path {
        resolved.log_file_path = path;
    }
    if let Some(patch) = config.plugin {
        resolved.plugin.merge(patch);
    }
    resolved.column_defaults = config.column_defaults;
    resolved.columns = config.columns;
    resolved
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    mode_override: Option<ViewportMode>,
    width_override: Option<u16>,
) -> ResolvedConfig {
    if let Some(mode) = mode_override {
        config.plugin.viewport_mode = mode;
    }

    if let Some(width) = width_override {
        config.viewport_width_cells = Some(width);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
