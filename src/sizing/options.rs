//! Plugin-level options and the viewport state a reconcile step works on.

use crate::model::ColumnConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Relationship between the viewport and the total column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewportMode {
    /// Columns are sized without regard to the viewport; the grid scrolls.
    Independent,
    /// Columns are scaled (or `size_to_remaining` columns grown) to fill the viewport.
    #[default]
    FitColsToViewport,
    /// The viewport is resized to the total column width, within limits.
    FitViewportToCols,
}

impl ViewportMode {
    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewportMode::Independent => "Independent",
            ViewportMode::FitColsToViewport => "FitColsToViewport",
            ViewportMode::FitViewportToCols => "FitViewportToCols",
        }
    }

    /// Next mode in display order, wrapping around.
    pub fn cycle(self) -> Self {
        match self {
            ViewportMode::Independent => ViewportMode::FitColsToViewport,
            ViewportMode::FitColsToViewport => ViewportMode::FitViewportToCols,
            ViewportMode::FitViewportToCols => ViewportMode::Independent,
        }
    }
}

impl fmt::Display for ViewportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewportMode {
    type Err = ColumnConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "independent" | "scroll" | "ignoreviewport" | "sc" | "igv" => {
                Ok(ViewportMode::Independent)
            }
            "fitcolstoviewport" | "fitcols" | "fcv" | "fv" => Ok(ViewportMode::FitColsToViewport),
            "fitviewporttocols" | "fitviewport" | "fvc" | "fc" => {
                Ok(ViewportMode::FitViewportToCols)
            }
            _ => Err(ColumnConfigError::UnknownViewportMode {
                name: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for ViewportMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Global cap on non-Locked column widths.
pub const DEFAULT_MAX_COLUMN_WIDTH_PX: u32 = 800;

/// Safety pad added to the widest measured sample.
pub const DEFAULT_PADDING_PX: u32 = 1;

/// Plugin configuration, fixed for the duration of a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginOptions {
    /// How columns relate to the viewport.
    pub viewport_mode: ViewportMode,
    /// Fraction by which the columns may overflow the viewport before
    /// FitColsToViewport gives up and scrolls. `None` never gives up.
    pub switch_to_scroll_threshold_percent: Option<f64>,
    /// Lower limit for FitViewportToCols.
    pub min_viewport_width_px: Option<u32>,
    /// Upper limit for FitViewportToCols.
    pub max_viewport_width_px: Option<u32>,
    /// Cap on any non-Locked column, applied before per-column clamps.
    pub max_column_width_px: Option<u32>,
    /// Safety pad added to the widest sample.
    pub padding_px: u32,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            viewport_mode: ViewportMode::default(),
            switch_to_scroll_threshold_percent: None,
            min_viewport_width_px: None,
            max_viewport_width_px: None,
            max_column_width_px: Some(DEFAULT_MAX_COLUMN_WIDTH_PX),
            padding_px: DEFAULT_PADDING_PX,
        }
    }
}

impl PluginOptions {
    /// Merge only the fields present in `patch`.
    pub fn merge(&mut self, patch: PluginOptionsPatch) {
        if let Some(mode) = patch.viewport_mode {
            self.viewport_mode = mode;
        }
        if let Some(threshold) = patch.switch_to_scroll_threshold_percent {
            self.switch_to_scroll_threshold_percent = Some(threshold);
        }
        if let Some(min) = patch.min_viewport_width_px {
            self.min_viewport_width_px = Some(min);
        }
        if let Some(max) = patch.max_viewport_width_px {
            self.max_viewport_width_px = Some(max);
        }
        if let Some(cap) = patch.max_column_width_px {
            self.max_column_width_px = Some(cap);
        }
        if let Some(pad) = patch.padding_px {
            self.padding_px = pad;
        }
    }

    /// Viewport state for a pass against the given available width.
    pub fn viewport_state(&self, available_width_px: u32) -> ViewportState {
        ViewportState {
            available_width_px,
            mode: self.viewport_mode,
            min_viewport_width_px: self.min_viewport_width_px,
            max_viewport_width_px: self.max_viewport_width_px,
            switch_to_scroll_threshold_percent: self.switch_to_scroll_threshold_percent,
        }
    }
}

/// Partial options for `set_options`; also the `[plugin]` config table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginOptionsPatch {
    /// See [`PluginOptions::viewport_mode`].
    #[serde(default)]
    pub viewport_mode: Option<ViewportMode>,
    /// See [`PluginOptions::switch_to_scroll_threshold_percent`].
    #[serde(default)]
    pub switch_to_scroll_threshold_percent: Option<f64>,
    /// See [`PluginOptions::min_viewport_width_px`].
    #[serde(default)]
    pub min_viewport_width_px: Option<u32>,
    /// See [`PluginOptions::max_viewport_width_px`].
    #[serde(default)]
    pub max_viewport_width_px: Option<u32>,
    /// See [`PluginOptions::max_column_width_px`].
    #[serde(default)]
    pub max_column_width_px: Option<u32>,
    /// See [`PluginOptions::padding_px`].
    #[serde(default)]
    pub padding_px: Option<u32>,
}

/// Inputs of one reconcile step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Width the columns may use.
    pub available_width_px: u32,
    /// Mode to apply.
    pub mode: ViewportMode,
    /// Lower viewport limit.
    pub min_viewport_width_px: Option<u32>,
    /// Upper viewport limit.
    pub max_viewport_width_px: Option<u32>,
    /// Allowed overflow before falling back to scrolling.
    pub switch_to_scroll_threshold_percent: Option<f64>,
}

impl ViewportState {
    /// State with no limits and no threshold.
    pub fn new(available_width_px: u32, mode: ViewportMode) -> Self {
        Self {
            available_width_px,
            mode,
            min_viewport_width_px: None,
            max_viewport_width_px: None,
            switch_to_scroll_threshold_percent: None,
        }
    }

    /// Set the scroll threshold.
    pub fn with_threshold(mut self, percent: f64) -> Self {
        self.switch_to_scroll_threshold_percent = Some(percent);
        self
    }

    /// Set the viewport limits.
    pub fn with_viewport_limits(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_viewport_width_px = min;
        self.max_viewport_width_px = max;
        self
    }
}
