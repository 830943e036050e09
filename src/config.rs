//! User settings: layout constants and view preferences.
//!
//! Stored as `settings.json` in the OS config directory. Every field has a
//! serde default so a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::drag::{DEFAULT_BAR_GAP, DEFAULT_DAY_WIDTH};
use crate::model::timeline::{MAX_DAY_WIDTH, MIN_DAY_WIDTH};

/// Upper bound for `lead_days` / `tail_days`.
pub const MAX_PADDING_DAYS: i64 = 3650;

/// Which grouping the upper timeline header row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeaderMode {
    #[default]
    Months,
    Weeks,
}

/// Pixel constants shared by the grid and the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub day_width: f32,
    pub row_height: f32,
    pub bar_gap: f32,
    pub bar_top_offset: f32,
    pub bar_height: f32,
    pub header_row_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            day_width: DEFAULT_DAY_WIDTH,
            row_height: 41.0,
            bar_gap: DEFAULT_BAR_GAP,
            bar_top_offset: 8.0,
            bar_height: 24.0,
            header_row_height: 22.0,
        }
    }
}

impl LayoutConfig {
    /// Height of the two-row timeline / grid header.
    pub fn header_height(&self) -> f32 {
        self.header_row_height * 2.0
    }

    fn validate(&self) -> Result<()> {
        validate_positive(self.day_width, "layout.day_width")?;
        validate_positive(self.row_height, "layout.row_height")?;
        validate_positive(self.bar_height, "layout.bar_height")?;
        validate_positive(self.header_row_height, "layout.header_row_height")?;
        validate_non_negative(self.bar_gap, "layout.bar_gap")?;
        validate_non_negative(self.bar_top_offset, "layout.bar_top_offset")?;
        Ok(())
    }
}

fn validate_positive(value: f32, field: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{field}: expected a positive number, got {value}")))
    }
}

fn validate_non_negative(value: f32, field: &str) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!("{field}: expected zero or more, got {value}")))
    }
}

fn validate_padding(days: i64, field: &str) -> Result<()> {
    if (0..=MAX_PADDING_DAYS).contains(&days) {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{field}: expected 0..={MAX_PADDING_DAYS}, got {days}"
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub layout: LayoutConfig,
    pub header_mode: HeaderMode,
    /// Days shown before the earliest task when fitting the window.
    pub lead_days: i64,
    /// Days shown after the latest task when fitting the window.
    pub tail_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            header_mode: HeaderMode::default(),
            lead_days: 7,
            tail_days: 30,
        }
    }
}

impl Settings {
    /// Resolve `settings.json` in the platform config directory.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "PlanGantt") {
            proj_dirs.config_dir().join("settings.json")
        } else {
            PathBuf::from(".").join("settings.json")
        }
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_or_default(&Self::default_path())
    }

    /// Load from `path`; a missing file gives defaults silently, a broken
    /// one gives defaults with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    /// Parse and validate `path`. An out-of-range `day_width` is clamped
    /// to the zoom limits; every other bad value is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        let clamped = settings.layout.day_width.clamp(MIN_DAY_WIDTH, MAX_DAY_WIDTH);
        if clamped != settings.layout.day_width {
            tracing::warn!(day_width = settings.layout.day_width, clamped, "day width out of range");
            settings.layout.day_width = clamped;
        }
        Ok(settings)
    }

    /// Reject values the layout and date math cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        validate_padding(self.lead_days, "lead_days")?;
        validate_padding(self.tail_days, "tail_days")?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Save to the default location. Failures are logged, never fatal.
    pub fn save(&self) {
        let path = Self::default_path();
        if let Err(e) = self.save_to(&path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save settings");
        }
    }
}
