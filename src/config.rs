use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::params::ParameterSet;
use crate::ramp::{ColorRamp, ColorStop};

pub const DEFAULT_RAMP: &str = "sunset";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub fps_cap: u32,
    pub show_hud: bool,
    /// Device pixels covered by one terminal column.
    pub cell_width: f32,
    /// Device pixels covered by one terminal row (two half-block samples).
    pub cell_height: f32,
    /// Built-in ramp used when `ramp` is empty.
    pub ramp_preset: String,
    /// Custom stops; takes precedence over `ramp_preset`.
    pub ramp: Vec<ColorStop>,
    pub params: ParameterSet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps_cap: 30,
            show_hud: true,
            cell_width: 8.0,
            cell_height: 16.0,
            ramp_preset: DEFAULT_RAMP.to_string(),
            ramp: Vec::new(),
            params: ParameterSet::default(),
        }
    }
}

impl Settings {
    pub fn color_ramp(&self) -> Result<ColorRamp> {
        if !self.ramp.is_empty() {
            return ColorRamp::new(self.ramp.clone()).context("invalid color ramp in settings");
        }
        ColorRamp::preset(&self.ramp_preset).with_context(|| {
            format!(
                "unknown ramp preset {:?} (expected one of {})",
                self.ramp_preset,
                crate::ramp::PRESET_NAMES.join(", ")
            )
        })
    }
}

/// `settings.json` under the platform config directory, if one exists.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "wavegradient", "wavegradient")
        .map(|proj| proj.config_dir().join("settings.json"))
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("could not read settings file {}", path.display()))?;
    let settings = serde_json::from_str::<Settings>(&text)
        .with_context(|| format!("could not parse settings file {}", path.display()))?;
    info!(path = %path.display(), "loaded settings");
    Ok(settings)
}

/// An explicit path must exist; the default location is optional.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings_from(path);
    }
    match default_settings_path() {
        Some(path) if path.exists() => load_settings_from(&path),
        Some(path) => {
            debug!(path = %path.display(), "no settings file, using defaults");
            Ok(Settings::default())
        }
        None => Ok(Settings::default()),
    }
}
