//! Configuration for CNCView
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Machine (work envelope, homing corner)
//! - Visualizer (palette, arc resolution)
//!
//! Every section defaults its missing fields, so a partial file is valid.

use crate::error::{SettingsError, SettingsResult};
use cncview_core::{CoordinateMapper, HomingCorner, MachineLimits};
use cncview_visualizer::{ArcConfig, ColorPalette, ToolpathOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Directory name under the platform config directory
const APP_DIR: &str = "cncview";
const CONFIG_FILE: &str = "config.toml";

/// On-disk format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Machine envelope and homing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Which corner the machine homes to
    pub homing_corner: HomingCorner,
    /// Work envelope in millimeters
    pub limits: MachineLimits,
}

/// Toolpath rendering preferences
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerSettings {
    pub palette: ColorPalette,
    pub arcs: ArcConfig,
}

impl VisualizerSettings {
    pub fn toolpath_options(&self) -> ToolpathOptions {
        ToolpathOptions {
            palette: self.palette,
            arcs: self.arcs,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub machine: MachineSettings,
    pub visualizer: VisualizerSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/cncview/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let mut path = dirs::config_dir().ok_or_else(|| {
            SettingsError::ConfigDirectory("no configuration directory on this platform".into())
        })?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        if let Err(err) = config.validate() {
            warn!("Rejecting config {}: {}", path.display(), err);
            return Err(err);
        }
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.machine.limits.validate()?;
        self.visualizer
            .palette
            .validate()
            .map_err(|reason| SettingsError::invalid("visualizer.palette", reason))?;
        self.visualizer
            .arcs
            .validate()
            .map_err(|reason| SettingsError::invalid("visualizer.arcs", reason))?;
        Ok(())
    }

    /// Mapper for the configured machine
    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.machine.limits, self.machine.homing_corner)
    }

    pub fn toolpath_options(&self) -> ToolpathOptions {
        self.visualizer.toolpath_options()
    }
}
