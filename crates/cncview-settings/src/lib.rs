//! CNCView Settings Crate
//!
//! Handles application configuration: machine envelope, homing corner and
//! toolpath rendering preferences.

pub mod config;
pub mod error;

pub use config::{Config, ConfigFormat, MachineSettings, VisualizerSettings};
pub use error::{SettingsError, SettingsResult};
