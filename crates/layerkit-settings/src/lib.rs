//! LayerKit Settings Crate
//!
//! Handles application configuration: canvas size and background, hit-test
//! behaviour and redraw timing.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, InteractionSettings, RenderSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
