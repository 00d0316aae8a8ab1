//! Configuration for LayerKit
//!
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Canvas settings (surface size, background)
//! - Interaction settings (hit-test order, polyline tolerance)
//! - Render settings (frame interval, frame limit)

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use layerkit_core::{Color, HitTestOrder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Canvas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Colour a cleared frame starts from
    pub background: Color,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
        }
    }
}

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Which end of the layer stack wins when layers overlap
    pub hit_test_order: HitTestOrder,
    /// Distance within which a pointer touches a polyline
    pub polyline_tolerance: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hit_test_order: HitTestOrder::default(),
            polyline_tolerance: 5.0,
        }
    }
}

/// Redraw loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Milliseconds between frames
    pub frame_interval_ms: u64,
    /// Stop after this many frames; the renderer runs its default count when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_frames: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            max_frames: None,
        }
    }
}

impl RenderSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Canvas settings
    pub canvas: CanvasSettings,
    /// Interaction settings
    pub interaction: InteractionSettings,
    /// Render settings
    pub render: RenderSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format, ConfigError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location under the platform config directory.
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("layerkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.canvas.width == 0 {
            return Err(ConfigError::out_of_range("canvas.width", self.canvas.width));
        }
        if self.canvas.height == 0 {
            return Err(ConfigError::out_of_range("canvas.height", self.canvas.height));
        }

        let tolerance = self.interaction.polyline_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::out_of_range(
                "interaction.polyline_tolerance",
                tolerance,
            ));
        }

        if self.render.frame_interval_ms == 0 {
            return Err(ConfigError::out_of_range(
                "render.frame_interval_ms",
                self.render.frame_interval_ms,
            ));
        }
        if self.render.max_frames == Some(0) {
            return Err(ConfigError::out_of_range("render.max_frames", 0));
        }

        Ok(())
    }

    /// Sets a single value by its dotted key, e.g. `canvas.width`.
    ///
    /// The config is validated afterwards; on failure it is left unchanged.
    pub fn set_value(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        fn parse<T: std::str::FromStr>(key: &str, value: &str) -> SettingsResult<T>
        where
            T::Err: std::fmt::Display,
        {
            value.trim().parse().map_err(|e: T::Err| SettingsError::InvalidSetting {
                key: key.to_string(),
                reason: e.to_string(),
            })
        }

        let mut next = self.clone();
        match key {
            "canvas.width" => next.canvas.width = parse(key, value)?,
            "canvas.height" => next.canvas.height = parse(key, value)?,
            "canvas.background" => next.canvas.background = parse(key, value)?,
            "interaction.hit_test_order" => {
                next.interaction.hit_test_order = match value.trim() {
                    "topmost_first" => HitTestOrder::TopmostFirst,
                    "bottommost_first" => HitTestOrder::BottommostFirst,
                    other => {
                        return Err(SettingsError::InvalidSetting {
                            key: key.to_string(),
                            reason: format!("unknown order '{}'", other),
                        })
                    }
                }
            }
            "interaction.polyline_tolerance" => {
                next.interaction.polyline_tolerance = parse(key, value)?
            }
            "render.frame_interval_ms" => next.render.frame_interval_ms = parse(key, value)?,
            "render.max_frames" => next.render.max_frames = Some(parse(key, value)?),
            _ => {
                return Err(SettingsError::InvalidSetting {
                    key: key.to_string(),
                    reason: "unknown key".to_string(),
                })
            }
        }

        next.validate()?;
        *self = next;
        Ok(())
    }
}
