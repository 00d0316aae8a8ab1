//! Command line interface for the LayerKit renderer
//!
//! Handles parsing command line arguments and validating the values that
//! clap cannot check on its own (points and `key=value` overrides).

use clap::Parser;
use layerkit_core::Point;
use std::path::PathBuf;

/// LayerKit CLI arguments
///
/// Examples:
///   layerkit                                  # Render the demo scene to frame.png
///   layerkit --scene shapes.json -o out.png   # Render a scene file
///   layerkit --click 40,40 --click 200,120    # Replay clicks before rendering
///   layerkit --set interaction.hit_test_order=bottommost_first
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "layerkit",
    version,
    about = "Render a layered 2D scene with pointer selection",
    long_about = "LayerKit loads a scene of polygon, polyline and image layers, replays pointer clicks against it (selecting the layer under each click) and writes the final frame as a PNG."
)]
pub struct CliArgs {
    /// Configuration file (.toml or .json)
    #[clap(
        long = "config",
        short = 'c',
        help = "Configuration file (.toml or .json)",
        long_help = "Configuration file to load. Falls back to the platform config directory (layerkit/config.toml) when that file exists, and to built-in defaults otherwise."
    )]
    pub config: Option<PathBuf>,

    /// Scene file to render
    #[clap(
        long = "scene",
        short = 's',
        help = "Scene JSON file to render",
        long_help = "Scene JSON file to render. Image sources are resolved relative to the scene file. Without a scene a small demo scene is drawn."
    )]
    pub scene: Option<PathBuf>,

    /// Output PNG path
    #[clap(long = "output", short = 'o', default_value = "frame.png")]
    pub output: PathBuf,

    /// Pointer click (press and release) at `x,y`, one per frame
    #[clap(long = "click", value_parser = parse_point)]
    pub clicks: Vec<Point>,

    /// Number of frames to run
    #[clap(
        long = "frames",
        short = 'n',
        help = "Number of frames to run",
        long_help = "Number of frames to run before writing the output. Overrides render.max_frames. Extra frames give background image loads time to finish."
    )]
    pub frames: Option<u64>,

    /// Configuration override, `section.key=value`
    #[clap(long = "set", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,

    /// Emit logs as JSON
    #[clap(long = "log-json")]
    pub log_json: bool,
}

/// Parses `x,y` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{}'", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{}': {}", s, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{}': {}", s, e))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("coordinates must be finite: '{}'", s));
    }
    Ok(Point::new(x, y))
}

/// Parses `key=value`.
pub fn parse_override(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key=value but got '{}'", s)),
    }
}
