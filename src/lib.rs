//! # LayerKit
//!
//! A layered 2D drawing surface with pointer hit-testing and single-layer
//! selection:
//! - Polygon, polyline and image layers drawn bottom to top
//! - Topmost-first (or bottommost-first) hit-testing of pointer input
//! - A selection state machine with add/remove/select/deselect/draw events
//! - Headless rendering to PNG through tiny-skia
//!
//! ## Architecture
//!
//! LayerKit is organized as a workspace with multiple crates:
//!
//! 1. **layerkit-core** - Points, ids, colours, events and error types
//! 2. **layerkit-canvas** - Collision predicates, layers, canvas, rendering, scene files
//! 3. **layerkit-settings** - TOML/JSON configuration
//! 4. **layerkit** - Command line renderer that integrates all crates

pub mod app;
pub mod cli;

pub use layerkit_canvas::{
    Canvas, FixedRateScheduler, FrameScheduler, FrameStats, ImageLayer, ImageLoader,
    ImageResource, Layer, LayerKind, LayerList, LayerObject, LayerSpec, PixmapSurface,
    PointerEvent, PolygonLayer, PolylineLayer, RecordingSurface, RenderSurface, SceneFile,
};
pub use layerkit_core::{
    CanvasEvent, CanvasEventKind, Color, Error, HitTestOrder, LayerId, Point, Result,
};
pub use layerkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging with one JSON object per event on stderr.
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(true)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
