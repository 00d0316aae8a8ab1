//! Renderer application: config, scene, pointer replay and PNG output.

use crate::cli::CliArgs;
use anyhow::{anyhow, Context};
use layerkit_canvas::{
    Canvas, FixedRateScheduler, ImageLoader, LayerList, LayerSpec, PixmapSurface, PointerEvent,
    SceneFile,
};
use layerkit_core::{Color, LayerId};
use layerkit_settings::Config;
use std::fmt;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Frames run when neither the command line nor the config sets a count.
pub const DEFAULT_FRAMES: u64 = 30;

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub layers: usize,
    /// Output size in pixels.
    pub size: (u32, u32),
    pub selected: Option<LayerId>,
    pub output: PathBuf,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rendered {} frame(s) of {} layer(s) to {}",
            self.frames,
            self.layers,
            self.output.display()
        )?;
        match self.selected {
            Some(id) => write!(f, ", selected layer {}", id),
            None => write!(f, ", nothing selected"),
        }
    }
}

/// Loads the config named on the command line, else the platform default
/// file if it exists, else built-in defaults. Overrides apply last.
pub fn load_config(args: &CliArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => match Config::default_path() {
            Ok(path) if path.exists() => {
                debug!("Using config {}", path.display());
                Config::load_from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?
            }
            _ => Config::default(),
        },
    };

    for (key, value) in &args.overrides {
        config
            .set_value(key, value)
            .with_context(|| format!("Invalid override {}={}", key, value))?;
    }
    if let Some(frames) = args.frames {
        config.render.max_frames = Some(frames);
    }
    config.validate()?;
    Ok(config)
}

/// Small scene shown when no scene file is given.
pub fn demo_scene(config: &Config) -> SceneFile {
    let mut scene = SceneFile::new(config.canvas.width, config.canvas.height);
    let (w, h) = (f64::from(config.canvas.width), f64::from(config.canvas.height));

    scene.layers.push(LayerSpec::Polygon {
        name: Some("backdrop".to_string()),
        points: vec![
            (w * 0.1, h * 0.1),
            (w * 0.6, h * 0.1),
            (w * 0.6, h * 0.6),
            (w * 0.1, h * 0.6),
        ],
        fill: Some(Color::rgb(52, 152, 219)),
        stroke: Some(Color::BLACK),
        line_width: 2.0,
        visible: true,
    });
    scene.layers.push(LayerSpec::Polygon {
        name: Some("triangle".to_string()),
        points: vec![(w * 0.4, h * 0.3), (w * 0.9, h * 0.5), (w * 0.45, h * 0.9)],
        fill: Some(Color::rgba(231, 76, 60, 200)),
        stroke: None,
        line_width: 1.0,
        visible: true,
    });
    scene.layers.push(LayerSpec::Polyline {
        name: Some("zigzag".to_string()),
        points: vec![
            (w * 0.05, h * 0.9),
            (w * 0.2, h * 0.7),
            (w * 0.35, h * 0.9),
            (w * 0.5, h * 0.7),
        ],
        stroke: Some(Color::rgb(46, 204, 113)),
        line_width: 3.0,
        hit_tolerance: None,
        visible: true,
    });
    scene
}

fn load_scene(args: &CliArgs, config: &Config) -> anyhow::Result<(SceneFile, ImageLoader)> {
    match &args.scene {
        Some(path) => {
            let scene = SceneFile::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            let loader = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(dir) => ImageLoader::with_base_dir(dir),
                None => ImageLoader::new(),
            };
            Ok((scene, loader))
        }
        None => Ok((demo_scene(config), ImageLoader::new())),
    }
}

/// Builds the canvas, replays clicks (one per frame), runs the frame loop
/// and writes the last frame.
pub fn run(args: &CliArgs) -> anyhow::Result<RunSummary> {
    let config = load_config(args)?;
    let (scene, loader) = load_scene(args, &config)?;

    let mut canvas: Canvas = scene.build(&loader, config.interaction.polyline_tolerance)?;
    if scene.hit_test_order.is_none() {
        canvas.set_hit_test_order(config.interaction.hit_test_order);
    }
    let list = LayerList::attach(&mut canvas);

    let background = scene.background.unwrap_or(config.canvas.background);
    let (width, height) = scene.size_or((config.canvas.width, config.canvas.height));
    let mut surface = PixmapSurface::new(width, height, background)
        .ok_or_else(|| anyhow!("Canvas size {}x{} is empty", width, height))?;

    let clicks = args.clicks.len() as u64;
    let frames = config.render.max_frames.unwrap_or(DEFAULT_FRAMES).max(clicks);
    let mut scheduler =
        FixedRateScheduler::new(config.render.frame_interval()).with_max_frames(frames);

    info!(
        "Running {} frame(s) of {} layer(s) at {}x{}",
        frames,
        canvas.layer_count(),
        width,
        height
    );
    let drawn = canvas.run_with(&mut scheduler, &mut surface, |frame, canvas| {
        if let Some(point) = args.clicks.get(frame as usize) {
            canvas.handle_pointer(PointerEvent::Down(*point));
            canvas.handle_pointer(PointerEvent::Up(*point));
        }
        ControlFlow::Continue(())
    });

    for row in list.rows() {
        debug!("{}", row);
    }
    save(&surface, &args.output)?;

    Ok(RunSummary {
        frames: drawn,
        layers: canvas.layer_count(),
        size: (width, height),
        selected: canvas.selected_id(),
        output: args.output.clone(),
    })
}

fn save(surface: &PixmapSurface, output: &Path) -> anyhow::Result<()> {
    surface
        .save_png(output)
        .with_context(|| format!("Failed to write {}", output.display()))
}
