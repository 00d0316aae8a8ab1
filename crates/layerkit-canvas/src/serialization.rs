//! Scene description files.
//!
//! A scene is a JSON document listing layers bottom to top. Loading a scene
//! builds a fresh [`Canvas`]; the canvas itself is never written back.

use layerkit_core::{Color, HitTestOrder, Point, SceneError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::canvas::Canvas;
use crate::image_resource::ImageLoader;
use crate::layer::{ImageLayer, Layer, PolygonLayer, PolylineLayer};

/// Scene file format version
pub const SCENE_FORMAT_VERSION: &str = "1.0";

fn default_line_width() -> f64 {
    1.0
}
fn default_visible() -> bool {
    true
}

/// Complete scene file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneFile {
    pub version: String,
    /// Surface size; the host's configured size applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub background: Option<Color>,
    #[serde(default)]
    pub hit_test_order: Option<HitTestOrder>,
    #[serde(default)]
    pub layers: Vec<LayerSpec>,
}

/// Serialized layer, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerSpec {
    Polygon {
        #[serde(default)]
        name: Option<String>,
        points: Vec<(f64, f64)>,
        #[serde(default)]
        fill: Option<Color>,
        #[serde(default)]
        stroke: Option<Color>,
        #[serde(default = "default_line_width")]
        line_width: f64,
        #[serde(default = "default_visible")]
        visible: bool,
    },
    Polyline {
        #[serde(default)]
        name: Option<String>,
        points: Vec<(f64, f64)>,
        #[serde(default)]
        stroke: Option<Color>,
        #[serde(default = "default_line_width")]
        line_width: f64,
        #[serde(default)]
        hit_tolerance: Option<f64>,
        #[serde(default = "default_visible")]
        visible: bool,
    },
    Image {
        #[serde(default)]
        name: Option<String>,
        source: String,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default = "default_visible")]
        visible: bool,
    },
}

fn to_points(points: &[(f64, f64)]) -> Vec<Point> {
    points.iter().copied().map(Point::from).collect()
}

impl LayerSpec {
    pub fn name(&self) -> Option<&str> {
        match self {
            LayerSpec::Polygon { name, .. }
            | LayerSpec::Polyline { name, .. }
            | LayerSpec::Image { name, .. } => name.as_deref(),
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            LayerSpec::Polygon { visible, .. }
            | LayerSpec::Polyline { visible, .. }
            | LayerSpec::Image { visible, .. } => *visible,
        }
    }

    /// Checks the entry for values no layer can be built from.
    ///
    /// Too few points is allowed here; such layers are skipped when drawn.
    pub fn validate(&self) -> Result<(), String> {
        let finite = |pts: &[(f64, f64)]| pts.iter().all(|(x, y)| x.is_finite() && y.is_finite());
        match self {
            LayerSpec::Polygon {
                points, line_width, ..
            } => {
                if !finite(points) {
                    return Err("non-finite point".into());
                }
                if *line_width < 0.0 {
                    return Err("negative line width".into());
                }
            }
            LayerSpec::Polyline {
                points,
                line_width,
                hit_tolerance,
                ..
            } => {
                if !finite(points) {
                    return Err("non-finite point".into());
                }
                if *line_width < 0.0 {
                    return Err("negative line width".into());
                }
                if hit_tolerance.is_some_and(|t| t.is_nan() || t < 0.0) {
                    return Err("hit tolerance must be non-negative".into());
                }
            }
            LayerSpec::Image {
                source,
                x,
                y,
                width,
                height,
                ..
            } => {
                if source.trim().is_empty() {
                    return Err("empty image source".into());
                }
                if ![x, y, width, height].iter().all(|v| v.is_finite()) {
                    return Err("non-finite placement".into());
                }
            }
        }
        Ok(())
    }

    /// Builds the layer. Image sources start loading immediately.
    pub fn to_layer(&self, loader: &ImageLoader, polyline_tolerance: f64) -> Layer {
        match self {
            LayerSpec::Polygon {
                points,
                fill,
                stroke,
                line_width,
                ..
            } => {
                let mut layer = PolygonLayer::new(to_points(points));
                layer.fill = *fill;
                layer.stroke = *stroke;
                layer.line_width = *line_width;
                layer.into()
            }
            LayerSpec::Polyline {
                points,
                stroke,
                line_width,
                hit_tolerance,
                ..
            } => {
                let mut layer = PolylineLayer::new(to_points(points))
                    .with_hit_tolerance(hit_tolerance.unwrap_or(polyline_tolerance));
                layer.stroke = *stroke;
                layer.line_width = *line_width;
                layer.into()
            }
            LayerSpec::Image {
                source,
                x,
                y,
                width,
                height,
                ..
            } => ImageLayer::new(
                loader.load(source),
                Point::new(*x, *y),
                Point::new(*width, *height),
            )
            .into(),
        }
    }
}

impl SceneFile {
    /// Creates an empty scene of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            version: SCENE_FORMAT_VERSION.to_string(),
            width: Some(width),
            height: Some(height),
            background: None,
            hit_test_order: None,
            layers: Vec::new(),
        }
    }

    /// Scene size, falling back per axis to `fallback`.
    pub fn size_or(&self, fallback: (u32, u32)) -> (u32, u32) {
        (
            self.width.unwrap_or(fallback.0),
            self.height.unwrap_or(fallback.1),
        )
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: SceneFile = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load scene from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&content)?;
        tracing::info!(
            "Loaded scene {} ({} layers)",
            path.display(),
            scene.layers.len()
        );
        Ok(scene)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        if self.version != SCENE_FORMAT_VERSION {
            return Err(SceneError::UnsupportedVersion {
                found: self.version.clone(),
                expected: SCENE_FORMAT_VERSION.to_string(),
            });
        }
        for (index, entry) in self.layers.iter().enumerate() {
            entry.validate()
                .map_err(|reason| SceneError::InvalidLayer { index, reason })?;
        }
        Ok(())
    }

    /// Builds a canvas holding every layer of the scene, bottom first.
    ///
    /// `polyline_tolerance` applies to polylines that do not set their own.
    pub fn build(&self, loader: &ImageLoader, polyline_tolerance: f64) -> Result<Canvas, SceneError> {
        self.validate()?;

        let mut canvas = Canvas::with_hit_test_order(self.hit_test_order.unwrap_or_default());
        for entry in &self.layers {
            let layer = entry.to_layer(loader, polyline_tolerance);
            let id = match entry.name() {
                Some(name) => canvas.add_named_layer(name, layer),
                None => canvas.add_layer(layer),
            };
            if !entry.visible() {
                canvas.set_visible(id, false);
            }
        }
        Ok(canvas)
    }
}
