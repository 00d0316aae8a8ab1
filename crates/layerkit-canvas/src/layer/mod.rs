//! Drawable, hit-testable layers.
//!
//! Each variant implements [`LayerShape`]; [`Layer`] dispatches to the variant
//! and [`LayerObject`] wraps it with the state the canvas tracks per layer
//! (id, name, visibility, selection, drag anchor).

mod image_layer;
mod polygon;
mod polyline;

pub use image_layer::ImageLayer;
pub use polygon::PolygonLayer;
pub use polyline::{PolylineLayer, POLYLINE_HIT_TOLERANCE};

use crate::surface::RenderSurface;
use layerkit_core::{Color, LayerError, LayerId, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Edge length of the square markers drawn on a selected layer.
pub const HANDLE_SIZE: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Polygon,
    Polyline,
    Image,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Polygon => "polygon",
            LayerKind::Polyline => "polyline",
            LayerKind::Image => "image",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities every layer variant provides.
pub trait LayerShape {
    fn kind(&self) -> LayerKind;

    /// Whether `point` is "under" the layer, using the current geometry.
    fn inside_test(&self, point: &Point) -> bool;

    /// Issues drawing calls for the layer.
    ///
    /// Errors describe why nothing (or only part) was drawn; callers treat them
    /// as skips.
    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LayerError>;

    fn translate(&mut self, dx: f64, dy: f64);

    /// `(min_x, min_y, max_x, max_y)`, or `None` for empty geometry.
    fn bounds(&self) -> Option<(f64, f64, f64, f64)>;

    /// Positions of the markers drawn while the layer is selected.
    fn handles(&self) -> Vec<Point>;

    // Interaction hooks. The canvas calls these on the selected layer after
    // its own bookkeeping; variants override the ones they react to.

    fn on_select(&mut self) {}

    fn on_deselect(&mut self) {}

    fn on_pointer_down(&mut self, _point: &Point) {}

    fn on_pointer_move(&mut self, _point: &Point) {}

    fn on_pointer_up(&mut self, _point: &Point) {}
}

/// A layer of any variant
#[derive(Debug, Clone)]
pub enum Layer {
    Polygon(PolygonLayer),
    Polyline(PolylineLayer),
    Image(ImageLayer),
}

impl LayerShape for Layer {
    fn kind(&self) -> LayerKind {
        match self {
            Layer::Polygon(l) => l.kind(),
            Layer::Polyline(l) => l.kind(),
            Layer::Image(l) => l.kind(),
        }
    }

    fn inside_test(&self, point: &Point) -> bool {
        match self {
            Layer::Polygon(l) => l.inside_test(point),
            Layer::Polyline(l) => l.inside_test(point),
            Layer::Image(l) => l.inside_test(point),
        }
    }

    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LayerError> {
        match self {
            Layer::Polygon(l) => l.draw(surface),
            Layer::Polyline(l) => l.draw(surface),
            Layer::Image(l) => l.draw(surface),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Layer::Polygon(l) => l.translate(dx, dy),
            Layer::Polyline(l) => l.translate(dx, dy),
            Layer::Image(l) => l.translate(dx, dy),
        }
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        match self {
            Layer::Polygon(l) => l.bounds(),
            Layer::Polyline(l) => l.bounds(),
            Layer::Image(l) => l.bounds(),
        }
    }

    fn handles(&self) -> Vec<Point> {
        match self {
            Layer::Polygon(l) => l.handles(),
            Layer::Polyline(l) => l.handles(),
            Layer::Image(l) => l.handles(),
        }
    }

    fn on_select(&mut self) {
        match self {
            Layer::Polygon(l) => l.on_select(),
            Layer::Polyline(l) => l.on_select(),
            Layer::Image(l) => l.on_select(),
        }
    }

    fn on_deselect(&mut self) {
        match self {
            Layer::Polygon(l) => l.on_deselect(),
            Layer::Polyline(l) => l.on_deselect(),
            Layer::Image(l) => l.on_deselect(),
        }
    }

    fn on_pointer_down(&mut self, point: &Point) {
        match self {
            Layer::Polygon(l) => l.on_pointer_down(point),
            Layer::Polyline(l) => l.on_pointer_down(point),
            Layer::Image(l) => l.on_pointer_down(point),
        }
    }

    fn on_pointer_move(&mut self, point: &Point) {
        match self {
            Layer::Polygon(l) => l.on_pointer_move(point),
            Layer::Polyline(l) => l.on_pointer_move(point),
            Layer::Image(l) => l.on_pointer_move(point),
        }
    }

    fn on_pointer_up(&mut self, point: &Point) {
        match self {
            Layer::Polygon(l) => l.on_pointer_up(point),
            Layer::Polyline(l) => l.on_pointer_up(point),
            Layer::Image(l) => l.on_pointer_up(point),
        }
    }
}

impl From<PolygonLayer> for Layer {
    fn from(layer: PolygonLayer) -> Self {
        Layer::Polygon(layer)
    }
}

impl From<PolylineLayer> for Layer {
    fn from(layer: PolylineLayer) -> Self {
        Layer::Polyline(layer)
    }
}

impl From<ImageLayer> for Layer {
    fn from(layer: ImageLayer) -> Self {
        Layer::Image(layer)
    }
}

/// Bounding box of a point list.
pub(crate) fn points_bounds(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    Some(points.iter().skip(1).fold(
        (first.x, first.y, first.x, first.y),
        |(min_x, min_y, max_x, max_y), p| {
            (min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y))
        },
    ))
}

/// A layer placed on a canvas.
#[derive(Debug, Clone)]
pub struct LayerObject {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub layer: Layer,
    selected: bool,
    drag_anchor: Option<Point>,
}

impl LayerObject {
    /// Creates a visible, unselected layer named after its kind.
    pub fn new(id: LayerId, layer: Layer) -> Self {
        Self {
            id,
            name: layer.kind().name().to_string(),
            visible: true,
            layer,
            selected: false,
            drag_anchor: None,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.layer.kind()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn inside_test(&self, point: &Point) -> bool {
        self.layer.inside_test(point)
    }

    /// Draws the layer, then selection handles if it is selected.
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LayerError> {
        self.layer.draw(surface)?;
        if self.selected {
            let half = HANDLE_SIZE / 2.0;
            for p in self.layer.handles() {
                surface.fill_rect(p.x - half, p.y - half, HANDLE_SIZE, HANDLE_SIZE, Color::SELECTION);
            }
        }
        Ok(())
    }

    pub(crate) fn on_select(&mut self) {
        self.selected = true;
        self.layer.on_select();
    }

    pub(crate) fn on_deselect(&mut self) {
        self.selected = false;
        self.drag_anchor = None;
        self.layer.on_deselect();
    }

    /// Starts a drag if the press lands on the layer.
    pub fn on_pointer_down(&mut self, point: &Point) {
        if self.layer.inside_test(point) {
            self.drag_anchor = Some(*point);
        }
        self.layer.on_pointer_down(point);
    }

    /// Moves the layer by the pointer delta while a drag is active.
    pub fn on_pointer_move(&mut self, point: &Point) {
        self.drag_to(point);
        self.layer.on_pointer_move(point);
    }

    /// Finishes any active drag at `point`.
    pub fn on_pointer_up(&mut self, point: &Point) {
        self.drag_to(point);
        self.drag_anchor = None;
        self.layer.on_pointer_up(point);
    }

    fn drag_to(&mut self, point: &Point) {
        if let Some(anchor) = self.drag_anchor.as_mut() {
            let delta = *point - *anchor;
            anchor.copy_from(point);
            self.layer.translate(delta.x, delta.y);
        }
    }
}
