use layerkit_core::{Color, LayerError, Point};

use super::{points_bounds, LayerKind, LayerShape};
use crate::collision::point_in_polygon;
use crate::surface::RenderSurface;

/// Filled and/or stroked closed shape.
///
/// The vertex list is an open ring; the closing edge back to the first vertex
/// is implied for hit-testing and stroking.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonLayer {
    points: Vec<Point>,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub line_width: f64,
}

impl PolygonLayer {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            fill: None,
            stroke: None,
            line_width: 1.0,
        }
    }

    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn with_stroke(mut self, color: Color, line_width: f64) -> Self {
        self.stroke = Some(color);
        self.line_width = line_width;
        self
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn set_points(&mut self, points: Vec<Point>) {
        self.points = points;
    }

    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }

    fn closed_ring(&self) -> Vec<Point> {
        let mut ring = self.points.clone();
        if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
            if first != last {
                ring.push(*first);
            }
        }
        ring
    }
}

impl LayerShape for PolygonLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Polygon
    }

    fn inside_test(&self, point: &Point) -> bool {
        point_in_polygon(point, &self.points)
    }

    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LayerError> {
        if self.fill.is_none() && self.stroke.is_none() {
            return Ok(());
        }
        if self.points.len() < 3 {
            return Err(LayerError::DegenerateGeometry {
                kind: self.kind().name(),
                points: self.points.len(),
            });
        }

        if let Some(fill) = self.fill {
            surface.fill_path(&self.points, fill);
        }
        if let Some(stroke) = self.stroke {
            surface.stroke_path(&self.closed_ring(), stroke, self.line_width);
        }
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let offset = Point::new(dx, dy);
        for p in &mut self.points {
            p.add(&offset);
        }
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        points_bounds(&self.points)
    }

    fn handles(&self) -> Vec<Point> {
        self.points.clone()
    }
}
