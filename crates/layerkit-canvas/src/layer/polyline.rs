use layerkit_core::{Color, LayerError, Point};

use super::{points_bounds, LayerKind, LayerShape};
use crate::collision::point_near_polyline;
use crate::surface::RenderSurface;

/// Default distance within which a pointer counts as touching a polyline.
pub const POLYLINE_HIT_TOLERANCE: f64 = 5.0;

/// Open stroked path.
#[derive(Debug, Clone, PartialEq)]
pub struct PolylineLayer {
    points: Vec<Point>,
    pub stroke: Option<Color>,
    pub line_width: f64,
    pub hit_tolerance: f64,
}

impl PolylineLayer {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            stroke: None,
            line_width: 1.0,
            hit_tolerance: POLYLINE_HIT_TOLERANCE,
        }
    }

    pub fn with_stroke(mut self, color: Color, line_width: f64) -> Self {
        self.stroke = Some(color);
        self.line_width = line_width;
        self
    }

    pub fn with_hit_tolerance(mut self, tolerance: f64) -> Self {
        self.hit_tolerance = tolerance;
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
}

impl LayerShape for PolylineLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Polyline
    }

    fn inside_test(&self, point: &Point) -> bool {
        point_near_polyline(point, &self.points, self.hit_tolerance)
    }

    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LayerError> {
        let Some(stroke) = self.stroke else {
            return Ok(());
        };
        if self.points.len() < 2 {
            return Err(LayerError::DegenerateGeometry {
                kind: self.kind().name(),
                points: self.points.len(),
            });
        }
        surface.stroke_path(&self.points, stroke, self.line_width);
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
