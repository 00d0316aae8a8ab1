use layerkit_core::{LayerError, Point};

use super::{LayerKind, LayerShape};
use crate::collision::point_in_box;
use crate::image_resource::ImageResource;
use crate::surface::RenderSurface;

/// Image placed at `position` and scaled to `size`.
#[derive(Debug, Clone)]
pub struct ImageLayer {
    position: Point,
    size: Point,
    resource: ImageResource,
}

impl ImageLayer {
    pub fn new(resource: ImageResource, position: Point, size: Point) -> Self {
        Self {
            position,
            size,
            resource,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn resource(&self) -> &ImageResource {
        &self.resource
    }

    pub fn set_resource(&mut self, resource: ImageResource) {
        self.resource = resource;
    }
}

impl LayerShape for ImageLayer {
    fn kind(&self) -> LayerKind {
        LayerKind::Image
    }

    fn inside_test(&self, point: &Point) -> bool {
        point_in_box(point, &self.position, &self.size)
    }

    fn draw(&self, surface: &mut dyn RenderSurface) -> Result<(), LayerError> {
        let data = self
            .resource
            .data()
            .map_err(|_| LayerError::ResourceNotReady {
                source_id: self.resource.source_id().to_string(),
            })?;
        surface.draw_image(
            &data,
            self.position.x,
            self.position.y,
            self.size.x,
            self.size.y,
        );
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position.add(&Point::new(dx, dy));
    }

    fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let far = self.position + self.size;
        Some((
            self.position.x.min(far.x),
            self.position.y.min(far.y),
            self.position.x.max(far.x),
            self.position.y.max(far.y),
        ))
    }

    fn handles(&self) -> Vec<Point> {
        let (x, y) = (self.position.x, self.position.y);
        let (w, h) = (self.size.x, self.size.y);
        vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ]
    }
    /// A dropped image comes to rest on whole pixels.
    fn on_pointer_up(&mut self, _point: &Point) {
        let (x, y) = (self.position.x.round(), self.position.y.round());
        self.position.set(x, y);
    }
}
