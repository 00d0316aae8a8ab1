//! Rendering surface contract.
//!
//! Layers draw by issuing primitive calls against a [`RenderSurface`]. The
//! canvas never rasterizes anything itself: [`crate::renderer::PixmapSurface`]
//! rasterizes with tiny-skia, [`RecordingSurface`] keeps the call list.

use crate::image_resource::ImageData;
use layerkit_core::{Color, Point};

/// Primitive drawing operations a host surface provides.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Resets the given region to the surface background.
    fn clear_region(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Strokes the open path through `points`.
    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64);

    /// Fills the closed region bounded by `points`.
    fn fill_path(&mut self, points: &[Point], color: Color);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);

    /// Blits `image` scaled into the given rectangle.
    fn draw_image(&mut self, image: &ImageData, x: f64, y: f64, width: f64, height: f64);
}

/// A single recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Stroke {
        points: Vec<Point>,
        color: Color,
        line_width: f64,
    },
    Fill {
        points: Vec<Point>,
        color: Color,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Image {
        image_size: (u32, u32),
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Surface that records calls instead of rasterizing them.
///
/// Useful for headless hosts and for checking what a frame would draw.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the list empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands recorded after the most recent clear.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear { .. }))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Fill {
            points: points.to_vec(),
            color,
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_image(&mut self, image: &ImageData, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Image {
            image_size: (image.width(), image.height()),
            x,
            y,
            width,
            height,
        });
    }
}
