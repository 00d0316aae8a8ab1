//! Raster surface backed by tiny-skia.
//!
//! Features:
//! - Anti-aliased paths
//! - Bilinear image scaling
//! - PNG export through the image crate

use crate::image_resource::ImageData;
use crate::surface::RenderSurface;
use image::RgbaImage;
use layerkit_core::{Color, Point};
use std::path::Path;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, FilterQuality, LineJoin, Paint, PathBuilder, Pixmap,
    PixmapPaint, Rect, Stroke, Transform,
};

fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn build_path(points: &[Point], close: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    if close {
        pb.close();
    }
    pb.finish()
}

/// Converts straight RGBA image data into a premultiplied pixmap.
fn image_to_pixmap(image: &ImageData) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height())?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(image.pixels().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(pixmap)
}

/// [`RenderSurface`] that rasterizes into an in-memory pixmap.
pub struct PixmapSurface {
    pixmap: Pixmap,
    background: Color,
}

impl PixmapSurface {
    /// Creates a surface filled with `background`.
    ///
    /// Returns `None` if either dimension is zero.
    pub fn new(width: u32, height: u32, background: Color) -> Option<Self> {
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(to_skia(background));
        Some(Self { pixmap, background })
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Colour at pixel (`x`, `y`), un-premultiplied.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Copies the surface into an RGBA image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let mut out = RgbaImage::new(width, self.pixmap.height());
        for (i, px) in self.pixmap.pixels().iter().enumerate() {
            let c = px.demultiply();
            let x = i as u32 % width;
            let y = i as u32 / width;
            out.put_pixel(x, y, image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]));
        }
        out
    }

    /// Writes the surface to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        let path = path.as_ref();
        self.to_rgba_image()
            .save_with_format(path, image::ImageFormat::Png)?;
        tracing::info!("Saved {}x{} frame to {}", self.width(), self.height(), path.display());
        Ok(())
    }
}

impl std::fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("background", &self.background)
            .finish()
    }
}

impl RenderSurface for PixmapSurface {
    fn width(&self) -> u32 {
        self.pixmap.width()
    }

    fn height(&self) -> u32 {
        self.pixmap.height()
    }

    fn clear_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) else {
            return;
        };
        let mut paint = paint(self.background);
        paint.blend_mode = BlendMode::Source;
        paint.anti_alias = false;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn stroke_path(&mut self, points: &[Point], color: Color, line_width: f64) {
        let Some(path) = build_path(points, false) else {
            return;
        };
        let stroke = Stroke {
            width: line_width as f32,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    fn fill_path(&mut self, points: &[Point], color: Color) {
        let Some(path) = build_path(points, true) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint(color),
            FillRule::EvenOdd,
            Transform::identity(),
            None,
        );
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, width as f32, height as f32) {
            self.pixmap
                .fill_rect(rect, &paint(color), Transform::identity(), None);
        }
    }

    fn draw_image(&mut self, image: &ImageData, x: f64, y: f64, width: f64, height: f64) {
        let Some(src) = image_to_pixmap(image) else {
            return;
        };
        let sx = width as f32 / image.width() as f32;
        let sy = height as f32 / image.height() as f32;
        let transform = Transform::from_scale(sx, sy).post_translate(x as f32, y as f32);
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &paint, transform, None);
    }
}
