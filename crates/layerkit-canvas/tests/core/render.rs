//! Frame rendering against recording and raster surfaces.

use layerkit_canvas::{
    Canvas, DrawCommand, FixedRateScheduler, FrameStats, ImageData, ImageLayer, ImageResource,
    PixmapSurface, PointerEvent, PolygonLayer, PolylineLayer, RecordingSurface,
};
use layerkit_core::{shared, CanvasEvent, CanvasEventKind, Color, Point};
use std::ops::ControlFlow;
use std::time::Duration;

const RED: Color = Color::rgb(255, 0, 0);
const BG: Color = Color::rgb(0, 0, 64);

fn square(x: f64, y: f64, size: f64) -> PolygonLayer {
    PolygonLayer::new(vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ])
}

#[test]
fn test_render_skips_unready_and_degenerate_layers() {
    let mut canvas = Canvas::new();
    let pending = ImageResource::pending("later.png");
    canvas.add_layer(ImageLayer::new(
        pending.clone(),
        Point::new(0.0, 0.0),
        Point::new(8.0, 8.0),
    ));
    canvas.add_layer(
        PolygonLayer::new(vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]).with_fill(RED),
    );
    canvas.add_layer(square(10.0, 10.0, 5.0).with_fill(RED));
    let hidden = canvas.add_layer(square(0.0, 0.0, 5.0).with_fill(RED));
    canvas.set_visible(hidden, false);

    let mut surface = RecordingSurface::new(32, 32);
    let stats = canvas.render(&mut surface);
    assert_eq!(
        stats,
        FrameStats {
            drawn: 1,
            skipped: 2,
            hidden: 1
        }
    );

    let commands = surface.take_commands();
    assert_eq!(
        commands[0],
        DrawCommand::Clear {
            x: 0.0,
            y: 0.0,
            width: 32.0,
            height: 32.0
        }
    );
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[1], DrawCommand::Fill { color, .. } if color == RED));

    // Once the image arrives the next frame picks it up.
    pending.complete(Ok(ImageData::solid(2, 2, Color::WHITE)));
    let stats = canvas.render(&mut surface);
    assert_eq!(stats.drawn, 2);
    assert!(matches!(
        surface.commands()[1],
        DrawCommand::Image {
            image_size: (2, 2),
            ..
        }
    ));
}

#[test]
fn test_selected_layer_draws_handles() {
    let mut canvas = Canvas::new();
    let id = canvas.add_layer(
        PolylineLayer::new(vec![Point::new(1.0, 1.0), Point::new(9.0, 1.0)]).with_stroke(RED, 1.0),
    );
    canvas.select_layer(id);

    let mut surface = RecordingSurface::new(16, 16);
    canvas.render(&mut surface);
    let handles = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == Color::SELECTION))
        .count();
    assert_eq!(handles, 2);
}

#[test]
fn test_render_emits_draw_event() {
    let mut canvas = Canvas::new();
    let frames = shared(0);
    let counter = frames.clone();
    canvas.on(CanvasEventKind::Draw, move |e| {
        assert_eq!(*e, CanvasEvent::Draw);
        *counter.borrow_mut() += 1;
    });

    let mut surface = RecordingSurface::new(4, 4);
    let mut scheduler = FixedRateScheduler::new(Duration::ZERO).with_max_frames(3);
    assert_eq!(canvas.run(&mut scheduler, &mut surface), 3);
    assert_eq!(*frames.borrow(), 3);
}

#[test]
fn test_run_with_feeds_input_between_frames() {
    let mut canvas = Canvas::new();
    let id = canvas.add_layer(square(0.0, 0.0, 10.0).with_fill(RED));
    let mut surface = RecordingSurface::new(20, 20);
    let mut scheduler = FixedRateScheduler::new(Duration::ZERO);

    let script = [PointerEvent::Up(Point::new(5.0, 5.0))];
    let drawn = canvas.run_with(&mut scheduler, &mut surface, |frame, canvas| {
        match script.get(frame as usize) {
            Some(event) => {
                canvas.handle_pointer(*event);
                ControlFlow::Continue(())
            }
            None => ControlFlow::Break(()),
        }
    });

    assert_eq!(drawn, 1);
    assert_eq!(canvas.selected_id(), Some(id));
}

#[test]
fn test_raster_frame_to_png() {
    let mut canvas = Canvas::new();
    canvas.add_layer(square(4.0, 4.0, 8.0).with_fill(RED));
    canvas.add_layer(ImageLayer::new(
        ImageResource::ready("white", ImageData::solid(1, 1, Color::WHITE)),
        Point::new(20.0, 4.0),
        Point::new(8.0, 8.0),
    ));

    let mut surface = PixmapSurface::new(32, 16, BG).unwrap();
    let stats = canvas.render(&mut surface);
    assert_eq!(stats.drawn, 2);
    assert_eq!(surface.pixel(8, 8), Some(RED));
    assert_eq!(surface.pixel(24, 8), Some(Color::WHITE));
    assert_eq!(surface.pixel(1, 1), Some(BG));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.png");
    surface.save_png(&path).unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.dimensions(), (32, 16));
    assert_eq!(saved.get_pixel(8, 8).0, [255, 0, 0, 255]);
}
