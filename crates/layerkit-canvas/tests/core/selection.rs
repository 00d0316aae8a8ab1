//! Selection state machine driven through the public canvas API.

use layerkit_canvas::{
    Canvas, ImageLayer, ImageResource, Layer, LayerShape, PointerEvent, PolygonLayer,
};
use layerkit_core::{shared, CanvasEvent, CanvasEventKind, HitTestOrder, LayerId, Point, SharedVec};

fn square(x: f64, y: f64, size: f64) -> PolygonLayer {
    PolygonLayer::new(vec![
        Point::new(x, y),
        Point::new(x + size, y),
        Point::new(x + size, y + size),
        Point::new(x, y + size),
    ])
}

fn record_events(canvas: &mut Canvas) -> SharedVec<CanvasEvent> {
    let log = shared(Vec::new());
    for kind in CanvasEventKind::ALL {
        let sink = log.clone();
        canvas.on(kind, move |e| sink.borrow_mut().push(*e));
    }
    log
}

fn overlapping_images(order: HitTestOrder) -> (Canvas, LayerId, LayerId) {
    let mut canvas = Canvas::with_hit_test_order(order);
    let a = canvas.add_layer(ImageLayer::new(
        ImageResource::pending("a.png"),
        Point::new(0.0, 0.0),
        Point::new(20.0, 20.0),
    ));
    let b = canvas.add_layer(ImageLayer::new(
        ImageResource::pending("b.png"),
        Point::new(10.0, 10.0),
        Point::new(20.0, 20.0),
    ));
    (canvas, a, b)
}

#[test]
fn test_pointer_up_selects_then_forwards() {
    let mut canvas = Canvas::new();
    let id = canvas.add_layer(square(0.0, 0.0, 10.0));
    let log = record_events(&mut canvas);

    canvas.pointer_up(Point::new(5.0, 5.0));
    assert_eq!(canvas.selected_id(), Some(id));
    assert_eq!(*log.borrow(), vec![CanvasEvent::Select(id)]);

    // A second release goes to the selected layer instead of re-selecting.
    canvas.pointer_up(Point::new(5.0, 5.0));
    assert_eq!(canvas.selected_id(), Some(id));
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(canvas.pointer(), Point::new(5.0, 5.0));

    // Press, drag and release all reach the layer.
    canvas.pointer_down(Point::new(5.0, 5.0));
    assert!(canvas.selected_layer().unwrap().is_dragging());
    canvas.pointer_up(Point::new(8.0, 6.0));
    let layer = canvas.selected_layer().unwrap();
    assert!(!layer.is_dragging());
    assert_eq!(layer.layer.bounds(), Some((3.0, 1.0, 13.0, 11.0)));
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_selected_image_snaps_on_release() {
    let mut canvas = Canvas::new();
    let id = canvas.add_layer(ImageLayer::new(
        ImageResource::pending("a.png"),
        Point::new(0.0, 0.0),
        Point::new(20.0, 20.0),
    ));
    canvas.pointer_up(Point::new(5.0, 5.0));
    assert_eq!(canvas.selected_id(), Some(id));

    canvas.pointer_down(Point::new(5.0, 5.0));
    canvas.pointer_move(Point::new(6.25, 5.5));
    canvas.pointer_up(Point::new(6.75, 5.5));
    let Some(Layer::Image(image)) = canvas.layer(id).map(|obj| &obj.layer) else {
        panic!("expected an image layer");
    };
    assert_eq!(image.position(), Point::new(2.0, 1.0));
}

#[test]
fn test_pointer_up_on_empty_space() {
    let mut canvas = Canvas::new();
    canvas.add_layer(square(0.0, 0.0, 10.0));
    let log = record_events(&mut canvas);

    canvas.handle_pointer(PointerEvent::Up(Point::new(50.0, 50.0)));
    assert_eq!(canvas.selected_id(), None);
    assert!(log.borrow().is_empty());
}

#[test]
fn test_overlap_topmost_first() {
    let (mut canvas, _a, b) = overlapping_images(HitTestOrder::TopmostFirst);
    canvas.pointer_up(Point::new(15.0, 15.0));
    assert_eq!(canvas.selected_id(), Some(b));
}

#[test]
fn test_overlap_bottommost_first() {
    let (mut canvas, a, _b) = overlapping_images(HitTestOrder::BottommostFirst);
    canvas.pointer_up(Point::new(15.0, 15.0));
    assert_eq!(canvas.selected_id(), Some(a));
}

#[test]
fn test_hidden_layer_is_not_hit() {
    let (mut canvas, a, b) = overlapping_images(HitTestOrder::TopmostFirst);
    assert!(canvas.set_visible(b, false));
    assert_eq!(canvas.hit_test(&Point::new(15.0, 15.0)), Some(a));
    assert_eq!(canvas.hit_test(&Point::new(25.0, 25.0)), None);
    assert!(!canvas.set_visible(LayerId(99), false));
}

#[test]
fn test_select_switches_with_deselect_first() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    let b = canvas.add_layer(square(20.0, 0.0, 10.0));
    let log = record_events(&mut canvas);

    assert!(canvas.select_layer(a));
    assert!(canvas.select_layer(b));
    assert_eq!(
        *log.borrow(),
        vec![
            CanvasEvent::Select(a),
            CanvasEvent::Deselect(a),
            CanvasEvent::Select(b),
        ]
    );
    assert!(!canvas.layer(a).unwrap().is_selected());
    assert!(canvas.layer(b).unwrap().is_selected());
}

#[test]
fn test_select_unknown_or_same_layer() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    canvas.select_layer(a);
    let log = record_events(&mut canvas);

    assert!(!canvas.select_layer(LayerId(42)));
    assert!(canvas.select_layer(a));
    assert_eq!(canvas.selected_id(), Some(a));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_remove_selected_fires_deselect_then_remove() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    canvas.select_layer(a);
    let log = record_events(&mut canvas);

    let removed = canvas.remove_layer(a).unwrap();
    assert_eq!(removed.id, a);
    assert!(!removed.is_selected());
    assert_eq!(canvas.selected_id(), None);
    assert_eq!(canvas.layer_count(), 0);
    assert_eq!(*log.borrow(), vec![CanvasEvent::Deselect(a), CanvasEvent::Remove(a)]);
}

#[test]
fn test_remove_unselected_and_unknown() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    let b = canvas.add_layer(square(20.0, 0.0, 10.0));
    canvas.select_layer(a);
    let log = record_events(&mut canvas);

    assert!(canvas.remove_layer(b).is_some());
    assert!(canvas.remove_layer(b).is_none());
    assert_eq!(canvas.selected_id(), Some(a));
    assert_eq!(*log.borrow(), vec![CanvasEvent::Remove(b)]);
}

#[test]
fn test_deselect_is_idempotent() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    let log = record_events(&mut canvas);

    assert_eq!(canvas.deselect_layer(), None);
    canvas.select_layer(a);
    assert_eq!(canvas.deselect_layer(), Some(a));
    assert_eq!(canvas.deselect_layer(), None);
    assert_eq!(*log.borrow(), vec![CanvasEvent::Select(a), CanvasEvent::Deselect(a)]);
}

#[test]
fn test_clear_removes_everything() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    let b = canvas.add_named_layer("top", square(20.0, 0.0, 10.0));
    assert_eq!(canvas.layer(b).unwrap().name, "top");
    canvas.select_layer(b);
    let log = record_events(&mut canvas);

    canvas.clear();
    assert_eq!(canvas.layer_count(), 0);
    assert_eq!(
        *log.borrow(),
        vec![
            CanvasEvent::Deselect(b),
            CanvasEvent::Remove(a),
            CanvasEvent::Remove(b),
        ]
    );
}

#[test]
fn test_ids_are_not_reused() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    canvas.remove_layer(a);
    let b = canvas.add_layer(square(0.0, 0.0, 10.0));
    assert_ne!(a, b);
    assert_eq!(canvas.index_of(b), Some(0));
}

#[test]
fn test_drag_moves_selected_layer() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    canvas.select_layer(a);

    canvas.pointer_down(Point::new(5.0, 5.0));
    assert!(canvas.selected_layer().unwrap().is_dragging());
    canvas.pointer_move(Point::new(8.0, 9.0));
    canvas.pointer_up(Point::new(10.0, 10.0));

    let obj = canvas.selected_layer().unwrap();
    assert!(!obj.is_dragging());
    assert!(obj.inside_test(&Point::new(14.0, 14.0)));
    assert!(!obj.inside_test(&Point::new(2.0, 2.0)));
}

#[test]
fn test_press_outside_selected_layer_does_not_drag() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    canvas.select_layer(a);

    canvas.pointer_down(Point::new(50.0, 50.0));
    canvas.pointer_move(Point::new(60.0, 60.0));
    assert!(!canvas.selected_layer().unwrap().is_dragging());
    assert!(canvas.hit_test(&Point::new(5.0, 5.0)) == Some(a));
}

#[test]
fn test_try_layer_mut_reports_unknown_id() {
    let mut canvas = Canvas::new();
    let a = canvas.add_layer(square(0.0, 0.0, 10.0));
    assert!(canvas.try_layer_mut(a).is_ok());
    assert_eq!(
        canvas.try_layer_mut(LayerId(7)).unwrap_err(),
        layerkit_core::LayerError::InvalidLayerReference { id: LayerId(7) }
    );
}
