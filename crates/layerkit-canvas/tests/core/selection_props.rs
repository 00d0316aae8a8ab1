//! Property tests for the single-selection invariant.

use layerkit_canvas::{Canvas, PolygonLayer};
use layerkit_core::{HitTestOrder, Point};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add(f64, f64),
    Remove(usize),
    Select(usize),
    Deselect,
    Hide(usize),
    PointerUp(f64, f64),
    Drag(f64, f64, f64, f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0.0..90.0f64, 0.0..90.0f64).prop_map(|(x, y)| Op::Add(x, y)),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8).prop_map(Op::Select),
        Just(Op::Deselect),
        (0usize..8).prop_map(Op::Hide),
        (0.0..100.0f64, 0.0..100.0f64).prop_map(|(x, y)| Op::PointerUp(x, y)),
        (0.0..100.0f64, 0.0..100.0f64, -20.0..20.0f64, -20.0..20.0f64)
            .prop_map(|(x, y, dx, dy)| Op::Drag(x, y, dx, dy)),
    ]
}

fn square(x: f64, y: f64) -> PolygonLayer {
    PolygonLayer::new(vec![
        Point::new(x, y),
        Point::new(x + 10.0, y),
        Point::new(x + 10.0, y + 10.0),
        Point::new(x, y + 10.0),
    ])
}

fn apply(canvas: &mut Canvas, op: &Op) {
    let id_at = |canvas: &Canvas, i: usize| canvas.layers().get(i).map(|obj| obj.id);
    match *op {
        Op::Add(x, y) => {
            canvas.add_layer(square(x, y));
        }
        Op::Remove(i) => {
            if let Some(id) = id_at(canvas, i) {
                canvas.remove_layer(id);
            }
        }
        Op::Select(i) => {
            if let Some(id) = id_at(canvas, i) {
                assert!(canvas.select_layer(id));
            }
        }
        Op::Deselect => {
            canvas.deselect_layer();
        }
        Op::Hide(i) => {
            if let Some(id) = id_at(canvas, i) {
                canvas.set_visible(id, false);
            }
        }
        Op::PointerUp(x, y) => canvas.pointer_up(Point::new(x, y)),
        Op::Drag(x, y, dx, dy) => {
            canvas.pointer_down(Point::new(x, y));
            canvas.pointer_move(Point::new(x + dx, y + dy));
            canvas.pointer_up(Point::new(x + dx, y + dy));
        }
    }
}

fn assert_single_selection(canvas: &Canvas) {
    let flagged: Vec<_> = canvas
        .layers()
        .iter()
        .filter(|obj| obj.is_selected())
        .map(|obj| obj.id)
        .collect();
    assert!(flagged.len() <= 1, "more than one layer selected: {:?}", flagged);
    assert_eq!(flagged.first().copied(), canvas.selected_id());
    if let Some(id) = canvas.selected_id() {
        assert!(canvas.layer(id).is_some(), "selection {} not on canvas", id);
    }
}

proptest! {
    #[test]
    fn prop_at_most_one_selected(ops in prop::collection::vec(op(), 0..60)) {
        let mut canvas = Canvas::new();
        for op in &ops {
            apply(&mut canvas, op);
            assert_single_selection(&canvas);
        }
    }

    #[test]
    fn prop_hit_orders_agree_without_overlap(x in 0.0..200.0f64, y in 0.0..40.0f64) {
        let mut top = Canvas::with_hit_test_order(HitTestOrder::TopmostFirst);
        let mut bottom = Canvas::with_hit_test_order(HitTestOrder::BottommostFirst);
        for i in 0..5 {
            top.add_layer(square(i as f64 * 40.0, 0.0));
            bottom.add_layer(square(i as f64 * 40.0, 0.0));
        }
        let p = Point::new(x, y);
        prop_assert_eq!(top.hit_test(&p), bottom.hit_test(&p));
    }
}
