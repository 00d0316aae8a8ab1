use layerkit_core::Point;
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -1.0e3..1.0e3f64
}

proptest! {
    #[test]
    fn distance_is_symmetric(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
        let a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        prop_assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-9);
    }

    #[test]
    fn add_then_sub_restores(ax in coord(), ay in coord(), bx in coord(), by in coord()) {
        let mut a = Point::new(ax, ay);
        let b = Point::new(bx, by);
        a.add(&b).sub(&b);
        prop_assert!((a.x - ax).abs() < 1e-9);
        prop_assert!((a.y - ay).abs() < 1e-9);
    }

    #[test]
    fn length_matches_distance_from_origin(x in coord(), y in coord()) {
        let p = Point::new(x, y);
        prop_assert!((p.length() - p.distance_to(&Point::default())).abs() < 1e-9);
    }

    #[test]
    fn multiply_scales_length(x in coord(), y in coord(), s in 0.0..10.0f64) {
        let mut p = Point::new(x, y);
        let before = p.length();
        p.multiply(s);
        prop_assert!((p.length() - before * s).abs() < 1e-6);
    }
}

#[test]
fn test_tuple_conversions() {
    let p: Point = (2.0, -1.0).into();
    assert_eq!(p, Point::new(2.0, -1.0));
    let t: (f64, f64) = p.into();
    assert_eq!(t, (2.0, -1.0));
}
