//! Scene files loaded from disk, including background image loading.

use layerkit_canvas::{
    ImageLoader, Layer, LayerKind, RecordingSurface, SceneFile, POLYLINE_HIT_TOLERANCE,
};
use layerkit_core::{HitTestOrder, Point, SceneError};
use std::fs;
use std::thread;
use std::time::{Duration, Instant};

fn wait_until(mut ready: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if ready() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    ready()
}

#[test]
fn test_scene_with_image_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 128, 255, 255]))
        .save(dir.path().join("tile.png"))
        .unwrap();

    let scene_path = dir.path().join("scene.json");
    fs::write(
        &scene_path,
        r##"{
            "version": "1.0",
            "width": 40,
            "height": 40,
            "hit_test_order": "bottommost_first",
            "layers": [
                { "type": "image", "name": "tile", "source": "tile.png", "x": 0, "y": 0, "width": 20, "height": 20 },
                { "type": "polygon", "points": [[10,10],[30,10],[30,30],[10,30]], "fill": "#ff000080" }
            ]
        }"##,
    )
    .unwrap();

    let scene = SceneFile::load(&scene_path).unwrap();
    let mut canvas = scene
        .build(&ImageLoader::with_base_dir(dir.path()), POLYLINE_HIT_TOLERANCE)
        .unwrap();

    assert_eq!(canvas.hit_test_order(), HitTestOrder::BottommostFirst);
    assert_eq!(canvas.layer_count(), 2);
    assert_eq!(canvas.layers()[0].kind(), LayerKind::Image);
    let tile = canvas.layers()[0].id;
    assert_eq!(canvas.hit_test(&Point::new(15.0, 15.0)), Some(tile));

    let Layer::Image(image_layer) = &canvas.layers()[0].layer else {
        panic!("first layer should be an image");
    };
    let resource = image_layer.resource().clone();
    assert!(wait_until(|| resource.is_ready()), "image never loaded");
    assert_eq!(resource.data().unwrap().width(), 4);

    let stats = canvas.render(&mut RecordingSurface::new(40, 40));
    assert_eq!((stats.drawn, stats.skipped), (2, 0));
}

#[test]
fn test_missing_image_stays_undrawn() {
    let dir = tempfile::tempdir().unwrap();
    let scene = SceneFile::from_json(
        r#"{"version": "1.0", "layers": [
            {"type": "image", "source": "missing.png", "x": 0, "y": 0, "width": 5, "height": 5}
        ]}"#,
    )
    .unwrap();
    let mut canvas = scene
        .build(&ImageLoader::with_base_dir(dir.path()), POLYLINE_HIT_TOLERANCE)
        .unwrap();

    let Layer::Image(image_layer) = &canvas.layers()[0].layer else {
        panic!("expected an image layer");
    };
    let resource = image_layer.resource().clone();
    assert!(wait_until(|| resource.is_failed()), "load never failed");

    let stats = canvas.render(&mut RecordingSurface::new(10, 10));
    assert_eq!((stats.drawn, stats.skipped), (0, 1));
    // Still hit-testable while undrawn.
    assert!(canvas.hit_test(&Point::new(2.0, 2.0)).is_some());

    // Reloading after the file appears brings the layer back.
    image::RgbaImage::from_pixel(1, 1, image::Rgba([255, 255, 255, 255]))
        .save(dir.path().join("missing.png"))
        .unwrap();
    ImageLoader::with_base_dir(dir.path()).reload(&resource);
    assert!(wait_until(|| resource.is_ready()), "reload never finished");

    let stats = canvas.render(&mut RecordingSurface::new(10, 10));
    assert_eq!((stats.drawn, stats.skipped), (1, 0));
}

#[test]
fn test_missing_scene_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SceneFile::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, SceneError::Io(_)));
}
