//! # LayerKit Canvas
//!
//! A stack of drawable layers with pointer hit-testing and single-layer
//! selection.
//!
//! - [`collision`]: point-in-polygon, point-near-segment and point-in-box predicates
//! - [`layer`]: polygon, polyline and image layers behind [`layer::LayerShape`]
//! - [`canvas`]: the [`Canvas`] selection state machine and redraw loop
//! - [`surface`] / [`renderer`]: the drawing contract and its tiny-skia implementation
//! - [`image_resource`]: background image loading polled at draw time
//! - [`serialization`]: JSON scene files
//! - [`layer_list`]: an event-driven mirror for list views

pub mod canvas;
pub mod collision;
pub mod frame;
pub mod image_resource;
pub mod layer;
pub mod layer_list;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod surface;

pub use canvas::{Canvas, FrameStats, PointerEvent};
pub use frame::{FixedRateScheduler, FrameScheduler, DEFAULT_FRAME_INTERVAL};
pub use image_resource::{ImageData, ImageLoader, ImageResource, ImageState};
pub use layer::{
    ImageLayer, Layer, LayerKind, LayerObject, LayerShape, PolygonLayer, PolylineLayer,
    POLYLINE_HIT_TOLERANCE,
};
pub use layer_list::{LayerList, LayerListEntry};
pub use renderer::PixmapSurface;
pub use selection_manager::{SelectionChange, SelectionManager};
pub use serialization::{LayerSpec, SceneFile, SCENE_FORMAT_VERSION};
pub use surface::{DrawCommand, RecordingSurface, RenderSurface};
