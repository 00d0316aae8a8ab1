//! # LayerKit Core
//!
//! Core types shared by every LayerKit crate:
//! - [`Point`], the 2D coordinate/vector value used for geometry and pointer input
//! - [`LayerId`], the handle a canvas hands out for each layer it owns
//! - [`Color`], the paint style used for fills, strokes and backgrounds
//! - The error taxonomy for layers, image resources and scene files
//! - Canvas events and the single-slot [`EventDispatcher`]

pub mod color;
pub mod error;
pub mod event;
pub mod point;
pub mod types;

pub use color::Color;
pub use error::{Error, LayerError, ResourceError, Result, SceneError};
pub use event::{CanvasEvent, CanvasEventKind, EventDispatcher};
pub use point::Point;
pub use types::{
    shared, thread_safe, EventCallback, HitTestOrder, LayerId, Shared, SharedVec, ThreadSafe,
};
