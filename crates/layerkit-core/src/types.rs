//! Shared type definitions and aliases.
//!
//! Complex nested types such as `Rc<RefCell<Vec<T>>>` get short names here so
//! the same pattern reads the same way in every crate:
//!
//! ```
//! use layerkit_core::types::{shared, SharedVec};
//!
//! let log: SharedVec<u32> = shared(Vec::new());
//! log.borrow_mut().push(1);
//! assert_eq!(log.borrow().len(), 1);
//! ```

use crate::event::CanvasEvent;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Handle for a layer owned by a canvas.
///
/// Ids are allocated by the canvas in increasing order and never reused, so a
/// stale id simply stops resolving once its layer is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which end of the draw order wins when layers overlap under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTestOrder {
    /// Scan from the last drawn layer down, so the layer painted on top wins.
    #[default]
    TopmostFirst,
    /// Scan in insertion order, so the first added layer wins.
    BottommostFirst,
}

impl fmt::Display for HitTestOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopmostFirst => write!(f, "topmost_first"),
            Self::BottommostFirst => write!(f, "bottommost_first"),
        }
    }
}

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Canvas event handlers run on the thread that owns the canvas, so state they
/// update (layer list mirrors, test recorders) is shared this way.
pub type Shared<T> = Rc<RefCell<T>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<Mutex<T>>)
// =============================================================================

/// A thread-safe, mutex-protected wrapper.
///
/// Used for state written by a background thread and polled by the canvas
/// thread, such as image load results.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

// =============================================================================
// CALLBACKS
// =============================================================================

/// Handler registered for a canvas event slot.
pub type EventCallback = Box<dyn FnMut(&CanvasEvent)>;

/// Wraps a value in `Rc<RefCell<_>>`.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Wraps a value in `Arc<Mutex<_>>`.
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}
