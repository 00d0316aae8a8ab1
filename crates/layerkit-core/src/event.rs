//! Canvas event system
//!
//! Provides:
//! - Event types for layer lifecycle, selection changes and redraws
//! - A dispatcher with one handler slot per event kind
//!
//! Registering a handler for a kind replaces any handler already in that slot;
//! there is no fan-out to multiple subscribers. Handlers are called
//! synchronously, after the state change they describe has been applied.

use crate::types::{EventCallback, LayerId};
use std::collections::HashMap;
use std::fmt;

/// Canvas event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    /// A layer was appended to the canvas
    Add(LayerId),
    /// A layer was removed from the canvas
    Remove(LayerId),
    /// A layer became the selection
    Select(LayerId),
    /// A layer stopped being the selection
    Deselect(LayerId),
    /// A frame finished drawing
    Draw,
}

impl CanvasEvent {
    /// The slot this event is delivered to.
    pub fn kind(&self) -> CanvasEventKind {
        match self {
            CanvasEvent::Add(_) => CanvasEventKind::Add,
            CanvasEvent::Remove(_) => CanvasEventKind::Remove,
            CanvasEvent::Select(_) => CanvasEventKind::Select,
            CanvasEvent::Deselect(_) => CanvasEventKind::Deselect,
            CanvasEvent::Draw => CanvasEventKind::Draw,
        }
    }

    /// The layer the event is about, if any.
    pub fn layer(&self) -> Option<LayerId> {
        match self {
            CanvasEvent::Add(id)
            | CanvasEvent::Remove(id)
            | CanvasEvent::Select(id)
            | CanvasEvent::Deselect(id) => Some(*id),
            CanvasEvent::Draw => None,
        }
    }
}

impl fmt::Display for CanvasEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasEvent::Add(id) => write!(f, "add {}", id),
            CanvasEvent::Remove(id) => write!(f, "remove {}", id),
            CanvasEvent::Select(id) => write!(f, "select {}", id),
            CanvasEvent::Deselect(id) => write!(f, "deselect {}", id),
            CanvasEvent::Draw => write!(f, "draw"),
        }
    }
}

/// Event slot names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasEventKind {
    Add,
    Remove,
    Select,
    Deselect,
    Draw,
}

impl CanvasEventKind {
    pub const ALL: [CanvasEventKind; 5] = [
        CanvasEventKind::Add,
        CanvasEventKind::Remove,
        CanvasEventKind::Select,
        CanvasEventKind::Deselect,
        CanvasEventKind::Draw,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CanvasEventKind::Add => "add",
            CanvasEventKind::Remove => "remove",
            CanvasEventKind::Select => "select",
            CanvasEventKind::Deselect => "deselect",
            CanvasEventKind::Draw => "draw",
        }
    }
}

impl fmt::Display for CanvasEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Event dispatcher with a single handler per event kind
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<CanvasEventKind, EventCallback>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `kind`.
    ///
    /// Returns `true` when a previously registered handler was replaced.
    pub fn on<F>(&mut self, kind: CanvasEventKind, handler: F) -> bool
    where
        F: FnMut(&CanvasEvent) + 'static,
    {
        let replaced = self.handlers.insert(kind, Box::new(handler)).is_some();
        if replaced {
            tracing::debug!("Replaced handler for '{}' event", kind);
        }
        replaced
    }

    /// Clears the slot for `kind`, returning whether a handler was present.
    pub fn off(&mut self, kind: CanvasEventKind) -> bool {
        self.handlers.remove(&kind).is_some()
    }

    pub fn has_handler(&self, kind: CanvasEventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Delivers `event` to the handler registered for its kind.
    ///
    /// Returns `false` if the slot is empty.
    pub fn emit(&mut self, event: CanvasEvent) -> bool {
        match self.handlers.get_mut(&event.kind()) {
            Some(handler) => {
                handler(&event);
                true
            }
            None => false,
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&'static str> = self.handlers.keys().map(|k| k.name()).collect();
        kinds.sort_unstable();
        f.debug_struct("EventDispatcher")
            .field("handlers", &kinds)
            .finish()
    }
}
