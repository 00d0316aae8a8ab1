//! Canvas type definitions: PointerEvent, FrameStats.

use layerkit_core::Point;

/// Pointer input in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down(p) | PointerEvent::Move(p) | PointerEvent::Up(p) => *p,
        }
    }
}

/// Outcome of drawing one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Visible layers that drew successfully.
    pub drawn: usize,
    /// Visible layers whose draw was skipped (unready image, degenerate geometry).
    pub skipped: usize,
    /// Layers not drawn because they are hidden.
    pub hidden: usize,
}
