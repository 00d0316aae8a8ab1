//! Canvas owning the layer stack, pointer state and selection.

mod types;

pub use types::{FrameStats, PointerEvent};

use crate::frame::FrameScheduler;
use crate::layer::{Layer, LayerObject};
use crate::selection_manager::SelectionManager;
use crate::surface::RenderSurface;
use layerkit_core::{
    CanvasEvent, CanvasEventKind, EventDispatcher, HitTestOrder, LayerError, LayerId, Point,
};
use std::ops::ControlFlow;
use tracing::{debug, trace};

/// Canvas state managing layers, input and redraws.
///
/// Layers are kept in draw order: index 0 is drawn first (bottom), the last
/// layer is drawn on top. The canvas owns every layer; the selection is an id
/// into that list and is cleared whenever its layer is removed.
#[derive(Debug, Default)]
pub struct Canvas {
    layers: Vec<LayerObject>,
    selection: SelectionManager,
    pointer: Point,
    events: EventDispatcher,
    next_id: u64,
}

impl Canvas {
    /// Creates an empty canvas with topmost-first hit-testing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty canvas using `order` for pointer hit-testing.
    pub fn with_hit_test_order(order: HitTestOrder) -> Self {
        Self {
            selection: SelectionManager::with_order(order),
            ..Self::default()
        }
    }

    pub fn hit_test_order(&self) -> HitTestOrder {
        self.selection.order()
    }

    pub fn set_hit_test_order(&mut self, order: HitTestOrder) {
        self.selection.set_order(order);
    }

    /// Registers the handler for an event kind, replacing any previous one.
    pub fn on<F>(&mut self, kind: CanvasEventKind, handler: F) -> bool
    where
        F: FnMut(&CanvasEvent) + 'static,
    {
        self.events.on(kind, handler)
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    /// Appends a layer on top of the stack.
    pub fn add_layer(&mut self, layer: impl Into<Layer>) -> LayerId {
        let id = self.generate_id();
        self.insert(LayerObject::new(id, layer.into()))
    }

    /// Appends a layer with a display name.
    pub fn add_named_layer(&mut self, name: impl Into<String>, layer: impl Into<Layer>) -> LayerId {
        let id = self.generate_id();
        let mut obj = LayerObject::new(id, layer.into());
        obj.name = name.into();
        self.insert(obj)
    }

    fn insert(&mut self, obj: LayerObject) -> LayerId {
        let id = obj.id;
        debug!("Added {} layer {} '{}'", obj.kind(), id, obj.name);
        self.layers.push(obj);
        self.events.emit(CanvasEvent::Add(id));
        id
    }

    fn generate_id(&mut self) -> LayerId {
        self.next_id += 1;
        LayerId(self.next_id)
    }

    /// Removes a layer, deselecting it first if it is the selection.
    ///
    /// Unknown ids are ignored.
    pub fn remove_layer(&mut self, id: LayerId) -> Option<LayerObject> {
        let Some(index) = self.index_of(id) else {
            debug!("Ignoring removal: {}", LayerError::InvalidLayerReference { id });
            return None;
        };

        if self.selection.is_selected(id) {
            self.deselect_layer();
        }

        let obj = self.layers.remove(index);
        debug!("Removed layer {}", id);
        self.events.emit(CanvasEvent::Remove(id));
        Some(obj)
    }

    /// Removes every layer, firing the same events as individual removals.
    pub fn clear(&mut self) {
        self.deselect_layer();
        for obj in std::mem::take(&mut self.layers) {
            self.events.emit(CanvasEvent::Remove(obj.id));
        }
    }

    /// Makes `id` the selected layer.
    ///
    /// Returns `false`, leaving the selection unchanged, if `id` is not on the
    /// canvas. Selecting the current selection again is a no-op.
    pub fn select_layer(&mut self, id: LayerId) -> bool {
        let Some(change) = self.selection.select_id(&mut self.layers, id) else {
            debug!("Ignoring selection: {}", LayerError::InvalidLayerReference { id });
            return false;
        };

        if let Some(previous) = change.deselected {
            debug!("Deselected layer {}", previous);
            self.events.emit(CanvasEvent::Deselect(previous));
        }
        if let Some(selected) = change.selected {
            debug!("Selected layer {}", selected);
            self.events.emit(CanvasEvent::Select(selected));
        }
        true
    }

    /// Clears the selection, returning the layer that was selected.
    pub fn deselect_layer(&mut self) -> Option<LayerId> {
        let id = self.selection.deselect(&mut self.layers)?;
        debug!("Deselected layer {}", id);
        self.events.emit(CanvasEvent::Deselect(id));
        Some(id)
    }

    /// The visible layer under `point`, honouring the hit-test order.
    pub fn hit_test(&self, point: &Point) -> Option<LayerId> {
        self.selection.hit_test(&self.layers, point)
    }

    pub fn pointer_down(&mut self, point: Point) {
        self.pointer = point;
        if let Some(obj) = self.selected_layer_mut() {
            obj.on_pointer_down(&point);
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        self.pointer = point;
        if let Some(obj) = self.selected_layer_mut() {
            obj.on_pointer_move(&point);
        }
    }

    /// Forwards the release to the selected layer, or selects the layer under
    /// the pointer when nothing is selected.
    pub fn pointer_up(&mut self, point: Point) {
        self.pointer = point;
        if let Some(obj) = self.selected_layer_mut() {
            obj.on_pointer_up(&point);
            return;
        }

        match self.hit_test(&point) {
            Some(id) => {
                trace!("Pointer up at ({}, {}) hit layer {}", point.x, point.y, id);
                self.select_layer(id);
            }
            None => trace!("Pointer up at ({}, {}) hit nothing", point.x, point.y),
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down(p) => self.pointer_down(p),
            PointerEvent::Move(p) => self.pointer_move(p),
            PointerEvent::Up(p) => self.pointer_up(p),
        }
    }

    /// Clears the surface and draws every visible layer back to front.
    ///
    /// A layer that cannot draw is skipped; the rest of the frame still draws.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> FrameStats {
        surface.clear_region(0.0, 0.0, f64::from(surface.width()), f64::from(surface.height()));

        let mut stats = FrameStats::default();
        for obj in &self.layers {
            if !obj.visible {
                stats.hidden += 1;
                continue;
            }
            match obj.draw(surface) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    trace!("Skipped layer {}: {}", obj.id, e);
                    stats.skipped += 1;
                }
            }
        }

        self.events.emit(CanvasEvent::Draw);
        stats
    }

    /// Redraws once per scheduler frame. Returns the number of frames drawn.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler, surface: &mut dyn RenderSurface) -> u64 {
        self.run_with(scheduler, surface, |_, _| ControlFlow::Continue(()))
    }

    /// Like [`Canvas::run`], calling `before_frame` ahead of each redraw so the
    /// host can feed input. Breaking from `before_frame` ends the loop.
    pub fn run_with<F>(
        &mut self,
        scheduler: &mut dyn FrameScheduler,
        surface: &mut dyn RenderSurface,
        mut before_frame: F,
    ) -> u64
    where
        F: FnMut(u64, &mut Canvas) -> ControlFlow<()>,
    {
        let mut frames = 0;
        scheduler.run(&mut |frame| {
            if before_frame(frame, self).is_break() {
                return ControlFlow::Break(());
            }
            let stats = self.render(surface);
            trace!(
                "Frame {}: drawn={} skipped={} hidden={}",
                frame,
                stats.drawn,
                stats.skipped,
                stats.hidden
            );
            frames += 1;
            ControlFlow::Continue(())
        });
        frames
    }

    /// Shows or hides a layer. Returns `false` for unknown ids.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        match self.try_layer_mut(id) {
            Ok(obj) => {
                obj.visible = visible;
                true
            }
            Err(e) => {
                debug!("Ignoring visibility change: {}", e);
                false
            }
        }
    }

    pub fn layers(&self) -> &[LayerObject] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|obj| obj.id == id)
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerObject> {
        self.layers.iter().find(|obj| obj.id == id)
    }

    /// Mutable access for geometry and visibility edits.
    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut LayerObject> {
        self.layers.iter_mut().find(|obj| obj.id == id)
    }

    /// Like [`Canvas::layer_mut`], reporting unknown ids as an error.
    pub fn try_layer_mut(&mut self, id: LayerId) -> Result<&mut LayerObject, LayerError> {
        self.layer_mut(id)
            .ok_or(LayerError::InvalidLayerReference { id })
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.selection.selected_id()
    }

    pub fn selected_layer(&self) -> Option<&LayerObject> {
        self.selected_id().and_then(|id| self.layer(id))
    }

    fn selected_layer_mut(&mut self) -> Option<&mut LayerObject> {
        let id = self.selected_id()?;
        self.layer_mut(id)
    }

    /// Last pointer position seen by the canvas.
    pub fn pointer(&self) -> Point {
        self.pointer
    }
}
