//! External list view kept in sync with a canvas through its event slots.

use crate::canvas::Canvas;
use layerkit_core::{CanvasEvent, CanvasEventKind, LayerId, Shared};

/// One row of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerListEntry {
    pub id: LayerId,
    pub selected: bool,
}

/// Mirror of a canvas' layer order and selection.
///
/// Attaching takes the add/remove/select/deselect slots of the canvas;
/// registering other handlers on those kinds afterwards detaches the mirror
/// from that kind.
#[derive(Debug, Clone, Default)]
pub struct LayerList {
    entries: Shared<Vec<LayerListEntry>>,
}

impl LayerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the list from `canvas` and follows its events from now on.
    pub fn attach(canvas: &mut Canvas) -> Self {
        let list = Self::new();
        {
            let mut entries = list.entries.borrow_mut();
            entries.extend(canvas.layers().iter().map(|obj| LayerListEntry {
                id: obj.id,
                selected: obj.is_selected(),
            }));
        }

        for kind in [
            CanvasEventKind::Add,
            CanvasEventKind::Remove,
            CanvasEventKind::Select,
            CanvasEventKind::Deselect,
        ] {
            let entries = list.entries.clone();
            if canvas.on(kind, move |event| apply(&entries, event)) {
                tracing::debug!("Layer list replaced existing {} handler", kind);
            }
        }
        list
    }

    pub fn entries(&self) -> Vec<LayerListEntry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn selected(&self) -> Option<LayerId> {
        self.entries
            .borrow()
            .iter()
            .find(|entry| entry.selected)
            .map(|entry| entry.id)
    }

    /// Text rows, top of the stack first, selected row marked with `>`.
    pub fn rows(&self) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .map(|entry| {
                let marker = if entry.selected { '>' } else { ' ' };
                format!("{} layer {}", marker, entry.id)
            })
            .collect()
    }
}

fn apply(entries: &Shared<Vec<LayerListEntry>>, event: &CanvasEvent) {
    let mut entries = entries.borrow_mut();
    match *event {
        CanvasEvent::Add(id) => entries.push(LayerListEntry {
            id,
            selected: false,
        }),
        CanvasEvent::Remove(id) => entries.retain(|entry| entry.id != id),
        CanvasEvent::Select(id) | CanvasEvent::Deselect(id) => {
            let selected = matches!(event, CanvasEvent::Select(_));
            if let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) {
                entry.selected = selected;
            }
        }
        CanvasEvent::Draw => {}
    }
}
