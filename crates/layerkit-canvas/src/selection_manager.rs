use crate::layer::LayerObject;
use layerkit_core::{HitTestOrder, LayerId, Point};

/// Tracks the single selected layer and performs hit-testing.
///
/// `SelectionManager` is responsible for:
/// - Holding the id of the selected layer, if any
/// - Keeping each layer's `selected` flag in step with that id
/// - Finding the layer under a point according to the [`HitTestOrder`]
///
/// # Selection Model
///
/// At most one layer is selected. Selecting a layer while another one is
/// selected fully deselects the previous layer first. The manager does not own
/// the layers; every operation borrows the canvas' layer list, so a layer that
/// is no longer in the list can never be selected.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected_id: Option<LayerId>,
    order: HitTestOrder,
}

/// Transitions performed by a selection call, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub deselected: Option<LayerId>,
    pub selected: Option<LayerId>,
}

impl SelectionChange {
    pub fn is_empty(&self) -> bool {
        self.deselected.is_none() && self.selected.is_none()
    }
}

impl SelectionManager {
    /// Creates a manager with no selection and topmost-first hit-testing.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerkit_canvas::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(order: HitTestOrder) -> Self {
        Self {
            selected_id: None,
            order,
        }
    }

    pub fn order(&self) -> HitTestOrder {
        self.order
    }

    pub fn set_order(&mut self, order: HitTestOrder) {
        self.order = order;
    }

    pub fn selected_id(&self) -> Option<LayerId> {
        self.selected_id
    }

    /// Returns the visible layer under `point`.
    ///
    /// With [`HitTestOrder::TopmostFirst`] the scan runs from the last drawn
    /// layer down; with [`HitTestOrder::BottommostFirst`] it runs in insertion
    /// order. Hidden layers are never hit.
    pub fn hit_test(&self, layers: &[LayerObject], point: &Point) -> Option<LayerId> {
        let hit = |obj: &&LayerObject| obj.visible && obj.inside_test(point);
        let found = match self.order {
            HitTestOrder::TopmostFirst => layers.iter().rev().find(hit),
            HitTestOrder::BottommostFirst => layers.iter().find(hit),
        };
        found.map(|obj| obj.id)
    }

    /// Makes `id` the selection.
    ///
    /// Returns `None` if `id` is not in `layers` (nothing changes). Selecting
    /// the already-selected layer returns an empty change.
    pub fn select_id(&mut self, layers: &mut [LayerObject], id: LayerId) -> Option<SelectionChange> {
        let index = layers.iter().position(|obj| obj.id == id)?;
        if self.selected_id == Some(id) {
            return Some(SelectionChange::default());
        }

        let deselected = self.deselect(layers);
        layers[index].on_select();
        self.selected_id = Some(id);

        Some(SelectionChange {
            deselected,
            selected: Some(id),
        })
    }

    /// Clears the selection, returning the id that was selected.
    pub fn deselect(&mut self, layers: &mut [LayerObject]) -> Option<LayerId> {
        let id = self.selected_id.take()?;
        if let Some(obj) = layers.iter_mut().find(|obj| obj.id == id) {
            obj.on_deselect();
        }
        Some(id)
    }

    /// Whether `id` is the current selection.
    pub fn is_selected(&self, id: LayerId) -> bool {
        self.selected_id == Some(id)
    }
}
