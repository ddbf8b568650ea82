//! The active layer, shared by handle.
//!
//! Exactly one layer (of any kind) or none is selected at a time. Callbacks
//! that outlive a single event hold a clone of the [`SelectionHandle`] and
//! read it when they run, so they always see the latest selection rather
//! than the one current when they were registered.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::model::LayerKey;

/// Cloneable handle to the single shared selection cell.
#[derive(Debug, Clone, Default)]
pub struct SelectionHandle {
    cell: Rc<RefCell<Option<LayerKey>>>,
}

impl SelectionHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently selected layer.
    #[must_use]
    pub fn get(&self) -> Option<LayerKey> {
        self.cell.borrow().clone()
    }

    /// Replace the selection. Returns `true` if it changed.
    pub fn set(&self, key: Option<LayerKey>) -> bool {
        let mut current = self.cell.borrow_mut();
        if *current == key {
            return false;
        }
        *current = key;
        true
    }

    /// Returns `true` if `key` is the selected layer.
    #[must_use]
    pub fn is(&self, key: &LayerKey) -> bool {
        self.cell.borrow().as_ref() == Some(key)
    }

    /// Clear the selection if it points at `key`. Returns `true` if cleared.
    pub fn clear_if(&self, key: &LayerKey) -> bool {
        if self.is(key) { self.set(None) } else { false }
    }
}
