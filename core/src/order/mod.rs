//! Cross-process widget ordering.
//!
//! The coordinator fronts the shared durable order list (rightmost first)
//! and the reposition broadcast; the drag controller drives live
//! reordering; the animation module supplies the convergence tick.

pub mod animate;
pub mod drag;
pub mod store;

#[cfg(test)]
mod order_tests;

use crate::slot::{SiblingWindow, StripGeometry};
use store::OrderStore;

/// Coordinates this process's view of the shared order list.
///
/// The cached copy is refreshed explicitly (on broadcast receipt), never
/// behind the caller's back.
pub struct OrderCoordinator<S: OrderStore> {
    store: S,
    cached: Vec<String>,
}

impl<S: OrderStore> OrderCoordinator<S> {
    pub fn new(store: S) -> Self {
        let cached = store.read();
        Self { store, cached }
    }

    /// Append this widget to the shared order if absent. Idempotent.
    pub fn register(&mut self, name: &str) {
        self.refresh();
        if self.cached.iter().any(|n| n == name) {
            return;
        }
        self.cached.push(name.to_string());
        if let Err(e) = self.store.write(&self.cached) {
            tracing::warn!(error = %e, widget = name, "failed to persist widget registration");
        }
    }

    /// Re-read the shared list; call on every broadcast receipt.
    pub fn refresh(&mut self) {
        self.cached = self.store.read();
    }

    /// Current order, index 0 = rightmost. A name's absence means
    /// "unordered, arrival-order placement".
    pub fn order(&self) -> &[String] {
        &self.cached
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.cached.iter().position(|n| n == name)
    }

    /// Atomic full replace of the shared order.
    pub fn save_order(&mut self, names: Vec<String>) {
        if let Err(e) = self.store.write(&names) {
            tracing::warn!(error = %e, "failed to persist widget order");
        }
        self.cached = names;
    }

    /// Tell every peer to recompute its slot and re-render.
    pub fn broadcast_reposition(&self) {
        if let Err(e) = self.store.broadcast() {
            tracing::warn!(error = %e, "reposition broadcast failed");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// A computed left edge for one named widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub x: i32,
}

/// Place every named, currently-visible widget right-to-left using its
/// live width. Used for resize-triggered repositioning and for drag
/// preview targets; widgets missing from the live enumeration are skipped
/// without consuming space.
pub fn reposition_all(
    order: &[String],
    windows: &[SiblingWindow],
    strip: &StripGeometry,
    margin: i32,
) -> Vec<Placement> {
    let floor = strip.min_left();
    let mut right = strip.right_boundary();
    let mut placements = Vec::new();

    for name in order {
        let Some(window) = windows.iter().find(|w| &w.name == name) else {
            continue;
        };
        let x = (right - window.width).max(floor);
        placements.push(Placement {
            name: name.clone(),
            x,
        });
        right = x - margin;
    }

    placements
}
