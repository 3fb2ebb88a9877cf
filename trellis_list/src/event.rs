// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed events emitted by the list controller.

use trellis_model::{CellId, IndexPath, ItemPath, SectionId};

/// One event on the controller's output channel.
///
/// Events are buffered in order and drained with
/// [`ListController::take_events`](crate::ListController::take_events).
/// Collaborators subscribe by draining after each call into the controller;
/// nothing is delivered through closures stored inside models, which keeps
/// cell models plain comparable values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent {
    /// An item is about to become visible; its view is bound.
    WillDisplay {
        /// The item's position.
        path: ItemPath,
    },
    /// An item left the realized range; its view was recycled.
    DidEndDisplaying {
        /// The item's last position.
        path: ItemPath,
    },
    /// The whole list is about to be shown.
    WillDisplayList,
    /// The whole list stopped being shown.
    DidEndDisplayingList,
    /// A selectable cell was selected.
    Selected {
        /// Owning section id.
        section: SectionId,
        /// Selected cell id.
        cell: CellId,
        /// Position at the time of selection.
        path: IndexPath,
    },
    /// A highlightable cell changed highlight state.
    Highlighted {
        /// Owning section id.
        section: SectionId,
        /// Highlighted cell id.
        cell: CellId,
        /// Position at the time of the change.
        path: IndexPath,
        /// `true` on highlight, `false` on unhighlight.
        active: bool,
    },
    /// A reorderable cell was moved within its section.
    Moved {
        /// Owning section index.
        section: usize,
        /// Index the cell was taken from.
        from: usize,
        /// Index the cell ended up at.
        to: usize,
    },
    /// An update transaction was applied to the view layer.
    UpdateApplied {
        /// Whether the host should animate the structural operations.
        animated: bool,
        /// Whether the applied transaction contained any operations.
        changed: bool,
    },
}
