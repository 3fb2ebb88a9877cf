// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural operations and the diff result.

use alloc::vec::Vec;

/// One structural operation transforming the old list towards the new list.
///
/// Index spaces follow batch-update convention: [`Delete::index`] and
/// [`Move::from`] address the *old* list, [`Insert::index`], [`Move::to`],
/// and [`Update::new_index`] address the *new* list. See [`crate::apply`] for
/// the exact application recipe.
///
/// [`Delete::index`]: DiffOp::Delete
/// [`Move::from`]: DiffOp::Move
/// [`Insert::index`]: DiffOp::Insert
/// [`Move::to`]: DiffOp::Move
/// [`Update::new_index`]: DiffOp::Update
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffOp {
    /// The item at `index` of the new list has no counterpart in the old list.
    Insert {
        /// Position in the new list.
        index: usize,
    },
    /// The item at `index` of the old list has no counterpart in the new list.
    Delete {
        /// Position in the old list.
        index: usize,
    },
    /// A matched item changed its relative order.
    Move {
        /// Position in the old list.
        from: usize,
        /// Position in the new list.
        to: usize,
    },
    /// A matched item whose identity is unchanged but whose rendering output
    /// changed (`is_identical` returned `false`).
    Update {
        /// Position in the old list.
        old_index: usize,
        /// Position in the new list.
        new_index: usize,
    },
}

/// A matched identity: the same key found in both lists.
///
/// Matches are reported in new-list order. An item can be both `moved` and
/// `updated`; neither flag set means the match produced no operation at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Position in the old list.
    pub old_index: usize,
    /// Position in the new list.
    pub new_index: usize,
    /// Whether the item changed its relative order (a [`DiffOp::Move`] was
    /// emitted).
    pub moved: bool,
    /// Whether an in-place [`DiffOp::Update`] was emitted.
    pub updated: bool,
}

/// Result of diffing two keyed lists.
///
/// `ops` is ordered for direct batch application: deletes in descending old
/// index, then inserts in ascending new index, then moves in new order, then
/// updates. `matches` carries every surviving identity so callers can migrate
/// per-item state (sizes, bindings) across the update without re-deriving the
/// key correspondence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diff {
    /// Structural operations, in application order.
    pub ops: Vec<DiffOp>,
    /// Matched identities, in new-list order.
    pub matches: Vec<Match>,
}

impl Diff {
    /// Returns `true` if the lists were structurally and visually identical.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
