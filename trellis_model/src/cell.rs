// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell models: identity, renderer, size strategy, and capabilities.

use kurbo::Size;

use crate::ids::{CellId, RendererType};

bitflags::bitflags! {
    /// Capability flags of a cell model.
    ///
    /// Flags gate event routing, not rendering: the list controller emits a
    /// selection, highlight, or move event for a cell only when the matching
    /// flag is set. An interaction on a cell without the capability is a
    /// no-op, not an error.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Cell emits `Selected` events.
        const SELECTABLE    = 0b0000_0001;
        /// Cell emits `Highlighted` events.
        const HIGHLIGHTABLE = 0b0000_0010;
        /// Cell may participate in drag-reorder moves.
        const REORDERABLE   = 0b0000_0100;
    }
}

/// How the size of a cell is determined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeStrategy {
    /// The model supplies an exact size.
    ///
    /// Under an equal-rows or entire-row distribution the cross-axis extent
    /// is forced to fill the allotted row slot; the main-axis extent is
    /// preserved.
    Explicit(Size),
    /// The view self-measures with the cross axis fixed and the main axis
    /// floating.
    Intrinsic,
    /// The view self-measures with both axes floating.
    Proportional,
    /// An external sizing delegate supplies the size.
    ///
    /// If the delegate declines, the resolver falls back to [`Intrinsic`]
    /// measurement and records a diagnostic.
    ///
    /// [`Intrinsic`]: Self::Intrinsic
    Relative,
}

/// Immutable description of one renderable list item.
///
/// A cell model carries everything the engine needs to diff, size, and bind
/// the item: a stable [`CellId`] (the diff key), the [`RendererType`] whose
/// views can draw it, a [`SizeStrategy`], capability [`CellFlags`], and an
/// opaque content payload consumed by the host's view when bound.
///
/// Models are values: once built they are never mutated. Presenters express
/// changes by producing a fresh section list.
#[derive(Clone, Debug)]
pub struct CellModel<C> {
    id: CellId,
    renderer: RendererType,
    strategy: SizeStrategy,
    flags: CellFlags,
    content: C,
}

impl<C> CellModel<C> {
    /// Creates a cell model with the [`Intrinsic`](SizeStrategy::Intrinsic)
    /// strategy and empty flags.
    pub fn new(id: impl Into<CellId>, renderer: RendererType, content: C) -> Self {
        Self {
            id: id.into(),
            renderer,
            strategy: SizeStrategy::Intrinsic,
            flags: CellFlags::empty(),
            content,
        }
    }

    /// Sets the size strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SizeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the capability flags.
    #[must_use]
    pub fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> &CellId {
        &self.id
    }

    /// Returns the renderer-type token.
    #[must_use]
    pub const fn renderer(&self) -> RendererType {
        self.renderer
    }

    /// Returns the size strategy.
    #[must_use]
    pub const fn strategy(&self) -> SizeStrategy {
        self.strategy
    }

    /// Returns the capability flags.
    #[must_use]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Returns the content payload.
    #[must_use]
    pub const fn content(&self) -> &C {
        &self.content
    }
}

impl<C: PartialEq> CellModel<C> {
    /// Returns `true` when rendering output would not change.
    ///
    /// Compares renderer, strategy, flags, and content — not the id, which
    /// the caller has already matched. Reflexive by construction. The diff
    /// engine classifies a matched pair whose `is_identical` is `false` as an
    /// in-place update.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        self.renderer == other.renderer
            && self.strategy == other.strategy
            && self.flags == other.flags
            && self.content == other.content
    }
}

#[cfg(test)]
mod tests {
    use super::{CellFlags, CellModel, SizeStrategy};
    use crate::RendererType;
    use kurbo::Size;

    struct Row;

    #[test]
    fn is_identical_is_reflexive() {
        let cell = CellModel::new("a", RendererType::of::<Row>(), 7_u32)
            .with_strategy(SizeStrategy::Explicit(Size::new(100.0, 50.0)))
            .with_flags(CellFlags::SELECTABLE);
        assert!(cell.is_identical(&cell));
    }

    #[test]
    fn content_change_breaks_identity() {
        let a = CellModel::new("a", RendererType::of::<Row>(), 7_u32);
        let b = CellModel::new("a", RendererType::of::<Row>(), 8_u32);
        assert!(!a.is_identical(&b));
    }

    #[test]
    fn flag_change_breaks_identity() {
        let a = CellModel::new("a", RendererType::of::<Row>(), 7_u32);
        let b = a.clone().with_flags(CellFlags::REORDERABLE);
        assert!(!a.is_identical(&b));
    }
}
