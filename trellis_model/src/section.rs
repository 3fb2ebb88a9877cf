// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sections: ordered cell runs with layout constraints and supplementaries.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::num::NonZeroUsize;

use kurbo::Insets;

use crate::axis::Axis;
use crate::cell::CellModel;
use crate::ids::{CellId, SectionId};

/// How cells are distributed across the cross axis of a section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Distribution {
    /// Every cell occupies an entire row; the cross-axis extent is forced to
    /// the full adjusted cross extent.
    EntireRow,
    /// Rows of `n` equally-sized slots; each cell's cross-axis extent is
    /// forced to `adjusted cross / n`.
    Rows(NonZeroUsize),
    /// Cells size themselves freely and flow into rows, wrapping at the
    /// adjusted cross extent.
    Proportional,
}

/// Per-section layout constraints.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionConstraints {
    /// Scroll axis. Rows stack along it; each section advances the list's
    /// main cursor along its own axis (in practice hosts use one axis per
    /// list).
    pub axis: Axis,
    /// Cross-axis distribution of cells.
    pub distribution: Distribution,
    /// Whether the header stays pinned to the viewport start while the
    /// section spans it.
    pub sticky_header: bool,
    /// Insets applied to the container before sizing and layout.
    pub insets: Insets,
}

impl Default for SectionConstraints {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            distribution: Distribution::EntireRow,
            sticky_header: false,
            insets: Insets::ZERO,
        }
    }
}

/// Ordered group of cell models plus optional header/footer and constraints.
///
/// Cell identifiers must be unique within the section (the header and footer
/// ids included); the diff engine's correctness depends on it. Duplicates are
/// a data error handled defensively downstream — [`Section::has_unique_ids`]
/// lets presenters validate eagerly.
#[derive(Clone, Debug)]
pub struct Section<C> {
    id: SectionId,
    cells: Vec<CellModel<C>>,
    header: Option<CellModel<C>>,
    footer: Option<CellModel<C>>,
    constraints: SectionConstraints,
}

impl<C> Section<C> {
    /// Creates an empty section with default constraints.
    pub fn new(id: impl Into<SectionId>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
            header: None,
            footer: None,
            constraints: SectionConstraints::default(),
        }
    }

    /// Replaces the cells.
    #[must_use]
    pub fn with_cells(mut self, cells: Vec<CellModel<C>>) -> Self {
        self.cells = cells;
        self
    }

    /// Sets the header model.
    #[must_use]
    pub fn with_header(mut self, header: CellModel<C>) -> Self {
        self.header = Some(header);
        self
    }

    /// Sets the footer model.
    #[must_use]
    pub fn with_footer(mut self, footer: CellModel<C>) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Sets the layout constraints.
    #[must_use]
    pub fn with_constraints(mut self, constraints: SectionConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Returns the section identifier.
    #[must_use]
    pub fn id(&self) -> &SectionId {
        &self.id
    }

    /// Returns the cells in order.
    #[must_use]
    pub fn cells(&self) -> &[CellModel<C>] {
        &self.cells
    }

    /// Returns the cell at `index`, if any.
    #[must_use]
    pub fn cell(&self, index: usize) -> Option<&CellModel<C>> {
        self.cells.get(index)
    }

    /// Returns the header model, if any.
    #[must_use]
    pub fn header(&self) -> Option<&CellModel<C>> {
        self.header.as_ref()
    }

    /// Returns the footer model, if any.
    #[must_use]
    pub fn footer(&self) -> Option<&CellModel<C>> {
        self.footer.as_ref()
    }

    /// Returns the layout constraints.
    #[must_use]
    pub const fn constraints(&self) -> &SectionConstraints {
        &self.constraints
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the section has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the index of the cell with `id`, if present.
    #[must_use]
    pub fn position_of(&self, id: &CellId) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id() == id)
    }

    /// Returns `true` if all ids (cells, header, footer) are unique.
    #[must_use]
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.cells
            .iter()
            .chain(self.header.as_ref())
            .chain(self.footer.as_ref())
            .all(|cell| seen.insert(cell.id().as_str()))
    }

    /// Moves the cell at `from` so that it ends up at index `to`.
    ///
    /// Returns `false` (and leaves the section untouched) when either index
    /// is out of bounds. The controller validates the `REORDERABLE` flag
    /// before calling this.
    pub fn move_cell(&mut self, from: usize, to: usize) -> bool {
        let len = self.cells.len();
        if from >= len || to >= len {
            return false;
        }
        let cell = self.cells.remove(from);
        self.cells.insert(to, cell);
        true
    }
}

impl<C: PartialEq> Section<C> {
    /// Returns `true` when nothing about the section would render differently:
    /// constraints, header, footer, and every cell (in order) are identical.
    ///
    /// Used to skip the item-level diff pass for untouched sections.
    #[must_use]
    pub fn is_identical(&self, other: &Self) -> bool {
        fn supplementary_identical<C: PartialEq>(
            a: Option<&CellModel<C>>,
            b: Option<&CellModel<C>>,
        ) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.id() == b.id() && a.is_identical(b),
                _ => false,
            }
        }

        self.constraints == other.constraints
            && supplementary_identical(self.header.as_ref(), other.header.as_ref())
            && supplementary_identical(self.footer.as_ref(), other.footer.as_ref())
            && self.cells.len() == other.cells.len()
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.id() == b.id() && a.is_identical(b))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Section;
    use crate::{CellModel, RendererType};

    struct Row;

    fn cell(id: &str, content: u32) -> CellModel<u32> {
        CellModel::new(id, RendererType::of::<Row>(), content)
    }

    fn five_cells() -> Section<u32> {
        Section::new("s").with_cells(vec![
            cell("c0", 0),
            cell("c1", 1),
            cell("c2", 2),
            cell("c3", 3),
            cell("c4", 4),
        ])
    }

    #[test]
    fn move_cell_reorders_like_remove_then_insert() {
        let mut section = five_cells();
        assert!(section.move_cell(2, 0));
        let order: Vec<_> = section.cells().iter().map(|c| c.id().as_str()).collect();
        assert_eq!(order, ["c2", "c0", "c1", "c3", "c4"]);
    }

    #[test]
    fn move_cell_rejects_out_of_bounds() {
        let mut section = five_cells();
        assert!(!section.move_cell(5, 0));
        assert!(!section.move_cell(0, 5));
        assert_eq!(section.len(), 5);
    }

    #[test]
    fn unique_ids_cover_supplementaries() {
        let section = five_cells().with_header(cell("header", 9));
        assert!(section.has_unique_ids());
        let clash = five_cells().with_header(cell("c0", 9));
        assert!(!clash.has_unique_ids());
    }

    #[test]
    fn identical_sections_compare_equal() {
        let a = five_cells();
        let b = five_cells();
        assert!(a.is_identical(&b));
        let mut c = five_cells();
        assert!(c.move_cell(0, 4));
        assert!(!a.is_identical(&c));
    }
}
