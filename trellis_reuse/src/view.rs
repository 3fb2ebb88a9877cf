// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side view seam.

use kurbo::Size;

use trellis_model::{Axis, CellModel};

/// A reusable item view owned by the host toolkit.
///
/// Hosts implement this for each concrete view type they register. The
/// engine drives the full lifecycle: a view is dequeued from the pool (or
/// created by its factory), bound to a cell model, possibly rebound to a
/// different model of the same renderer type after recycling, and unbound
/// before it returns to the pool. At most one cell model is bound to a live
/// view at any instant; the binder unbinds the previous model before binding
/// the next.
pub trait ItemView<C> {
    /// Presents `cell`'s content. Called after [`unbind`](Self::unbind) of
    /// any previous model.
    fn bind(&mut self, cell: &CellModel<C>);

    /// Clears the current model: cancel in-flight work tied to the cell,
    /// drop content references. Called before recycling and before rebinding.
    fn unbind(&mut self);

    /// Self-measures against `proposal`.
    ///
    /// For intrinsic sizing the cross-axis extent of `proposal` is fixed and
    /// the main-axis extent is a ceiling the view may undercut; for
    /// proportional sizing both extents are free. The returned size must be
    /// finite and positive.
    fn measure(&mut self, proposal: Size, axis: Axis) -> Size;
}

/// Inert 1×1 view substituted when no factory is available.
///
/// Rendering a placeholder keeps one misconfigured item from taking down the
/// whole visible list; the misconfiguration itself is reported through the
/// diagnostics channel and asserted in development builds.
#[derive(Clone, Copy, Debug, Default)]
pub struct Placeholder;

impl<C> ItemView<C> for Placeholder {
    fn bind(&mut self, _cell: &CellModel<C>) {}

    fn unbind(&mut self) {}

    fn measure(&mut self, _proposal: Size, _axis: Axis) -> Size {
        Size::new(1.0, 1.0)
    }
}
