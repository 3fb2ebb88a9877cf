// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis List: the list controller tying the engine together.
//!
//! A [`ListController`] accepts a declarative, immutable `Vec<Section<C>>`
//! and incrementally reconciles it against a live, reusable view set:
//!
//! 1. the new list is diffed hierarchically against the applied snapshot —
//!    sections by id, then cells within each surviving section
//!    (`trellis_diff`);
//! 2. sizes are resolved for new and changed items and carried over for
//!    matched, unchanged ones (`trellis_sizing`);
//! 3. the [`layout`] solver positions everything under each section's
//!    constraints (rows, grids, proportional flow, sticky headers);
//! 4. views are bound, rebound, and recycled through the reuse pool
//!    (`trellis_reuse`), realizing only what intersects the host-reported
//!    viewport.
//!
//! Interaction and lifecycle flow out as typed [`ListEvent`]s on a single
//! drained channel; structural operations of the last update are exposed as
//! an [`UpdateTransaction`] so hosts can animate them.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use trellis_list::ListController;
//! use trellis_model::{Axis, CellModel, RendererType, Section, SizeStrategy};
//! use trellis_reuse::{ItemView, ViewRegistry};
//!
//! struct TextRow;
//! impl ItemView<&'static str> for TextRow {
//!     fn bind(&mut self, _cell: &CellModel<&'static str>) {}
//!     fn unbind(&mut self) {}
//!     fn measure(&mut self, proposal: Size, _axis: Axis) -> Size {
//!         Size::new(proposal.width, 44.0)
//!     }
//! }
//!
//! let mut registry = ViewRegistry::new();
//! registry.register(RendererType::of::<TextRow>(), || Box::new(TextRow));
//!
//! let mut list = ListController::new(registry);
//! list.set_container(Size::new(320.0, 480.0));
//!
//! let rows = vec![
//!     CellModel::new("greeting", RendererType::of::<TextRow>(), "hello")
//!         .with_strategy(SizeStrategy::Intrinsic),
//! ];
//! list.update(vec![Section::new("messages").with_cells(rows)], false);
//!
//! assert_eq!(list.content_size(), Size::new(320.0, 44.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

mod controller;
mod event;
pub mod layout;
mod options;

pub use controller::{
    ControllerState, ListController, SectionItemOps, UpdateCompletion, UpdateTransaction,
};
pub use event::ListEvent;
pub use layout::ListLayout;
pub use options::ListOptions;
