// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Model: immutable cell and section descriptions.
//!
//! This crate holds the value types the rest of the Trellis workspace diffs,
//! sizes, and binds:
//!
//! - [`CellModel`]: one renderable item — a stable [`CellId`], the
//!   [`RendererType`] that can draw it, a [`SizeStrategy`], capability
//!   [`CellFlags`], and an opaque content payload.
//! - [`Section`]: an ordered, identifier-unique run of cell models plus
//!   optional header/footer models and [`SectionConstraints`] (scroll
//!   [`Axis`], [`Distribution`], sticky-header flag, insets).
//! - [`IndexPath`] / [`ItemPath`]: positions within the applied section list.
//!
//! Models are immutable by contract: presenters express every change as a
//! fresh `Vec<Section<C>>` handed to the list controller, which diffs it
//! against the previously applied snapshot. The only mutating operation is
//! [`Section::move_cell`], used to apply an already-validated reorder to the
//! authoritative state.
//!
//! The content payload `C` is chosen by the host — typically an enum of the
//! app's known cell kinds. `C: PartialEq` powers [`CellModel::is_identical`],
//! which must return `true` only when rendering output would not change.
//!
//! ## Example
//!
//! ```rust
//! use trellis_model::{CellFlags, CellModel, RendererType, Section, SizeStrategy};
//!
//! struct TextRow;
//!
//! let cells = vec![
//!     CellModel::new("greeting", RendererType::of::<TextRow>(), "hello")
//!         .with_flags(CellFlags::SELECTABLE),
//!     CellModel::new("farewell", RendererType::of::<TextRow>(), "goodbye")
//!         .with_strategy(SizeStrategy::Intrinsic),
//! ];
//! let section = Section::new("messages").with_cells(cells);
//! assert_eq!(section.len(), 2);
//! assert!(section.has_unique_ids());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod axis;
mod cell;
mod ids;
mod path;
mod section;

pub use axis::Axis;
pub use cell::{CellFlags, CellModel, SizeStrategy};
pub use ids::{CellId, RendererType, SectionId};
pub use path::{IndexPath, ItemPath};
pub use section::{Distribution, Section, SectionConstraints};
