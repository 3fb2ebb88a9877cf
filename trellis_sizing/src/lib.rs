// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Sizing: deterministic size resolution for cell models.
//!
//! Given a cell model and a [`SizeConstraints`] context (container size,
//! inset-adjusted size, scroll axis, distribution), [`resolve_size`] produces
//! the final box size, mediating between the four strategies:
//!
//! 1. **Explicit** — the model supplies the size; equal-rows and entire-row
//!    distributions force the cross-axis extent to fill the allotted slot
//!    while preserving the main-axis extent.
//! 2. **Intrinsic** — the cell self-measures on a scratch view from the
//!    reuse pool, cross axis fixed, main axis floating.
//! 3. **Proportional** — the same scratch pass with both axes floating.
//! 4. **Relative** — an external [`SizingDelegate`] answers; a declined
//!    answer falls back to intrinsic measurement with a diagnostic.
//!
//! Every mode is a pure function of its inputs. The scratch views used by
//! modes 2–4 come from the binder's pool purely to avoid reallocation; they
//! are bound, measured, unbound, and released within the call.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

mod constraints;
mod resolver;

pub use constraints::SizeConstraints;
pub use resolver::{SizingDelegate, resolve_size};
