// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Diff: keyed list diffing with move minimization.
//!
//! Computes, between an old and a new ordered list of identity-bearing items,
//! the minimal set of structural operations — insert, delete, move, update —
//! using keys for matching and an identity predicate for detecting in-place
//! updates (classic two-pass, Paul Heckel-style diffing). Moves are minimized
//! with a longest-increasing-subsequence pass, so a single displaced item
//! yields a single [`DiffOp::Move`] rather than a cascade.
//!
//! The crate is generic and knows nothing about cells, sections, or views;
//! the list engine runs it hierarchically (sections by id first, then cells
//! within each surviving section). Anything with a stable key can be diffed,
//! either via the [`Diffable`] trait or with explicit closures through
//! [`diff_by`].
//!
//! ```rust
//! use trellis_diff::{DiffOp, diff_by};
//!
//! let old = ["a", "b", "c"];
//! let new = ["b", "c", "d"];
//! let d = diff_by(&old, &new, |s| *s, |a, b| a == b);
//! assert_eq!(
//!     d.ops,
//!     [DiffOp::Delete { index: 0 }, DiffOp::Insert { index: 2 }]
//! );
//! ```
//!
//! [`apply`] reproduces the new list from the old one plus the diff; it backs
//! the correctness tests and lets callers patch mirrored per-item state.
//!
//! Complexity: O(n) expected for map building and classification, O(n log n)
//! for move detection. Duplicate keys are a data error handled defensively
//! (positional pairing, first occurrence wins) — see [`diff_by`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

mod apply;
mod diff;
mod lis;
mod op;

pub use apply::apply;
pub use diff::{Diffable, diff, diff_by};
pub use op::{Diff, DiffOp, Match};
