// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Applying a diff to reproduce the new list from the old one.

use alloc::vec;
use alloc::vec::Vec;

use crate::op::{Diff, DiffOp};

/// Applies `diff` to `old`, yielding the new list.
///
/// The recipe mirrors batch-update semantics:
///
/// 1. remove deleted items and move sources (old-index space, descending),
/// 2. walk the new-index space, taking inserted items from `new`, moved items
///    from their old positions, and everything else from the survivors in
///    order,
/// 3. replace updated positions with the new items.
///
/// The result always equals `new` when `diff` came from [`crate::diff`] over
/// the same pair of lists; controllers use this to patch derived per-item
/// state, tests use it to check diff correctness.
pub fn apply<T: Clone>(old: &[T], new: &[T], diff: &Diff) -> Vec<T> {
    let mut removed = vec![false; old.len()];
    let mut inserted = vec![false; new.len()];
    let mut moved_to: Vec<Option<usize>> = vec![None; new.len()];
    let mut updated = vec![false; new.len()];

    for op in &diff.ops {
        match *op {
            DiffOp::Delete { index } => removed[index] = true,
            DiffOp::Insert { index } => inserted[index] = true,
            DiffOp::Move { from, to } => {
                removed[from] = true;
                moved_to[to] = Some(from);
            }
            DiffOp::Update { new_index, .. } => updated[new_index] = true,
        }
    }

    let mut survivors = old
        .iter()
        .zip(&removed)
        .filter(|&(_, removed)| !removed)
        .map(|(item, _)| item);

    let mut out: Vec<T> = Vec::with_capacity(new.len());
    for index in 0..new.len() {
        if inserted[index] {
            out.push(new[index].clone());
        } else if let Some(from) = moved_to[index] {
            if updated[index] {
                out.push(new[index].clone());
            } else {
                out.push(old[from].clone());
            }
        } else {
            // A matched, non-moved position always consumes one survivor,
            // updated or not, to keep the remaining survivors aligned.
            let survivor = survivors.next();
            if updated[index] {
                out.push(new[index].clone());
            } else {
                match survivor {
                    Some(item) => out.push(item.clone()),
                    None => {
                        // Inconsistent op script; keep going with the new
                        // item so the result is still well-formed.
                        debug_assert!(false, "diff application ran out of survivors");
                        out.push(new[index].clone());
                    }
                }
            }
        }
    }
    out
}
