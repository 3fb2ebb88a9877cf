// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyed diff: two-pass classification plus LIS move minimization.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::lis::increasing_keep_mask;
use crate::op::{Diff, DiffOp, Match};

/// An item that can participate in keyed diffing.
pub trait Diffable {
    /// Stable identity, unique within a list.
    type Key: Hash + Eq;

    /// Returns the diff key.
    fn diff_key(&self) -> Self::Key;

    /// Returns `true` when a matched pair would render identically, so no
    /// [`DiffOp::Update`] is needed. Must be reflexive.
    fn is_identical(&self, other: &Self) -> bool;
}

/// Diffs two lists of [`Diffable`] items.
pub fn diff<T: Diffable>(old: &[T], new: &[T]) -> Diff {
    diff_by(old, new, T::diff_key, T::is_identical)
}

/// Occurrence list of one key in the old list, consumed front to back.
///
/// Keys are unique in well-formed data, so the list almost always holds a
/// single index; the inline capacity keeps the defensive duplicate handling
/// from costing an allocation per key.
#[derive(Default)]
struct Occurrences {
    indices: SmallVec<[usize; 1]>,
    next: usize,
}

/// Diffs two lists with explicit key and identity functions.
///
/// Matching is by key; a matched pair whose `identical` check fails becomes
/// an in-place update. Move operations are minimized with a longest
/// increasing subsequence over the matched old indices in new order, so a
/// single displaced item yields a single move. Map building and
/// classification are O(n) expected, move detection O(n log n).
///
/// Duplicate keys are a data error, handled defensively rather than
/// optimized: occurrences are paired positionally per key, the first pair is
/// matched normally, later pairs are forced updates, and surplus occurrences
/// fall out as plain inserts or deletes. A diagnostic is recorded for each
/// duplicate pairing.
pub fn diff_by<T, K, KF, EQ>(old: &[T], new: &[T], mut key_of: KF, mut identical: EQ) -> Diff
where
    K: Hash + Eq,
    KF: FnMut(&T) -> K,
    EQ: FnMut(&T, &T) -> bool,
{
    let old_keys: Vec<K> = old.iter().map(&mut key_of).collect();
    let new_keys: Vec<K> = new.iter().map(&mut key_of).collect();

    let mut occurrences: HashMap<&K, Occurrences> = HashMap::with_capacity(old_keys.len());
    for (index, key) in old_keys.iter().enumerate() {
        occurrences.entry(key).or_default().indices.push(index);
    }

    // Classify each new position as matched (old index + forced flag) or fresh.
    let mut matched_old: Vec<Option<(usize, bool)>> = Vec::with_capacity(new_keys.len());
    for (new_index, key) in new_keys.iter().enumerate() {
        let slot = occurrences.get_mut(key);
        match slot {
            Some(occ) if occ.next < occ.indices.len() => {
                let ordinal = occ.next;
                occ.next += 1;
                if ordinal > 0 {
                    twarn!(
                        new_index,
                        ordinal,
                        "duplicate identifier; pairing occurrence positionally as an update"
                    );
                }
                matched_old.push(Some((occ.indices[ordinal], ordinal > 0)));
            }
            Some(_) => {
                twarn!(
                    new_index,
                    "duplicate identifier with no old occurrence left; treating as insert"
                );
                matched_old.push(None);
            }
            None => matched_old.push(None),
        }
    }

    let mut consumed = alloc::vec![false; old.len()];
    for pair in matched_old.iter().flatten() {
        consumed[pair.0] = true;
    }

    let mut ops = Vec::new();

    // Deletes, descending old index.
    for index in (0..old.len()).rev() {
        if !consumed[index] {
            ops.push(DiffOp::Delete { index });
        }
    }

    // Inserts, ascending new index.
    for (index, pair) in matched_old.iter().enumerate() {
        if pair.is_none() {
            ops.push(DiffOp::Insert { index });
        }
    }

    // Moves: matched pairs off the LIS of old indices in new order.
    let pairs: Vec<(usize, usize, bool)> = matched_old
        .iter()
        .enumerate()
        .filter_map(|(new_index, pair)| pair.map(|(old_index, forced)| (old_index, new_index, forced)))
        .collect();
    let old_order: Vec<usize> = pairs.iter().map(|&(old_index, _, _)| old_index).collect();
    let keep = increasing_keep_mask(&old_order);

    let mut matches = Vec::with_capacity(pairs.len());
    for (&(old_index, new_index, forced), &kept) in pairs.iter().zip(&keep) {
        let moved = !kept;
        if moved {
            ops.push(DiffOp::Move {
                from: old_index,
                to: new_index,
            });
        }
        let updated = forced || !identical(&old[old_index], &new[new_index]);
        matches.push(Match {
            old_index,
            new_index,
            moved,
            updated,
        });
    }

    // Updates last; they do not affect positions.
    for m in &matches {
        if m.updated {
            ops.push(DiffOp::Update {
                old_index: m.old_index,
                new_index: m.new_index,
            });
        }
    }

    Diff { ops, matches }
}
