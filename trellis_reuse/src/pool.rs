// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Idle view cache keyed by renderer type.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use trellis_model::RendererType;

use crate::view::ItemView;

/// Default bound on idle views retained per renderer type.
pub const DEFAULT_IDLE_CAP: usize = 32;

/// Pool of idle, unbound views keyed by [`RendererType`].
///
/// The pool is a pure cache: it owns views only while they are idle and never
/// tracks bindings — exclusivity of a live view is the binder's job. Views
/// released beyond the per-type idle cap are dropped.
pub struct ReusePool<C: 'static> {
    idle: HashMap<RendererType, Vec<Box<dyn ItemView<C>>>>,
    idle_cap: usize,
}

impl<C> ReusePool<C> {
    /// Creates a pool with [`DEFAULT_IDLE_CAP`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_idle_cap(DEFAULT_IDLE_CAP)
    }

    /// Creates a pool retaining at most `idle_cap` idle views per renderer
    /// type.
    #[must_use]
    pub fn with_idle_cap(idle_cap: usize) -> Self {
        Self {
            idle: HashMap::new(),
            idle_cap,
        }
    }

    /// Takes an idle view for `renderer`, if one is pooled.
    pub fn dequeue(&mut self, renderer: RendererType) -> Option<Box<dyn ItemView<C>>> {
        self.idle.get_mut(&renderer)?.pop()
    }

    /// Returns an unbound view to the pool.
    ///
    /// The caller must have unbound the view first; the pool stores it as-is.
    pub fn release(&mut self, renderer: RendererType, view: Box<dyn ItemView<C>>) {
        let idle = self.idle.entry(renderer).or_default();
        if idle.len() < self.idle_cap {
            idle.push(view);
        }
    }

    /// Number of idle views pooled for `renderer`.
    #[must_use]
    pub fn idle_count(&self, renderer: RendererType) -> usize {
        self.idle.get(&renderer).map_or(0, Vec::len)
    }

    /// Drops all idle views.
    pub fn clear(&mut self) {
        self.idle.clear();
    }
}

impl<C> Default for ReusePool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ReusePool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.idle.values().map(Vec::len).sum();
        f.debug_struct("ReusePool")
            .field("renderer_types", &self.idle.len())
            .field("idle_views", &total)
            .field("idle_cap", &self.idle_cap)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;

    use super::ReusePool;
    use crate::view::Placeholder;
    use trellis_model::RendererType;

    struct Row;

    #[test]
    fn release_then_dequeue_round_trips() {
        let renderer = RendererType::of::<Row>();
        let mut pool: ReusePool<u32> = ReusePool::new();
        assert!(pool.dequeue(renderer).is_none());

        pool.release(renderer, Box::new(Placeholder));
        assert_eq!(pool.idle_count(renderer), 1);
        assert!(pool.dequeue(renderer).is_some());
        assert_eq!(pool.idle_count(renderer), 0);
    }

    #[test]
    fn idle_cap_bounds_retention() {
        let renderer = RendererType::of::<Row>();
        let mut pool: ReusePool<u32> = ReusePool::with_idle_cap(2);
        for _ in 0..4 {
            pool.release(renderer, Box::new(Placeholder));
        }
        assert_eq!(pool.idle_count(renderer), 2);
    }
}
