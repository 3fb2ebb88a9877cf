// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for [`ListController`](crate::ListController).

use trellis_reuse::DEFAULT_IDLE_CAP;

/// Configuration for a list controller.
#[derive(Clone, Copy, Debug)]
pub struct ListOptions {
    /// Extra margin *before* the viewport kept realized, to reduce popping
    /// when scrolling backwards.
    pub overscan_before: f64,
    /// Extra margin *after* the viewport kept realized.
    pub overscan_after: f64,
    /// Idle views retained per renderer type in the reuse pool.
    pub idle_views_per_renderer: usize,
}

impl ListOptions {
    /// Sets both overscan margins.
    #[must_use]
    pub const fn with_overscan(mut self, before: f64, after: f64) -> Self {
        self.overscan_before = before;
        self.overscan_after = after;
        self
    }

    /// Sets the per-renderer idle cap of the reuse pool.
    #[must_use]
    pub const fn with_idle_views_per_renderer(mut self, cap: usize) -> Self {
        self.idle_views_per_renderer = cap;
        self
    }
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            overscan_before: 0.0,
            overscan_after: 0.0,
            idle_views_per_renderer: DEFAULT_IDLE_CAP,
        }
    }
}
