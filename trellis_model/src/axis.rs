// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll axis and main/cross component helpers.

use kurbo::{Point, Rect, Size};

/// Scroll axis of a section.
///
/// Sizing and layout work in (main, cross) space: the main axis is the scroll
/// direction, the cross axis is perpendicular to it. For a vertical list the
/// main extent of an item is its height and the cross extent its width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Content scrolls vertically; rows stack top to bottom.
    #[default]
    Vertical,
    /// Content scrolls horizontally; columns stack leading to trailing.
    Horizontal,
}

impl Axis {
    /// Returns the main-axis component of `size`.
    #[must_use]
    pub const fn main(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Returns the cross-axis component of `size`.
    #[must_use]
    pub const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.width,
            Self::Horizontal => size.height,
        }
    }

    /// Builds a [`Size`] from main and cross components.
    #[must_use]
    pub const fn pack(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Vertical => Size::new(cross, main),
            Self::Horizontal => Size::new(main, cross),
        }
    }

    /// Builds a [`Point`] from main and cross coordinates.
    #[must_use]
    pub const fn pack_point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Vertical => Point::new(cross, main),
            Self::Horizontal => Point::new(main, cross),
        }
    }

    /// Returns the `[start, end]` span of `rect` along the main axis.
    #[must_use]
    pub fn main_span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.y1),
            Self::Horizontal => (rect.x0, rect.x1),
        }
    }
}
