// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sizing context passed into size resolution.

use kurbo::{Insets, Size};

use trellis_model::{Axis, Distribution, SectionConstraints};

/// Context for one size computation: pure input, no ownership.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeConstraints {
    /// Full container size.
    pub container: Size,
    /// Inset-aware container size (never negative).
    pub adjusted: Size,
    /// Scroll axis of the owning section.
    pub axis: Axis,
    /// Cross-axis distribution of the owning section.
    pub distribution: Distribution,
}

impl SizeConstraints {
    /// Builds constraints from a container size and section insets.
    #[must_use]
    pub fn new(container: Size, insets: Insets, axis: Axis, distribution: Distribution) -> Self {
        let adjusted = Size::new(
            (container.width - insets.x0 - insets.x1).max(0.0),
            (container.height - insets.y0 - insets.y1).max(0.0),
        );
        Self {
            container,
            adjusted,
            axis,
            distribution,
        }
    }

    /// Builds constraints for a section's cells.
    #[must_use]
    pub fn for_section(container: Size, constraints: &SectionConstraints) -> Self {
        Self::new(
            container,
            constraints.insets,
            constraints.axis,
            constraints.distribution,
        )
    }

    /// Cross-axis extent allotted to one item under the distribution.
    ///
    /// Entire-row items and proportional items get the full adjusted cross
    /// extent (for proportional it is a ceiling, not a forced value); rows of
    /// `n` split it evenly.
    #[must_use]
    pub fn allotted_cross(&self) -> f64 {
        let cross = self.axis.cross(self.adjusted);
        match self.distribution {
            Distribution::EntireRow | Distribution::Proportional => cross,
            Distribution::Rows(n) => cross / n.get() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroUsize;

    use kurbo::{Insets, Size};

    use super::SizeConstraints;
    use trellis_model::{Axis, Distribution};

    #[test]
    fn insets_shrink_the_adjusted_size() {
        let c = SizeConstraints::new(
            Size::new(320.0, 600.0),
            Insets::uniform(10.0),
            Axis::Vertical,
            Distribution::EntireRow,
        );
        assert_eq!(c.adjusted, Size::new(300.0, 580.0));
        assert_eq!(c.allotted_cross(), 300.0);
    }

    #[test]
    fn oversized_insets_clamp_to_zero() {
        let c = SizeConstraints::new(
            Size::new(10.0, 10.0),
            Insets::uniform(20.0),
            Axis::Vertical,
            Distribution::EntireRow,
        );
        assert_eq!(c.adjusted, Size::ZERO);
    }

    #[test]
    fn rows_split_the_cross_extent() {
        let three = NonZeroUsize::new(3).unwrap();
        let c = SizeConstraints::new(
            Size::new(300.0, 600.0),
            Insets::ZERO,
            Axis::Vertical,
            Distribution::Rows(three),
        );
        assert_eq!(c.allotted_cross(), 100.0);
    }
}
