// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Size resolution across the four strategies.

use kurbo::Size;

use trellis_model::{CellModel, Distribution, IndexPath, SizeStrategy};
use trellis_reuse::Binder;

use crate::constraints::SizeConstraints;

/// External collaborator supplying sizes for relative-mode cells.
///
/// Consulted only for [`SizeStrategy::Relative`] models — layouts whose size
/// depends on aggregate state the resolver cannot see (for example "fill the
/// remaining space equally among the flexible items"). Returning `None`
/// makes the resolver fall back to intrinsic self-measurement and record a
/// diagnostic.
pub trait SizingDelegate<C> {
    /// Returns the size for `cell` at `path`, or `None` to decline.
    fn size_for(
        &mut self,
        cell: &CellModel<C>,
        path: IndexPath,
        constraints: &SizeConstraints,
    ) -> Option<Size>;
}

/// Resolves the final box size of `cell` under `constraints`.
///
/// Each strategy is a pure function of (model, constraints, optional
/// delegate answer); the only shared state touched is the binder's reuse
/// pool, used transiently for scratch measurement so self-measuring never
/// allocates per query.
///
/// The result is sanitized: a non-finite or non-positive size is a
/// configuration error and degrades to a 1×1 placeholder with a diagnostic,
/// so one malformed item cannot collapse the list.
pub fn resolve_size<C>(
    binder: &mut Binder<C>,
    cell: &CellModel<C>,
    path: IndexPath,
    constraints: &SizeConstraints,
    mut delegate: Option<&mut (dyn SizingDelegate<C> + '_)>,
) -> Size {
    let size = match cell.strategy() {
        SizeStrategy::Explicit(size) => explicit(size, constraints),
        SizeStrategy::Intrinsic => intrinsic(binder, cell, constraints),
        SizeStrategy::Proportional => proportional(binder, cell, constraints),
        SizeStrategy::Relative => {
            let answer = delegate
                .as_mut()
                .and_then(|delegate| delegate.size_for(cell, path, constraints));
            match answer {
                Some(size) => size,
                None => {
                    twarn!(
                        cell = %cell.id(),
                        "relative-mode cell without a delegate answer; self-measuring"
                    );
                    intrinsic(binder, cell, constraints)
                }
            }
        }
    };
    sanitize(size, cell)
}

/// Explicit sizes keep their main-axis extent; under equal-rows and
/// entire-row distributions the cross-axis extent is forced to fill the
/// allotted slot.
fn explicit(size: Size, constraints: &SizeConstraints) -> Size {
    match constraints.distribution {
        Distribution::Proportional => size,
        Distribution::EntireRow | Distribution::Rows(_) => constraints
            .axis
            .pack(constraints.axis.main(size), constraints.allotted_cross()),
    }
}

/// Scratch-measures with the cross axis fixed and the main axis floating.
fn intrinsic<C>(binder: &mut Binder<C>, cell: &CellModel<C>, constraints: &SizeConstraints) -> Size {
    let cross = constraints.allotted_cross();
    let proposal = constraints
        .axis
        .pack(constraints.axis.main(constraints.adjusted), cross);
    let measured = binder.measure_scratch(cell, proposal, constraints.axis);
    match constraints.distribution {
        Distribution::Proportional => measured,
        Distribution::EntireRow | Distribution::Rows(_) => {
            constraints.axis.pack(constraints.axis.main(measured), cross)
        }
    }
}

/// Scratch-measures with both axes floating.
fn proportional<C>(
    binder: &mut Binder<C>,
    cell: &CellModel<C>,
    constraints: &SizeConstraints,
) -> Size {
    binder.measure_scratch(cell, constraints.adjusted, constraints.axis)
}

fn sanitize<C>(size: Size, cell: &CellModel<C>) -> Size {
    let well_formed = size.width.is_finite()
        && size.height.is_finite()
        && size.width > 0.0
        && size.height > 0.0;
    if well_formed {
        size
    } else {
        twarn!(
            cell = %cell.id(),
            ?size,
            "non-positive or non-finite resolved size; substituting 1x1 placeholder"
        );
        Size::new(1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use core::num::NonZeroUsize;

    use kurbo::{Insets, Size};

    use super::{SizingDelegate, resolve_size};
    use crate::constraints::SizeConstraints;
    use trellis_model::{
        Axis, CellModel, Distribution, IndexPath, RendererType, SizeStrategy,
    };
    use trellis_reuse::{Binder, ItemView, ViewRegistry};

    /// Reports `proposal.cross × 40` when the cross axis is fixed would be
    /// the natural intrinsic answer; this view instead always reports
    /// 120 × 40 so tests can tell forced-cross results from verbatim ones.
    struct FixedView;

    impl ItemView<u32> for FixedView {
        fn bind(&mut self, _cell: &CellModel<u32>) {}

        fn unbind(&mut self) {}

        fn measure(&mut self, _proposal: Size, _axis: Axis) -> Size {
            Size::new(120.0, 40.0)
        }
    }

    struct CannedDelegate(Option<Size>);

    impl SizingDelegate<u32> for CannedDelegate {
        fn size_for(
            &mut self,
            _cell: &CellModel<u32>,
            _path: IndexPath,
            _constraints: &SizeConstraints,
        ) -> Option<Size> {
            self.0
        }
    }

    fn binder() -> Binder<u32> {
        let mut registry = ViewRegistry::new();
        registry.register(RendererType::of::<FixedView>(), || Box::new(FixedView));
        Binder::new(registry)
    }

    fn cell(strategy: SizeStrategy) -> CellModel<u32> {
        CellModel::new("cell", RendererType::of::<FixedView>(), 0).with_strategy(strategy)
    }

    fn constraints(distribution: Distribution) -> SizeConstraints {
        SizeConstraints::new(
            Size::new(300.0, 600.0),
            Insets::ZERO,
            Axis::Vertical,
            distribution,
        )
    }

    const PATH: IndexPath = IndexPath::new(0, 0);

    #[test]
    fn explicit_cross_axis_is_forced_in_equal_rows() {
        // 100×50 in a vertical entire-row container 300 wide: width forced
        // to 300, height preserved.
        let cell = cell(SizeStrategy::Explicit(Size::new(100.0, 50.0)));
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::EntireRow),
            None,
        );
        assert_eq!(size, Size::new(300.0, 50.0));

        let three = NonZeroUsize::new(3).unwrap();
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::Rows(three)),
            None,
        );
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn explicit_is_verbatim_under_proportional_distribution() {
        let cell = cell(SizeStrategy::Explicit(Size::new(100.0, 50.0)));
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::Proportional),
            None,
        );
        assert_eq!(size, Size::new(100.0, 50.0));
    }

    #[test]
    fn explicit_preserves_the_horizontal_main_axis() {
        let cell = cell(SizeStrategy::Explicit(Size::new(100.0, 50.0)));
        let horizontal = SizeConstraints::new(
            Size::new(300.0, 400.0),
            Insets::ZERO,
            Axis::Horizontal,
            Distribution::EntireRow,
        );
        let size = resolve_size(&mut binder(), &cell, PATH, &horizontal, None);
        assert_eq!(size, Size::new(100.0, 400.0));
    }

    #[test]
    fn intrinsic_fixes_cross_and_floats_main() {
        let cell = cell(SizeStrategy::Intrinsic);
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::EntireRow),
            None,
        );
        // Measured 120×40; width snaps back to the allotted 300, height floats.
        assert_eq!(size, Size::new(300.0, 40.0));
    }

    #[test]
    fn proportional_uses_the_measured_size_verbatim() {
        let cell = cell(SizeStrategy::Proportional);
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::Proportional),
            None,
        );
        assert_eq!(size, Size::new(120.0, 40.0));
    }

    #[test]
    fn relative_uses_the_delegate_answer_verbatim() {
        let cell = cell(SizeStrategy::Relative);
        let mut delegate = CannedDelegate(Some(Size::new(77.0, 33.0)));
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::EntireRow),
            Some(&mut delegate),
        );
        assert_eq!(size, Size::new(77.0, 33.0));
    }

    #[test]
    fn relative_falls_back_to_self_measurement() {
        let cell = cell(SizeStrategy::Relative);
        let mut declined = CannedDelegate(None);
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::EntireRow),
            Some(&mut declined),
        );
        assert_eq!(size, Size::new(300.0, 40.0));

        // No delegate at all takes the same path.
        let size = resolve_size(
            &mut binder(),
            &cell,
            PATH,
            &constraints(Distribution::EntireRow),
            None,
        );
        assert_eq!(size, Size::new(300.0, 40.0));
    }

    #[test]
    fn degenerate_sizes_become_placeholders() {
        let zero = cell(SizeStrategy::Explicit(Size::new(0.0, 50.0)));
        let size = resolve_size(
            &mut binder(),
            &zero,
            PATH,
            &constraints(Distribution::Proportional),
            None,
        );
        assert_eq!(size, Size::new(1.0, 1.0));

        let negative = cell(SizeStrategy::Relative);
        let mut delegate = CannedDelegate(Some(Size::new(-10.0, 50.0)));
        let size = resolve_size(
            &mut binder(),
            &negative,
            PATH,
            &constraints(Distribution::EntireRow),
            Some(&mut delegate),
        );
        assert_eq!(size, Size::new(1.0, 1.0));
    }
}
