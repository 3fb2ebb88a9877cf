// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning resolved sizes into frames.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use trellis_model::{Axis, Distribution, IndexPath, ItemPath, Section};
use trellis_sizing::SizeConstraints;

/// Resolved sizes of one section, aligned index-for-index with its models.
#[derive(Clone, Debug, Default)]
pub(crate) struct SectionSizes {
    pub(crate) header: Option<Size>,
    pub(crate) footer: Option<Size>,
    pub(crate) cells: Vec<Size>,
}

#[derive(Clone, Debug)]
struct SectionFrames {
    axis: Axis,
    sticky_header: bool,
    main_start: f64,
    main_end: f64,
    header: Option<Rect>,
    footer: Option<Rect>,
    cells: Vec<Rect>,
}

/// Frames for every renderable item, plus the total content size.
///
/// Sections are stacked along a single running main cursor, each advancing it
/// along its own axis. Rows inside a section follow the section's
/// distribution: entire-row cells each occupy a row, equal rows pack `n`
/// cells per row at fixed cross offsets, proportional cells flow and wrap at
/// the adjusted cross extent. Headers come first and footers last, both
/// entire-row.
#[derive(Clone, Debug, Default)]
pub struct ListLayout {
    sections: Vec<SectionFrames>,
    content_size: Size,
}

impl ListLayout {
    /// Positions `sizes` under each section's constraints.
    pub(crate) fn solve<C>(
        sections: &[Section<C>],
        sizes: &[SectionSizes],
        container: Size,
    ) -> Self {
        let mut out = Vec::with_capacity(sections.len());
        let mut cursor = 0.0_f64;
        let mut max_x = 0.0_f64;
        let mut max_y = 0.0_f64;

        for (section, sizes) in sections.iter().zip(sizes) {
            let constraints = section.constraints();
            let axis = constraints.axis;
            let insets = constraints.insets;
            let adjusted_cross =
                axis.cross(SizeConstraints::for_section(container, constraints).adjusted);
            let (main_lead, main_trail, cross_lead) = match axis {
                Axis::Vertical => (insets.y0, insets.y1, insets.x0),
                Axis::Horizontal => (insets.x0, insets.x1, insets.y0),
            };

            let main_start = cursor;
            let mut main = cursor + main_lead;

            let mut place = |main: f64, cross: f64, size: Size| {
                let rect = Rect::from_origin_size(axis.pack_point(main, cross), size);
                max_x = max_x.max(rect.x1);
                max_y = max_y.max(rect.y1);
                rect
            };

            let header = sizes.header.map(|size| {
                let rect = place(main, cross_lead, size);
                main += axis.main(size);
                rect
            });

            let mut cells = Vec::with_capacity(sizes.cells.len());
            match constraints.distribution {
                Distribution::EntireRow => {
                    for &size in &sizes.cells {
                        cells.push(place(main, cross_lead, size));
                        main += axis.main(size);
                    }
                }
                Distribution::Rows(n) => {
                    let slot = adjusted_cross / n.get() as f64;
                    for row in sizes.cells.chunks(n.get()) {
                        let row_extent = row.iter().map(|&s| axis.main(s)).fold(0.0, f64::max);
                        for (column, &size) in row.iter().enumerate() {
                            let cross = cross_lead + slot * column as f64;
                            cells.push(place(main, cross, size));
                        }
                        main += row_extent;
                    }
                }
                Distribution::Proportional => {
                    let mut cross = cross_lead;
                    let mut row_extent = 0.0_f64;
                    for &size in &sizes.cells {
                        let item_cross = axis.cross(size);
                        let wraps =
                            cross > cross_lead && cross + item_cross > cross_lead + adjusted_cross;
                        if wraps {
                            main += row_extent;
                            row_extent = 0.0;
                            cross = cross_lead;
                        }
                        cells.push(place(main, cross, size));
                        cross += item_cross;
                        row_extent = row_extent.max(axis.main(size));
                    }
                    main += row_extent;
                }
            }

            let footer = sizes.footer.map(|size| {
                let rect = place(main, cross_lead, size);
                main += axis.main(size);
                rect
            });

            cursor = main + main_trail;
            out.push(SectionFrames {
                axis,
                sticky_header: constraints.sticky_header,
                main_start,
                main_end: cursor,
                header,
                footer,
                cells,
            });
        }

        Self {
            sections: out,
            content_size: Size::new(max_x, max_y),
        }
    }

    /// Total extent of the laid-out content.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// Frame of the item at `path`, if it exists.
    #[must_use]
    pub fn frame_of(&self, path: ItemPath) -> Option<Rect> {
        let section = self.sections.get(path.section())?;
        match path {
            ItemPath::Cell(path) => section.cells.get(path.item).copied(),
            ItemPath::Header(_) => section.header,
            ItemPath::Footer(_) => section.footer,
        }
    }

    /// `[start, end]` of the section along the main axis, insets included.
    #[must_use]
    pub fn section_main_span(&self, section: usize) -> Option<(f64, f64)> {
        self.sections
            .get(section)
            .map(|frames| (frames.main_start, frames.main_end))
    }

    /// Main-axis origin at which a sticky header should be drawn.
    ///
    /// Returns `None` for sections without a sticky header. While the
    /// viewport start is inside the section, the header tracks it; the origin
    /// is clamped between the header's natural position and the section end
    /// minus the header extent, so the header pushes out as the section
    /// scrolls away.
    #[must_use]
    pub fn pinned_header_main_origin(&self, section: usize, viewport_main_start: f64) -> Option<f64> {
        let frames = self.sections.get(section)?;
        if !frames.sticky_header {
            return None;
        }
        let header = frames.header?;
        let (natural, header_end) = frames.axis.main_span(header);
        let extent = header_end - natural;
        let max_origin = frames.main_end - extent;
        Some(viewport_main_start.max(natural).min(max_origin))
    }

    /// All item frames in order: per section, header, cells, footer.
    pub fn item_frames(&self) -> impl Iterator<Item = (ItemPath, Rect)> + '_ {
        self.sections.iter().enumerate().flat_map(|(s, frames)| {
            frames
                .header
                .map(|rect| (ItemPath::Header(s), rect))
                .into_iter()
                .chain(
                    frames
                        .cells
                        .iter()
                        .enumerate()
                        .map(move |(item, rect)| (ItemPath::Cell(IndexPath::new(s, item)), *rect)),
                )
                .chain(frames.footer.map(|rect| (ItemPath::Footer(s), rect)))
        })
    }

    /// Scroll axis of the section, for viewport intersection tests.
    pub(crate) fn section_axis(&self, section: usize) -> Option<Axis> {
        self.sections.get(section).map(|frames| frames.axis)
    }
}
