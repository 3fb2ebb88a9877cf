// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal textual host driving the full engine: updates, viewport
//! scrolling, a drag-reorder, and the event stream.
//!
//! Run with: `cargo run --example feed`

use kurbo::Size;

use trellis_list::{ListController, ListEvent, ListOptions};
use trellis_model::{
    Axis, CellFlags, CellModel, IndexPath, RendererType, Section, SectionConstraints,
    SizeStrategy,
};
use trellis_reuse::{ItemView, ViewRegistry};

/// The app's cell content: an enum of known kinds, comparable for diffing.
#[derive(Clone, Debug, PartialEq)]
enum Content {
    Title(&'static str),
    Entry { label: &'static str, done: bool },
}

struct TitleRow {
    text: String,
}

impl ItemView<Content> for TitleRow {
    fn bind(&mut self, cell: &CellModel<Content>) {
        if let Content::Title(text) = cell.content() {
            self.text = (*text).to_owned();
        }
    }

    fn unbind(&mut self) {
        self.text.clear();
    }

    fn measure(&mut self, proposal: Size, _axis: Axis) -> Size {
        Size::new(proposal.width, 28.0)
    }
}

struct EntryRow {
    label: String,
}

impl ItemView<Content> for EntryRow {
    fn bind(&mut self, cell: &CellModel<Content>) {
        if let Content::Entry { label, done } = cell.content() {
            let mark = if *done { "x" } else { " " };
            self.label = format!("[{mark}] {label}");
        }
    }

    fn unbind(&mut self) {
        self.label.clear();
    }

    fn measure(&mut self, proposal: Size, _axis: Axis) -> Size {
        Size::new(proposal.width, 44.0)
    }
}

fn entry(id: &'static str, label: &'static str, done: bool) -> CellModel<Content> {
    CellModel::new(id, RendererType::of::<EntryRow>(), Content::Entry { label, done })
        .with_strategy(SizeStrategy::Intrinsic)
        .with_flags(CellFlags::SELECTABLE | CellFlags::REORDERABLE)
}

fn workouts(entries: Vec<CellModel<Content>>) -> Section<Content> {
    Section::new("workouts")
        .with_header(
            CellModel::new(
                "workouts-header",
                RendererType::of::<TitleRow>(),
                Content::Title("Workouts"),
            )
            .with_strategy(SizeStrategy::Intrinsic),
        )
        .with_constraints(SectionConstraints {
            sticky_header: true,
            ..SectionConstraints::default()
        })
        .with_cells(entries)
}

fn dump_events(list: &mut ListController<Content>) {
    for event in list.take_events() {
        match event {
            ListEvent::WillDisplay { path } => println!("  + display {path:?}"),
            ListEvent::DidEndDisplaying { path } => println!("  - recycle {path:?}"),
            ListEvent::Selected { cell, .. } => println!("  selected `{cell}`"),
            ListEvent::Moved { from, to, .. } => println!("  moved {from} -> {to}"),
            ListEvent::UpdateApplied { changed, .. } => println!("  update applied (changed: {changed})"),
            other => println!("  {other:?}"),
        }
    }
}

fn dump_frames(list: &ListController<Content>) {
    for (path, frame) in list.realized() {
        println!(
            "  {path:?} at ({:.0}, {:.0}) {:.0}x{:.0}",
            frame.x0,
            frame.y0,
            frame.width(),
            frame.height()
        );
    }
}

fn main() {
    let mut registry = ViewRegistry::new();
    registry.register(RendererType::of::<TitleRow>(), || {
        Box::new(TitleRow { text: String::new() })
    });
    registry.register(RendererType::of::<EntryRow>(), || {
        Box::new(EntryRow { label: String::new() })
    });

    let mut list =
        ListController::with_options(registry, ListOptions::default().with_overscan(0.0, 44.0));
    list.set_container(Size::new(320.0, 180.0));
    list.set_viewport(0.0, 180.0);
    list.set_displaying(true);

    println!("initial update:");
    list.update(
        vec![workouts(vec![
            entry("run", "Morning run", true),
            entry("row", "Rowing 2k", false),
            entry("lift", "Deadlifts", false),
            entry("yoga", "Yoga", false),
            entry("swim", "Swim 1k", false),
        ])],
        false,
    );
    dump_events(&mut list);
    dump_frames(&list);

    println!("scroll to 120:");
    list.set_viewport(120.0, 180.0);
    dump_events(&mut list);
    if let Some(pinned) = list.layout().pinned_header_main_origin(0, 120.0) {
        println!("  sticky header pinned at {pinned:.0}");
    }

    println!("complete `row`, drop `yoga` (animated):");
    list.update_with(
        vec![workouts(vec![
            entry("run", "Morning run", true),
            entry("row", "Rowing 2k", true),
            entry("lift", "Deadlifts", false),
            entry("swim", "Swim 1k", false),
        ])],
        true,
        |finished| println!("  first update finished: {finished}"),
    );
    if let Some(transaction) = list.last_transaction() {
        println!("  ops to animate: {:?}", transaction.item_ops);
    }
    list.settle();
    dump_events(&mut list);

    println!("drag `lift` to the top:");
    list.reorder(0, 2, 0);
    dump_events(&mut list);

    println!("select the first entry:");
    list.select(IndexPath::new(0, 0));
    dump_events(&mut list);

    println!("final frames:");
    dump_frames(&list);
    println!("content size: {:?}", list.content_size());
}
