// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The list controller: reconciliation, sizing, layout, and lifecycle.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::{HashMap, HashSet};
use kurbo::{Rect, Size};

use trellis_diff::{DiffOp, diff_by};
use trellis_model::{CellFlags, CellModel, Distribution, IndexPath, ItemPath, Section};
use trellis_reuse::{Binder, BindingKey, BoundView, ItemView, ReusePool, ViewRegistry};
use trellis_sizing::{SizeConstraints, SizingDelegate, resolve_size};

use crate::event::ListEvent;
use crate::layout::{ListLayout, SectionSizes};
use crate::options::ListOptions;

/// Completion of one update: `finished` is `false` when the update was
/// superseded by a newer one before settling.
pub type UpdateCompletion = Box<dyn FnOnce(bool)>;

/// Where the controller is in its update cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    /// No update has been applied yet.
    #[default]
    Idle,
    /// An update was applied and is waiting for [`ListController::settle`]
    /// (animated updates) or already settling (non-animated).
    Updating,
    /// The last update ran to completion.
    Settled,
}

/// Item-level operations of one section, in new-index section order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionItemOps {
    /// Index of the section in the new section list.
    pub section: usize,
    /// Cell operations within the section.
    pub ops: Vec<DiffOp>,
}

/// Structural operations of one applied update, exposed for host animation.
///
/// Section-level operations address the section list; an `Update` there means
/// the section's constraints or supplementaries changed (cell-level changes
/// are reported through `item_ops` instead, so nothing is double-counted).
#[derive(Clone, Debug, Default)]
pub struct UpdateTransaction {
    /// Whether the host should animate the operations.
    pub animated: bool,
    /// Operations on the ordered section list.
    pub section_ops: Vec<DiffOp>,
    /// Per-section cell operations, for sections that survived.
    pub item_ops: Vec<SectionItemOps>,
}

impl UpdateTransaction {
    /// Returns `true` if the update changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.section_ops.is_empty() && self.item_ops.iter().all(|section| section.ops.is_empty())
    }
}

struct PendingUpdate<C: 'static> {
    sections: Vec<Section<C>>,
    animated: bool,
    completion: Option<UpdateCompletion>,
}

struct LiveItem<C: 'static> {
    view: BoundView<C>,
    path: ItemPath,
}

/// The orchestrator of the engine.
///
/// A controller accepts full replacements of its section list, diffs them
/// hierarchically against the previously applied snapshot (sections by id
/// first, then cells within each surviving section), resolves sizes for new
/// and changed items, solves layout, and reconciles the live view set —
/// binding, rebinding, and recycling through the reuse pool. Interaction and
/// lifecycle are reported as typed [`ListEvent`]s drained with
/// [`take_events`](Self::take_events).
///
/// All methods take `&mut self`: the controller is designed for one
/// cooperative UI context. Work that produces section data runs wherever the
/// host likes; the controller only ever sees completed `Vec<Section<C>>`
/// values.
///
/// ## Update cycle
///
/// [`update`](Self::update) applies synchronously and, for non-animated
/// updates, settles before returning. An animated update leaves the
/// controller [`Updating`](ControllerState::Updating) until the host calls
/// [`settle`](Self::settle) (when its animations finish). Updates requested
/// while updating are coalesced last-writer-wins: intermediate targets are
/// never applied and their completions fire `finished = false`.
pub struct ListController<C: 'static> {
    binder: Binder<C>,
    delegate: Option<Box<dyn SizingDelegate<C>>>,
    options: ListOptions,
    container: Size,
    viewport: Option<(f64, f64)>,
    sections: Vec<Section<C>>,
    sizes: Vec<SectionSizes>,
    layout: ListLayout,
    live: HashMap<BindingKey, LiveItem<C>>,
    state: ControllerState,
    pending: Option<PendingUpdate<C>>,
    inflight: Option<UpdateCompletion>,
    last_transaction: Option<UpdateTransaction>,
    events: Vec<ListEvent>,
    displaying: bool,
}

impl<C: PartialEq + 'static> ListController<C> {
    /// Creates a controller over `registry` with default options.
    #[must_use]
    pub fn new(registry: ViewRegistry<C>) -> Self {
        Self::with_options(registry, ListOptions::default())
    }

    /// Creates a controller with explicit options.
    #[must_use]
    pub fn with_options(registry: ViewRegistry<C>, options: ListOptions) -> Self {
        let pool = ReusePool::with_idle_cap(options.idle_views_per_renderer);
        Self {
            binder: Binder::with_pool(registry, pool),
            delegate: None,
            options,
            container: Size::ZERO,
            viewport: None,
            sections: Vec::new(),
            sizes: Vec::new(),
            layout: ListLayout::default(),
            live: HashMap::new(),
            state: ControllerState::Idle,
            pending: None,
            inflight: None,
            last_transaction: None,
            events: Vec::new(),
            displaying: false,
        }
    }

    /// Installs the sizing delegate consulted for relative-mode cells.
    pub fn set_sizing_delegate<D>(&mut self, delegate: D)
    where
        D: SizingDelegate<C> + 'static,
    {
        self.delegate = Some(Box::new(delegate));
    }

    /// Installs the pre-bind hook, run once per bind before a view shows.
    pub fn set_prepare_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&CellModel<C>, &mut dyn ItemView<C>) + 'static,
    {
        self.binder.set_prepare_hook(hook);
    }

    /// Current state of the update cycle.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// The applied section list.
    #[must_use]
    pub fn sections(&self) -> &[Section<C>] {
        &self.sections
    }

    /// The cell model at `path`, if any.
    #[must_use]
    pub fn cell_at(&self, path: IndexPath) -> Option<&CellModel<C>> {
        self.sections.get(path.section)?.cell(path.item)
    }

    /// The solved layout (frames, content size, sticky-header queries).
    #[must_use]
    pub const fn layout(&self) -> &ListLayout {
        &self.layout
    }

    /// Frame of the item at `path`.
    #[must_use]
    pub fn frame_of(&self, path: ItemPath) -> Option<Rect> {
        self.layout.frame_of(path)
    }

    /// Total extent of the laid-out content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.layout.content_size()
    }

    /// Operations of the most recently applied update.
    #[must_use]
    pub fn last_transaction(&self) -> Option<&UpdateTransaction> {
        self.last_transaction.as_ref()
    }

    /// Drains the buffered events, in emission order.
    pub fn take_events(&mut self) -> Vec<ListEvent> {
        core::mem::take(&mut self.events)
    }

    /// Currently realized items with their frames, in path order.
    #[must_use]
    pub fn realized(&self) -> Vec<(ItemPath, Rect)> {
        let mut items: Vec<(ItemPath, Rect)> = self
            .live
            .values()
            .filter_map(|live| self.layout.frame_of(live.path).map(|rect| (live.path, rect)))
            .collect();
        items.sort_by_key(|&(path, _)| path);
        items
    }

    /// The live view bound at `path`, if the item is realized.
    pub fn view_mut(&mut self, path: ItemPath) -> Option<&mut dyn ItemView<C>> {
        let key = binding_key(&self.sections, path)?;
        self.live.get_mut(&key).map(|live| live.view.view_mut())
    }

    /// Sets the container size all sizing and layout works against.
    ///
    /// Changing it re-resolves every size, re-solves layout, and reconciles
    /// the realized set.
    pub fn set_container(&mut self, size: Size) {
        if self.container == size {
            return;
        }
        self.container = size;
        self.resolve_all_sizes();
        self.layout = ListLayout::solve(&self.sections, &self.sizes, self.container);
        self.reconcile_views(&HashSet::new());
    }

    /// Sets the visible window along the main axis: items whose frames
    /// intersect it (plus overscan) are realized, everything else is
    /// recycled.
    pub fn set_viewport(&mut self, main_offset: f64, main_extent: f64) {
        let next = Some((main_offset, main_extent));
        if self.viewport == next {
            return;
        }
        self.viewport = next;
        self.reconcile_views(&HashSet::new());
    }

    /// Removes the viewport: every item is kept realized.
    pub fn clear_viewport(&mut self) {
        if self.viewport.take().is_some() {
            self.reconcile_views(&HashSet::new());
        }
    }

    /// Reports whether the list as a whole is on screen, emitting the coarse
    /// display lifecycle events.
    pub fn set_displaying(&mut self, displaying: bool) {
        if self.displaying == displaying {
            return;
        }
        self.displaying = displaying;
        self.events.push(if displaying {
            ListEvent::WillDisplayList
        } else {
            ListEvent::DidEndDisplayingList
        });
    }

    /// Replaces the section list. See [`update_with`](Self::update_with).
    pub fn update(&mut self, sections: Vec<Section<C>>, animated: bool) {
        self.update_inner(sections, animated, None);
    }

    /// Replaces the section list, with a completion callback.
    ///
    /// The sole mutation entry point. The new list is diffed against the
    /// applied snapshot and the resulting operations are applied to the view
    /// layer. `completion` fires with `finished = true` once the update
    /// settles, or `finished = false` if a newer update supersedes it first.
    ///
    /// While an animated update is waiting for [`settle`](Self::settle),
    /// further updates are queued with last-writer-wins coalescing: only the
    /// latest requested list is applied next.
    pub fn update_with<F>(&mut self, sections: Vec<Section<C>>, animated: bool, completion: F)
    where
        F: FnOnce(bool) + 'static,
    {
        self.update_inner(sections, animated, Some(Box::new(completion)));
    }

    fn update_inner(
        &mut self,
        sections: Vec<Section<C>>,
        animated: bool,
        completion: Option<UpdateCompletion>,
    ) {
        match self.state {
            ControllerState::Updating => {
                if let Some(superseded) = self.pending.take() {
                    tdebug!("superseding a queued update before it was applied");
                    if let Some(completion) = superseded.completion {
                        completion(false);
                    }
                }
                self.pending = Some(PendingUpdate {
                    sections,
                    animated,
                    completion,
                });
            }
            ControllerState::Idle | ControllerState::Settled => {
                self.begin(sections, animated, completion);
            }
        }
    }

    /// Marks the in-flight update as applied on the view layer.
    ///
    /// Hosts call this when the animations of the last transaction finish;
    /// non-animated updates settle internally. If a newer update was queued
    /// meanwhile, the in-flight completion fires `finished = false` and the
    /// queued update is applied immediately; otherwise the completion fires
    /// `finished = true` and the controller settles.
    pub fn settle(&mut self) {
        if self.state != ControllerState::Updating {
            return;
        }
        match self.pending.take() {
            Some(pending) => {
                if let Some(completion) = self.inflight.take() {
                    completion(false);
                }
                self.begin(pending.sections, pending.animated, pending.completion);
            }
            None => {
                if let Some(completion) = self.inflight.take() {
                    completion(true);
                }
                self.state = ControllerState::Settled;
            }
        }
    }

    /// Executes a drag-reorder reported by the view layer.
    ///
    /// The controller does not decide whether the reorder is allowed beyond
    /// checking the model's `REORDERABLE` flag: a move of a non-reorderable
    /// cell is rejected silently (a normal gesture race, not a fault).
    /// Returns `true` when the move was applied; a [`ListEvent::Moved`]
    /// notification follows.
    pub fn reorder(&mut self, section: usize, from: usize, to: usize) -> bool {
        let Some(owner) = self.sections.get(section) else {
            return false;
        };
        let Some(cell) = owner.cell(from) else {
            return false;
        };
        if to >= owner.len() {
            return false;
        }
        if !cell.flags().contains(CellFlags::REORDERABLE) {
            tdebug!(section, from, to, "reorder of a non-reorderable cell rejected");
            return false;
        }

        let moved = self
            .sections
            .get_mut(section)
            .is_some_and(|owner| owner.move_cell(from, to));
        debug_assert!(moved, "validated reorder failed to apply");
        if let Some(sizes) = self.sizes.get_mut(section) {
            let size = sizes.cells.remove(from);
            sizes.cells.insert(to, size);
        }
        self.layout = ListLayout::solve(&self.sections, &self.sizes, self.container);
        self.reconcile_views(&HashSet::new());
        self.events.push(ListEvent::Moved { section, from, to });
        true
    }

    /// Routes a selection at `path` to its cell, if it is selectable.
    pub fn select(&mut self, path: IndexPath) {
        let Some(section) = self.sections.get(path.section) else {
            return;
        };
        let Some(cell) = section.cell(path.item) else {
            return;
        };
        if cell.flags().contains(CellFlags::SELECTABLE) {
            self.events.push(ListEvent::Selected {
                section: section.id().clone(),
                cell: cell.id().clone(),
                path,
            });
        }
    }

    /// Routes a highlight change at `path` to its cell, if highlightable.
    pub fn set_highlighted(&mut self, path: IndexPath, active: bool) {
        let Some(section) = self.sections.get(path.section) else {
            return;
        };
        let Some(cell) = section.cell(path.item) else {
            return;
        };
        if cell.flags().contains(CellFlags::HIGHLIGHTABLE) {
            self.events.push(ListEvent::Highlighted {
                section: section.id().clone(),
                cell: cell.id().clone(),
                path,
                active,
            });
        }
    }

    fn begin(
        &mut self,
        sections: Vec<Section<C>>,
        animated: bool,
        completion: Option<UpdateCompletion>,
    ) {
        self.state = ControllerState::Updating;
        let transaction = self.apply_target(sections, animated);
        self.events.push(ListEvent::UpdateApplied {
            animated,
            changed: !transaction.is_empty(),
        });
        self.last_transaction = Some(transaction);
        self.inflight = completion;
        if !animated {
            self.settle();
        }
    }

    /// Diffs, resolves sizes, lays out, and reconciles views for the target
    /// section list.
    fn apply_target(&mut self, new_sections: Vec<Section<C>>, animated: bool) -> UpdateTransaction {
        for section in &new_sections {
            if !section.has_unique_ids() {
                twarn!(
                    section = %section.id(),
                    "duplicate identifiers within a section; diffing degrades to positional pairing"
                );
            }
        }

        let section_diff = diff_by(
            &self.sections,
            &new_sections,
            |section| section.id().clone(),
            meta_identical,
        );
        let mut old_of_new: Vec<Option<usize>> = vec![None; new_sections.len()];
        for m in &section_diff.matches {
            old_of_new[m.new_index] = Some(m.old_index);
        }

        let mut item_ops = Vec::new();
        let mut new_sizes: Vec<SectionSizes> = Vec::with_capacity(new_sections.len());
        let mut rebinds: HashSet<BindingKey> = HashSet::new();

        for (new_index, section) in new_sections.iter().enumerate() {
            match old_of_new[new_index] {
                Some(old_index) => {
                    let old_section = &self.sections[old_index];
                    if old_section.is_identical(section) {
                        // Untouched section: carry everything, skip the item pass.
                        new_sizes.push(self.sizes[old_index].clone());
                        continue;
                    }
                    let constraints_changed = old_section.constraints() != section.constraints();
                    let cell_diff = diff_by(
                        old_section.cells(),
                        section.cells(),
                        |cell| cell.id().clone(),
                        CellModel::is_identical,
                    );

                    let mut sizes = SectionSizes {
                        header: None,
                        footer: None,
                        cells: vec![Size::ZERO; section.len()],
                    };
                    let mut carried = vec![false; section.len()];
                    if !constraints_changed {
                        let old_sizes = &self.sizes[old_index];
                        for m in &cell_diff.matches {
                            if !m.updated
                                && let Some(&size) = old_sizes.cells.get(m.old_index)
                            {
                                sizes.cells[m.new_index] = size;
                                carried[m.new_index] = true;
                            }
                        }
                    }
                    let constraints = SizeConstraints::for_section(self.container, section.constraints());
                    for (item, cell) in section.cells().iter().enumerate() {
                        if !carried[item] {
                            sizes.cells[item] = resolve_size(
                                &mut self.binder,
                                cell,
                                IndexPath::new(new_index, item),
                                &constraints,
                                self.delegate.as_deref_mut(),
                            );
                        }
                    }

                    let header_changed =
                        !supplementary_identical(old_section.header(), section.header());
                    let footer_changed =
                        !supplementary_identical(old_section.footer(), section.footer());
                    let supplementary = supplementary_constraints(self.container, section);
                    sizes.header = match (section.header(), constraints_changed || header_changed) {
                        (Some(header), true) => Some(resolve_size(
                            &mut self.binder,
                            header,
                            IndexPath::new(new_index, 0),
                            &supplementary,
                            self.delegate.as_deref_mut(),
                        )),
                        (Some(_), false) => self.sizes[old_index].header,
                        (None, _) => None,
                    };
                    sizes.footer = match (section.footer(), constraints_changed || footer_changed) {
                        (Some(footer), true) => Some(resolve_size(
                            &mut self.binder,
                            footer,
                            IndexPath::new(new_index, section.len()),
                            &supplementary,
                            self.delegate.as_deref_mut(),
                        )),
                        (Some(_), false) => self.sizes[old_index].footer,
                        (None, _) => None,
                    };

                    for m in &cell_diff.matches {
                        if m.updated {
                            let cell = &section.cells()[m.new_index];
                            rebinds.insert(BindingKey::cell(
                                section.id().clone(),
                                cell.id().clone(),
                            ));
                        }
                    }
                    if header_changed && section.header().is_some() {
                        rebinds.insert(BindingKey::header(section.id().clone()));
                    }
                    if footer_changed && section.footer().is_some() {
                        rebinds.insert(BindingKey::footer(section.id().clone()));
                    }

                    if !cell_diff.ops.is_empty() {
                        item_ops.push(SectionItemOps {
                            section: new_index,
                            ops: cell_diff.ops,
                        });
                    }
                    new_sizes.push(sizes);
                }
                None => {
                    let constraints = SizeConstraints::for_section(self.container, section.constraints());
                    let supplementary = supplementary_constraints(self.container, section);
                    let mut sizes = SectionSizes::default();
                    for (item, cell) in section.cells().iter().enumerate() {
                        sizes.cells.push(resolve_size(
                            &mut self.binder,
                            cell,
                            IndexPath::new(new_index, item),
                            &constraints,
                            self.delegate.as_deref_mut(),
                        ));
                    }
                    sizes.header = section.header().map(|header| {
                        resolve_size(
                            &mut self.binder,
                            header,
                            IndexPath::new(new_index, 0),
                            &supplementary,
                            self.delegate.as_deref_mut(),
                        )
                    });
                    sizes.footer = section.footer().map(|footer| {
                        resolve_size(
                            &mut self.binder,
                            footer,
                            IndexPath::new(new_index, section.len()),
                            &supplementary,
                            self.delegate.as_deref_mut(),
                        )
                    });
                    new_sizes.push(sizes);
                }
            }
        }

        self.sections = new_sections;
        self.sizes = new_sizes;
        self.layout = ListLayout::solve(&self.sections, &self.sizes, self.container);
        self.reconcile_views(&rebinds);

        UpdateTransaction {
            animated,
            section_ops: section_diff.ops,
            item_ops,
        }
    }

    /// Re-resolves every size (container or constraints changed wholesale).
    fn resolve_all_sizes(&mut self) {
        let sections = core::mem::take(&mut self.sections);
        self.sizes = sections
            .iter()
            .enumerate()
            .map(|(section_index, section)| {
                let constraints = SizeConstraints::for_section(self.container, section.constraints());
                let supplementary = supplementary_constraints(self.container, section);
                let mut sizes = SectionSizes::default();
                for (item, cell) in section.cells().iter().enumerate() {
                    sizes.cells.push(resolve_size(
                        &mut self.binder,
                        cell,
                        IndexPath::new(section_index, item),
                        &constraints,
                        self.delegate.as_deref_mut(),
                    ));
                }
                sizes.header = section.header().map(|header| {
                    resolve_size(
                        &mut self.binder,
                        header,
                        IndexPath::new(section_index, 0),
                        &supplementary,
                        self.delegate.as_deref_mut(),
                    )
                });
                sizes.footer = section.footer().map(|footer| {
                    resolve_size(
                        &mut self.binder,
                        footer,
                        IndexPath::new(section_index, section.len()),
                        &supplementary,
                        self.delegate.as_deref_mut(),
                    )
                });
                sizes
            })
            .collect();
        self.sections = sections;
    }

    /// Aligns the live view set with the realizable items of the current
    /// layout: recycles views that left, rebinds changed survivors, binds
    /// entrants.
    fn reconcile_views(&mut self, rebinds: &HashSet<BindingKey>) {
        let mut desired: Vec<(BindingKey, ItemPath)> = Vec::new();
        for (path, rect) in self.layout.item_frames() {
            if self.realizable(path, rect)
                && let Some(key) = binding_key(&self.sections, path)
            {
                desired.push((key, path));
            }
        }

        let desired_paths: HashMap<&BindingKey, ItemPath> =
            desired.iter().map(|(key, path)| (key, *path)).collect();
        let stale: Vec<BindingKey> = self
            .live
            .keys()
            .filter(|key| !desired_paths.contains_key(key))
            .cloned()
            .collect();
        drop(desired_paths);
        for key in stale {
            if let Some(live) = self.live.remove(&key) {
                self.binder.unbind(&key, live.view);
                self.events.push(ListEvent::DidEndDisplaying { path: live.path });
            }
        }

        for (key, path) in desired {
            let Some(cell) = model_at(&self.sections, path) else {
                continue;
            };
            if let Some(live) = self.live.get_mut(&key) {
                live.path = path;
                if rebinds.contains(&key) {
                    self.binder.rebind(&mut live.view, cell);
                }
            } else {
                let view = self.binder.bind(key.clone(), cell);
                self.live.insert(key, LiveItem { view, path });
                self.events.push(ListEvent::WillDisplay { path });
            }
        }
    }

    /// Whether the frame intersects the overscanned viewport (or there is no
    /// viewport at all).
    fn realizable(&self, path: ItemPath, rect: Rect) -> bool {
        let Some((offset, extent)) = self.viewport else {
            return true;
        };
        let Some(axis) = self.layout.section_axis(path.section()) else {
            return false;
        };
        let (start, end) = axis.main_span(rect);
        let lo = offset - self.options.overscan_before;
        let hi = offset + extent + self.options.overscan_after;
        end > lo && start < hi
    }
}

impl<C> fmt::Debug for ListController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListController")
            .field("state", &self.state)
            .field("sections", &self.sections.len())
            .field("live", &self.live.len())
            .field("container", &self.container)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

/// Section identity short of its cells: constraints plus supplementaries.
///
/// The section-level diff uses this so cell-only changes do not surface as a
/// section update — the item-level pass reports them with full detail.
fn meta_identical<C: PartialEq>(a: &Section<C>, b: &Section<C>) -> bool {
    a.constraints() == b.constraints()
        && supplementary_identical(a.header(), b.header())
        && supplementary_identical(a.footer(), b.footer())
}

fn supplementary_identical<C: PartialEq>(
    a: Option<&CellModel<C>>,
    b: Option<&CellModel<C>>,
) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.id() == b.id() && a.is_identical(b),
        _ => false,
    }
}

/// Headers and footers always span the entire row, whatever the section's
/// cell distribution.
fn supplementary_constraints<C>(container: Size, section: &Section<C>) -> SizeConstraints {
    let constraints = section.constraints();
    SizeConstraints::new(
        container,
        constraints.insets,
        constraints.axis,
        Distribution::EntireRow,
    )
}

fn binding_key<C>(sections: &[Section<C>], path: ItemPath) -> Option<BindingKey> {
    let section = sections.get(path.section())?;
    match path {
        ItemPath::Cell(path) => {
            let cell = section.cell(path.item)?;
            Some(BindingKey::cell(section.id().clone(), cell.id().clone()))
        }
        ItemPath::Header(_) => section
            .header()
            .map(|_| BindingKey::header(section.id().clone())),
        ItemPath::Footer(_) => section
            .footer()
            .map(|_| BindingKey::footer(section.id().clone())),
    }
}

fn model_at<C>(sections: &[Section<C>], path: ItemPath) -> Option<&CellModel<C>> {
    let section = sections.get(path.section())?;
    match path {
        ItemPath::Cell(path) => section.cell(path.item),
        ItemPath::Header(_) => section.header(),
        ItemPath::Footer(_) => section.footer(),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};

    use kurbo::{Rect, Size};

    use super::{ControllerState, ListController};
    use crate::event::ListEvent;
    use crate::options::ListOptions;
    use trellis_diff::DiffOp;
    use trellis_model::{
        CellFlags, CellModel, IndexPath, ItemPath, RendererType, Section, SectionConstraints,
        SizeStrategy,
    };
    use trellis_reuse::{ItemView, ViewRegistry};

    type Content = &'static str;

    struct TextView;

    impl ItemView<Content> for TextView {
        fn bind(&mut self, _cell: &CellModel<Content>) {}

        fn unbind(&mut self) {}

        fn measure(&mut self, proposal: Size, _axis: trellis_model::Axis) -> Size {
            Size::new(proposal.width, 40.0)
        }
    }

    fn renderer() -> RendererType {
        RendererType::of::<TextView>()
    }

    fn registry() -> ViewRegistry<Content> {
        let mut registry = ViewRegistry::new();
        registry.register(renderer(), || Box::new(TextView));
        registry
    }

    fn controller() -> ListController<Content> {
        let mut controller = ListController::new(registry());
        controller.set_container(Size::new(300.0, 600.0));
        controller
    }

    fn cell(id: &'static str) -> CellModel<Content> {
        CellModel::new(id, renderer(), id)
            .with_strategy(SizeStrategy::Explicit(Size::new(300.0, 50.0)))
    }

    fn section(id: &'static str, ids: &[&'static str]) -> Section<Content> {
        Section::new(id).with_cells(ids.iter().map(|&id| cell(id)).collect())
    }

    fn cell_order(
        controller: &ListController<Content>,
        section: usize,
    ) -> Vec<alloc::string::String> {
        controller.sections()[section]
            .cells()
            .iter()
            .map(|cell| cell.id().as_str().into())
            .collect()
    }

    #[test]
    fn first_update_applies_and_settles_synchronously() {
        let mut controller = controller();
        let finished = Rc::new(Cell::new(None));
        let flag = finished.clone();
        controller.update_with(vec![section("s", &["a", "b", "c"])], false, move |ok| {
            flag.set(Some(ok));
        });

        assert_eq!(controller.state(), ControllerState::Settled);
        assert_eq!(finished.get(), Some(true));
        assert_eq!(controller.content_size(), Size::new(300.0, 150.0));
        assert_eq!(controller.realized().len(), 3);

        let transaction = controller.last_transaction().unwrap();
        assert_eq!(transaction.section_ops, [DiffOp::Insert { index: 0 }]);
        assert!(transaction.item_ops.is_empty());

        let events = controller.take_events();
        let displays = events
            .iter()
            .filter(|event| matches!(event, ListEvent::WillDisplay { .. }))
            .count();
        assert_eq!(displays, 3);
    }

    #[test]
    fn re_update_with_identical_sections_is_empty() {
        let mut controller = controller();
        controller.update(vec![section("s", &["a", "b", "c"])], false);
        let _ = controller.take_events();

        controller.update(vec![section("s", &["a", "b", "c"])], false);
        assert!(controller.last_transaction().unwrap().is_empty());
        let events = controller.take_events();
        assert_eq!(
            events,
            [ListEvent::UpdateApplied {
                animated: false,
                changed: false
            }]
        );
    }

    #[test]
    fn abc_to_bcd_recycles_only_the_edges() {
        let mut controller = controller();
        controller.update(vec![section("s", &["a", "b", "c"])], false);
        let _ = controller.take_events();

        controller.update(vec![section("s", &["b", "c", "d"])], false);
        let transaction = controller.last_transaction().unwrap();
        assert!(transaction.section_ops.is_empty());
        assert_eq!(transaction.item_ops.len(), 1);
        assert_eq!(
            transaction.item_ops[0].ops,
            [DiffOp::Delete { index: 0 }, DiffOp::Insert { index: 2 }]
        );

        let events = controller.take_events();
        assert!(events.contains(&ListEvent::DidEndDisplaying {
            path: ItemPath::Cell(IndexPath::new(0, 0))
        }));
        assert!(events.contains(&ListEvent::WillDisplay {
            path: ItemPath::Cell(IndexPath::new(0, 2))
        }));
        assert_eq!(controller.realized().len(), 3);
    }

    #[test]
    fn queued_updates_coalesce_last_writer_wins() {
        let mut controller = controller();
        let log: Rc<RefCell<Vec<(&'static str, bool)>>> = Rc::new(RefCell::new(Vec::new()));

        let a = log.clone();
        controller.update_with(vec![section("s", &["a"])], true, move |ok| {
            a.borrow_mut().push(("a", ok));
        });
        assert_eq!(controller.state(), ControllerState::Updating);

        let b = log.clone();
        controller.update_with(vec![section("s", &["b"])], true, move |ok| {
            b.borrow_mut().push(("b", ok));
        });
        let c = log.clone();
        controller.update_with(vec![section("s", &["c"])], true, move |ok| {
            c.borrow_mut().push(("c", ok));
        });
        // B was queued and superseded before ever being applied.
        assert_eq!(*log.borrow(), [("b", false)]);

        controller.settle();
        assert_eq!(*log.borrow(), [("b", false), ("a", false)]);
        assert_eq!(controller.state(), ControllerState::Updating);

        controller.settle();
        assert_eq!(*log.borrow(), [("b", false), ("a", false), ("c", true)]);
        assert_eq!(controller.state(), ControllerState::Settled);
        assert_eq!(controller.sections()[0].cells()[0].id().as_str(), "c");
    }

    #[test]
    fn reorder_applies_move_and_notifies() {
        let mut controller = controller();
        let cells: Vec<_> = ["c0", "c1", "c2", "c3", "c4"]
            .iter()
            .map(|&id| cell(id).with_flags(CellFlags::REORDERABLE))
            .collect();
        controller.update(vec![Section::new("s").with_cells(cells)], false);
        let _ = controller.take_events();

        assert!(controller.reorder(0, 2, 0));
        assert_eq!(cell_order(&controller, 0), ["c2", "c0", "c1", "c3", "c4"]);
        assert_eq!(
            controller.take_events(),
            [ListEvent::Moved {
                section: 0,
                from: 2,
                to: 0
            }]
        );
    }

    #[test]
    fn reorder_of_non_reorderable_cell_is_silently_rejected() {
        let mut controller = controller();
        controller.update(vec![section("s", &["a", "b", "c"])], false);
        let _ = controller.take_events();

        assert!(!controller.reorder(0, 2, 0));
        assert_eq!(cell_order(&controller, 0), ["a", "b", "c"]);
        assert!(controller.take_events().is_empty());
    }

    #[test]
    fn selection_and_highlight_respect_capabilities() {
        let mut controller = controller();
        let cells = vec![
            cell("plain"),
            cell("hot").with_flags(CellFlags::SELECTABLE | CellFlags::HIGHLIGHTABLE),
        ];
        controller.update(vec![Section::new("s").with_cells(cells)], false);
        let _ = controller.take_events();

        controller.select(IndexPath::new(0, 0));
        controller.set_highlighted(IndexPath::new(0, 0), true);
        assert!(controller.take_events().is_empty());

        controller.select(IndexPath::new(0, 1));
        controller.set_highlighted(IndexPath::new(0, 1), true);
        let events = controller.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ListEvent::Selected { ref cell, .. } if cell.as_str() == "hot"));
        assert!(matches!(
            events[1],
            ListEvent::Highlighted { active: true, .. }
        ));
    }

    #[test]
    fn viewport_realizes_only_intersecting_items() {
        let mut controller = controller();
        let ids: Vec<&'static str> = vec!["r0", "r1", "r2", "r3", "r4", "r5"];
        controller.update(vec![section("s", &ids)], false);
        controller.set_viewport(0.0, 100.0);
        let _ = controller.take_events();

        // Rows are 50 tall: offset 0..100 shows rows 0 and 1.
        let realized: Vec<_> = controller.realized().iter().map(|&(p, _)| p).collect();
        assert_eq!(
            realized,
            [
                ItemPath::Cell(IndexPath::new(0, 0)),
                ItemPath::Cell(IndexPath::new(0, 1))
            ]
        );

        controller.set_viewport(100.0, 100.0);
        let events = controller.take_events();
        assert!(events.contains(&ListEvent::DidEndDisplaying {
            path: ItemPath::Cell(IndexPath::new(0, 0))
        }));
        assert!(events.contains(&ListEvent::WillDisplay {
            path: ItemPath::Cell(IndexPath::new(0, 3))
        }));
        let realized: Vec<_> = controller.realized().iter().map(|&(p, _)| p).collect();
        assert_eq!(
            realized,
            [
                ItemPath::Cell(IndexPath::new(0, 2)),
                ItemPath::Cell(IndexPath::new(0, 3))
            ]
        );
    }

    #[test]
    fn overscan_extends_the_realized_range() {
        let options = ListOptions::default().with_overscan(0.0, 50.0);
        let mut controller = ListController::with_options(registry(), options);
        controller.set_container(Size::new(300.0, 600.0));
        controller.update(vec![section("s", &["r0", "r1", "r2", "r3"])], false);
        controller.set_viewport(0.0, 100.0);

        // Overscan-after pulls in row 2.
        assert_eq!(controller.realized().len(), 3);
    }

    #[test]
    fn update_rebinds_changed_cells_on_recycled_views() {
        let bound: Rc<RefCell<Vec<Content>>> = Rc::new(RefCell::new(Vec::new()));

        struct RecordingView(Rc<RefCell<Vec<Content>>>);
        impl ItemView<Content> for RecordingView {
            fn bind(&mut self, cell: &CellModel<Content>) {
                self.0.borrow_mut().push(*cell.content());
            }

            fn unbind(&mut self) {}

            fn measure(&mut self, proposal: Size, _axis: trellis_model::Axis) -> Size {
                Size::new(proposal.width, 40.0)
            }
        }

        let created = Rc::new(Cell::new(0));
        let mut registry: ViewRegistry<Content> = ViewRegistry::new();
        let log = bound.clone();
        let counter = created.clone();
        registry.register(RendererType::of::<RecordingView>(), move || {
            counter.set(counter.get() + 1);
            Box::new(RecordingView(log.clone()))
        });

        let make = |text: Content| {
            CellModel::new("a", RendererType::of::<RecordingView>(), text)
                .with_strategy(SizeStrategy::Explicit(Size::new(300.0, 50.0)))
        };

        let mut controller: ListController<Content> = ListController::new(registry);
        controller.set_container(Size::new(300.0, 600.0));
        controller.update(
            vec![Section::new("s").with_cells(vec![make("hello")])],
            false,
        );
        controller.update(
            vec![Section::new("s").with_cells(vec![make("goodbye")])],
            false,
        );

        assert_eq!(*bound.borrow(), ["hello", "goodbye"]);
        assert_eq!(created.get(), 1, "rebind must reuse the live view");
    }

    #[test]
    fn supplementary_views_are_keyed_to_their_section() {
        let mut controller = controller();
        let constraints = SectionConstraints {
            sticky_header: true,
            ..SectionConstraints::default()
        };
        let with_header = |text: Content| {
            section("s", &["a", "b"])
                .with_header(
                    CellModel::new("hdr", renderer(), text)
                        .with_strategy(SizeStrategy::Explicit(Size::new(300.0, 20.0))),
                )
                .with_constraints(constraints)
        };
        controller.update(vec![with_header("title")], false);
        let _ = controller.take_events();

        let realized: Vec<_> = controller.realized().iter().map(|&(p, _)| p).collect();
        assert!(realized.contains(&ItemPath::Header(0)));
        assert_eq!(
            controller.frame_of(ItemPath::Header(0)),
            Some(Rect::new(0.0, 0.0, 300.0, 20.0))
        );
        assert_eq!(
            controller.layout().pinned_header_main_origin(0, 40.0),
            Some(40.0)
        );

        // A header change is a section-level update, never an item op.
        controller.update(vec![with_header("retitled")], false);
        let transaction = controller.last_transaction().unwrap();
        assert_eq!(
            transaction.section_ops,
            [DiffOp::Update {
                old_index: 0,
                new_index: 0
            }]
        );
        assert!(transaction.item_ops.is_empty());
    }

    #[test]
    fn set_container_reflows_explicit_cross_axis() {
        let mut controller = controller();
        controller.update(vec![section("s", &["a"])], false);
        assert_eq!(
            controller.frame_of(ItemPath::Cell(IndexPath::new(0, 0))),
            Some(Rect::new(0.0, 0.0, 300.0, 50.0))
        );

        controller.set_container(Size::new(400.0, 600.0));
        assert_eq!(
            controller.frame_of(ItemPath::Cell(IndexPath::new(0, 0))),
            Some(Rect::new(0.0, 0.0, 400.0, 50.0))
        );
    }

    #[test]
    fn display_lifecycle_is_edge_triggered() {
        let mut controller = controller();
        controller.set_displaying(true);
        controller.set_displaying(true);
        controller.set_displaying(false);
        assert_eq!(
            controller.take_events(),
            [ListEvent::WillDisplayList, ListEvent::DidEndDisplayingList]
        );
    }
}
