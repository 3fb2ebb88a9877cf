// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binding cell models to pooled views, one live view per identity.

use alloc::boxed::Box;
use core::fmt;

use hashbrown::HashSet;
use kurbo::Size;

use trellis_model::{Axis, CellId, CellModel, RendererType, SectionId};

use crate::pool::ReusePool;
use crate::registry::ViewRegistry;
use crate::view::ItemView;

/// Which renderable slot of a section a binding occupies.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// An ordinary cell, keyed by its id.
    Cell(CellId),
    /// The section header.
    Header,
    /// The section footer.
    Footer,
}

/// Identity of one binding: the owning section plus the slot within it.
///
/// Supplementary views are keyed to their owning section rather than to a
/// cell id, matching how they are diffed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingKey {
    /// Owning section.
    pub section: SectionId,
    /// Slot within the section.
    pub slot: Slot,
}

impl BindingKey {
    /// Key for an ordinary cell.
    #[must_use]
    pub const fn cell(section: SectionId, cell: CellId) -> Self {
        Self {
            section,
            slot: Slot::Cell(cell),
        }
    }

    /// Key for a section header.
    #[must_use]
    pub const fn header(section: SectionId) -> Self {
        Self {
            section,
            slot: Slot::Header,
        }
    }

    /// Key for a section footer.
    #[must_use]
    pub const fn footer(section: SectionId) -> Self {
        Self {
            section,
            slot: Slot::Footer,
        }
    }
}

/// A live view currently bound to a cell model.
///
/// Returned by [`Binder::bind`]; the caller owns it until handing it back to
/// [`Binder::unbind`] (recycle) or [`Binder::rebind`] (new model, same
/// binding).
pub struct BoundView<C: 'static> {
    renderer: RendererType,
    view: Box<dyn ItemView<C>>,
}

impl<C> BoundView<C> {
    /// Renderer type of the underlying view.
    #[must_use]
    pub const fn renderer(&self) -> RendererType {
        self.renderer
    }

    /// Returns the underlying view.
    pub fn view_mut(&mut self) -> &mut dyn ItemView<C> {
        self.view.as_mut()
    }
}

impl<C> fmt::Debug for BoundView<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundView")
            .field("renderer", &self.renderer)
            .finish_non_exhaustive()
    }
}

/// Hook run exactly once per bind, before the view becomes visible.
pub type PrepareHook<C> = Box<dyn FnMut(&CellModel<C>, &mut dyn ItemView<C>)>;

/// Binds cell models to pooled or freshly created views.
///
/// The binder enforces the engine's exclusivity invariant: at most one live
/// view is bound to a given [`BindingKey`] at any instant. Binding always
/// unbinds first — a recycled view's previous model is cleared (its cleanup
/// hook runs) before the next model is presented.
///
/// Scratch measurement ([`Binder::measure_scratch`]) shares the pool so
/// self-measuring never allocates per query, but scratch views are not live:
/// they skip the prepare hook and leave no binding behind.
pub struct Binder<C: 'static> {
    registry: ViewRegistry<C>,
    pool: ReusePool<C>,
    prepare: Option<PrepareHook<C>>,
    bound: HashSet<BindingKey>,
}

impl<C> Binder<C> {
    /// Creates a binder over `registry` with a default pool.
    #[must_use]
    pub fn new(registry: ViewRegistry<C>) -> Self {
        Self::with_pool(registry, ReusePool::new())
    }

    /// Creates a binder with an explicitly configured pool.
    #[must_use]
    pub fn with_pool(registry: ViewRegistry<C>, pool: ReusePool<C>) -> Self {
        Self {
            registry,
            pool,
            prepare: None,
            bound: HashSet::new(),
        }
    }

    /// Installs the pre-bind hook, run once per bind before the view shows.
    pub fn set_prepare_hook<F>(&mut self, hook: F)
    where
        F: FnMut(&CellModel<C>, &mut dyn ItemView<C>) + 'static,
    {
        self.prepare = Some(Box::new(hook));
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &ViewRegistry<C> {
        &self.registry
    }

    /// Returns the registry for further registration.
    pub fn registry_mut(&mut self) -> &mut ViewRegistry<C> {
        &mut self.registry
    }

    /// Returns the pool.
    #[must_use]
    pub fn pool(&self) -> &ReusePool<C> {
        &self.pool
    }

    /// Returns `true` if `key` currently has a live bound view.
    #[must_use]
    pub fn is_bound(&self, key: &BindingKey) -> bool {
        self.bound.contains(key)
    }

    /// Number of live bindings.
    #[must_use]
    pub fn bound_len(&self) -> usize {
        self.bound.len()
    }

    /// Dequeues or creates a view and binds `cell` to it under `key`.
    ///
    /// Binding a key that is already bound is a programmer error; the binder
    /// asserts in development builds and proceeds without corrupting its
    /// bookkeeping in production.
    pub fn bind(&mut self, key: BindingKey, cell: &CellModel<C>) -> BoundView<C> {
        if self.bound.contains(&key) {
            twarn!(?key, "binding key already bound; previous view is stale");
            debug_assert!(false, "binding key already bound: {key:?}");
        }
        self.bound.insert(key);

        let renderer = cell.renderer();
        let mut view = self.acquire(renderer);
        if let Some(prepare) = &mut self.prepare {
            prepare(cell, view.as_mut());
        }
        view.bind(cell);
        BoundView { renderer, view }
    }

    /// Rebinds an already-live view to a new model of the same identity.
    ///
    /// The previous model is unbound first. If the new model declares a
    /// different renderer type, the old view is recycled and a fresh one is
    /// acquired, so the returned binding always renders with the right view
    /// type.
    pub fn rebind(&mut self, bound: &mut BoundView<C>, cell: &CellModel<C>) {
        bound.view.unbind();
        let renderer = cell.renderer();
        if bound.renderer != renderer {
            let old = core::mem::replace(&mut bound.view, self.acquire(renderer));
            self.pool.release(bound.renderer, old);
            bound.renderer = renderer;
        }
        if let Some(prepare) = &mut self.prepare {
            prepare(cell, bound.view.as_mut());
        }
        bound.view.bind(cell);
    }

    /// Unbinds the view and returns it to the pool.
    pub fn unbind(&mut self, key: &BindingKey, mut bound: BoundView<C>) {
        bound.view.unbind();
        self.pool.release(bound.renderer, bound.view);
        self.bound.remove(key);
    }

    /// Self-measures `cell` on a scratch view.
    ///
    /// The scratch view comes from (and returns to) the pool immediately; no
    /// binding is recorded and the prepare hook does not run, because the
    /// view is never made visible.
    pub fn measure_scratch(&mut self, cell: &CellModel<C>, proposal: Size, axis: Axis) -> Size {
        let renderer = cell.renderer();
        let mut view = self.acquire(renderer);
        view.bind(cell);
        let size = view.measure(proposal, axis);
        view.unbind();
        self.pool.release(renderer, view);
        size
    }

    fn acquire(&mut self, renderer: RendererType) -> Box<dyn ItemView<C>> {
        match self.pool.dequeue(renderer) {
            Some(view) => view,
            None => self.registry.create_or_fallback(renderer),
        }
    }
}

impl<C> fmt::Debug for Binder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("registry", &self.registry)
            .field("pool", &self.pool)
            .field("bound", &self.bound.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use core::cell::Cell;

    use kurbo::Size;

    use super::{Binder, BindingKey};
    use crate::registry::ViewRegistry;
    use crate::view::ItemView;
    use trellis_model::{Axis, CellModel, RendererType, SectionId};

    struct CountingView;

    impl ItemView<u32> for CountingView {
        fn bind(&mut self, _cell: &CellModel<u32>) {}

        fn unbind(&mut self) {}

        fn measure(&mut self, proposal: Size, _axis: Axis) -> Size {
            Size::new(proposal.width, 40.0)
        }
    }

    fn binder(created: &Rc<Cell<usize>>) -> Binder<u32> {
        let mut registry = ViewRegistry::new();
        let counter = created.clone();
        registry.register(RendererType::of::<CountingView>(), move || {
            counter.set(counter.get() + 1);
            Box::new(CountingView)
        });
        Binder::new(registry)
    }

    fn cell(id: &str) -> CellModel<u32> {
        CellModel::new(id, RendererType::of::<CountingView>(), 0)
    }

    fn key(id: &str) -> BindingKey {
        BindingKey::cell(SectionId::new("s"), cell(id).id().clone())
    }

    #[test]
    fn bind_tracks_exclusive_ownership() {
        let created = Rc::new(Cell::new(0));
        let mut binder = binder(&created);

        let bound = binder.bind(key("a"), &cell("a"));
        assert!(binder.is_bound(&key("a")));
        assert_eq!(binder.bound_len(), 1);

        binder.unbind(&key("a"), bound);
        assert!(!binder.is_bound(&key("a")));
        assert_eq!(binder.bound_len(), 0);
    }

    #[test]
    fn recycled_views_are_not_reallocated() {
        let created = Rc::new(Cell::new(0));
        let mut binder = binder(&created);

        let bound = binder.bind(key("a"), &cell("a"));
        binder.unbind(&key("a"), bound);
        let bound = binder.bind(key("b"), &cell("b"));
        binder.unbind(&key("b"), bound);

        assert_eq!(created.get(), 1, "second bind should reuse the pooled view");
    }

    #[test]
    fn prepare_hook_runs_once_per_bind() {
        let created = Rc::new(Cell::new(0));
        let mut binder = binder(&created);
        let prepares = Rc::new(Cell::new(0));
        let counter = prepares.clone();
        binder.set_prepare_hook(move |_cell, _view| counter.set(counter.get() + 1));

        let mut bound = binder.bind(key("a"), &cell("a"));
        assert_eq!(prepares.get(), 1);
        binder.rebind(&mut bound, &cell("a"));
        assert_eq!(prepares.get(), 2);
        binder.unbind(&key("a"), bound);
        assert_eq!(prepares.get(), 2);
    }

    #[test]
    fn measure_scratch_leaves_no_binding_behind() {
        let created = Rc::new(Cell::new(0));
        let mut binder = binder(&created);

        let size = binder.measure_scratch(&cell("a"), Size::new(300.0, 600.0), Axis::Vertical);
        assert_eq!(size, Size::new(300.0, 40.0));
        assert_eq!(binder.bound_len(), 0);
        assert_eq!(
            binder.pool().idle_count(RendererType::of::<CountingView>()),
            1
        );

        // A second measurement reuses the scratch view.
        let _ = binder.measure_scratch(&cell("b"), Size::new(300.0, 600.0), Axis::Vertical);
        assert_eq!(created.get(), 1);
    }
}
