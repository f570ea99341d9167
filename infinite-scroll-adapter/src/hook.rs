use std::rc::Rc;

use infinite_scroll::{
    Directions, InfiniteScroll, LoadCallback, LoadSettled, ScrollNode, ScrollOptions,
    SurfaceHandle,
};

/// Inputs whose change re-runs the controller's update on render.
struct Deps<E> {
    row_count: Option<usize>,
    column_count: Option<usize>,
    has_more: Directions,
    next: LoadCallback<E>,
}

impl<E> Deps<E> {
    fn of(options: &ScrollOptions<E>) -> Self {
        Self {
            row_count: options.row_count,
            column_count: options.column_count,
            has_more: options.has_more,
            next: Rc::clone(&options.next),
        }
    }

    fn same_as(&self, other: &Self) -> bool {
        self.row_count == other.row_count
            && self.column_count == other.column_count
            && self.has_more == other.has_more
            && Rc::ptr_eq(&self.next, &other.next)
    }
}

/// Binds an [`InfiniteScroll`] controller to a component lifecycle.
///
/// This type does not hold any UI objects. Component frameworks drive it by calling:
/// - `mount` once the component is in the tree
/// - `set_ref` whenever the scroll container reference changes
/// - `render` with freshly built options on every render
/// - `tick(now_ms)` each frame/timer tick
/// - `unmount` when the component leaves the tree
///
/// `render` forwards options only when the dataset extents, the `has_more` edges or the loader
/// identity changed. Keep the loader in a stable `Rc` (see [`ScrollOptions::from_callback`]) so
/// unrelated re-renders do not reach the controller.
pub struct InfiniteScrollHook<E> {
    controller: InfiniteScroll<E>,
    deps: Option<Deps<E>>,
    mounted: bool,
}

impl<E> InfiniteScrollHook<E> {
    pub fn new(options: ScrollOptions<E>) -> Self {
        Self {
            controller: InfiniteScroll::new(options),
            deps: None,
            mounted: false,
        }
    }

    /// Registers the page-level surface used when `window_scroll` is set.
    pub fn with_window(mut self, window: ScrollNode) -> Self {
        self.controller.set_window(Some(window));
        self
    }

    pub fn controller(&self) -> &InfiniteScroll<E> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut InfiniteScroll<E> {
        &mut self.controller
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// With `window_scroll` set, binds the window surface immediately: no container ref will
    /// arrive for it.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.controller.options().window_scroll {
            self.controller.attach(None);
        }
    }

    pub fn set_ref(&mut self, handle: Option<SurfaceHandle>) {
        self.controller.attach(handle);
    }

    /// Returns `true` when the options were forwarded to the controller.
    pub fn render(&mut self, options: ScrollOptions<E>) -> bool {
        let deps = Deps::of(&options);
        if self.deps.as_ref().is_some_and(|prev| prev.same_as(&deps)) {
            return false;
        }
        self.deps = Some(deps);
        self.controller.update(options);
        true
    }

    pub fn tick(&mut self, now_ms: u64) -> Option<LoadSettled<E>> {
        self.controller.tick(now_ms)
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.controller.teardown();
    }
}

impl<E> core::fmt::Debug for InfiniteScrollHook<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InfiniteScrollHook")
            .field("controller", &self.controller)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}
