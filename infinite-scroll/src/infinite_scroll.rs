use std::sync::mpsc::{self, Receiver};

use crate::dispatcher::{dispatch, poll_load, settle_due};
use crate::reconcile::reconcile;
use crate::state::ControllerState;
use crate::surface::{Listener, resolve_surface};
use crate::{
    Axis, AxisThresholds, Diagnostic, Directions, EventKind, LoadPhase, LoadSettled,
    ScrollGeometry, ScrollNode, ScrollOptions, Surface, SurfaceHandle,
};

type Cleanup = Box<dyn FnOnce()>;

/// A headless controller that requests more data as a scrollable surface nears its edges.
///
/// This type holds no UI objects beyond the attached surface handles. Hosts drive it by calling:
/// - `attach` when the scroll container mounts, changes or unmounts
/// - `update` whenever the options change (new `has_more`, new dataset extents)
/// - `tick(now_ms)` on every frame or timer tick, which drains surface events, polls the loader
///   and advances the post-load settle step
/// - `teardown` on unmount (also run on drop)
///
/// At most one loader is in flight at any time, across both axes.
pub struct InfiniteScroll<E> {
    options: ScrollOptions<E>,
    state: ControllerState<E>,
    surface: Option<Surface>,
    window: Option<ScrollNode>,
    events: Option<Receiver<ScrollGeometry>>,
    cleanup: Vec<Cleanup>,
    initial_scroll_applied: bool,
}

impl<E> InfiniteScroll<E> {
    pub fn new(options: ScrollOptions<E>) -> Self {
        idebug!(has_more = ?options.has_more, "InfiniteScroll::new");
        Self {
            options,
            state: ControllerState::new(),
            surface: None,
            window: None,
            events: None,
            cleanup: Vec::new(),
            initial_scroll_applied: false,
        }
    }

    /// Registers the surface used when `window_scroll` is set.
    pub fn with_window(mut self, window: ScrollNode) -> Self {
        self.window = Some(window);
        self
    }

    pub fn set_window(&mut self, window: Option<ScrollNode>) {
        self.window = window;
    }

    pub fn options(&self) -> &ScrollOptions<E> {
        &self.options
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn phase(&self) -> LoadPhase {
        self.state.phase.view()
    }

    /// `true` from the moment a direction is granted until its reconciliation ran.
    pub fn is_loading(&self) -> bool {
        !self.state.phase.is_idle()
    }

    /// Directions that fired and have not left their hysteresis band since.
    pub fn threshold_reached(&self) -> Directions {
        self.state.threshold_reached
    }

    pub fn thresholds(&self) -> AxisThresholds {
        self.state.thresholds.thresholds()
    }

    /// The last dataset extent confirmed by a settled load (or seeded on attach).
    pub fn confirmed_extent(&self, axis: Axis) -> Option<usize> {
        self.state.extent(axis)
    }

    /// Attaches a surface, or detaches the current one when `handle` is `None`.
    ///
    /// With `window_scroll` set, the registered window surface is used regardless of `handle`.
    /// Invalid handles are reported through `on_diagnostic` and leave the controller inert.
    pub fn attach(&mut self, handle: Option<SurfaceHandle>) {
        let handle = if self.options.window_scroll {
            Some(SurfaceHandle::Window)
        } else {
            handle
        };

        self.detach();
        let Some(handle) = handle else {
            return;
        };

        let surface = match resolve_surface(handle, self.window.as_ref()) {
            Ok(surface) => surface,
            Err(err) => {
                self.report(Diagnostic::InvalidSurface(err));
                return;
            }
        };

        let geometry = surface.sample();
        self.state
            .seed(&geometry, self.options.row_count, self.options.column_count);

        let initial = self.options.initial_scroll;
        if !self.initial_scroll_applied {
            self.initial_scroll_applied = true;
            if !initial.is_empty() {
                surface.scroll_to(initial.top, initial.left);
            }
        }

        let (tx, rx) = mpsc::channel();
        let element = surface.node().element();
        let events = surface.node().events().clone();
        let ids: Vec<_> = [EventKind::Scroll, EventKind::PointerUp]
            .into_iter()
            .filter(|kind| events.supports(*kind))
            .map(|kind| events.add_listener(Listener::new(kind, element, tx.clone())))
            .collect();
        self.cleanup.push(Box::new(move || {
            for id in ids {
                events.remove_listener(id);
            }
        }));
        self.events = Some(rx);

        idebug!(?geometry, "surface attached");
        self.surface = Some(surface);
        self.dispatch_pass();
    }

    /// Replaces the options and runs a dispatch pass.
    ///
    /// The pass always re-arms latches whose direction left its hysteresis band; a new load starts
    /// only when none is in flight.
    pub fn update(&mut self, options: ScrollOptions<E>) {
        if options.scroll_threshold != self.options.scroll_threshold {
            self.state.thresholds.invalidate();
        }
        self.options = options;
        itrace!(options = ?self.options, "InfiniteScroll::update");

        if self.surface.is_none() {
            return;
        }

        for axis in Axis::ALL {
            let extent = match axis {
                Axis::Vertical => self.options.row_count,
                Axis::Horizontal => self.options.column_count,
            };
            if extent.is_none() && self.options.has_more.intersects(axis.directions()) {
                self.report(Diagnostic::missing_extent(axis));
            }
        }

        self.dispatch_pass();
    }

    /// Processes one surface event immediately, as if a listener had fired with `geometry`.
    ///
    /// `geometry` is what `on_scroll` observes; the dispatch pass samples the surface afresh.
    pub fn handle_event(&mut self, geometry: ScrollGeometry) {
        if self.surface.is_none() {
            return;
        }
        itrace!(?geometry, "surface event");
        if let Some(on_scroll) = &self.options.on_scroll {
            on_scroll(&geometry);
        }
        self.dispatch_pass();
    }

    /// Advances the controller.
    ///
    /// Drains queued surface events, polls the in-flight loader and, once the settle delay
    /// elapsed, reconciles the loaded axis and runs another dispatch pass.
    ///
    /// Returns the loader's result on the tick where it settled. Errors are handed back as-is;
    /// the controller has already released its lock and will not retry.
    pub fn tick(&mut self, now_ms: u64) -> Option<LoadSettled<E>> {
        let queued: Vec<ScrollGeometry> = self
            .events
            .as_ref()
            .map(|rx| rx.try_iter().collect())
            .unwrap_or_default();
        for geometry in queued {
            self.handle_event(geometry);
        }

        let settled = poll_load(&mut self.state);

        if let Some(direction) = settle_due(&mut self.state, now_ms, self.options.settle_delay_ms) {
            reconcile(
                &mut self.state,
                &self.options,
                self.surface.as_ref(),
                direction,
            );
            self.dispatch_pass();
        }

        settled
    }

    /// Detaches the surface and runs every pending cleanup action exactly once.
    ///
    /// An in-flight load is not cancelled; it settles on a later tick and only releases the lock.
    pub fn teardown(&mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let had_surface = self.surface.take().is_some();
        self.events = None;
        for cleanup in core::mem::take(&mut self.cleanup) {
            cleanup();
        }
        if had_surface {
            self.state.reset_surface();
            idebug!("surface detached");
        }
    }

    fn dispatch_pass(&mut self) {
        if let Some(surface) = &self.surface {
            dispatch(&mut self.state, &self.options, surface);
        }
    }

    fn report(&self, diagnostic: Diagnostic) {
        if let Diagnostic::InvalidSurface(_) = &diagnostic {
            ierror!(%diagnostic, "invalid scrolling surface");
        } else {
            iwarn!(%diagnostic, "incomplete options");
        }
        if let Some(on_diagnostic) = &self.options.on_diagnostic {
            on_diagnostic(&diagnostic);
        }
    }
}

impl<E> Drop for InfiniteScroll<E> {
    fn drop(&mut self) {
        for cleanup in core::mem::take(&mut self.cleanup) {
            cleanup();
        }
    }
}

impl<E> core::fmt::Debug for InfiniteScroll<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InfiniteScroll")
            .field("options", &self.options)
            .field("phase", &self.state.phase)
            .field("threshold_reached", &self.state.threshold_reached)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}
