use core::cell::{Cell, RefCell};

use infinite_scroll::{
    Axis, EventKind, EventTarget, Listener, ListenerId, ScrollElement, ScrollGeometry,
};

/// An in-memory scroll container.
///
/// Hosts without a native scroll widget (terminal UIs, headless simulations) keep their layout
/// results here: the content size after rendering, the viewport size and the scroll offsets.
/// Calls that model user input (`scroll_to`, `scroll_by`, `release_pointer`) notify listeners;
/// programmatic writes through [`ScrollElement`] do not.
#[derive(Debug, Default)]
pub struct MemorySurface {
    geometry: Cell<ScrollGeometry>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
}

impl MemorySurface {
    pub fn new(geometry: ScrollGeometry) -> Self {
        Self {
            geometry: Cell::new(geometry),
            ..Self::default()
        }
    }

    /// A surface with the given viewport and content sizes, scrolled to the origin.
    pub fn with_sizes(client_height: f64, client_width: f64, scroll_height: f64, scroll_width: f64) -> Self {
        Self::new(ScrollGeometry {
            client_height,
            client_width,
            scroll_height,
            scroll_width,
            ..ScrollGeometry::default()
        })
    }

    pub fn snapshot(&self) -> ScrollGeometry {
        self.geometry.get()
    }

    pub fn set_viewport(&self, client_height: f64, client_width: f64) {
        self.update(|g| {
            g.client_height = client_height;
            g.client_width = client_width;
        });
    }

    pub fn set_content_size(&self, scroll_height: f64, scroll_width: f64) {
        self.update(|g| {
            g.scroll_height = scroll_height;
            g.scroll_width = scroll_width;
        });
    }

    /// Grows (or shrinks) the content along one axis.
    pub fn grow_content(&self, axis: Axis, delta: f64) {
        self.update(|g| match axis {
            Axis::Vertical => g.scroll_height = (g.scroll_height + delta).max(0.0),
            Axis::Horizontal => g.scroll_width = (g.scroll_width + delta).max(0.0),
        });
    }

    /// Moves the viewport as the user would and fires a scroll event.
    ///
    /// Offsets are stored as given; reversed containers use negative values.
    pub fn scroll_to(&self, top: Option<f64>, left: Option<f64>) {
        self.update(|g| {
            if let Some(top) = top {
                g.scroll_top = top;
            }
            if let Some(left) = left {
                g.scroll_left = left;
            }
        });
        self.emit(EventKind::Scroll);
    }

    pub fn scroll_by(&self, dy: f64, dx: f64) {
        let g = self.snapshot();
        self.scroll_to(Some(g.scroll_top + dy), Some(g.scroll_left + dx));
    }

    /// Fires a pointer-up event (end of a scrollbar drag).
    pub fn release_pointer(&self) {
        self.emit(EventKind::PointerUp);
    }

    /// Notifies listeners of `kind`, dropping those whose controller is gone.
    pub fn emit(&self, kind: EventKind) {
        self.listeners
            .borrow_mut()
            .retain(|(_, listener)| listener.kind() != kind || listener.notify());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn update(&self, f: impl FnOnce(&mut ScrollGeometry)) {
        let mut g = self.geometry.get();
        f(&mut g);
        self.geometry.set(g);
    }
}

impl ScrollElement for MemorySurface {
    fn geometry(&self) -> ScrollGeometry {
        self.geometry.get()
    }

    fn set_scroll_top(&self, value: f64) {
        self.update(|g| g.scroll_top = value);
    }

    fn set_scroll_left(&self, value: f64) {
        self.update(|g| g.scroll_left = value);
    }
}

impl EventTarget for MemorySurface {
    fn add_listener(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }
}
