use core::fmt;
use std::rc::{Rc, Weak};
use std::sync::mpsc::Sender;

use crate::threshold::valid_scroll_value;
use crate::{ScrollGeometry, SurfaceError};

/// Events a surface delivers to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    /// Pointer released (e.g. after dragging a scrollbar).
    PointerUp,
}

/// Identifies a registered listener so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A listener handed to an [`EventTarget`].
///
/// Calling [`Listener::notify`] samples the surface geometry at that moment and queues it for the
/// controller, which processes it on its next tick. Listeners of a detached surface become inert.
#[derive(Clone)]
pub struct Listener {
    kind: EventKind,
    element: Weak<dyn ScrollElement>,
    tx: Sender<ScrollGeometry>,
}

impl Listener {
    pub(crate) fn new(
        kind: EventKind,
        element: &Rc<dyn ScrollElement>,
        tx: Sender<ScrollGeometry>,
    ) -> Self {
        Self {
            kind,
            element: Rc::downgrade(element),
            tx,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Queues a geometry sample. Returns `false` if the controller no longer listens.
    pub fn notify(&self) -> bool {
        let Some(element) = self.element.upgrade() else {
            return false;
        };
        self.tx.send(element.geometry()).is_ok()
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A source of scroll geometry whose offsets can be written.
///
/// Setters take `&self`: scroll containers are shared with the UI layer, so implementors use
/// interior mutability.
pub trait ScrollElement {
    fn geometry(&self) -> ScrollGeometry;
    fn set_scroll_top(&self, value: f64);
    fn set_scroll_left(&self, value: f64);
}

/// Something listeners can subscribe to.
pub trait EventTarget {
    fn add_listener(&self, listener: Listener) -> ListenerId;
    fn remove_listener(&self, id: ListenerId);

    fn supports(&self, kind: EventKind) -> bool {
        let _ = kind;
        true
    }
}

/// A geometry source paired with the event source that reports its scrolling.
///
/// For a plain container both are the same object. For window scrolling they differ: geometry
/// comes from the document's scrolling element while events come from the document.
#[derive(Clone)]
pub struct ScrollNode {
    element: Rc<dyn ScrollElement>,
    events: Rc<dyn EventTarget>,
}

impl ScrollNode {
    pub fn new<T: ScrollElement + EventTarget + 'static>(node: Rc<T>) -> Self {
        Self {
            element: node.clone(),
            events: node,
        }
    }

    pub fn split(element: Rc<dyn ScrollElement>, events: Rc<dyn EventTarget>) -> Self {
        Self { element, events }
    }

    pub fn element(&self) -> &Rc<dyn ScrollElement> {
        &self.element
    }

    pub fn events(&self) -> &Rc<dyn EventTarget> {
        &self.events
    }
}

impl fmt::Debug for ScrollNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollNode")
            .field("geometry", &self.element.geometry())
            .finish_non_exhaustive()
    }
}

/// A widget that keeps its scrolling node internally (virtualized lists, grids, tables).
pub trait VirtualizedContainer {
    /// The inner scrolling node, or `None` while the widget has not mounted it.
    fn scrolling_container(&self) -> Option<ScrollNode>;
}

/// What a host passes to [`crate::InfiniteScroll::attach`].
#[derive(Clone)]
pub enum SurfaceHandle {
    Element(ScrollNode),
    Virtualized(Rc<dyn VirtualizedContainer>),
    /// The host-registered window surface.
    Window,
}

impl SurfaceHandle {
    pub fn element<T: ScrollElement + EventTarget + 'static>(node: Rc<T>) -> Self {
        Self::Element(ScrollNode::new(node))
    }

    pub fn virtualized<T: VirtualizedContainer + 'static>(container: Rc<T>) -> Self {
        Self::Virtualized(container)
    }
}

impl fmt::Debug for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element(node) => f.debug_tuple("Element").field(node).finish(),
            Self::Virtualized(_) => f.write_str("Virtualized(..)"),
            Self::Window => f.write_str("Window"),
        }
    }
}

/// A validated scrolling surface.
#[derive(Clone, Debug)]
pub struct Surface {
    node: ScrollNode,
}

impl Surface {
    pub fn node(&self) -> &ScrollNode {
        &self.node
    }

    pub fn sample(&self) -> ScrollGeometry {
        self.node.element.geometry()
    }

    /// Writes scroll offsets, clamping each to the current scroll size of its axis.
    pub fn scroll_to(&self, top: Option<f64>, left: Option<f64>) {
        let geometry = self.sample();
        if let Some(top) = top {
            self.node
                .element
                .set_scroll_top(valid_scroll_value(top, geometry.scroll_height, None));
        }
        if let Some(left) = left {
            self.node
                .element
                .set_scroll_left(valid_scroll_value(left, geometry.scroll_width, None));
        }
    }
}

/// Normalizes a handle into a [`Surface`].
///
/// The handle's shape is inspected once here; no listeners are attached.
pub fn resolve_surface(
    handle: SurfaceHandle,
    window: Option<&ScrollNode>,
) -> Result<Surface, SurfaceError> {
    let node = match handle {
        SurfaceHandle::Element(node) => node,
        SurfaceHandle::Virtualized(container) => container
            .scrolling_container()
            .ok_or(SurfaceError::DetachedContainer)?,
        SurfaceHandle::Window => window.cloned().ok_or(SurfaceError::NoWindow)?,
    };
    validate_geometry(&node.element.geometry())?;
    if !node.events.supports(EventKind::Scroll) {
        return Err(SurfaceError::NoScrollEvents);
    }
    Ok(Surface { node })
}

fn validate_geometry(geometry: &ScrollGeometry) -> Result<(), SurfaceError> {
    let sizes = [
        ("scroll_height", geometry.scroll_height),
        ("scroll_width", geometry.scroll_width),
        ("client_height", geometry.client_height),
        ("client_width", geometry.client_width),
    ];
    for (field, value) in sizes {
        if !value.is_finite() || value < 0.0 {
            return Err(SurfaceError::InvalidGeometry { field, value });
        }
    }
    let offsets = [
        ("scroll_top", geometry.scroll_top),
        ("scroll_left", geometry.scroll_left),
    ];
    for (field, value) in offsets {
        if !value.is_finite() {
            return Err(SurfaceError::InvalidGeometry { field, value });
        }
    }
    Ok(())
}
