use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use infinite_scroll::{EventTarget, ScrollElement, ScrollNode, VirtualizedContainer};

/// A widget wrapper that owns its scrolling node internally.
///
/// Virtualized lists, grids and tables render their own scroll container and only expose it once
/// mounted. Attach the wrapper with `SurfaceHandle::virtualized`; until `mount` is called the
/// controller reports a detached container and stays inert.
#[derive(Default)]
pub struct VirtualizedHost {
    node: RefCell<Option<ScrollNode>>,
}

impl VirtualizedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mount<T: ScrollElement + EventTarget + 'static>(&self, node: Rc<T>) {
        *self.node.borrow_mut() = Some(ScrollNode::new(node));
    }

    pub fn unmount(&self) {
        self.node.borrow_mut().take();
    }

    pub fn is_mounted(&self) -> bool {
        self.node.borrow().is_some()
    }
}

impl VirtualizedContainer for VirtualizedHost {
    fn scrolling_container(&self) -> Option<ScrollNode> {
        self.node.borrow().clone()
    }
}

impl fmt::Debug for VirtualizedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualizedHost")
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
