//! A headless infinite scroll controller.
//!
//! For host-side helpers (an in-memory surface, a mount/render/unmount hook), see the
//! `infinite-scroll-adapter` crate.
//!
//! The controller watches a scrollable surface and calls a loader when the scroll position
//! nears any of its four edges. It guarantees a single load in flight at a time, debounces a
//! stationary position with per-direction hysteresis, and shifts the scroll offset after content
//! is inserted before the viewport so the visible rows stay put.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a surface exposing scroll geometry and scroll events ([`ScrollElement`], [`EventTarget`])
//! - a loader returning a future ([`ScrollOptions::new`])
//! - a clock, by calling [`InfiniteScroll::tick`]
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod direction;
mod dispatcher;
mod error;
mod infinite_scroll;
mod options;
mod reconcile;
mod state;
mod surface;
mod threshold;
mod types;


pub use direction::{hysteresis_band, near_edges};
pub use dispatcher::select_direction;
pub use error::{Diagnostic, SurfaceError, ThresholdParseError};
pub use infinite_scroll::InfiniteScroll;
pub use options::{
    LoadCallback, LoadFuture, OnDiagnosticCallback, OnScrollCallback, ScrollOptions,
};
pub use reconcile::anchored_offset;
pub use surface::{
    EventKind, EventTarget, Listener, ListenerId, ScrollElement, ScrollNode, Surface,
    SurfaceHandle, VirtualizedContainer, resolve_surface,
};
pub use threshold::{ScrollThreshold, ThresholdCalculator, compute_thresholds, valid_scroll_value};
pub use types::{
    Axis, AxisThresholds, Direction, Directions, InitialScroll, LoadPhase, LoadSettled, Reverse,
    ScrollGeometry,
};
