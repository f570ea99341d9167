use core::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::{
    Diagnostic, Direction, Directions, InitialScroll, Reverse, ScrollGeometry, ScrollThreshold,
};

/// The future returned by a loader.
pub type LoadFuture<E> = LocalBoxFuture<'static, Result<(), E>>;

/// Loads more data past the given edge.
///
/// Called exactly once per granted direction. The returned future must settle once the new data
/// is reflected in the dataset extent passed to the next [`crate::InfiniteScroll::update`].
pub type LoadCallback<E> = Rc<dyn Fn(Direction) -> LoadFuture<E>>;

/// Observes every sampled scroll event.
pub type OnScrollCallback = Rc<dyn Fn(&ScrollGeometry)>;

/// Receives non-fatal diagnostics (invalid surfaces, missing dataset extents).
pub type OnDiagnosticCallback = Rc<dyn Fn(&Diagnostic)>;

/// Configuration for [`crate::InfiniteScroll`].
///
/// Cheap to clone: closures are stored in `Rc`s. The host builds a fresh value whenever one of
/// its inputs changes and passes it to `InfiniteScroll::update`.
pub struct ScrollOptions<E> {
    /// Edges past which more data may exist.
    pub has_more: Directions,
    pub next: LoadCallback<E>,

    /// Current dataset extent on the vertical axis.
    pub row_count: Option<usize>,
    /// Current dataset extent on the horizontal axis.
    pub column_count: Option<usize>,

    pub scroll_threshold: ScrollThreshold,
    pub reverse: Reverse,

    /// Offsets applied once, on the first successful attach.
    pub initial_scroll: InitialScroll,

    /// Bind to the registered window surface instead of a local container.
    pub window_scroll: bool,

    pub on_scroll: Option<OnScrollCallback>,
    pub on_diagnostic: Option<OnDiagnosticCallback>,

    /// Delay between a loader settling and the reconciliation pass, giving the host a chance to
    /// commit the new content before geometry is sampled again.
    pub settle_delay_ms: u64,

    /// Extra distance, in pixels, a position must move past the trigger zone before a direction
    /// that already fired can fire again.
    pub hysteresis_margin: f64,
}

impl<E> Clone for ScrollOptions<E> {
    fn clone(&self) -> Self {
        Self {
            has_more: self.has_more,
            next: Rc::clone(&self.next),
            row_count: self.row_count,
            column_count: self.column_count,
            scroll_threshold: self.scroll_threshold,
            reverse: self.reverse,
            initial_scroll: self.initial_scroll,
            window_scroll: self.window_scroll,
            on_scroll: self.on_scroll.clone(),
            on_diagnostic: self.on_diagnostic.clone(),
            settle_delay_ms: self.settle_delay_ms,
            hysteresis_margin: self.hysteresis_margin,
        }
    }
}

impl<E: 'static> ScrollOptions<E> {
    /// Creates options with the given loader and every edge disabled.
    pub fn new<F, Fut>(next: F) -> Self
    where
        F: Fn(Direction) -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
    {
        Self::from_callback(Rc::new(move |direction: Direction| -> LoadFuture<E> {
            next(direction).boxed_local()
        }))
    }

    pub fn with_next<F, Fut>(mut self, next: F) -> Self
    where
        F: Fn(Direction) -> Fut + 'static,
        Fut: Future<Output = Result<(), E>> + 'static,
    {
        self.next = Rc::new(move |direction: Direction| -> LoadFuture<E> {
            next(direction).boxed_local()
        });
        self
    }
}

impl<E> ScrollOptions<E> {
    /// Creates options from an already boxed loader.
    ///
    /// Reusing the same `Rc` across updates lets hosts detect that the loader did not change.
    pub fn from_callback(next: LoadCallback<E>) -> Self {
        Self {
            has_more: Directions::empty(),
            next,
            row_count: None,
            column_count: None,
            scroll_threshold: ScrollThreshold::default(),
            reverse: Reverse::default(),
            initial_scroll: InitialScroll::default(),
            window_scroll: false,
            on_scroll: None,
            on_diagnostic: None,
            settle_delay_ms: 100,
            hysteresis_margin: 1.0,
        }
    }

    pub fn with_has_more(mut self, has_more: Directions) -> Self {
        self.has_more = has_more;
        self
    }

    pub fn with_row_count(mut self, row_count: Option<usize>) -> Self {
        self.row_count = row_count;
        self
    }

    pub fn with_column_count(mut self, column_count: Option<usize>) -> Self {
        self.column_count = column_count;
        self
    }

    pub fn with_scroll_threshold(mut self, scroll_threshold: impl Into<ScrollThreshold>) -> Self {
        self.scroll_threshold = scroll_threshold.into();
        self
    }

    pub fn with_reverse(mut self, reverse: Reverse) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn with_initial_scroll(mut self, initial_scroll: InitialScroll) -> Self {
        self.initial_scroll = initial_scroll;
        self
    }

    pub fn with_window_scroll(mut self, window_scroll: bool) -> Self {
        self.window_scroll = window_scroll;
        self
    }

    pub fn with_on_scroll(mut self, on_scroll: Option<impl Fn(&ScrollGeometry) + 'static>) -> Self {
        self.on_scroll = on_scroll.map(|f| Rc::new(f) as _);
        self
    }

    pub fn with_on_diagnostic(
        mut self,
        on_diagnostic: Option<impl Fn(&Diagnostic) + 'static>,
    ) -> Self {
        self.on_diagnostic = on_diagnostic.map(|f| Rc::new(f) as _);
        self
    }

    pub fn with_settle_delay_ms(mut self, settle_delay_ms: u64) -> Self {
        self.settle_delay_ms = settle_delay_ms;
        self
    }

    pub fn with_hysteresis_margin(mut self, hysteresis_margin: f64) -> Self {
        self.hysteresis_margin = hysteresis_margin;
        self
    }
}

impl<E> core::fmt::Debug for ScrollOptions<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollOptions")
            .field("has_more", &self.has_more)
            .field("row_count", &self.row_count)
            .field("column_count", &self.column_count)
            .field("scroll_threshold", &self.scroll_threshold)
            .field("reverse", &self.reverse)
            .field("initial_scroll", &self.initial_scroll)
            .field("window_scroll", &self.window_scroll)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("hysteresis_margin", &self.hysteresis_margin)
            .finish_non_exhaustive()
    }
}
