use core::fmt;

use crate::threshold::ThresholdCalculator;
use crate::{Axis, Direction, Directions, LoadFuture, LoadPhase, ScrollGeometry};

/// The load state machine: `Idle -> Loading -> Settling -> Idle`.
pub(crate) enum Phase<E> {
    Idle,
    Loading {
        direction: Direction,
        future: LoadFuture<E>,
    },
    /// `deadline_ms` is fixed by the first tick that observes this phase.
    Settling {
        direction: Direction,
        deadline_ms: Option<u64>,
    },
}

impl<E> Phase<E> {
    pub(crate) fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub(crate) fn view(&self) -> LoadPhase {
        match self {
            Self::Idle => LoadPhase::Idle,
            Self::Loading { direction, .. } => LoadPhase::Loading(*direction),
            Self::Settling { direction, .. } => LoadPhase::Settling(*direction),
        }
    }
}

impl<E> fmt::Debug for Phase<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view(), f)
    }
}

/// State owned by one controller for the lifetime of a surface attachment.
///
/// Dataset extents and content sizes are only advanced by reconciliation, after a loader settled.
#[derive(Debug)]
pub(crate) struct ControllerState<E> {
    pub(crate) row_count: Option<usize>,
    pub(crate) column_count: Option<usize>,
    pub(crate) scroll_height: f64,
    pub(crate) scroll_width: f64,
    pub(crate) thresholds: ThresholdCalculator,
    pub(crate) phase: Phase<E>,
    pub(crate) threshold_reached: Directions,
}

impl<E> ControllerState<E> {
    pub(crate) fn new() -> Self {
        Self {
            row_count: None,
            column_count: None,
            scroll_height: 0.0,
            scroll_width: 0.0,
            thresholds: ThresholdCalculator::new(),
            phase: Phase::Idle,
            threshold_reached: Directions::empty(),
        }
    }

    /// Seeds bookkeeping from a freshly attached surface.
    pub(crate) fn seed(
        &mut self,
        geometry: &ScrollGeometry,
        row_count: Option<usize>,
        column_count: Option<usize>,
    ) {
        self.row_count = row_count;
        self.column_count = column_count;
        self.scroll_height = geometry.scroll_height;
        self.scroll_width = geometry.scroll_width;
        self.thresholds.invalidate();
    }

    /// Forgets everything tied to the detached surface. An in-flight load is kept.
    pub(crate) fn reset_surface(&mut self) {
        self.scroll_height = 0.0;
        self.scroll_width = 0.0;
        self.thresholds = ThresholdCalculator::new();
        self.threshold_reached = Directions::empty();
    }

    pub(crate) fn extent(&self, axis: Axis) -> Option<usize> {
        match axis {
            Axis::Vertical => self.row_count,
            Axis::Horizontal => self.column_count,
        }
    }

    pub(crate) fn set_extent(&mut self, axis: Axis, extent: Option<usize>) {
        match axis {
            Axis::Vertical => self.row_count = extent,
            Axis::Horizontal => self.column_count = extent,
        }
    }

    pub(crate) fn scroll_size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.scroll_height,
            Axis::Horizontal => self.scroll_width,
        }
    }

    pub(crate) fn set_scroll_size(&mut self, axis: Axis, size: f64) {
        match axis {
            Axis::Vertical => self.scroll_height = size,
            Axis::Horizontal => self.scroll_width = size,
        }
    }
}
