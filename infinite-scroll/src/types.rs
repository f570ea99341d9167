use core::fmt;

use bitflags::bitflags;

/// One edge of a scrollable surface.
///
/// Directions are logical: with [`Reverse`] flags set, `Up` may correspond to the physical
/// bottom of the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Vertical,
            Self::Left | Self::Right => Axis::Horizontal,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scrolling dimension with two opposing directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    /// Evaluation order of a dispatch pass.
    pub const ALL: [Axis; 2] = [Axis::Vertical, Axis::Horizontal];

    pub fn start(self) -> Direction {
        match self {
            Self::Vertical => Direction::Up,
            Self::Horizontal => Direction::Left,
        }
    }

    pub fn end(self) -> Direction {
        match self {
            Self::Vertical => Direction::Down,
            Self::Horizontal => Direction::Right,
        }
    }

    pub fn directions(self) -> Directions {
        Directions::from(self.start()) | Directions::from(self.end())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        })
    }
}

bitflags! {
    /// A set of [`Direction`]s.
    ///
    /// Used for `has_more` configuration, for the hysteresis latches and for the output of the
    /// direction resolver.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Directions: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
    }
}

impl Directions {
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.into())
    }

    pub fn set_direction(&mut self, direction: Direction, value: bool) {
        self.set(direction.into(), value);
    }

    /// Iterates contained directions in `Up, Down, Left, Right` order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::UP,
            Direction::Down => Self::DOWN,
            Direction::Left => Self::LEFT,
            Direction::Right => Self::RIGHT,
        }
    }
}

/// A snapshot of a surface's scroll geometry.
///
/// Sizes are non-negative. Offsets may be negative on axes whose visual order is reversed
/// (`column-reverse` lists, right-to-left rows).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub scroll_height: f64,
    pub scroll_width: f64,
    pub client_height: f64,
    pub client_width: f64,
}

impl ScrollGeometry {
    pub fn offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.scroll_top,
            Axis::Horizontal => self.scroll_left,
        }
    }

    pub fn scroll_size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.scroll_height,
            Axis::Horizontal => self.scroll_width,
        }
    }

    pub fn client_size(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.client_height,
            Axis::Horizontal => self.client_width,
        }
    }
}

/// Pixel distances from an edge within which a load may trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AxisThresholds {
    pub vertical: f64,
    pub horizontal: f64,
}

impl AxisThresholds {
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.vertical,
            Axis::Horizontal => self.horizontal,
        }
    }
}

/// Axis reversal flags.
///
/// `column` reverses the vertical axis (content flows bottom-up, `Up` and `Down` swap edges);
/// `row` reverses the horizontal axis (`Left` and `Right` swap edges).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reverse {
    pub column: bool,
    pub row: bool,
}

impl Reverse {
    pub fn is_reversed(&self, axis: Axis) -> bool {
        match axis {
            Axis::Vertical => self.column,
            Axis::Horizontal => self.row,
        }
    }

    /// The direction whose edge sits at scroll offset zero.
    pub fn origin_direction(&self, axis: Axis) -> Direction {
        if self.is_reversed(axis) {
            axis.end()
        } else {
            axis.start()
        }
    }

    /// Sign applied to content-size deltas when anchoring.
    pub fn sign(&self, axis: Axis) -> f64 {
        if self.is_reversed(axis) { -1.0 } else { 1.0 }
    }
}

/// One-shot offsets applied when a surface is first attached.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialScroll {
    pub top: Option<f64>,
    pub left: Option<f64>,
}

impl InitialScroll {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none()
    }
}

/// The observable state of the load state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    /// The loader for this direction is in flight.
    Loading(Direction),
    /// The loader settled; the controller is waiting for the settle delay before reconciling.
    Settling(Direction),
}

impl LoadPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Idle => None,
            Self::Loading(d) | Self::Settling(d) => Some(*d),
        }
    }
}

/// A loader result handed back to the host by [`crate::InfiniteScroll::tick`].
#[derive(Debug)]
pub struct LoadSettled<E> {
    pub direction: Direction,
    pub result: Result<(), E>,
}
