use crate::Axis;

/// Why a surface handle could not be normalized into a usable surface.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("virtualized container has no scrolling node mounted")]
    DetachedContainer,
    #[error("window scrolling requested but no window surface is registered")]
    NoWindow,
    #[error("surface reported an invalid `{field}` reading ({value})")]
    InvalidGeometry { field: &'static str, value: f64 },
    #[error("surface cannot deliver scroll events")]
    NoScrollEvents,
}

/// Non-fatal conditions reported through `on_diagnostic` and the log.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Diagnostic {
    #[error("can't use this scrolling surface, try a different element: {0}")]
    InvalidSurface(#[from] SurfaceError),
    #[error("`has_more` enables {axis} loading but `{extent}` is not set")]
    MissingExtent { axis: Axis, extent: &'static str },
}

impl Diagnostic {
    pub(crate) fn missing_extent(axis: Axis) -> Self {
        let extent = match axis {
            Axis::Vertical => "row_count",
            Axis::Horizontal => "column_count",
        };
        Self::MissingExtent { axis, extent }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid scroll threshold {input:?}: expected a pixel value such as \"200px\"")]
pub struct ThresholdParseError {
    pub input: String,
}
