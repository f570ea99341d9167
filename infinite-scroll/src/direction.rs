use crate::{Axis, AxisThresholds, Directions, Reverse, ScrollGeometry};

fn near_start(position: f64, threshold: f64, margin: f64) -> bool {
    position.abs() <= threshold + margin
}

fn near_end(position: f64, scroll_size: f64, client_size: f64, threshold: f64, margin: f64) -> bool {
    position.abs() >= (scroll_size - client_size - threshold - margin).abs()
}

/// Returns the directions whose edge is within its threshold of the current scroll position.
///
/// `margin` widens every zone by that many pixels. With `margin = 0` this is the trigger zone;
/// the dispatcher uses a positive margin to decide when a latched direction may re-arm.
///
/// Offsets are compared by magnitude so reversed containers (negative offsets) work unchanged.
pub fn near_edges(
    geometry: &ScrollGeometry,
    thresholds: AxisThresholds,
    reverse: Reverse,
    margin: f64,
) -> Directions {
    let mut near = Directions::empty();
    for axis in Axis::ALL {
        let origin = reverse.origin_direction(axis);
        let position = geometry.offset(axis);
        let threshold = thresholds.get(axis);
        near.set_direction(origin, near_start(position, threshold, margin));
        near.set_direction(
            origin.opposite(),
            near_end(
                position,
                geometry.scroll_size(axis),
                geometry.client_size(axis),
                threshold,
                margin,
            ),
        );
    }
    near
}

/// The hysteresis band: every direction a latch may stay set in.
///
/// Always a superset of the trigger zone, including for content barely larger than the viewport
/// where the widened end check alone would not be.
pub fn hysteresis_band(
    geometry: &ScrollGeometry,
    thresholds: AxisThresholds,
    reverse: Reverse,
    margin: f64,
) -> Directions {
    near_edges(geometry, thresholds, reverse, 0.0) | near_edges(geometry, thresholds, reverse, margin)
}
