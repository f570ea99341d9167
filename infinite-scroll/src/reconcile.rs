use crate::direction::hysteresis_band;
use crate::state::{ControllerState, Phase};
use crate::{Axis, Direction, Reverse, ScrollOptions, Surface};

/// Where the scroll offset must move to keep visible content in place after a load.
///
/// Returns `None` unless the dataset extent changed, `direction` is the edge at scroll offset
/// zero (content was inserted before the viewport), and the position is still within one
/// viewport of that edge.
pub fn anchored_offset(
    direction: Direction,
    reverse: Reverse,
    position: f64,
    client_size: f64,
    old_scroll_size: f64,
    new_scroll_size: f64,
    extent_changed: bool,
) -> Option<f64> {
    let axis = direction.axis();
    if !extent_changed
        || direction != reverse.origin_direction(axis)
        || position.abs() >= client_size
    {
        return None;
    }
    Some(position + (new_scroll_size - old_scroll_size) * reverse.sign(axis))
}

/// Completes a settled load on `direction`'s axis and returns the controller to `Idle`.
///
/// Without a surface only the lock is released.
pub(crate) fn reconcile<E>(
    state: &mut ControllerState<E>,
    options: &ScrollOptions<E>,
    surface: Option<&Surface>,
    direction: Direction,
) {
    let axis = direction.axis();
    if let Some(surface) = surface {
        let geometry = surface.sample();
        let extent = extent_of(options, axis);
        let extent_changed = state.extent(axis).unwrap_or(0) != extent.unwrap_or(0);
        let scroll_size = geometry.scroll_size(axis);

        if let Some(offset) = anchored_offset(
            direction,
            options.reverse,
            geometry.offset(axis),
            geometry.client_size(axis),
            state.scroll_size(axis),
            scroll_size,
            extent_changed,
        ) {
            idebug!(
                %axis,
                from = geometry.offset(axis),
                to = offset,
                "anchoring scroll offset"
            );
            match axis {
                Axis::Vertical => surface.scroll_to(Some(offset), None),
                Axis::Horizontal => surface.scroll_to(None, Some(offset)),
            }
        }

        let geometry = surface.sample();
        let thresholds = state
            .thresholds
            .compute(options.scroll_threshold, &geometry);
        let band = hysteresis_band(
            &geometry,
            thresholds,
            options.reverse,
            options.hysteresis_margin,
        );
        state.threshold_reached &= band | !axis.directions();

        state.set_scroll_size(axis, scroll_size);
        state.set_extent(axis, extent);
    } else {
        state.threshold_reached.remove(axis.directions());
    }

    idebug!(%direction, reached = ?state.threshold_reached, "load reconciled");
    state.phase = Phase::Idle;
}

fn extent_of<E>(options: &ScrollOptions<E>, axis: Axis) -> Option<usize> {
    match axis {
        Axis::Vertical => options.row_count,
        Axis::Horizontal => options.column_count,
    }
}
