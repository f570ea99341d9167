use core::task::{Context, Poll};

use futures::FutureExt;
use futures::task::noop_waker_ref;

use crate::direction::{hysteresis_band, near_edges};
use crate::state::{ControllerState, Phase};
use crate::{Axis, Direction, Directions, LoadSettled, ScrollOptions, Surface};

/// Picks the direction to load from the eligible set.
///
/// Axes are offered in [`Axis::ALL`] order; within an axis the start direction (`Up`, `Left`)
/// wins over the end direction.
pub fn select_direction(
    has_more: Directions,
    threshold_reached: Directions,
    near: Directions,
) -> Option<Direction> {
    let eligible = has_more & near & !threshold_reached;
    Axis::ALL.into_iter().find_map(|axis| {
        [axis.start(), axis.end()]
            .into_iter()
            .find(|direction| eligible.has(*direction))
    })
}

/// Runs one resolve/dispatch pass over `surface`.
///
/// Latches whose direction left the hysteresis band are re-armed first. Then, if no load is in
/// flight, at most one direction is selected: its latch is set, the phase moves to `Loading` and
/// the loader is invoked, all before returning.
pub(crate) fn dispatch<E>(
    state: &mut ControllerState<E>,
    options: &ScrollOptions<E>,
    surface: &Surface,
) -> Option<Direction> {
    let geometry = surface.sample();
    let thresholds = state
        .thresholds
        .compute(options.scroll_threshold, &geometry);
    state.threshold_reached &= hysteresis_band(
        &geometry,
        thresholds,
        options.reverse,
        options.hysteresis_margin,
    );

    if !state.phase.is_idle() {
        itrace!(phase = ?state.phase, "dispatch skipped: load in flight");
        return None;
    }

    let near = near_edges(&geometry, thresholds, options.reverse, 0.0);
    itrace!(
        ?near,
        has_more = ?options.has_more,
        reached = ?state.threshold_reached,
        "dispatch pass"
    );
    let direction = select_direction(options.has_more, state.threshold_reached, near)?;

    state.threshold_reached.set_direction(direction, true);
    let future = (options.next)(direction);
    state.phase = Phase::Loading { direction, future };
    idebug!(%direction, "load started");
    Some(direction)
}

/// Polls the in-flight loader once. Returns its result when it settled.
pub(crate) fn poll_load<E>(state: &mut ControllerState<E>) -> Option<LoadSettled<E>> {
    let Phase::Loading { direction, future } = &mut state.phase else {
        return None;
    };
    let mut cx = Context::from_waker(noop_waker_ref());
    let Poll::Ready(result) = future.poll_unpin(&mut cx) else {
        return None;
    };
    let direction = *direction;
    idebug!(%direction, ok = result.is_ok(), "load settled");
    state.phase = Phase::Settling {
        direction,
        deadline_ms: None,
    };
    Some(LoadSettled { direction, result })
}

/// Advances the settle step. Returns the loaded direction once its delay has elapsed.
pub(crate) fn settle_due<E>(
    state: &mut ControllerState<E>,
    now_ms: u64,
    settle_delay_ms: u64,
) -> Option<Direction> {
    let Phase::Settling {
        direction,
        deadline_ms,
    } = &mut state.phase
    else {
        return None;
    };
    let deadline = *deadline_ms.get_or_insert(now_ms.saturating_add(settle_delay_ms));
    (now_ms >= deadline).then_some(*direction)
}
