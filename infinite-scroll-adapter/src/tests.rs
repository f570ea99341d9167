use crate::*;

use core::cell::RefCell;
use std::rc::Rc;

use infinite_scroll::{
    Axis, Diagnostic, Direction, Directions, EventTarget, InitialScroll, LoadCallback, LoadFuture,
    ScrollNode, ScrollOptions, ScrollThreshold, SurfaceError, SurfaceHandle,
};

use futures::FutureExt;

type Calls = Rc<RefCell<Vec<Direction>>>;

fn loader(calls: &Calls) -> LoadCallback<()> {
    let calls = Rc::clone(calls);
    Rc::new(move |direction: Direction| -> LoadFuture<()> {
        calls.borrow_mut().push(direction);
        futures::future::ready(Ok(())).boxed_local()
    })
}

fn options(next: &LoadCallback<()>) -> ScrollOptions<()> {
    ScrollOptions::from_callback(Rc::clone(next))
        .with_has_more(Directions::DOWN)
        .with_scroll_threshold(ScrollThreshold::Pixels(50))
        .with_settle_delay_ms(0)
}

/// A 100x100 viewport over a 1000px tall list.
fn list() -> Rc<MemorySurface> {
    Rc::new(MemorySurface::with_sizes(100.0, 100.0, 1000.0, 100.0))
}

#[test]
fn memory_surface_emits_only_for_user_input() {
    let calls = Calls::default();
    let next = loader(&calls);
    let surface = list();
    let mut hook = InfiniteScrollHook::new(options(&next));
    hook.mount();
    hook.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));
    assert_eq!(surface.listener_count(), 2);

    // Programmatic writes do not queue events.
    hook.controller().surface().unwrap().scroll_to(Some(900.0), None);
    hook.tick(0);
    assert!(calls.borrow().is_empty());

    surface.scroll_to(Some(0.0), None);
    surface.scroll_by(900.0, 0.0);
    assert_eq!(surface.snapshot().scroll_top, 900.0);
    hook.tick(1);
    assert_eq!(calls.borrow().as_slice(), &[Direction::Down]);
}

#[test]
fn memory_surface_grows_and_clamps_content() {
    let surface = MemorySurface::with_sizes(100.0, 100.0, 1000.0, 100.0);
    surface.grow_content(Axis::Vertical, 500.0);
    surface.grow_content(Axis::Horizontal, -500.0);
    let g = surface.snapshot();
    assert_eq!(g.scroll_height, 1500.0);
    assert_eq!(g.scroll_width, 0.0);

    surface.set_viewport(50.0, 60.0);
    surface.set_content_size(10.0, 20.0);
    let g = surface.snapshot();
    assert_eq!((g.client_height, g.client_width), (50.0, 60.0));
    assert_eq!((g.scroll_height, g.scroll_width), (10.0, 20.0));
}

#[test]
fn hook_loads_again_after_content_grows() {
    let calls = Calls::default();
    let next = loader(&calls);
    let surface = list();
    let mut hook = InfiniteScrollHook::new(options(&next).with_row_count(Some(10)));
    hook.mount();
    hook.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));
    assert!(hook.render(options(&next).with_row_count(Some(10))));

    surface.scroll_to(Some(900.0), None);
    let settled = hook.tick(0).unwrap();
    assert_eq!(settled.direction, Direction::Down);
    assert!(settled.result.is_ok());
    assert!(!hook.controller().is_loading());

    // Still at the bottom with nothing new rendered: no repeat.
    surface.release_pointer();
    hook.tick(1);
    assert_eq!(calls.borrow().len(), 1);

    surface.grow_content(Axis::Vertical, 1000.0);
    assert!(hook.render(options(&next).with_row_count(Some(20))));
    assert!(!hook.controller().threshold_reached().has(Direction::Down));

    surface.scroll_to(Some(1900.0), None);
    hook.tick(2);
    assert_eq!(calls.borrow().as_slice(), &[Direction::Down, Direction::Down]);
}

#[test]
fn render_skips_unchanged_deps() {
    let calls = Calls::default();
    let next = loader(&calls);
    let mut hook = InfiniteScrollHook::new(options(&next));
    hook.mount();

    assert!(hook.render(options(&next).with_row_count(Some(5))));
    assert!(!hook.render(options(&next).with_row_count(Some(5)).with_reverse(Default::default())));
    assert!(hook.render(options(&next).with_row_count(Some(6))));
    assert!(hook.render(
        options(&next)
            .with_row_count(Some(6))
            .with_has_more(Directions::DOWN | Directions::UP)
    ));

    // A fresh loader closure counts as a change.
    let other = loader(&calls);
    assert!(hook.render(
        options(&other)
            .with_row_count(Some(6))
            .with_has_more(Directions::DOWN | Directions::UP)
    ));
    assert_eq!(hook.controller().options().row_count, Some(6));
}

#[test]
fn unmount_removes_listeners_once() {
    let calls = Calls::default();
    let next = loader(&calls);
    let surface = list();
    let mut hook = InfiniteScrollHook::new(options(&next));

    // Not mounted yet: unmount is a no-op.
    hook.unmount();

    hook.mount();
    hook.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));
    assert!(hook.is_mounted());
    assert_eq!(surface.listener_count(), 2);

    hook.unmount();
    assert!(!hook.is_mounted());
    assert!(!hook.controller().is_attached());
    assert_eq!(surface.listener_count(), 0);

    hook.unmount();
    surface.scroll_to(Some(900.0), None);
    hook.tick(0);
    assert!(calls.borrow().is_empty());
}

#[test]
fn surface_swap_and_drop_release_listeners() {
    let calls = Calls::default();
    let next = loader(&calls);
    let surface = list();
    let mut hook = InfiniteScrollHook::new(options(&next));
    hook.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));

    // Swap the surface: the old one loses its listeners.
    let replacement = list();
    hook.set_ref(Some(SurfaceHandle::element(Rc::clone(&replacement))));
    assert_eq!(surface.listener_count(), 0);
    assert_eq!(replacement.listener_count(), 2);

    drop(hook);
    assert_eq!(replacement.listener_count(), 0);
}

#[test]
fn mount_binds_window_scroll() {
    let calls = Calls::default();
    let next = loader(&calls);
    let window = list();
    let mut hook = InfiniteScrollHook::new(
        options(&next)
            .with_window_scroll(true)
            .with_initial_scroll(InitialScroll {
                top: Some(900.0),
                left: None,
            }),
    )
    .with_window(ScrollNode::new(Rc::clone(&window)));

    assert!(!hook.controller().is_attached());
    hook.mount();
    assert!(hook.controller().is_attached());
    assert_eq!(window.listener_count(), 2);

    // The initial offset lands in the trigger zone right away.
    assert_eq!(window.snapshot().scroll_top, 900.0);
    assert_eq!(calls.borrow().as_slice(), &[Direction::Down]);

    // A container ref is ignored while window scrolling.
    hook.set_ref(None);
    assert!(hook.controller().is_attached());
}

#[test]
fn virtualized_host_resolves_once_mounted() {
    let calls = Calls::default();
    let next = loader(&calls);
    let diagnostics: Rc<RefCell<Vec<Diagnostic>>> = Rc::default();
    let sink = Rc::clone(&diagnostics);
    let opts = options(&next)
        .with_on_diagnostic(Some(move |d: &Diagnostic| sink.borrow_mut().push(d.clone())));

    let host = Rc::new(VirtualizedHost::new());
    let mut hook = InfiniteScrollHook::new(opts);
    hook.mount();

    hook.set_ref(Some(SurfaceHandle::virtualized(Rc::clone(&host))));
    assert!(!hook.controller().is_attached());
    assert_eq!(
        diagnostics.borrow().as_slice(),
        &[Diagnostic::InvalidSurface(SurfaceError::DetachedContainer)]
    );

    let inner = list();
    host.mount(Rc::clone(&inner));
    assert!(host.is_mounted());
    hook.set_ref(Some(SurfaceHandle::virtualized(Rc::clone(&host))));
    assert!(hook.controller().is_attached());
    assert_eq!(inner.listener_count(), 2);

    inner.scroll_to(Some(900.0), None);
    hook.tick(0);
    assert_eq!(calls.borrow().as_slice(), &[Direction::Down]);

    host.unmount();
    assert!(!host.is_mounted());
}

#[test]
fn memory_surface_listener_ids_are_unique() {
    let calls = Calls::default();
    let next = loader(&calls);
    let surface = list();
    let mut first = InfiniteScrollHook::new(options(&next));
    let mut second = InfiniteScrollHook::new(options(&next));
    first.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));
    second.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));
    assert_eq!(surface.listener_count(), 4);

    first.unmount();
    first.controller_mut().teardown();
    assert_eq!(surface.listener_count(), 2);
    assert!(surface.supports(infinite_scroll::EventKind::Scroll));
}

#[test]
fn pointer_release_at_bottom_loads() {
    let calls = Calls::default();
    let next = loader(&calls);
    let surface = list();
    let mut hook = InfiniteScrollHook::new(options(&next));
    hook.mount();
    hook.set_ref(Some(SurfaceHandle::element(Rc::clone(&surface))));

    // Dragged to the bottom; only the release is reported.
    hook.controller().surface().unwrap().scroll_to(Some(900.0), None);
    hook.tick(0);
    assert!(calls.borrow().is_empty());

    surface.release_pointer();
    let settled = hook.tick(1).unwrap();
    assert_eq!(settled.direction, Direction::Down);
    assert_eq!(calls.borrow().as_slice(), &[Direction::Down]);
}
