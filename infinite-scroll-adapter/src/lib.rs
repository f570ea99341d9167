//! Host-side helpers for the `infinite-scroll` crate.
//!
//! The `infinite-scroll` crate is UI-agnostic and only talks to surfaces through the
//! `ScrollElement` / `EventTarget` traits. This crate provides small, framework-neutral pieces
//! commonly needed by hosts:
//!
//! - [`MemorySurface`]: an in-memory scroll container (TUIs, headless hosts, tests)
//! - [`VirtualizedHost`]: a wrapper that mounts and unmounts its inner scrolling node
//! - [`InfiniteScrollHook`]: mount / render / unmount lifecycle binding for component frameworks
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

mod hook;
mod memory;
mod virtualized;

#[cfg(test)]
mod tests;

pub use hook::InfiniteScrollHook;
pub use memory::MemorySurface;
pub use virtualized::VirtualizedHost;
