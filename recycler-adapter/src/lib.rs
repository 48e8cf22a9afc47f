//! Adapter utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and focuses on the core math and
//! state. This crate provides small, framework-neutral helpers commonly
//! needed by adapters:
//!
//! - A stable-identity slot handle pool (`SlotPool`), the "reuse, don't
//!   recreate" surface a rendering layer binds its expensive per-slot
//!   resources to
//! - A controller that translates host resize/scroll notifications in the
//!   correct order and drives tween scrolling and `is_scrolling` debouncing
//! - Scroll anchoring across wholesale item-set replacement (e.g. prepend)
//! - Tween-based smooth scrolling helpers
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui/DOM
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod anchor;
mod controller;
mod pool;
mod tween;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use controller::Controller;
pub use pool::SlotPool;
pub use tween::{Easing, Tween};
