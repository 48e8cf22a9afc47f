//! A headless slot-recycling windowing engine for fixed-size lists.
//!
//! For adapter-level utilities (slot handle pools, anchoring, tweens), see the
//! `recycler-adapter` crate.
//!
//! This crate renders arbitrarily large one-dimensional lists through a small,
//! constant-size pool of rendering slots. Each slot has a stable identity (its
//! position in the pool); as the viewport scrolls, slots are cyclically
//! reassigned to new items instead of being recreated. Every recomputation is
//! O(slot count), independent of the list length.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport size along the scroll axis
//! - scroll offset
//! - item content lookup by index (O(1))
//!
//! and to consume [`SlotAssignment`]s by positioning each slot's content at
//! `start` along the scroll axis, hiding slots that receive no assignment.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod options;
mod recycler;
mod state;
mod types;
pub mod window;

#[cfg(test)]
mod tests;

pub use error::ConfigError;
pub use options::{InitialOffset, OnChangeCallback, RecyclerOptions};
pub use recycler::Recycler;
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{Align, ScrollDirection, SlotAssignment};
