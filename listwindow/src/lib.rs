//! A headless list windowing engine.
//!
//! For host-side workflows (scroll-to-index, follow-output), see the `listwindow-adapter` crate.
//!
//! The engine decides which slice of a very large list belongs on screen and keeps it visually
//! stable while estimated item sizes are replaced by measured ones: a run-length compressed size
//! registry, offset ↔ index lookup, an overscanned range calculator, a scroll-anchoring
//! ("deviation") corrector, optional grouping with sticky headers, and derived scroll flags.
//!
//! It is UI-agnostic. The host is expected to:
//! - report scroll position and viewport height
//! - report measured item (and group header) sizes after layout
//! - apply queued [`HostCommand`]s and consume queued [`ListEvent`]s
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod emitter;
mod flags;
mod group;
mod options;
mod pass;
mod range;
mod size;
mod state;
mod types;
mod window;


pub use flags::{is_at_bottom, is_at_top};
pub use group::{GroupIndex, SlotKind};
pub use options::{ListWindowOptions, OnChangeCallback};
pub use size::{ShiftDirection, SizeRegistry, SizeRun, sanitize_size};
pub use state::{ListState, ScrollFlags, ScrollState};
pub use types::{
    Align, Behavior, Correction, HostCommand, IndexLocation, ItemKind, ListEvent, ListItem,
    ScrollDirection, Sides, VisibleRange,
};
pub use window::ListWindow;
