//! Host-side workflows for the `listwindow` engine.
//!
//! The `listwindow` crate is UI-agnostic and focuses on windowing math and state. This crate
//! layers the workflows an integration usually needs on top of it:
//!
//! - Scroll-to-index with a settle pass once the target is measured
//! - Follow-output (stick to the tail as items are appended)
//! - A [`Controller`] that wires both to a [`listwindow::ListWindow`]
//!
//! No UI framework bindings live here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod follow;
mod scroll_to;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use follow::{FollowOutput, FollowOutputCallback};
pub use scroll_to::{ScrollToIndex, ScrollToState};
