use alloc::vec::Vec;

use crate::{ListItem, ScrollDirection, VisibleRange};

/// A serializable snapshot of the scroll inputs as the engine currently sees them.
///
/// `scroll_top` is the host-reported position. Add `deviation` to get the position in current
/// content coordinates while a correction is still outstanding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_top: u64,
    pub viewport_height: u32,
    pub header_height: u32,
    pub footer_height: u32,
    pub deviation: i64,
    pub scrolling_in_progress: bool,
}

impl ScrollState {
    pub fn effective_scroll_top(&self) -> u64 {
        self.scroll_top.saturating_add_signed(self.deviation)
    }
}

/// Derived scroll flags.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollFlags {
    pub is_at_top: bool,
    pub is_at_bottom: bool,
    pub is_scrolling: bool,
    pub direction: Option<ScrollDirection>,
    /// Pixels per second; positive when scrolling forward.
    pub velocity: f64,
}

/// Everything the rendering layer needs to paint one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListState {
    /// Rows to paint, ordered by offset.
    pub items: Vec<ListItem>,
    /// Header + items + footer.
    pub total_height: u64,
    /// Pixels the painted content should be shifted up until the host applies the pending
    /// `ScrollBy` correction.
    pub deviation: i64,
    /// Item indexes intersecting the viewport.
    pub visible_range: VisibleRange,
    /// Item indexes rendered after padding, overscan and `keep_index_rendered`.
    pub rendered_range: VisibleRange,
}
