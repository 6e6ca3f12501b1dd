use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::Sides;
use crate::window::ListWindow;

/// A callback fired once at the end of every update pass.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback = Arc<dyn Fn(&ListWindow, bool) + Send + Sync>;

/// Configuration for [`crate::ListWindow`].
///
/// Cheap to clone: the callback is stored in an `Arc`, so adapters can tweak a few fields and
/// hand the result to `ListWindow::set_options` without reallocating closures.
pub struct ListWindowOptions {
    /// Number of items. Overridden by the sum of `group_counts` when grouping is active.
    pub total_count: usize,

    /// Size assumed for items (and group headers) until they are measured.
    pub default_item_size: u32,

    /// When every item has one known size. Enables the arithmetic fast path.
    pub fixed_item_size: Option<u32>,

    /// Extra items rendered before/after the viewport, in items.
    pub overscan: Sides<usize>,

    /// Extra pixels added to the viewport before/after when picking the range.
    pub increase_viewport_by: Sides<u32>,

    /// Items `0..pinned_head_count` are always rendered.
    pub pinned_head_count: usize,

    /// An index that must never leave the rendered set (e.g. a focused row).
    pub keep_index_rendered: Option<usize>,

    /// Items per group. `None` disables grouping.
    pub group_counts: Option<Vec<usize>>,

    pub at_top_threshold: u32,
    pub at_bottom_threshold: u32,

    /// Quiet period after the last scroll delta before `is_scrolling` resets.
    pub is_scrolling_reset_delay_ms: u64,

    /// Scrolls to this item (aligned to the top) when the window is created.
    pub initial_top_most_item_index: Option<usize>,

    pub on_change: Option<OnChangeCallback>,
}

impl Clone for ListWindowOptions {
    fn clone(&self) -> Self {
        Self {
            total_count: self.total_count,
            default_item_size: self.default_item_size,
            fixed_item_size: self.fixed_item_size,
            overscan: self.overscan,
            increase_viewport_by: self.increase_viewport_by,
            pinned_head_count: self.pinned_head_count,
            keep_index_rendered: self.keep_index_rendered,
            group_counts: self.group_counts.clone(),
            at_top_threshold: self.at_top_threshold,
            at_bottom_threshold: self.at_bottom_threshold,
            is_scrolling_reset_delay_ms: self.is_scrolling_reset_delay_ms,
            initial_top_most_item_index: self.initial_top_most_item_index,
            on_change: self.on_change.clone(),
        }
    }
}

impl ListWindowOptions {
    /// Options for `total_count` items estimated at `default_item_size` each.
    pub fn new(total_count: usize, default_item_size: u32) -> Self {
        Self {
            total_count,
            default_item_size,
            fixed_item_size: None,
            overscan: Sides::default(),
            increase_viewport_by: Sides::default(),
            pinned_head_count: 0,
            keep_index_rendered: None,
            group_counts: None,
            at_top_threshold: 0,
            at_bottom_threshold: 4,
            is_scrolling_reset_delay_ms: 150,
            initial_top_most_item_index: None,
            on_change: None,
        }
    }

    /// Options for `total_count` items that are all exactly `item_size` tall.
    pub fn fixed(total_count: usize, item_size: u32) -> Self {
        Self::new(total_count, item_size).with_fixed_item_size(Some(item_size))
    }

    pub fn with_fixed_item_size(mut self, item_size: Option<u32>) -> Self {
        self.fixed_item_size = item_size;
        self
    }

    pub fn with_overscan(mut self, overscan: impl Into<Sides<usize>>) -> Self {
        self.overscan = overscan.into();
        self
    }

    pub fn with_increase_viewport_by(mut self, pixels: impl Into<Sides<u32>>) -> Self {
        self.increase_viewport_by = pixels.into();
        self
    }

    pub fn with_pinned_head_count(mut self, count: usize) -> Self {
        self.pinned_head_count = count;
        self
    }

    pub fn with_keep_index_rendered(mut self, index: Option<usize>) -> Self {
        self.keep_index_rendered = index;
        self
    }

    pub fn with_group_counts(mut self, group_counts: Option<Vec<usize>>) -> Self {
        self.group_counts = group_counts;
        self
    }

    pub fn with_thresholds(mut self, at_top: u32, at_bottom: u32) -> Self {
        self.at_top_threshold = at_top;
        self.at_bottom_threshold = at_bottom;
        self
    }

    pub fn with_is_scrolling_reset_delay_ms(mut self, delay_ms: u64) -> Self {
        self.is_scrolling_reset_delay_ms = delay_ms;
        self
    }

    pub fn with_initial_top_most_item_index(mut self, index: Option<usize>) -> Self {
        self.initial_top_most_item_index = index;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ListWindow, bool) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for ListWindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListWindowOptions")
            .field("total_count", &self.total_count)
            .field("default_item_size", &self.default_item_size)
            .field("fixed_item_size", &self.fixed_item_size)
            .field("overscan", &self.overscan)
            .field("increase_viewport_by", &self.increase_viewport_by)
            .field("pinned_head_count", &self.pinned_head_count)
            .field("keep_index_rendered", &self.keep_index_rendered)
            .field("group_counts", &self.group_counts)
            .field("at_top_threshold", &self.at_top_threshold)
            .field("at_bottom_threshold", &self.at_bottom_threshold)
            .field(
                "is_scrolling_reset_delay_ms",
                &self.is_scrolling_reset_delay_ms,
            )
            .field(
                "initial_top_most_item_index",
                &self.initial_top_most_item_index,
            )
            .finish_non_exhaustive()
    }
}
