use alloc::vec::Vec;

use crate::emitter::ItemEmitter;
use crate::group::{GroupIndex, SlotKind};
use crate::size::SizeRegistry;
use crate::{ListItem, ScrollState, Sides, VisibleRange};

/// Inputs of one range computation. All ranges are in slot space.
pub(crate) struct RangeInput<'a> {
    pub(crate) sizes: &'a SizeRegistry,
    pub(crate) groups: Option<&'a GroupIndex>,
    pub(crate) scroll: ScrollState,
    pub(crate) overscan: Sides<usize>,
    pub(crate) increase_viewport_by: Sides<u32>,
    /// Slots `0..pinned_head_end` always render.
    pub(crate) pinned_head_end: usize,
    pub(crate) keep_slot: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct RangeOutput {
    pub(crate) visible: VisibleRange,
    pub(crate) rendered: VisibleRange,
}

impl RangeInput<'_> {
    pub(crate) fn total_height(&self) -> u64 {
        (self.scroll.header_height as u64)
            .saturating_add(self.sizes.total())
            .saturating_add(self.scroll.footer_height as u64)
    }

    /// Scroll position in content coordinates, clamped to the scrollable maximum.
    fn clamped_top(&self) -> u64 {
        let max = self
            .total_height()
            .saturating_sub(self.scroll.viewport_height as u64);
        self.scroll.effective_scroll_top().min(max)
    }

    /// Slots intersecting the list-coordinate span `[start, end)`.
    fn slots_between(&self, start: u64, end: u64) -> VisibleRange {
        let count = self.sizes.len();
        if end == 0 {
            return VisibleRange::anchored(0);
        }
        if start >= self.sizes.total() {
            return VisibleRange::anchored(count);
        }
        let first = self.sizes.index_at(start).unwrap_or(count);
        let last = self
            .sizes
            .index_at(end.saturating_sub(1).max(start))
            .map_or(count, |i| i + 1);
        VisibleRange::new(first.min(count), last.min(count))
    }

    pub(crate) fn compute(&self, out: &mut Vec<ListItem>) -> RangeOutput {
        let count = self.sizes.len();
        let mut emitter = ItemEmitter::new(self.sizes, self.groups, out);
        if count == 0 {
            return RangeOutput::default();
        }

        let top = self.clamped_top();
        let header = self.scroll.header_height as u64;
        let view = self.scroll.viewport_height as u64;

        if view == 0 {
            let anchor = self
                .sizes
                .index_at(top.saturating_sub(header))
                .unwrap_or(0);
            emitter.emit_range(0, self.pinned_head_end);
            let range = VisibleRange::anchored(anchor);
            return RangeOutput {
                visible: range,
                rendered: range,
            };
        }

        let visible = self.slots_between(
            top.saturating_sub(header),
            top.saturating_add(view).saturating_sub(header),
        );

        let inc = self.increase_viewport_by;
        let mut rendered = self.slots_between(
            top.saturating_sub(header.saturating_add(inc.top as u64)),
            top.saturating_add(view)
                .saturating_add(inc.bottom as u64)
                .saturating_sub(header),
        );
        if !rendered.is_empty() {
            rendered.start_index = rendered.start_index.saturating_sub(self.overscan.top);
            rendered.end_index = rendered
                .end_index
                .saturating_add(self.overscan.bottom)
                .min(count);
        }
        if let Some(keep) = self.keep_slot.filter(|&k| k < count) {
            if rendered.is_empty() {
                rendered = VisibleRange::new(keep, keep + 1);
            } else if keep < rendered.start_index {
                rendered.start_index = keep;
            } else if keep >= rendered.end_index {
                rendered.end_index = keep + 1;
            }
        }

        emitter.emit_range(0, self.pinned_head_end.min(rendered.start_index));
        if let Some(groups) = self.groups {
            if let Some(header) = sticky_header_slot(groups, visible.start_index) {
                if header < rendered.start_index {
                    emitter.emit(header);
                }
            }
        }
        emitter.emit_range(rendered.start_index, rendered.end_index);

        RangeOutput { visible, rendered }
    }
}

/// Header slot of the group owning `slot`.
pub(crate) fn sticky_header_slot(groups: &GroupIndex, slot: usize) -> Option<usize> {
    match groups.slot_kind(slot)? {
        SlotKind::Header { group } | SlotKind::Item { group, .. } => {
            Some(groups.header_slot(group))
        }
    }
}

/// Converts a slot range into the item indexes it covers.
pub(crate) fn slots_to_items(groups: Option<&GroupIndex>, range: VisibleRange) -> VisibleRange {
    let Some(groups) = groups else {
        return range;
    };
    let item_at = |slot: usize| match groups.slot_kind(slot) {
        Some(SlotKind::Header { group }) => groups.group_start_index()[group],
        Some(SlotKind::Item { index, .. }) => index,
        None => groups.total_count(),
    };
    let start = item_at(range.start_index);
    if range.is_empty() {
        return VisibleRange::anchored(start);
    }
    let end = match groups.slot_kind(range.end_index - 1) {
        Some(SlotKind::Header { group }) => groups.group_start_index()[group],
        Some(SlotKind::Item { index, .. }) => index + 1,
        None => groups.total_count(),
    };
    VisibleRange::new(start, end.max(start))
}

/// Slot for an item index (identity without grouping).
pub(crate) fn item_to_slot(groups: Option<&GroupIndex>, index: usize) -> Option<usize> {
    match groups {
        Some(groups) => groups.item_slot(index),
        None => Some(index),
    }
}
