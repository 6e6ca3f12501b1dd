use alloc::vec::Vec;
use core::mem;

use crate::flags::{self, MotionTracker};
use crate::group::GroupIndex;
use crate::pass::Dirty;
use crate::range::{self, RangeInput, RangeOutput};
use crate::size::{self, ShiftDirection, SizeRegistry};
use crate::{
    Align, Behavior, Correction, HostCommand, ListEvent, ListState, ListWindowOptions,
    ScrollFlags, ScrollState, Sides, VisibleRange,
};

// Recomputed scroll targets closer than this to the issued one are not worth a correction.
const SETTLE_TOLERANCE: u64 = 1;

// What the host has already been told, so each pass only emits transitions.
#[derive(Clone, Debug, Default)]
struct Emitted {
    total_height: Option<u64>,
    visible: Option<VisibleRange>,
    at_start: bool,
    at_end: bool,
    is_at_top: Option<bool>,
    is_at_bottom: Option<bool>,
    is_scrolling: bool,
}

/// The windowing engine.
///
/// Owns the size registry, the optional group layout and the scroll state. The host drives it
/// with `report_*` calls; every call runs one update pass (or one per outermost
/// [`ListWindow::batch_update`]) that re-derives the rendered items, scroll flags and queued
/// [`ListEvent`]s / [`HostCommand`]s.
///
/// Sizes are stored per *slot*. Without grouping a slot is an item index; with grouping the
/// layout interleaves one header slot before each group (see [`GroupIndex`]).
#[derive(Clone, Debug)]
pub struct ListWindow {
    options: ListWindowOptions,
    groups: Option<GroupIndex>,
    sizes: SizeRegistry,
    // 1 for measured slots, 0 otherwise; shares the run compression and shift logic.
    measured: SizeRegistry,

    scroll: ScrollState,
    deviation_in_flight: i64,
    motion: MotionTracker,
    last_scroll_event_ms: Option<u64>,

    state: ListState,
    slots: RangeOutput,
    flags: ScrollFlags,
    emitted: Emitted,

    events: Vec<ListEvent>,
    commands: Vec<HostCommand>,

    dirty: Dirty,
    batch_depth: usize,
}

impl ListWindow {
    /// Creates a window and runs the first update pass.
    ///
    /// The first pass queues the initial `TotalListHeightChanged`, `RangeChanged` and flag
    /// events. With `initial_top_most_item_index` set, a `ScrollTo` command is queued as well.
    pub fn new(options: ListWindowOptions) -> Self {
        lw_debug!(
            total_count = options.total_count,
            default_item_size = options.default_item_size,
            fixed_item_size = ?options.fixed_item_size,
            grouped = options.group_counts.is_some(),
            "ListWindow::new"
        );
        let mut w = Self {
            groups: None,
            sizes: SizeRegistry::new(0, options.default_item_size),
            measured: SizeRegistry::new(0, 0),
            options,
            scroll: ScrollState::default(),
            deviation_in_flight: 0,
            motion: MotionTracker::default(),
            last_scroll_event_ms: None,
            state: ListState::default(),
            slots: RangeOutput::default(),
            flags: ScrollFlags::default(),
            emitted: Emitted::default(),
            events: Vec::new(),
            commands: Vec::new(),
            dirty: Dirty::all(),
            batch_depth: 0,
        };
        w.batch_update(|w| {
            w.reconcile_group_counts();
            w.rebuild_layout();
            if let Some(index) = w.options.initial_top_most_item_index {
                if let Some(top) = w.scroll_to_index_offset(index, Align::Start) {
                    w.scroll_to_offset(top, Behavior::Auto);
                }
            }
        });
        w
    }

    pub fn options(&self) -> &ListWindowOptions {
        &self.options
    }

    /// Replaces the options, rebuilding only what the change requires.
    ///
    /// Size configuration or group layout changes rebuild the registry (measurements are
    /// dropped). A plain `total_count` change keeps measurements, like [`Self::set_total_count`].
    pub fn set_options(&mut self, options: ListWindowOptions) {
        let prev = mem::replace(&mut self.options, options);
        lw_trace!(
            total_count = self.options.total_count,
            grouped = self.options.group_counts.is_some(),
            "ListWindow::set_options"
        );
        self.batch_update(|w| {
            let layout_changed = prev.default_item_size != w.options.default_item_size
                || prev.fixed_item_size != w.options.fixed_item_size
                || prev.group_counts != w.options.group_counts;
            w.reconcile_group_counts();
            if layout_changed {
                w.rebuild_layout();
            } else if prev.total_count != w.options.total_count {
                let count = w.options.total_count;
                w.options.total_count = prev.total_count;
                w.set_total_count(count);
            }
            w.dirty |= Dirty::CONFIG | Dirty::SCROLLING;
        });
    }

    /// Clones the current options, applies `f`, then delegates to [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut ListWindowOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    /// Coalesces every input applied inside `f` into a single update pass.
    ///
    /// Nestable; the pass runs when the outermost batch returns.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);
        f(self);
        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.run_pass();
        }
    }

    pub fn total_count(&self) -> usize {
        self.options.total_count
    }

    pub fn group_index(&self) -> Option<&GroupIndex> {
        self.groups.as_ref()
    }

    /// The slot-indexed size registry (items and group headers).
    pub fn sizes(&self) -> &SizeRegistry {
        &self.sizes
    }

    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            scrolling_in_progress: self.flags.is_scrolling,
            ..self.scroll
        }
    }

    pub fn list_state(&self) -> &ListState {
        &self.state
    }

    pub fn flags(&self) -> ScrollFlags {
        self.flags
    }

    pub fn is_scrolling(&self) -> bool {
        self.flags.is_scrolling
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.state.visible_range
    }

    pub fn rendered_range(&self) -> VisibleRange {
        self.state.rendered_range
    }

    pub fn total_height(&self) -> u64 {
        self.range_input().total_height()
    }

    /// Outstanding correction (pixels) not yet reflected by a host scroll report.
    pub fn deviation(&self) -> i64 {
        self.scroll.deviation
    }

    /// Whether a deviation correction is waiting for the host.
    pub fn has_pending_correction(&self) -> bool {
        self.scroll.deviation != 0
    }

    /// Host scroll position plus the outstanding deviation.
    pub fn effective_scroll_top(&self) -> u64 {
        self.scroll.effective_scroll_top()
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.scroll.viewport_height as u64)
    }

    pub fn clamp_scroll_top(&self, top: u64) -> u64 {
        top.min(self.max_scroll_top())
    }

    /// Takes the events queued by previous passes.
    pub fn drain_events(&mut self) -> Vec<ListEvent> {
        mem::take(&mut self.events)
    }

    /// Takes the queued scroll commands. The host is expected to apply them before its next
    /// [`Self::report_scroll_position`].
    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        let commands = mem::take(&mut self.commands);
        for command in &commands {
            if let HostCommand::ScrollBy { delta } = *command {
                self.deviation_in_flight += delta;
            }
        }
        commands
    }

    pub fn pending_commands(&self) -> &[HostCommand] {
        &self.commands
    }

    /// Applies a scroll position / viewport report from the host.
    ///
    /// Corrections drained before this call are assumed applied, so their share of the
    /// deviation is retired here.
    pub fn report_scroll_position(&mut self, scroll_top: u64, viewport_height: u32, now_ms: u64) {
        lw_trace!(scroll_top, viewport_height, now_ms, "report_scroll_position");
        self.batch_update(|w| {
            if w.deviation_in_flight != 0 {
                w.scroll.deviation -= mem::take(&mut w.deviation_in_flight);
                w.dirty |= Dirty::SCROLL;
            }
            if w.scroll.scroll_top != scroll_top {
                w.scroll.scroll_top = scroll_top;
                w.dirty |= Dirty::SCROLL;
            }
            if w.scroll.viewport_height != viewport_height {
                w.scroll.viewport_height = viewport_height;
                w.dirty |= Dirty::VIEWPORT;
            }
            if w.motion.record(w.scroll.effective_scroll_top(), now_ms) {
                w.notify_scroll_event(now_ms);
            }
        });
    }

    pub fn report_container_heights(&mut self, header_height: u32, footer_height: u32) {
        if self.scroll.header_height == header_height && self.scroll.footer_height == footer_height
        {
            return;
        }
        self.batch_update(|w| {
            w.scroll.header_height = header_height;
            w.scroll.footer_height = footer_height;
            w.dirty |= Dirty::CONTAINER;
        });
    }

    /// Records the measured size of item `index`.
    pub fn report_measured_size(&mut self, index: usize, size: f64) {
        self.report_measured_sizes([(index, size)]);
    }

    /// Records a layout pass worth of measurements.
    ///
    /// All sizes land in the registry before the anchor correction and the range are derived,
    /// so downstream state never observes a partial pass. Reports for indexes that no longer
    /// exist are dropped.
    pub fn report_measured_sizes(&mut self, measurements: impl IntoIterator<Item = (usize, f64)>) {
        self.batch_update(|w| {
            let anchor = w.anchor();
            let mut changed = false;
            for (index, raw) in measurements {
                let count = w.options.total_count;
                let Some(slot) = range::item_to_slot(w.groups.as_ref(), index)
                    .filter(|_| index < count)
                else {
                    lw_trace!(index, count, "dropping stale measurement");
                    continue;
                };
                changed |= w.store_size(slot, index, raw);
            }
            if changed {
                w.dirty |= Dirty::SIZES;
                w.correct_for_anchor(anchor, Some);
            }
        });
    }

    /// Records the measured size of the header of `group`.
    pub fn report_group_header_size(&mut self, group: usize, size: f64) {
        self.batch_update(|w| {
            let Some(slot) = w
                .groups
                .as_ref()
                .filter(|g| group < g.group_count())
                .map(|g| g.header_slot(group))
            else {
                lw_trace!(group, "dropping stale group header measurement");
                return;
            };
            let anchor = w.anchor();
            if w.store_size(slot, slot, size) {
                w.dirty |= Dirty::SIZES;
                w.correct_for_anchor(anchor, Some);
            }
        });
    }

    /// Marks a scroll delta at `now_ms`. Sets `is_scrolling`.
    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.last_scroll_event_ms = Some(now_ms);
        self.set_is_scrolling(true);
    }

    /// Resets `is_scrolling` once `is_scrolling_reset_delay_ms` passed without scroll deltas.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.flags.is_scrolling {
            return;
        }
        let Some(last) = self.last_scroll_event_ms else {
            return;
        };
        if now_ms.saturating_sub(last) >= self.options.is_scrolling_reset_delay_ms {
            self.set_is_scrolling(false);
        }
    }

    pub fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.flags.is_scrolling == is_scrolling {
            return;
        }
        self.batch_update(|w| {
            w.flags.is_scrolling = is_scrolling;
            if !is_scrolling {
                w.last_scroll_event_ms = None;
                w.motion.settle();
            }
            w.dirty |= Dirty::SCROLLING;
        });
    }

    /// Grows or shrinks the list at its tail, keeping existing measurements.
    ///
    /// Grouped lists take their count from `group_counts`; a differing `count` is reported as
    /// [`Correction::GroupCountMismatch`] and ignored.
    pub fn set_total_count(&mut self, count: usize) {
        if let Some(groups) = &self.groups {
            let group_total = groups.total_count();
            if count != group_total {
                self.report_correction(Correction::GroupCountMismatch {
                    total_count: count,
                    group_total,
                });
            }
            return;
        }
        if self.options.total_count == count {
            return;
        }
        lw_trace!(from = self.options.total_count, to = count, "set_total_count");
        self.batch_update(|w| {
            w.options.total_count = count;
            w.sizes.set_len(count);
            w.measured.set_len(count);
            w.dirty |= Dirty::STRUCTURE;
        });
    }

    /// Appends `count` items.
    pub fn append(&mut self, count: usize) {
        if self.groups.is_some() {
            let mut counts = self.group_counts_vec();
            if let Some(last) = counts.last_mut() {
                *last += count;
                self.shift_grouped(counts, self.sizes.len(), count, ShiftDirection::Forward);
            }
            return;
        }
        self.set_total_count(self.options.total_count.saturating_add(count));
    }

    /// Inserts `count` items before item 0, keeping the first visible item in place.
    ///
    /// Offsets of existing items grow by the inserted height; the same amount is added to the
    /// deviation and queued as a `ScrollBy` command. Grouped lists grow their first group.
    pub fn prepend(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        lw_debug!(count, "prepend");
        if self.groups.is_some() {
            let mut counts = self.group_counts_vec();
            if let Some(first) = counts.first_mut() {
                *first += count;
                self.shift_grouped(counts, 1, count, ShiftDirection::Forward);
            }
            return;
        }
        self.batch_update(|w| {
            let anchor = w.anchor();
            w.sizes.shift(0, count, ShiftDirection::Forward);
            w.measured.shift(0, count, ShiftDirection::Forward);
            w.options.total_count += count;
            w.dirty |= Dirty::STRUCTURE;
            w.correct_for_anchor(anchor, |slot| Some(slot + count));
        });
    }

    /// Removes `count` items starting at `start_index`.
    ///
    /// Removing items above the first visible item keeps it in place. Grouped lists change
    /// structure through [`Self::set_group_counts`] instead.
    pub fn remove(&mut self, start_index: usize, count: usize) {
        if self.groups.is_some() {
            lw_warn!(start_index, count, "remove is not supported on grouped lists");
            return;
        }
        let start = start_index.min(self.options.total_count);
        let count = count.min(self.options.total_count - start);
        if count == 0 {
            return;
        }
        lw_debug!(start, count, "remove");
        self.batch_update(|w| {
            let anchor = w.anchor();
            w.sizes.shift(start, count, ShiftDirection::Backward);
            w.measured.shift(start, count, ShiftDirection::Backward);
            w.options.total_count -= count;
            w.dirty |= Dirty::STRUCTURE;
            w.correct_for_anchor(anchor, |slot| {
                if slot < start {
                    Some(slot)
                } else if slot >= start + count {
                    Some(slot - count)
                } else {
                    None
                }
            });
        });
    }

    /// Switches grouping on (`Some`) or off (`None`). Sizes return to their estimates.
    pub fn set_group_counts(&mut self, group_counts: Option<Vec<usize>>) {
        self.batch_update(|w| {
            if let Some(counts) = &group_counts {
                w.options.total_count = counts.iter().sum();
            }
            w.options.group_counts = group_counts;
            w.rebuild_layout();
        });
    }

    pub fn set_overscan(&mut self, overscan: impl Into<Sides<usize>>) {
        self.options.overscan = overscan.into();
        self.mark_config();
    }

    pub fn set_increase_viewport_by(&mut self, pixels: impl Into<Sides<u32>>) {
        self.options.increase_viewport_by = pixels.into();
        self.mark_config();
    }

    pub fn set_pinned_head_count(&mut self, count: usize) {
        self.options.pinned_head_count = count;
        self.mark_config();
    }

    pub fn set_keep_index_rendered(&mut self, index: Option<usize>) {
        self.options.keep_index_rendered = index;
        self.mark_config();
    }

    pub fn set_thresholds(&mut self, at_top: u32, at_bottom: u32) {
        self.options.at_top_threshold = at_top;
        self.options.at_bottom_threshold = at_bottom;
        self.mark_config();
    }

    /// Offset of item `index` in list coordinates (excluding the header container).
    pub fn item_offset(&self, index: usize) -> Option<u64> {
        let slot = self.slot_of(index)?;
        Some(self.sizes.offset_of(slot))
    }

    pub fn item_size(&self, index: usize) -> Option<u32> {
        let slot = self.slot_of(index)?;
        Some(self.sizes.size_of(slot))
    }

    /// Whether item `index` has a known size (measured, or the list uses a fixed size).
    pub fn is_measured(&self, index: usize) -> bool {
        let Some(slot) = self.slot_of(index) else {
            return false;
        };
        self.sizes.fixed_size().is_some() || self.measured.size_of(slot) == 1
    }

    /// Item at a list-coordinate offset. Group headers resolve to their group's first item.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.options.total_count == 0 {
            return None;
        }
        let slot = self.sizes.index_at(offset)?;
        let items = range::slots_to_items(self.groups.as_ref(), VisibleRange::anchored(slot));
        Some(items.start_index.min(self.options.total_count - 1))
    }

    /// Scroll position that brings item `index` into view with `align`.
    ///
    /// `index` is clamped to the list. Returns `None` for an empty list. Grouped lists keep
    /// `Align::Start` targets below the group's sticky header.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> Option<u64> {
        let count = self.options.total_count;
        if count == 0 {
            return None;
        }
        let index = index.min(count - 1);
        let slot = self.slot_of(index)?;

        let header = self.scroll.header_height as u64;
        let start = header.saturating_add(self.sizes.offset_of(slot));
        let size = self.sizes.size_of(slot) as u64;
        let end = start.saturating_add(size);
        let view = self.scroll.viewport_height as u64;
        let sticky = self
            .groups
            .as_ref()
            .and_then(|g| range::sticky_header_slot(g, slot))
            .map_or(0, |h| self.sizes.size_of(h) as u64);

        let target = match align {
            Align::Start => start.saturating_sub(sticky),
            Align::End => end.saturating_sub(view),
            Align::Center => start
                .saturating_add(size / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                let cur = self.scroll.effective_scroll_top();
                let cur_end = cur.saturating_add(view);
                if start.saturating_sub(sticky) >= cur && end <= cur_end {
                    cur
                } else if start < cur {
                    start.saturating_sub(sticky)
                } else {
                    end.saturating_sub(view)
                }
            }
        };
        Some(self.clamp_scroll_top(target))
    }

    /// Whether `target` differs from the current scroll target for `index` by more than the
    /// settle tolerance (used after measurements land).
    pub fn scroll_target_moved(&self, index: usize, align: Align, target: u64) -> bool {
        self.scroll_to_index_offset(index, align)
            .is_some_and(|now| now.abs_diff(target) > SETTLE_TOLERANCE)
    }

    /// Queues a `ScrollTo` command.
    ///
    /// An absolute scroll supersedes any outstanding deviation correction. With
    /// [`Behavior::Auto`] the position is applied right away; with [`Behavior::Smooth`] the
    /// engine waits for the host to report positions.
    pub fn scroll_to_offset(&mut self, top: u64, behavior: Behavior) -> u64 {
        let top = self.clamp_scroll_top(top);
        lw_trace!(top, ?behavior, "scroll_to_offset");
        self.batch_update(|w| {
            w.commands
                .retain(|c| !matches!(c, HostCommand::ScrollBy { .. }));
            w.commands.push(HostCommand::ScrollTo { top, behavior });
            if w.scroll.deviation != 0 || w.deviation_in_flight != 0 {
                w.scroll.deviation = 0;
                w.deviation_in_flight = 0;
                w.dirty |= Dirty::SCROLL;
            }
            if behavior == Behavior::Auto && w.scroll.scroll_top != top {
                w.scroll.scroll_top = top;
                w.motion.rebase(top);
                w.dirty |= Dirty::SCROLL;
            }
        });
        top
    }

    fn slot_of(&self, index: usize) -> Option<usize> {
        if index >= self.options.total_count {
            return None;
        }
        range::item_to_slot(self.groups.as_ref(), index)
    }

    fn mark_config(&mut self) {
        self.batch_update(|w| w.dirty |= Dirty::CONFIG);
    }

    fn report_correction(&mut self, correction: Correction) {
        lw_warn!(?correction, "correctable condition");
        self.events.push(ListEvent::Corrected(correction));
    }

    fn group_counts_vec(&self) -> Vec<usize> {
        self.groups
            .as_ref()
            .map(|g| g.group_counts().to_vec())
            .unwrap_or_default()
    }

    // `group_counts` wins over `total_count`.
    fn reconcile_group_counts(&mut self) {
        let Some(counts) = &self.options.group_counts else {
            return;
        };
        let group_total: usize = counts.iter().sum();
        if group_total != self.options.total_count {
            let total_count = self.options.total_count;
            self.options.total_count = group_total;
            self.report_correction(Correction::GroupCountMismatch {
                total_count,
                group_total,
            });
        }
    }

    fn rebuild_layout(&mut self) {
        self.groups = self.options.group_counts.as_deref().map(GroupIndex::new);
        let slots = match &self.groups {
            Some(g) => g.slot_count(),
            None => self.options.total_count,
        };
        lw_debug!(slots, grouped = self.groups.is_some(), "rebuild_layout");
        self.sizes = match self.options.fixed_item_size {
            Some(size) => SizeRegistry::fixed(slots, size),
            None => SizeRegistry::new(slots, self.options.default_item_size),
        };
        self.measured = SizeRegistry::new(slots, 0);
        self.dirty |= Dirty::STRUCTURE | Dirty::SIZES;
    }

    // Grouped structural change at `at` (slot space); the anchor follows its item.
    fn shift_grouped(
        &mut self,
        counts: Vec<usize>,
        at: usize,
        count: usize,
        direction: ShiftDirection,
    ) {
        self.batch_update(|w| {
            let anchor = w.anchor();
            w.sizes.shift(at, count, direction);
            w.measured.shift(at, count, direction);
            w.options.total_count = counts.iter().sum();
            w.groups = Some(GroupIndex::new(&counts));
            w.options.group_counts = Some(counts);
            w.dirty |= Dirty::STRUCTURE;
            w.correct_for_anchor(anchor, |slot| Some(if slot >= at { slot + count } else { slot }));
        });
    }

    fn store_size(&mut self, slot: usize, index: usize, raw: f64) -> bool {
        let size = match size::sanitize_size(raw) {
            Some(size) => size,
            None => {
                self.report_correction(Correction::InvalidSize { index, raw });
                0
            }
        };
        self.measured.set_size(slot, 1);
        self.sizes.set_size(slot, size)
    }

    // First visible slot and its offset, captured before a mutation.
    fn anchor(&self) -> Option<(usize, u64)> {
        let list_top = self
            .scroll
            .effective_scroll_top()
            .saturating_sub(self.scroll.header_height as u64);
        let slot = self.sizes.index_at(list_top)?;
        Some((slot, self.sizes.offset_of(slot)))
    }

    fn correct_for_anchor(
        &mut self,
        anchor: Option<(usize, u64)>,
        map_slot: impl FnOnce(usize) -> Option<usize>,
    ) {
        let Some((slot, prior)) = anchor else {
            return;
        };
        let Some(slot) = map_slot(slot).filter(|&s| s < self.sizes.len()) else {
            return;
        };
        let delta = self.sizes.offset_of(slot) as i64 - prior as i64;
        if delta == 0 {
            return;
        }
        lw_debug!(slot, delta, deviation = self.scroll.deviation + delta, "deviation correction");
        self.scroll.deviation += delta;
        match self.commands.last_mut() {
            Some(HostCommand::ScrollBy { delta: queued }) => *queued += delta,
            _ => self.commands.push(HostCommand::ScrollBy { delta }),
        }
        self.motion.rebase(self.scroll.effective_scroll_top());
        self.dirty |= Dirty::SCROLL;
    }

    fn range_input(&self) -> RangeInput<'_> {
        let groups = self.groups.as_ref();
        let pinned_head_end = match self.options.pinned_head_count {
            0 => 0,
            n => {
                let last = n.min(self.options.total_count);
                match last.checked_sub(1) {
                    Some(last) => range::item_to_slot(groups, last).map_or(0, |s| s + 1),
                    None => 0,
                }
            }
        };
        RangeInput {
            sizes: &self.sizes,
            groups,
            scroll: self.scroll,
            overscan: self.options.overscan,
            increase_viewport_by: self.options.increase_viewport_by,
            pinned_head_end,
            keep_slot: self
                .options
                .keep_index_rendered
                .and_then(|i| self.slot_of(i)),
        }
    }

    // One update pass: recompute dirty nodes in dependency order, then notify.
    fn run_pass(&mut self) {
        let mut dirty = mem::take(&mut self.dirty);
        if dirty.is_empty() {
            return;
        }

        if dirty.touches(Dirty::TOTAL_INPUTS) {
            let total = self.total_height();
            if self.state.total_height != total || self.emitted.total_height.is_none() {
                self.state.total_height = total;
                dirty |= Dirty::TOTAL;
            }
        }

        if dirty.touches(Dirty::RANGE_INPUTS) {
            let mut items = mem::take(&mut self.state.items);
            let slots = self.range_input().compute(&mut items);
            self.state.items = items;
            let groups = self.groups.as_ref();
            let visible = range::slots_to_items(groups, slots.visible);
            let rendered = range::slots_to_items(groups, slots.rendered);
            if slots != self.slots
                || visible != self.state.visible_range
                || rendered != self.state.rendered_range
                || self.emitted.visible.is_none()
            {
                dirty |= Dirty::RANGE;
            }
            self.slots = slots;
            self.state.visible_range = visible;
            self.state.rendered_range = rendered;
        }
        self.state.deviation = self.scroll.deviation;

        if dirty.touches(Dirty::TOTAL) {
            let total = self.state.total_height;
            if self.emitted.total_height != Some(total) {
                self.emitted.total_height = Some(total);
                self.events.push(ListEvent::TotalListHeightChanged(total));
            }
        }

        if dirty.touches(Dirty::RANGE) {
            self.emit_range_events();
        }

        if dirty.touches(Dirty::FLAG_INPUTS) {
            self.derive_flags();
        }

        if let Some(cb) = self.options.on_change.clone() {
            cb(self, self.flags.is_scrolling);
        }
    }

    fn emit_range_events(&mut self) {
        let visible = self.state.visible_range;
        if self.emitted.visible != Some(visible) {
            self.emitted.visible = Some(visible);
            self.events.push(ListEvent::RangeChanged {
                start_index: visible.start_index,
                end_index: visible.end_index,
            });
        }

        let count = self.options.total_count;
        let rendered = self.state.rendered_range;
        let at_start = !rendered.is_empty() && rendered.start_index == 0;
        if at_start && !self.emitted.at_start {
            self.events.push(ListEvent::StartReached(0));
        }
        self.emitted.at_start = at_start;

        let at_end = !rendered.is_empty() && rendered.end_index == count;
        if at_end && !self.emitted.at_end {
            self.events.push(ListEvent::EndReached(count - 1));
        }
        self.emitted.at_end = at_end;
    }

    fn derive_flags(&mut self) {
        let top = self.scroll.effective_scroll_top();
        self.flags.is_at_top = flags::is_at_top(top, self.options.at_top_threshold);
        self.flags.is_at_bottom = flags::is_at_bottom(
            self.state.total_height,
            top,
            self.scroll.viewport_height,
            self.options.at_bottom_threshold,
        );
        self.flags.direction = self.motion.direction;
        self.flags.velocity = self.motion.velocity;

        if self.emitted.is_at_top != Some(self.flags.is_at_top) {
            self.emitted.is_at_top = Some(self.flags.is_at_top);
            self.events
                .push(ListEvent::AtTopStateChange(self.flags.is_at_top));
        }
        if self.emitted.is_at_bottom != Some(self.flags.is_at_bottom) {
            self.emitted.is_at_bottom = Some(self.flags.is_at_bottom);
            self.events
                .push(ListEvent::AtBottomStateChange(self.flags.is_at_bottom));
        }
        if self.emitted.is_scrolling != self.flags.is_scrolling {
            self.emitted.is_scrolling = self.flags.is_scrolling;
            self.events
                .push(ListEvent::IsScrolling(self.flags.is_scrolling));
        }
    }
}
