use listwindow::{
    Align, Behavior, HostCommand, IndexLocation, ListEvent, ListWindow, ListWindowOptions,
};

use crate::{FollowOutput, ScrollToIndex, ScrollToState};

/// A framework-neutral controller that wraps a [`ListWindow`] and runs the host-side
/// workflows: scroll-to-index settling and follow-output.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_measured_sizes` when the UI reports layout
/// - `tick(now_ms)` each frame/timer tick (deferred follow-output, `is_scrolling` debouncing)
///
/// and apply [`Controller::drain_commands`] to the real scroll container.
#[derive(Clone, Debug)]
pub struct Controller {
    w: ListWindow,
    scroll_to: ScrollToIndex,
    follow: FollowOutput,
    // Follow-output postponed because a deviation correction was outstanding.
    deferred_follow: Option<Behavior>,
}

impl Controller {
    pub fn new(options: ListWindowOptions) -> Self {
        Self::from_window(ListWindow::new(options))
    }

    pub fn from_window(w: ListWindow) -> Self {
        Self {
            w,
            scroll_to: ScrollToIndex::new(),
            follow: FollowOutput::Disabled,
            deferred_follow: None,
        }
    }

    pub fn with_follow_output(mut self, follow: FollowOutput) -> Self {
        self.follow = follow;
        self
    }

    pub fn set_follow_output(&mut self, follow: FollowOutput) {
        self.follow = follow;
    }

    pub fn follow_output(&self) -> &FollowOutput {
        &self.follow
    }

    pub fn window(&self) -> &ListWindow {
        &self.w
    }

    pub fn window_mut(&mut self) -> &mut ListWindow {
        &mut self.w
    }

    pub fn into_window(self) -> ListWindow {
        self.w
    }

    pub fn scroll_to_state(&self) -> ScrollToState {
        self.scroll_to.state()
    }

    pub fn has_deferred_follow(&self) -> bool {
        self.deferred_follow.is_some()
    }

    /// Call this when the UI reports a scroll position or viewport change.
    ///
    /// A scroll that moves away from an in-flight scroll-to-index request cancels it.
    pub fn on_scroll(&mut self, scroll_top: u64, viewport_height: u32, now_ms: u64) {
        let previous_top = self.w.effective_scroll_top();
        self.w
            .report_scroll_position(scroll_top, viewport_height, now_ms);
        self.scroll_to.on_scroll(&self.w, previous_top);
        self.scroll_to.update(&mut self.w);
    }

    /// Call this after layout with the sizes of the rendered items.
    pub fn on_measured_sizes(&mut self, measurements: impl IntoIterator<Item = (usize, f64)>) {
        self.w.report_measured_sizes(measurements);
        self.scroll_to.update(&mut self.w);
    }

    pub fn on_group_header_size(&mut self, group: usize, size: f64) {
        self.w.report_group_header_size(group, size);
        self.scroll_to.update(&mut self.w);
    }

    /// Advances debouncing and any deferred follow-output.
    pub fn tick(&mut self, now_ms: u64) {
        self.w.update_scrolling(now_ms);
        if let Some(behavior) = self.deferred_follow.take() {
            self.follow_to_end(behavior);
        }
        self.scroll_to.update(&mut self.w);
    }

    /// Starts a scroll-to-index request. Returns the issued target offset.
    pub fn scroll_to_index(&mut self, location: impl Into<IndexLocation>) -> Option<u64> {
        self.deferred_follow = None;
        let target = self.scroll_to.request(&mut self.w, location);
        self.scroll_to.update(&mut self.w);
        target
    }

    pub fn cancel_scroll_to_index(&mut self) {
        self.scroll_to.cancel();
    }

    /// Changes the item count, following the new tail when the policy asks for it.
    pub fn set_total_count(&mut self, count: usize) {
        self.grow_with(|w| w.set_total_count(count));
    }

    pub fn append(&mut self, count: usize) {
        self.grow_with(|w| w.append(count));
    }

    /// Prepends items, keeping any in-flight scroll-to-index on its item.
    pub fn prepend(&mut self, count: usize) {
        self.w.prepend(count);
        self.scroll_to.on_prepend(count);
    }

    pub fn drain_events(&mut self) -> alloc::vec::Vec<ListEvent> {
        self.w.drain_events()
    }

    pub fn drain_commands(&mut self) -> alloc::vec::Vec<HostCommand> {
        self.w.drain_commands()
    }

    fn grow_with(&mut self, apply: impl FnOnce(&mut ListWindow)) {
        let was_at_bottom = self.w.flags().is_at_bottom;
        let before = self.w.total_count();
        apply(&mut self.w);
        // Grouped lists may reject the change.
        if self.w.total_count() <= before {
            return;
        }
        let Some(behavior) = self.follow.behavior(was_at_bottom) else {
            return;
        };
        if self.w.has_pending_correction() {
            lw_trace!(deviation = self.w.deviation(), "follow-output deferred one tick");
            self.deferred_follow = Some(behavior);
            return;
        }
        self.follow_to_end(behavior);
    }

    fn follow_to_end(&mut self, behavior: Behavior) {
        let Some(last) = self.w.total_count().checked_sub(1) else {
            return;
        };
        lw_debug!(last, ?behavior, "follow-output");
        self.scroll_to.request(
            &mut self.w,
            IndexLocation::new(last)
                .with_align(Align::End)
                .with_behavior(behavior),
        );
    }
}
