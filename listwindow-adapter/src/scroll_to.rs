use listwindow::{Align, Behavior, IndexLocation, ListWindow};

/// Where a scroll-to-index request currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollToState {
    #[default]
    Idle,
    /// A smooth scroll was issued; waiting for the host to arrive at `target`.
    Pending {
        index: usize,
        align: Align,
        target: u64,
    },
    /// At the target; waiting for the item to be measured before the final check.
    Settling {
        index: usize,
        align: Align,
        target: u64,
    },
}

/// Drives programmatic navigation to an item whose position may still be an estimate.
///
/// `Idle → Pending → Settling → Idle`. Auto-behavior requests skip `Pending`. Once the target
/// item is measured, a target that moved by more than a pixel is re-issued once as an
/// auto-behavior `ScrollTo`, then the request ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollToIndex {
    state: ScrollToState,
}

impl ScrollToIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScrollToState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != ScrollToState::Idle
    }

    pub fn cancel(&mut self) {
        self.state = ScrollToState::Idle;
    }

    /// Starts a request, replacing any in-flight one. Returns the issued scroll target.
    ///
    /// The index is clamped to the list; on an empty list the request is discarded.
    pub fn request(
        &mut self,
        window: &mut ListWindow,
        location: impl Into<IndexLocation>,
    ) -> Option<u64> {
        let IndexLocation {
            index,
            align,
            behavior,
        } = location.into();
        let Some(target) = window.scroll_to_index_offset(index, align) else {
            lw_debug!(index, "scroll_to_index on an empty list; discarded");
            self.state = ScrollToState::Idle;
            return None;
        };
        let index = index.min(window.total_count().saturating_sub(1));
        let target = window.scroll_to_offset(target, behavior);
        lw_debug!(index, ?align, ?behavior, target, "scroll_to_index");

        self.state = match behavior {
            Behavior::Auto => ScrollToState::Settling {
                index,
                align,
                target,
            },
            Behavior::Smooth => ScrollToState::Pending {
                index,
                align,
                target,
            },
        };
        Some(target)
    }

    /// Advances the request after the window received new input.
    ///
    /// Returns `true` when a corrective `ScrollTo` was issued.
    pub fn update(&mut self, window: &mut ListWindow) -> bool {
        match self.state {
            ScrollToState::Idle => false,
            ScrollToState::Pending {
                index,
                align,
                target,
            } => {
                let arrived = window
                    .effective_scroll_top()
                    .abs_diff(window.clamp_scroll_top(target))
                    <= 1;
                if !arrived {
                    return false;
                }
                self.state = ScrollToState::Settling {
                    index,
                    align,
                    target,
                };
                self.settle(window)
            }
            ScrollToState::Settling { .. } => self.settle(window),
        }
    }

    /// Drops the request when a host scroll report moved away from it.
    ///
    /// `previous_top` is the effective scroll top before the report. A settling request ends on
    /// any movement past the tolerance; a pending one ends only when the host moved further from
    /// its target, so the intermediate frames of a smooth scroll keep it alive.
    pub fn on_scroll(&mut self, window: &ListWindow, previous_top: u64) {
        let top = window.effective_scroll_top();
        let abandoned = match self.state {
            ScrollToState::Idle => false,
            ScrollToState::Pending { target, .. } => {
                let target = window.clamp_scroll_top(target);
                top.abs_diff(target) > previous_top.abs_diff(target) + 1
            }
            ScrollToState::Settling { .. } => top.abs_diff(previous_top) > 1,
        };
        if abandoned {
            lw_debug!(
                from = previous_top,
                to = top,
                state = ?self.state,
                "scroll_to_index abandoned by host scroll"
            );
            self.state = ScrollToState::Idle;
        }
    }

    fn settle(&mut self, window: &mut ListWindow) -> bool {
        let ScrollToState::Settling {
            index,
            align,
            target,
        } = self.state
        else {
            return false;
        };
        if index >= window.total_count() {
            self.state = ScrollToState::Idle;
            return false;
        }
        if !window.is_measured(index) {
            return false;
        }
        self.state = ScrollToState::Idle;
        if !window.scroll_target_moved(index, align, target) {
            return false;
        }
        let Some(corrected) = window.scroll_to_index_offset(index, align) else {
            return false;
        };
        lw_debug!(index, from = target, to = corrected, "scroll_to_index settle correction");
        window.scroll_to_offset(corrected, Behavior::Auto);
        true
    }

    /// Keeps an in-flight request pointed at the same item after `count` items were prepended.
    pub fn on_prepend(&mut self, count: usize) {
        match &mut self.state {
            ScrollToState::Idle => {}
            ScrollToState::Pending { index, .. } | ScrollToState::Settling { index, .. } => {
                *index = index.saturating_add(count);
            }
        }
    }
}
