use core::cmp;

use crate::ScrollDirection;

/// `true` when the scroll position is within `threshold` of the top.
pub fn is_at_top(scroll_top: u64, threshold: u32) -> bool {
    scroll_top <= threshold as u64
}

/// `true` when the distance left to scroll is at most `threshold`.
///
/// Overscrolled positions (past the end) count as at the bottom.
pub fn is_at_bottom(total_height: u64, scroll_top: u64, viewport_height: u32, threshold: u32) -> bool {
    let remaining = total_height as i128 - (scroll_top as i128 + viewport_height as i128);
    remaining <= threshold as i128
}

/// Tracks scroll deltas between host reports.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct MotionTracker {
    last_top: Option<u64>,
    last_ms: Option<u64>,
    pub(crate) direction: Option<ScrollDirection>,
    pub(crate) velocity: f64,
}

impl MotionTracker {
    /// Records a position report. Returns `true` when the position moved.
    pub(crate) fn record(&mut self, scroll_top: u64, now_ms: u64) -> bool {
        let prev_top = self.last_top.replace(scroll_top);
        let prev_ms = self.last_ms.replace(now_ms);
        let Some(prev_top) = prev_top else {
            return false;
        };

        self.direction = match scroll_top.cmp(&prev_top) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.direction,
        };
        let delta = scroll_top as f64 - prev_top as f64;
        let elapsed = now_ms.saturating_sub(prev_ms.unwrap_or(now_ms));
        self.velocity = if elapsed == 0 {
            0.0
        } else {
            delta * 1000.0 / elapsed as f64
        };
        scroll_top != prev_top
    }

    /// Moves the reference point without producing motion (programmatic jumps, corrections).
    pub(crate) fn rebase(&mut self, scroll_top: u64) {
        if self.last_top.is_some() {
            self.last_top = Some(scroll_top);
        }
    }

    pub(crate) fn settle(&mut self) {
        self.direction = None;
        self.velocity = 0.0;
    }
}
