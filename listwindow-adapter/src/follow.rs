use alloc::sync::Arc;

use listwindow::Behavior;

/// Decides the follow behavior from whether the list was at the bottom before the append.
pub type FollowOutputCallback = Arc<dyn Fn(bool) -> Option<Behavior> + Send + Sync>;

/// What to do when items are appended.
#[derive(Clone, Default)]
pub enum FollowOutput {
    #[default]
    Disabled,
    /// Jump to the new last item when the list was at the bottom.
    Auto,
    /// Smooth-scroll to the new last item when the list was at the bottom.
    Smooth,
    Dynamic(FollowOutputCallback),
}

impl FollowOutput {
    pub fn dynamic(f: impl Fn(bool) -> Option<Behavior> + Send + Sync + 'static) -> Self {
        Self::Dynamic(Arc::new(f))
    }

    /// Behavior to follow with, or `None` to stay put.
    pub fn behavior(&self, was_at_bottom: bool) -> Option<Behavior> {
        match self {
            Self::Disabled => None,
            Self::Auto => was_at_bottom.then_some(Behavior::Auto),
            Self::Smooth => was_at_bottom.then_some(Behavior::Smooth),
            Self::Dynamic(f) => f(was_at_bottom),
        }
    }
}

impl core::fmt::Debug for FollowOutput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Auto => f.write_str("Auto"),
            Self::Smooth => f.write_str("Smooth"),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}
