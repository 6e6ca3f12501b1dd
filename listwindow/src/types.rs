/// Where the target item should land inside the viewport after a scroll-to-index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
    /// Scroll the minimum distance that reveals the item (no-op if fully visible).
    Auto,
}

/// How the host should perform a scroll command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Jump immediately.
    #[default]
    Auto,
    /// Animate; the host reports intermediate positions while it runs.
    Smooth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A pair of values applied before (`top`) and after (`bottom`) the viewport.
///
/// Scalars convert into a symmetric pair: `Sides::from(3)` is `{ top: 3, bottom: 3 }`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sides<T> {
    pub top: T,
    pub bottom: T,
}

impl<T: Copy> Sides<T> {
    pub fn new(top: T, bottom: T) -> Self {
        Self { top, bottom }
    }

    pub fn uniform(value: T) -> Self {
        Self {
            top: value,
            bottom: value,
        }
    }
}

impl<T: Copy> From<T> for Sides<T> {
    fn from(value: T) -> Self {
        Self::uniform(value)
    }
}

/// A scroll-to-index request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexLocation {
    pub index: usize,
    pub align: Align,
    pub behavior: Behavior,
}

impl IndexLocation {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            align: Align::Start,
            behavior: Behavior::Auto,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }
}

impl From<usize> for IndexLocation {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

/// A half-open range of item indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    /// A zero-length range positioned at `index`.
    pub fn anchored(index: usize) -> Self {
        Self::new(index, index)
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    #[default]
    Item,
    GroupHeader,
}

/// A row the rendering layer should paint.
///
/// For group headers `index` is the flat index of the group's first item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    pub index: usize,
    /// Start offset in list coordinates (after the header container).
    pub offset: u64,
    pub size: u32,
    pub group_index: Option<usize>,
    pub kind: ItemKind,
}

impl ListItem {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size as u64)
    }

    pub fn is_group_header(&self) -> bool {
        self.kind == ItemKind::GroupHeader
    }
}

/// Scroll instructions for the host's scroll surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HostCommand {
    ScrollTo { top: u64, behavior: Behavior },
    /// Relative correction issued by the deviation corrector.
    ScrollBy { delta: i64 },
}

/// A condition the engine repaired on its own.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Correction {
    /// A measurement that was negative or not finite; stored as 0.
    InvalidSize { index: usize, raw: f64 },
    /// `group_counts` disagreed with `total_count`; the group total won.
    GroupCountMismatch {
        total_count: usize,
        group_total: usize,
    },
}

/// Notifications produced by an update pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListEvent {
    RangeChanged { start_index: usize, end_index: usize },
    StartReached(usize),
    EndReached(usize),
    AtTopStateChange(bool),
    AtBottomStateChange(bool),
    IsScrolling(bool),
    TotalListHeightChanged(u64),
    Corrected(Correction),
}
