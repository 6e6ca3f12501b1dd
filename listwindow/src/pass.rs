//! Dirty tracking for the update pass.
//!
//! Inputs mark bits as they change. At the end of the outermost batch, the window walks its
//! derived nodes in dependency order and recomputes a node only when one of its inputs (or an
//! upstream node) is dirty:
//!
//! ```text
//! SIZES | STRUCTURE | CONTAINER ─▶ TOTAL ─┐
//! SCROLL | VIEWPORT | CONFIG ─────────────┼─▶ RANGE ─▶ range events
//!                                         └─▶ FLAGS ─▶ flag events
//! ```

use bitflags::bitflags;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct Dirty: u16 {
        /// Item or header sizes changed.
        const SIZES = 1 << 0;
        /// Item count or group layout changed.
        const STRUCTURE = 1 << 1;
        /// Header/footer container heights changed.
        const CONTAINER = 1 << 2;
        const SCROLL = 1 << 3;
        const VIEWPORT = 1 << 4;
        /// Range-shaping options (overscan, padding, pinned head, kept index).
        const CONFIG = 1 << 5;
        /// `is_scrolling` toggled.
        const SCROLLING = 1 << 6;

        // Derived nodes, set while the pass runs.
        const TOTAL = 1 << 8;
        const RANGE = 1 << 9;
        const FLAGS = 1 << 10;
    }
}

impl Dirty {
    pub(crate) const TOTAL_INPUTS: Self = Self::SIZES
        .union(Self::STRUCTURE)
        .union(Self::CONTAINER);

    pub(crate) const RANGE_INPUTS: Self = Self::TOTAL
        .union(Self::SIZES)
        .union(Self::STRUCTURE)
        .union(Self::SCROLL)
        .union(Self::VIEWPORT)
        .union(Self::CONTAINER)
        .union(Self::CONFIG);

    pub(crate) const FLAG_INPUTS: Self = Self::TOTAL
        .union(Self::SCROLL)
        .union(Self::VIEWPORT)
        .union(Self::CONFIG)
        .union(Self::SCROLLING);

    /// Whether a node fed by `inputs` has to run.
    pub(crate) fn touches(self, inputs: Self) -> bool {
        self.intersects(inputs)
    }
}
