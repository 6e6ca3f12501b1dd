use alloc::vec::Vec;

/// What occupies a layout slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotKind {
    Header { group: usize },
    Item { index: usize, group: usize },
}

/// Maps flat item indexes onto a grouped layout.
///
/// Items are numbered `0..total_count` regardless of grouping. The layout interleaves one
/// header slot in front of each group, so with `group_counts = [2, 1]` the slots are
/// `[H0, 0, 1, H1, 2]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupIndex {
    counts: Vec<usize>,
    starts: Vec<usize>,
    total: usize,
}

impl GroupIndex {
    pub fn new(group_counts: &[usize]) -> Self {
        let mut starts = Vec::with_capacity(group_counts.len());
        let mut total = 0usize;
        for &count in group_counts {
            starts.push(total);
            total = total.saturating_add(count);
        }
        Self {
            counts: group_counts.to_vec(),
            starts,
            total,
        }
    }

    pub fn group_counts(&self) -> &[usize] {
        &self.counts
    }

    /// First flat index of every group.
    pub fn group_start_index(&self) -> &[usize] {
        &self.starts
    }

    pub fn group_count(&self) -> usize {
        self.counts.len()
    }

    /// Number of items across all groups.
    pub fn total_count(&self) -> usize {
        self.total
    }

    /// Number of layout slots (items plus one header per group).
    pub fn slot_count(&self) -> usize {
        self.total + self.counts.len()
    }

    /// Group owning flat `index`, or `None` past the end.
    ///
    /// Empty groups are skipped: the last group whose start is `<= index` owns it.
    pub fn flat_index_to_group(&self, index: usize) -> Option<usize> {
        if index >= self.total {
            return None;
        }
        let g = self.starts.partition_point(|&s| s <= index);
        g.checked_sub(1)
    }

    pub fn header_slot(&self, group: usize) -> usize {
        self.starts[group] + group
    }

    pub fn item_slot(&self, index: usize) -> Option<usize> {
        let group = self.flat_index_to_group(index)?;
        Some(index + group + 1)
    }

    pub fn slot_kind(&self, slot: usize) -> Option<SlotKind> {
        if slot >= self.slot_count() {
            return None;
        }
        // Header slots (`starts[g] + g`) are strictly increasing even with empty groups.
        let (mut lo, mut hi) = (0usize, self.counts.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.header_slot(mid) <= slot {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        let g = lo.checked_sub(1)?;
        if slot == self.header_slot(g) {
            Some(SlotKind::Header { group: g })
        } else {
            Some(SlotKind::Item {
                index: slot - g - 1,
                group: g,
            })
        }
    }
}
