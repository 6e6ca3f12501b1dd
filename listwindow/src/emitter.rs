use alloc::vec::Vec;

use crate::group::{GroupIndex, SlotKind};
use crate::size::SizeRegistry;
use crate::{ItemKind, ListItem};

/// Appends layout slots to a `ListItem` buffer in ascending order.
///
/// Contract enforced here rather than at every call site:
/// - Slots already emitted (or below the last emitted slot) are skipped, so overlapping
///   pieces like a pinned head and the overscanned range can be emitted back to back.
/// - Out-of-bounds slots are ignored (and debug-asserted).
/// - Offsets are walked incrementally, one registry lookup per emitted piece.
pub(crate) struct ItemEmitter<'a> {
    sizes: &'a SizeRegistry,
    groups: Option<&'a GroupIndex>,
    out: &'a mut Vec<ListItem>,
    next: usize,
}

impl<'a> ItemEmitter<'a> {
    pub(crate) fn new(
        sizes: &'a SizeRegistry,
        groups: Option<&'a GroupIndex>,
        out: &'a mut Vec<ListItem>,
    ) -> Self {
        out.clear();
        Self {
            sizes,
            groups,
            out,
            next: 0,
        }
    }

    pub(crate) fn emit(&mut self, slot: usize) {
        self.emit_range(slot, slot.saturating_add(1));
    }

    pub(crate) fn emit_range(&mut self, start: usize, end: usize) {
        let count = self.sizes.len();
        debug_assert!(
            start >= end || start < count,
            "ItemEmitter: out-of-bounds slot (slot={start}, count={count})"
        );
        let start = start.max(self.next);
        let end = end.min(count);
        if start >= end {
            return;
        }

        let sizes = self.sizes;
        let out = &mut *self.out;
        match self.groups {
            None => sizes.for_each_in(start, end, |slot, offset, size| {
                out.push(ListItem {
                    index: slot,
                    offset,
                    size,
                    group_index: None,
                    kind: ItemKind::Item,
                });
            }),
            Some(groups) => {
                let mut cursor = GroupCursor::at(groups, start);
                sizes.for_each_in(start, end, |slot, offset, size| {
                    let (index, group, kind) = cursor.advance(slot);
                    out.push(ListItem {
                        index,
                        offset,
                        size,
                        group_index: Some(group),
                        kind,
                    });
                });
            }
        }
        self.next = end;
    }
}

// Walks consecutive slots of a grouped layout without a binary search per slot.
struct GroupCursor<'a> {
    groups: &'a GroupIndex,
    group: usize,
    next_header: usize,
}

impl<'a> GroupCursor<'a> {
    fn at(groups: &'a GroupIndex, slot: usize) -> Self {
        let group = match groups.slot_kind(slot) {
            Some(SlotKind::Header { group }) | Some(SlotKind::Item { group, .. }) => group,
            None => groups.group_count().saturating_sub(1),
        };
        let mut cursor = Self {
            groups,
            group,
            next_header: usize::MAX,
        };
        cursor.refresh_next_header();
        cursor
    }

    fn refresh_next_header(&mut self) {
        self.next_header = if self.group + 1 < self.groups.group_count() {
            self.groups.header_slot(self.group + 1)
        } else {
            usize::MAX
        };
    }

    fn advance(&mut self, slot: usize) -> (usize, usize, ItemKind) {
        if slot >= self.next_header {
            self.group += 1;
            self.refresh_next_header();
        }
        let header = self.groups.header_slot(self.group);
        if slot == header {
            let index = self.groups.group_start_index()[self.group];
            (index, self.group, ItemKind::GroupHeader)
        } else {
            (slot - self.group - 1, self.group, ItemKind::Item)
        }
    }
}
