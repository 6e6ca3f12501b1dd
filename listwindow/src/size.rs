use alloc::vec::Vec;
use core::cell::RefCell;

/// A maximal run of contiguous indexes sharing one size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SizeRun {
    pub start_index: usize,
    pub end_index: usize, // exclusive
    pub size: u32,
}

impl SizeRun {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    fn extent(&self) -> u64 {
        self.len() as u64 * self.size as u64
    }
}

/// Direction of a structural [`SizeRegistry::shift`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftDirection {
    /// Insert items; existing indexes at or after the insertion point move up.
    Forward,
    /// Remove items; later indexes move down.
    Backward,
}

// Run start offsets. `offsets[r]` is valid for every `r < offsets.len()`; mutations truncate
// from the first touched run and queries extend on demand.
#[derive(Clone, Debug, Default)]
struct OffsetIndex {
    offsets: Vec<u64>,
}

/// Run-length compressed per-index sizes with offset queries.
///
/// Storage is a sorted `Vec<SizeRun>` covering `[0, len)` without gaps. Offsets are a lazily
/// extended prefix over runs, so `offset_of` / `index_at` cost `O(log R)` once warm, where `R`
/// is the run count (usually far smaller than `len`).
///
/// When built with [`SizeRegistry::fixed`], every query is plain arithmetic until a measurement
/// disagrees with the fixed size.
#[derive(Clone, Debug)]
pub struct SizeRegistry {
    runs: Vec<SizeRun>,
    len: usize,
    default_size: u32,
    fixed: Option<u32>,
    index: RefCell<OffsetIndex>,
}

impl SizeRegistry {
    pub fn new(len: usize, default_size: u32) -> Self {
        let mut r = Self {
            runs: Vec::new(),
            len: 0,
            default_size,
            fixed: None,
            index: RefCell::new(OffsetIndex::default()),
        };
        r.set_len(len);
        r
    }

    /// A registry where every item is known to be `size` tall.
    pub fn fixed(len: usize, size: u32) -> Self {
        let mut r = Self::new(len, size);
        r.fixed = Some(size);
        r
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Returns the fixed item size while the arithmetic fast path is active.
    pub fn fixed_size(&self) -> Option<u32> {
        self.fixed
    }

    pub fn runs(&self) -> &[SizeRun] {
        &self.runs
    }

    /// Size of `index`; indexes past the end report the default size.
    pub fn size_of(&self, index: usize) -> u32 {
        if let Some(size) = self.fixed {
            return size;
        }
        match self.run_position(index) {
            Some(r) => self.runs[r].size,
            None => self.default_size,
        }
    }

    /// Sets the size of one index. Returns whether the stored size changed.
    pub fn set_size(&mut self, index: usize, size: u32) -> bool {
        self.set_size_for_range(index, index.saturating_add(1), size)
    }

    /// Sets `[start, end)` to `size`. Out-of-range parts are ignored.
    pub fn set_size_for_range(&mut self, start: usize, end: usize, size: u32) -> bool {
        let end = end.min(self.len);
        if start >= end {
            return false;
        }
        if let Some(fixed) = self.fixed {
            if fixed == size {
                return false;
            }
            self.fixed = None;
        }

        let Some(first) = self.run_position(start) else {
            return false;
        };
        let last = self.run_position(end - 1).unwrap_or(first);
        if self.runs[first..=last].iter().all(|run| run.size == size) {
            return false;
        }

        let head = self.runs[first];
        let tail = self.runs[last];
        let mut pieces: [Option<SizeRun>; 3] = [None, None, None];
        if head.start_index < start {
            pieces[0] = Some(SizeRun {
                start_index: head.start_index,
                end_index: start,
                size: head.size,
            });
        }
        pieces[1] = Some(SizeRun {
            start_index: start,
            end_index: end,
            size,
        });
        if tail.end_index > end {
            pieces[2] = Some(SizeRun {
                start_index: end,
                end_index: tail.end_index,
                size: tail.size,
            });
        }
        let inserted = pieces.iter().flatten().count();
        self.runs.splice(first..=last, pieces.into_iter().flatten());

        let lo = first.saturating_sub(1);
        let hi = (first + inserted).min(self.runs.len().saturating_sub(1));
        self.merge_between(lo, hi);
        self.invalidate_from(lo);
        true
    }

    /// Resizes to `len` items. New items get the default size; removed items are trimmed.
    pub fn set_len(&mut self, len: usize) {
        if len == self.len {
            return;
        }
        if len < self.len {
            let cut = self.run_position(len).unwrap_or(self.runs.len());
            if cut < self.runs.len() && self.runs[cut].start_index < len {
                self.runs[cut].end_index = len;
                self.runs.truncate(cut + 1);
            } else {
                self.runs.truncate(cut);
            }
            self.len = len;
            self.invalidate_from(cut);
            return;
        }

        let old_len = self.len;
        self.len = len;
        let size = self.fixed.unwrap_or(self.default_size);
        match self.runs.last_mut() {
            Some(last) if last.size == size => last.end_index = len,
            _ => self.runs.push(SizeRun {
                start_index: old_len,
                end_index: len,
                size,
            }),
        }
        self.invalidate_from(self.runs.len().saturating_sub(1));
    }

    /// Inserts (`Forward`) or removes (`Backward`) `count` items at `start_index`.
    ///
    /// Inserted items take the default size (or the fixed size on the fast path).
    pub fn shift(&mut self, start_index: usize, count: usize, direction: ShiftDirection) {
        if count == 0 {
            return;
        }
        match direction {
            ShiftDirection::Forward => self.insert(start_index.min(self.len), count),
            ShiftDirection::Backward => {
                let start = start_index.min(self.len);
                let end = start.saturating_add(count).min(self.len);
                self.remove(start, end);
            }
        }
    }

    fn insert(&mut self, at: usize, count: usize) {
        let size = self.fixed.unwrap_or(self.default_size);
        if at == self.len {
            self.set_len(self.len + count);
            return;
        }
        let Some(r) = self.run_position(at) else {
            return;
        };
        let run = self.runs[r];
        let mut pieces: [Option<SizeRun>; 3] = [None, None, None];
        if run.start_index < at {
            pieces[0] = Some(SizeRun {
                start_index: run.start_index,
                end_index: at,
                size: run.size,
            });
        }
        pieces[1] = Some(SizeRun {
            start_index: at,
            end_index: at + count,
            size,
        });
        pieces[2] = Some(SizeRun {
            start_index: at + count,
            end_index: run.end_index + count,
            size: run.size,
        });
        let inserted = pieces.iter().flatten().count();
        self.runs.splice(r..=r, pieces.into_iter().flatten());
        for run in &mut self.runs[r + inserted..] {
            run.start_index += count;
            run.end_index += count;
        }
        self.len += count;

        let lo = r.saturating_sub(1);
        let hi = (r + inserted).min(self.runs.len().saturating_sub(1));
        self.merge_between(lo, hi);
        self.invalidate_from(lo);
    }

    fn remove(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let count = end - start;
        let (Some(first), Some(last)) = (self.run_position(start), self.run_position(end - 1))
        else {
            return;
        };
        let head = self.runs[first];
        let tail = self.runs[last];
        let mut pieces: [Option<SizeRun>; 2] = [None, None];
        if head.start_index < start {
            pieces[0] = Some(SizeRun {
                start_index: head.start_index,
                end_index: start,
                size: head.size,
            });
        }
        if tail.end_index > end {
            pieces[1] = Some(SizeRun {
                start_index: start,
                end_index: tail.end_index - count,
                size: tail.size,
            });
        }
        let inserted = pieces.iter().flatten().count();
        self.runs.splice(first..=last, pieces.into_iter().flatten());
        for run in &mut self.runs[first + inserted..] {
            run.start_index -= count;
            run.end_index -= count;
        }
        self.len -= count;

        if !self.runs.is_empty() {
            let lo = first.saturating_sub(1);
            let hi = (first + inserted).min(self.runs.len() - 1);
            self.merge_between(lo, hi);
        }
        self.invalidate_from(first.saturating_sub(1));
    }

    /// Offset of `index`: the summed size of every item before it.
    ///
    /// `index >= len` returns the total size.
    pub fn offset_of(&self, index: usize) -> u64 {
        let index = index.min(self.len);
        if let Some(size) = self.fixed {
            return index as u64 * size as u64;
        }
        if index == self.len {
            return self.total();
        }
        let Some(r) = self.run_position(index) else {
            return 0;
        };
        let run = self.runs[r];
        self.run_offset(r) + (index - run.start_index) as u64 * run.size as u64
    }

    /// Greatest index whose offset is `<= offset`, clamped to `len - 1`.
    ///
    /// Returns `None` when the registry is empty.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let last = self.len - 1;
        if let Some(size) = self.fixed {
            if size == 0 {
                return Some(last);
            }
            let i = offset / size as u64;
            return Some(usize::try_from(i).map_or(last, |i| i.min(last)));
        }

        self.ensure_offsets(self.runs.len() - 1);
        let index = self.index.borrow();
        // Last run whose start offset is <= `offset`. Zero-sized runs share their start with
        // the next run, so the later one wins, matching "greatest index".
        let r = index
            .offsets
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let run = self.runs[r];
        let i = if run.size == 0 {
            run.end_index - 1
        } else {
            let within = (offset - index.offsets[r]) / run.size as u64;
            let within = usize::try_from(within).unwrap_or(usize::MAX);
            run.start_index
                .saturating_add(within)
                .min(run.end_index - 1)
        };
        Some(i.min(last))
    }

    pub fn total(&self) -> u64 {
        if let Some(size) = self.fixed {
            return self.len as u64 * size as u64;
        }
        let Some(last) = self.runs.len().checked_sub(1) else {
            return 0;
        };
        self.run_offset(last) + self.runs[last].extent()
    }

    /// Calls `f(index, offset, size)` for each index in `[start, end)` while walking offsets
    /// incrementally (one lookup for the whole range).
    pub fn for_each_in(&self, start: usize, end: usize, mut f: impl FnMut(usize, u64, u32)) {
        let end = end.min(self.len);
        if start >= end {
            return;
        }
        let mut offset = self.offset_of(start);
        if let Some(size) = self.fixed {
            for i in start..end {
                f(i, offset, size);
                offset += size as u64;
            }
            return;
        }
        let Some(mut r) = self.run_position(start) else {
            return;
        };
        let mut i = start;
        while i < end {
            let run = self.runs[r];
            let stop = run.end_index.min(end);
            while i < stop {
                f(i, offset, run.size);
                offset += run.size as u64;
                i += 1;
            }
            r += 1;
        }
    }

    fn run_position(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let r = self
            .runs
            .partition_point(|run| run.start_index <= index)
            .saturating_sub(1);
        debug_assert!(
            self.runs[r].start_index <= index && index < self.runs[r].end_index,
            "size runs must cover [0, len) (index={index}, run={:?})",
            self.runs[r]
        );
        Some(r)
    }

    fn run_offset(&self, r: usize) -> u64 {
        self.ensure_offsets(r);
        self.index.borrow().offsets[r]
    }

    fn ensure_offsets(&self, upto: usize) {
        let mut index = self.index.borrow_mut();
        let mut next = index.offsets.len();
        while next <= upto {
            let offset = match next.checked_sub(1) {
                Some(prev) => index.offsets[prev].saturating_add(self.runs[prev].extent()),
                None => 0,
            };
            index.offsets.push(offset);
            next += 1;
        }
    }

    fn invalidate_from(&mut self, r: usize) {
        self.index.get_mut().offsets.truncate(r);
    }

    // Merges equal-size neighbours among runs `lo..=hi`.
    fn merge_between(&mut self, lo: usize, hi: usize) {
        let mut r = hi;
        while r > lo {
            if r < self.runs.len() && self.runs[r - 1].size == self.runs[r].size {
                self.runs[r - 1].end_index = self.runs[r].end_index;
                self.runs.remove(r);
            }
            r -= 1;
        }
    }
}

/// Converts a host measurement into a stored size.
///
/// Returns `None` for negative or non-finite input; callers store 0 and report it.
pub fn sanitize_size(raw: f64) -> Option<u32> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    if raw >= u32::MAX as f64 {
        return Some(u32::MAX);
    }
    Some((raw + 0.5) as u32)
}
