// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! String-like ranges found by one highlighting pass.
//!
//! Each [`IntervalSet`] owns the intervals of one literal kind (quotes,
//! comments, heredocs, ...) for the current pass and keeps the intervals of
//! the previous committed pass around. The retained copy is what change
//! detection compares against: the ordinal type history, the counts, the
//! per-entry lengths and, finally, the layout outside the edited section.

use crate::syntax::section::EditWindow;

/// What kind of literal an interval is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    Double,
    Single,
    /// A tripled quote spanning lines (Java text block, Python docstring).
    TextBlock,
    LineComment,
    BlockComment,
    /// The `<<<EOT` / `<<"EOT"` token that opens a heredoc.
    HeredocTag,
    Heredoc,
    QuoteOperator,
    Tag,
    AttributeValue,
    /// An embedded section handed to the named profile.
    Embedded(&'static str),
}

/// A half-open byte range `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
    pub kind: IntervalKind,
}

impl Interval {
    pub fn new(start: usize, end: usize, kind: IntervalKind) -> Self {
        Self { start, end, kind }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}

/// Ordered, non-overlapping intervals of one literal kind.
#[derive(Debug, Clone, Default)]
pub struct IntervalSet {
    intervals: Vec<Interval>,
    counts: (usize, usize),
    retained: Vec<Interval>,
    retained_counts: (usize, usize),
}

impl IntervalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the positions of the current pass.
    ///
    /// The retained history is left untouched here; [`commit`](Self::commit)
    /// trims it to the size of the pass that just finished.
    pub fn reset(&mut self) {
        self.intervals.clear();
        self.counts = (0, 0);
    }

    /// Forgets the retained history, e.g. after a language switch.
    pub fn clear_history(&mut self) {
        self.retained.clear();
        self.retained_counts = (0, 0);
    }

    /// Registers an accepted interval, keeping the set ordered by start.
    pub fn add(&mut self, start: usize, end: usize, kind: IntervalKind) {
        let interval = Interval::new(start, end, kind);
        match self.intervals.last() {
            Some(last) if last.start > start => {
                let at = self.intervals.partition_point(|iv| iv.start <= start);
                self.intervals.insert(at, interval);
            }
            _ => self.intervals.push(interval),
        }
    }

    /// Records how many candidates were tested and accepted in this pass and
    /// reports whether either count differs from the previous pass.
    pub fn size_change(&mut self, tested: usize, accepted: usize) -> bool {
        self.counts = (tested, accepted);
        self.counts != self.retained_counts
    }

    /// Whether the interval at ordinal `index` had a different kind (or did
    /// not exist) in the previous pass.
    pub fn quote_mark_change(&self, index: usize, kind: IntervalKind) -> bool {
        self.retained.get(index).map(|iv| iv.kind) != Some(kind)
    }

    /// Whether the interval at ordinal `index` had a different length (or did
    /// not exist) in the previous pass.
    pub fn length_change(&self, index: usize, len: usize) -> bool {
        self.retained.get(index).map(Interval::len) != Some(len)
    }

    /// Returns the start of the interval open at `pos`.
    ///
    /// An interval is open at `pos` when the nearest start at or before `pos`
    /// is more recent than the nearest end at or before it, i.e. when the
    /// next end comes before the next start.
    pub fn in_string(&self, pos: usize) -> Option<usize> {
        let after = self.intervals.partition_point(|iv| iv.start <= pos);
        let candidate = self.intervals[..after].last()?;
        candidate.contains(pos).then_some(candidate.start)
    }

    /// The interval open at `pos`, if any.
    pub fn interval_at(&self, pos: usize) -> Option<&Interval> {
        let after = self.intervals.partition_point(|iv| iv.start <= pos);
        self.intervals[..after].last().filter(|iv| iv.contains(pos))
    }

    /// Whether any interval overlaps `start..end`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        let after = self.intervals.partition_point(|iv| iv.start < end);
        self.intervals[..after].last().is_some_and(|iv| iv.end > start)
    }

    /// Retains this pass as the history for the next one.
    pub fn commit(&mut self) {
        self.retained.clone_from(&self.intervals);
        self.retained_counts = self.counts;
    }

    /// Whether the intervals reaching outside the edited section differ from
    /// the previous pass once its intervals are mapped through the edit.
    ///
    /// Intervals lying entirely inside the section may change freely: the
    /// local pass repaints all of it. Anything visible outside the section
    /// must match, otherwise styles the local pass does not touch are stale.
    pub fn layout_change(&self, window: &EditWindow) -> bool {
        outside_pieces(&self.intervals, window.section_start, window.section_end, |p| p)
            != outside_pieces(&self.retained, window.section_start, window.old_section_end, |p| {
                window.shift(p)
            })
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn retained(&self) -> &[Interval] {
        &self.retained
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

/// Clips intervals to the parts before `before_end` and at or after
/// `after_start`, translating the latter with `map`.
pub(crate) fn outside_pieces(
    intervals: &[Interval],
    before_end: usize,
    after_start: usize,
    map: impl Fn(usize) -> usize,
) -> Vec<Interval> {
    let mut pieces = Vec::new();
    for iv in intervals {
        if iv.start < before_end {
            pieces.push(Interval::new(iv.start, iv.end.min(before_end), iv.kind));
        }
        if iv.end > after_start {
            pieces.push(Interval::new(map(iv.start.max(after_start)), map(iv.end), iv.kind));
        }
    }
    pieces
}
