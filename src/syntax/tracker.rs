// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Heredocs and quote operators behind one containment query.

use crate::syntax::intervals::IntervalSet;
use crate::syntax::section::EditWindow;

/// Composes the heredoc and quote-operator interval sets of one pass.
///
/// Unlike an ordinary quote, the span of a heredoc or quote operator cannot
/// be re-derived from a single delimiter, so change detection also compares
/// the length of every entry with the previous pass.
#[derive(Debug, Clone, Default)]
pub struct CompositeIntervalTracker {
    heredocs: IntervalSet,
    quote_operators: IntervalSet,
}

impl CompositeIntervalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heredocs(&self) -> &IntervalSet {
        &self.heredocs
    }

    pub fn heredocs_mut(&mut self) -> &mut IntervalSet {
        &mut self.heredocs
    }

    pub fn quote_operators(&self) -> &IntervalSet {
        &self.quote_operators
    }

    pub fn quote_operators_mut(&mut self) -> &mut IntervalSet {
        &mut self.quote_operators
    }

    /// Returns the start of the heredoc or quote-operator literal that
    /// contains `pos`.
    ///
    /// A heredoc whose opener sits inside a quote-operator literal is not a
    /// heredoc, and a quote operator starting inside a real heredoc is not a
    /// quote operator.
    pub fn in_either_string(&self, pos: usize) -> Option<usize> {
        if let Some(start) = self.heredoc_at(pos) {
            return Some(start);
        }
        self.quote_operators
            .in_string(pos)
            .filter(|&start| self.heredoc_at(start).is_none())
    }

    fn heredoc_at(&self, pos: usize) -> Option<usize> {
        self.heredocs
            .in_string(pos)
            .filter(|&start| self.quote_operators.in_string(start).is_none())
    }

    /// Compares the heredocs of this pass with the previous one: the count
    /// of tested openers, the count of entries and every entry's length.
    pub fn heredoc_change(&mut self, tested: usize) -> bool {
        entries_changed(&mut self.heredocs, tested)
    }

    /// Same as [`heredoc_change`](Self::heredoc_change) for quote operators.
    pub fn quote_operator_change(&mut self, tested: usize) -> bool {
        entries_changed(&mut self.quote_operators, tested)
    }

    pub fn layout_change(&self, window: &EditWindow) -> bool {
        self.heredocs.layout_change(window) || self.quote_operators.layout_change(window)
    }

    pub fn commit(&mut self) {
        self.heredocs.commit();
        self.quote_operators.commit();
    }

    pub fn clear_history(&mut self) {
        self.heredocs.clear_history();
        self.quote_operators.clear_history();
    }
}

fn entries_changed(set: &mut IntervalSet, tested: usize) -> bool {
    let accepted = set.len();
    let mut changed = set.size_change(tested, accepted);
    for (index, interval) in set.intervals().iter().enumerate() {
        changed |= set.length_change(index, interval.len());
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::intervals::IntervalKind;

    #[test]
    fn test_in_either_string() {
        let mut tracker = CompositeIntervalTracker::new();
        tracker.heredocs_mut().add(10, 30, IntervalKind::Heredoc);
        tracker.quote_operators_mut().add(40, 45, IntervalKind::QuoteOperator);

        assert_eq!(tracker.in_either_string(5), None);
        assert_eq!(tracker.in_either_string(12), Some(10));
        assert_eq!(tracker.in_either_string(42), Some(40));
        assert_eq!(tracker.in_either_string(45), None);
    }

    #[test]
    fn test_heredoc_inside_quote_operator_is_ignored() {
        let mut tracker = CompositeIntervalTracker::new();
        tracker.quote_operators_mut().add(0, 20, IntervalKind::QuoteOperator);
        tracker.heredocs_mut().add(25, 40, IntervalKind::Heredoc);
        tracker.heredocs_mut().add(5, 8, IntervalKind::HeredocTag);

        assert_eq!(tracker.in_either_string(6), Some(0));
        assert_eq!(tracker.in_either_string(30), Some(25));
    }

    #[test]
    fn test_entry_length_change() {
        let mut tracker = CompositeIntervalTracker::new();
        tracker.heredocs_mut().add(10, 30, IntervalKind::Heredoc);
        assert!(tracker.heredoc_change(1));
        tracker.commit();

        tracker.heredocs_mut().reset();
        tracker.heredocs_mut().add(10, 30, IntervalKind::Heredoc);
        assert!(!tracker.heredoc_change(1));

        tracker.heredocs_mut().reset();
        tracker.heredocs_mut().add(10, 34, IntervalKind::Heredoc);
        assert!(tracker.heredoc_change(1));
    }
}
