// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The search primitives and the pass that drives them.
//!
//! [`SyntaxSearcher`] is the persistent per-document state: the interval
//! sets of the last committed pass. [`SearchPass`] lives for one pass and is
//! what a [`LanguageProfile`] talks to.
//!
//! Structural primitives (quotes, comments, heredocs, quote operators, tags,
//! embedded sections) always scan the whole scope and only paint what falls
//! into the section, so their intervals never depend on where the edit was.
//! Token primitives (keywords, variables, brackets) only scan the section.
//! A local pass is accepted when no change check fires and the intervals
//! visible outside the section match the previous pass; otherwise the
//! searcher repairs with one full pass.

mod literals;
mod markup;
mod tokens;

use std::ops::Range;

use log::{debug, trace};

use crate::buffer::StyledDocument;
use crate::syntax::color_mapper::Style;
use crate::syntax::intervals::IntervalSet;
use crate::syntax::profile::{Condition, LanguageProfile};
use crate::syntax::scan::CommentCursor;
use crate::syntax::section::{EditWindow, Section};
use crate::syntax::tracker::CompositeIntervalTracker;

/// How a highlighting request was finally served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// The whole document was lexed.
    Full,
    /// Only the edited lines were repainted.
    Local,
    /// A local pass detected a structural change and was redone in full.
    Repair,
}

/// Interval sets of one scope (the document, or an embedded section while
/// its profile runs).
#[derive(Debug, Clone, Default)]
struct ScopeState {
    quotes: IntervalSet,
    line_comments: IntervalSet,
    block_comments: IntervalSet,
    tracker: CompositeIntervalTracker,
    tags: IntervalSet,
    attribute_values: IntervalSet,
    embedded: IntervalSet,
    line_cmnt_starts: Vec<usize>,
}

impl ScopeState {
    fn reset(&mut self) {
        for set in [
            &mut self.quotes,
            &mut self.line_comments,
            &mut self.block_comments,
            &mut self.tags,
            &mut self.attribute_values,
            &mut self.embedded,
        ] {
            set.reset();
        }
        self.tracker.heredocs_mut().reset();
        self.tracker.quote_operators_mut().reset();
        self.line_cmnt_starts.clear();
    }

    fn named_sets(&self) -> [(&'static str, &IntervalSet); 8] {
        [
            ("quotes", &self.quotes),
            ("line comments", &self.line_comments),
            ("block comments", &self.block_comments),
            ("heredocs", self.tracker.heredocs()),
            ("quote operators", self.tracker.quote_operators()),
            ("tags", &self.tags),
            ("attribute values", &self.attribute_values),
            ("embedded sections", &self.embedded),
        ]
    }

    fn layout_change(&self, window: &EditWindow) -> Option<&'static str> {
        self.named_sets()
            .into_iter()
            .find(|(_, set)| set.layout_change(window))
            .map(|(name, _)| name)
    }

    fn commit(&mut self) {
        self.quotes.commit();
        self.line_comments.commit();
        self.block_comments.commit();
        self.tracker.commit();
        self.tags.commit();
        self.attribute_values.commit();
        self.embedded.commit();
    }

    fn clear_history(&mut self) {
        self.quotes.clear_history();
        self.line_comments.clear_history();
        self.block_comments.clear_history();
        self.tracker.clear_history();
        self.tags.clear_history();
        self.attribute_values.clear_history();
        self.embedded.clear_history();
    }

    fn in_comment(&self, pos: usize) -> bool {
        self.line_comments.in_string(pos).is_some() || self.block_comments.in_string(pos).is_some()
    }

    /// Inside any string or comment found so far.
    fn in_literal(&self, pos: usize) -> bool {
        self.quotes.in_string(pos).is_some()
            || self.tracker.in_either_string(pos).is_some()
            || self.in_comment(pos)
    }
}

/// Persistent lexing state of one document.
#[derive(Debug, Default)]
pub struct SyntaxSearcher {
    scope: ScopeState,
    /// Intervals found inside embedded sections, tagged with their kind.
    nested: IntervalSet,
    repairing: bool,
    last_repair_reason: Option<&'static str>,
}

impl SyntaxSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexes and paints the whole document.
    pub fn highlight_full(
        &mut self,
        profile: &'static dyn LanguageProfile,
        text: &str,
        doc: &mut dyn StyledDocument,
    ) -> PassKind {
        self.repairing = true;
        self.run_pass(profile, text, doc, Section::whole(text));
        self.repairing = false;
        self.commit();
        PassKind::Full
    }

    /// Repaints `section` after an edit described by `window`, escalating to
    /// a full pass when the edit changed structure outside the section.
    pub fn highlight_section(
        &mut self,
        profile: &'static dyn LanguageProfile,
        text: &str,
        doc: &mut dyn StyledDocument,
        section: Section<'_>,
        window: EditWindow,
    ) -> PassKind {
        if section.is_whole(text) {
            return self.highlight_full(profile, text, doc);
        }

        let reason = self
            .run_pass(profile, text, doc, section)
            .or_else(|| self.layout_change(&window));
        match reason {
            None => {
                self.commit();
                PassKind::Local
            }
            Some(reason) => {
                debug!("{} pass escalated to full repair: {reason}", profile.name());
                self.last_repair_reason = Some(reason);
                self.highlight_full(profile, text, doc);
                PassKind::Repair
            }
        }
    }

    /// Forgets the previous pass, e.g. after switching language.
    pub fn clear_history(&mut self) {
        self.scope.clear_history();
        self.nested.clear_history();
        self.last_repair_reason = None;
    }

    fn run_pass(
        &mut self,
        profile: &'static dyn LanguageProfile,
        text: &str,
        doc: &mut dyn StyledDocument,
        section: Section<'_>,
    ) -> Option<&'static str> {
        self.scope.reset();
        self.nested.reset();
        doc.reset_attributes(section.start(), section.len());
        trace!("{} pass over {:?}", profile.name(), section.range());

        let mut pass = SearchPass {
            detect: !self.repairing,
            searcher: self,
            text,
            doc,
            profile,
            section: section.range(),
            scope: 0..text.len(),
            condition: Condition::None,
            depth: 0,
            repair: None,
            comments: None,
        };
        profile.highlight(&mut pass);
        pass.repair
    }

    fn layout_change(&self, window: &EditWindow) -> Option<&'static str> {
        self.scope
            .layout_change(window)
            .or_else(|| self.nested.layout_change(window).then_some("embedded content"))
    }

    fn commit(&mut self) {
        self.scope.commit();
        self.nested.commit();
    }

    pub fn quotes(&self) -> &IntervalSet {
        &self.scope.quotes
    }

    pub fn line_comments(&self) -> &IntervalSet {
        &self.scope.line_comments
    }

    pub fn block_comments(&self) -> &IntervalSet {
        &self.scope.block_comments
    }

    pub fn tracker(&self) -> &CompositeIntervalTracker {
        &self.scope.tracker
    }

    pub fn tags(&self) -> &IntervalSet {
        &self.scope.tags
    }

    pub fn attribute_values(&self) -> &IntervalSet {
        &self.scope.attribute_values
    }

    pub fn embedded(&self) -> &IntervalSet {
        &self.scope.embedded
    }

    /// Everything found inside embedded sections during the last pass.
    pub fn nested(&self) -> &IntervalSet {
        &self.nested
    }

    /// Starts of the line comments accepted by the last pass.
    pub fn line_comment_starts(&self) -> &[usize] {
        &self.scope.line_cmnt_starts
    }

    /// Why the most recent repair happened.
    pub fn last_repair_reason(&self) -> Option<&'static str> {
        self.last_repair_reason
    }
}

/// One highlighting pass, handed to [`LanguageProfile::highlight`].
///
/// Positions are absolute byte offsets into the document. The profile
/// callbacks (`is_valid` and friends) see the scope text and scope-relative
/// positions instead, so an embedded profile behaves as if it owned a
/// document of its own.
pub struct SearchPass<'a> {
    searcher: &'a mut SyntaxSearcher,
    text: &'a str,
    doc: &'a mut dyn StyledDocument,
    profile: &'static dyn LanguageProfile,
    section: Range<usize>,
    scope: Range<usize>,
    condition: Condition,
    depth: usize,
    /// Change checks only run on the outermost scope of a local pass.
    detect: bool,
    repair: Option<&'static str>,
    /// Block comment scanner of the current scope. It restarts when a check
    /// asks about an earlier offset than the previous one.
    comments: Option<CommentCursor<'a>>,
}

impl<'a> SearchPass<'a> {
    /// Tags the next primitive call with `condition`.
    pub fn set_condition(&mut self, condition: Condition) {
        self.condition = condition;
    }

    /// Text of the scope the current profile runs on.
    pub fn scope_text(&self) -> &str {
        &self.text[self.scope.clone()]
    }

    /// Whether a change check asked for a full repair. Once set, the
    /// remaining primitives of the pass do nothing.
    pub fn repair_pending(&self) -> bool {
        self.repair.is_some()
    }

    fn take_condition(&mut self) -> Condition {
        std::mem::take(&mut self.condition)
    }

    fn checks_enabled(&self) -> bool {
        self.detect && self.depth == 0
    }

    fn request_repair(&mut self, reason: &'static str) {
        if self.repair.is_none() {
            trace!("repair requested: {reason}");
            self.repair = Some(reason);
        }
    }

    fn state(&self) -> &ScopeState {
        &self.searcher.scope
    }

    fn state_mut(&mut self) -> &mut ScopeState {
        &mut self.searcher.scope
    }

    /// The part of the section inside the current scope.
    fn token_range(&self) -> Range<usize> {
        let start = self.section.start.max(self.scope.start);
        let end = self.section.end.min(self.scope.end);
        start..end.max(start)
    }

    fn valid(&self, pos: usize, condition: Condition) -> bool {
        self.profile.is_valid(self.scope_text(), pos - self.scope.start, condition)
    }

    fn behind_line_comment(&self, pos: usize) -> bool {
        self.profile
            .behind_line_cmnt_mark(self.scope_text(), pos - self.scope.start)
            .is_some()
    }

    /// Whether `pos` lies in a block comment of the scope. Callers query
    /// positions in increasing order, which keeps a primitive linear.
    fn in_block_comment(&mut self, pos: usize) -> bool {
        let profile = self.profile;
        let Some(syntax) = profile.comment_syntax() else {
            return false;
        };
        let start = self.scope.start;
        let current = self
            .comments
            .as_ref()
            .is_some_and(|c| c.start() == start && std::ptr::eq(c.syntax(), syntax));
        if !current {
            self.comments = Some(CommentCursor::new(self.text, start, syntax));
        }
        self.comments.as_mut().is_some_and(|c| c.block_comment_at(pos).is_some())
    }

    /// Applies `style` to the part of `start..end` inside the section.
    fn paint(&mut self, start: usize, end: usize, style: Style) {
        let from = start.max(self.section.start);
        let to = end.min(self.section.end);
        if from < to {
            self.doc.set_attributes(from, to - from, style);
        }
    }

    /// Like [`paint`](Self::paint), leaving embedded sections alone.
    fn paint_outside_embedded(&mut self, start: usize, end: usize, style: Style) {
        let mut from = start;
        let gaps: Vec<(usize, usize)> = self
            .state()
            .embedded
            .intervals()
            .iter()
            .filter(|iv| iv.end > start && iv.start < end)
            .map(|iv| (iv.start, iv.end))
            .collect();
        for (embedded_start, embedded_end) in gaps {
            self.paint(from, embedded_start.max(from), style);
            from = from.max(embedded_end);
        }
        self.paint(from, end, style);
    }

    /// Runs `profile` over `range` as a scope of its own, then folds what it
    /// found into the nested layout.
    fn delegate(&mut self, profile: &'static dyn LanguageProfile, range: Range<usize>) {
        let outer = std::mem::take(&mut self.searcher.scope);
        let outer_profile = std::mem::replace(&mut self.profile, profile);
        let outer_scope = std::mem::replace(&mut self.scope, range);
        let outer_condition = self.take_condition();
        self.depth += 1;

        profile.highlight(self);

        self.depth -= 1;
        self.condition = outer_condition;
        self.scope = outer_scope;
        self.profile = outer_profile;
        let inner = std::mem::replace(&mut self.searcher.scope, outer);
        for (_, set) in inner.named_sets() {
            for iv in set.intervals() {
                self.searcher.nested.add(iv.start, iv.end, iv.kind);
            }
        }
    }
}

/// Next position of one of several marks, with per-mark caching so rare
/// marks are not rescanned for every hit of a frequent one.
struct MarkFinder<'m> {
    marks: &'m [&'m str],
    next: Vec<Next>,
}

#[derive(Debug, Clone, Copy)]
enum Next {
    Unknown,
    At(usize),
    Exhausted,
}

impl<'m> MarkFinder<'m> {
    fn new(marks: &'m [&'m str]) -> Self {
        Self { marks, next: vec![Next::Unknown; marks.len()] }
    }

    /// Earliest mark at or after `from` and before `hi`, with its length.
    fn find(&mut self, text: &str, from: usize, hi: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for (slot, mark) in self.next.iter_mut().zip(self.marks) {
            let stale = match *slot {
                Next::Unknown => true,
                Next::At(p) => p < from,
                Next::Exhausted => false,
            };
            if stale {
                *slot = match text.get(from..hi).and_then(|s| s.find(mark)) {
                    Some(rel) => Next::At(from + rel),
                    None => Next::Exhausted,
                };
            }
            if let Next::At(p) = *slot {
                if best.is_none_or(|(q, _)| p < q) {
                    best = Some((p, mark.len()));
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AttributedBuffer;
    use crate::syntax::profile::JAVA;

    #[test]
    fn test_mark_finder() {
        let text = "a // b # c // d";
        let marks = ["//", "#"];
        let mut finder = MarkFinder::new(&marks);
        assert_eq!(finder.find(text, 0, text.len()), Some((2, 2)));
        assert_eq!(finder.find(text, 4, text.len()), Some((7, 1)));
        assert_eq!(finder.find(text, 8, text.len()), Some((11, 2)));
        assert_eq!(finder.find(text, 13, text.len()), None);
    }

    #[test]
    fn test_local_pass_without_structural_change() {
        let mut doc = AttributedBuffer::new("int a;\nint b;\n");
        let mut searcher = SyntaxSearcher::new();
        let text = doc.text().to_owned();
        assert_eq!(searcher.highlight_full(&JAVA, &text, &mut doc), PassKind::Full);

        doc.insert(11, "c");
        let text = doc.text().to_owned();
        let section = Section::lines(&text, 11, 12);
        let window = EditWindow::new(&section, 14, 15).unwrap();
        assert_eq!(searcher.highlight_section(&JAVA, &text, &mut doc, section, window), PassKind::Local);
        assert_eq!(doc.style_at(7), Style::Keyword);
        assert_eq!(searcher.last_repair_reason(), None);
    }

    #[test]
    fn test_local_pass_escalates_on_new_quote() {
        let mut doc = AttributedBuffer::new("int a;\nint b;\nint c;\n");
        let mut searcher = SyntaxSearcher::new();
        let text = doc.text().to_owned();
        searcher.highlight_full(&JAVA, &text, &mut doc);

        doc.insert(7, "\"");
        let text = doc.text().to_owned();
        let section = Section::lines(&text, 7, 8);
        let window = EditWindow::new(&section, 21, 22).unwrap();
        assert_eq!(searcher.highlight_section(&JAVA, &text, &mut doc, section, window), PassKind::Repair);
        assert_eq!(searcher.last_repair_reason(), Some("quote marks changed"));
        assert_eq!(searcher.quotes().len(), 1);
    }
}
