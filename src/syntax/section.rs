// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The range of a document re-lexed by one highlighting pass.

use std::ops::Range;

use crate::syntax::scan;

/// A substring of the document plus its absolute start offset.
///
/// Sections built by the controller always cover whole lines, so a token
/// that cannot contain a newline never straddles a section boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> Section<'a> {
    pub fn new(text: &'a str, start: usize) -> Self {
        Self { text, start }
    }

    /// The whole document.
    pub fn whole(doc: &'a str) -> Self {
        Self { text: doc, start: 0 }
    }

    /// The full lines of `doc` touched by the range `from..=to`.
    pub fn lines(doc: &'a str, from: usize, to: usize) -> Self {
        let start = scan::line_start(doc, from.min(doc.len()));
        let end = scan::line_end(doc, to.max(from).min(doc.len()));
        Self { text: &doc[start..end], start }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Whether this section spans all of `doc`.
    pub fn is_whole(&self, doc: &str) -> bool {
        self.start == 0 && self.text.len() == doc.len()
    }
}

/// Maps the previous pass's document onto the current one around an edit.
///
/// Text before `section_start` is unchanged; text at or after
/// `old_section_end` in the previous document reappears at `section_end`
/// in the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditWindow {
    pub section_start: usize,
    pub section_end: usize,
    pub old_section_end: usize,
}

impl EditWindow {
    /// Builds the window for a section of the edited document, given the
    /// previous and current document lengths.
    ///
    /// Returns `None` when the lengths cannot describe an edit confined to
    /// the section.
    pub fn new(section: &Section<'_>, old_len: usize, new_len: usize) -> Option<Self> {
        let tail = new_len.checked_sub(section.end())?;
        let old_section_end = old_len.checked_sub(tail)?;
        if old_section_end < section.start() {
            return None;
        }
        Some(Self {
            section_start: section.start(),
            section_end: section.end(),
            old_section_end,
        })
    }

    /// Translates a previous-document offset at or after `old_section_end`.
    pub fn shift(&self, old_pos: usize) -> usize {
        old_pos - self.old_section_end + self.section_end
    }
}
