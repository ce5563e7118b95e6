// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Keywords, variables and brackets. These never span lines, so they are
//! only looked for inside the section.

use super::SearchPass;
use crate::syntax::color_mapper::Style;
use crate::syntax::intervals::IntervalKind;
use crate::syntax::profile::Condition;
use crate::syntax::scan;

impl SearchPass<'_> {
    /// Paints every occurrence of `words` outside strings and comments.
    ///
    /// With `require_word` a match must not touch a word character on
    /// either side. A match preceded by one of `non_start` is skipped.
    pub fn keywords(&mut self, words: &[&str], require_word: bool, non_start: &[char], style: Style) {
        if self.repair_pending() {
            return;
        }
        let condition = self.take_condition();
        for word in words {
            self.find_tokens(word, condition, |text, at| {
                let end = at + word.len();
                let bounded = !require_word
                    || (!scan::char_before(text, at).is_some_and(scan::is_word_char)
                        && !scan::char_at(text, end).is_some_and(scan::is_word_char));
                let allowed = !scan::char_before(text, at).is_some_and(|c| non_start.contains(&c));
                (bounded && allowed).then_some(end)
            }, style);
        }
    }

    /// Paints a single keyword; see [`keywords`](Self::keywords).
    pub fn keyword(&mut self, word: &str, require_word: bool, non_start: &[char], style: Style) {
        self.keywords(&[word], require_word, non_start, style);
    }

    /// Paints `base` followed by the longest of `suffixes` that matches, as
    /// one token (`border` + `-top-width`). Hyphens count as word characters
    /// for the boundary checks, and a base right after a `.` or `#` selector
    /// mark is skipped.
    pub fn extensible_keyword(&mut self, base: &str, suffixes: &[&str], style: Style) {
        if self.repair_pending() {
            return;
        }
        let condition = self.take_condition();
        let is_part = |c: char| scan::is_word_char(c) || c == '-';
        self.find_tokens(base, condition, |text, at| {
            if scan::char_before(text, at).is_some_and(|c| is_part(c) || c == '.' || c == '#') {
                return None;
            }
            let after_base = at + base.len();
            let suffix_len = suffixes
                .iter()
                .filter(|s| text[after_base..].starts_with(**s))
                .map(|s| s.len())
                .max()
                .unwrap_or(0);
            let end = after_base + suffix_len;
            (!scan::char_at(text, end).is_some_and(is_part)).then_some(end)
        }, style);
    }

    /// Paints variables introduced by `sign` up to one of `end_chars` or
    /// whitespace. A sign followed by whitespace or one of
    /// `exception_successors` is not a variable. A `#` right after the sign
    /// is part of the name (`$#array`). Variables are left alone in
    /// comments and single-quoted strings only, since double quotes and
    /// heredocs interpolate them.
    pub fn signed_variable(&mut self, sign: char, end_chars: &[char], exception_successors: &[char]) {
        if self.repair_pending() {
            return;
        }
        let condition = self.take_condition();
        let text = self.text;
        let range = self.token_range();

        let mut pos = range.start;
        while let Some(rel) = text[pos..range.end].find(sign) {
            let at = pos + rel;
            let name_start = at + sign.len_utf8();
            pos = name_start;
            let Some(next) = scan::char_at(text, name_start) else { continue };
            if next.is_whitespace() || exception_successors.contains(&next) {
                continue;
            }
            let state = self.state();
            let single_quoted = state
                .quotes
                .interval_at(at)
                .is_some_and(|iv| iv.kind == IntervalKind::Single);
            if single_quoted || state.in_comment(at) || !self.valid(at, condition) {
                continue;
            }
            let name_from = if next == '#' { name_start + 1 } else { name_start };
            let end = text[name_from..range.end]
                .find(|c: char| c.is_whitespace() || end_chars.contains(&c))
                .map_or(range.end, |rel| name_from + rel);
            if end > name_from {
                self.paint(at, end, Style::Variable);
                pos = end;
            }
        }
    }

    /// Paints parentheses and square brackets outside strings and comments.
    pub fn brackets(&mut self) {
        self.paint_marks(b"()[]", Style::Bracket);
    }

    /// Paints curly braces outside strings and comments.
    pub fn braces(&mut self) {
        self.paint_marks(b"{}", Style::Brace);
    }

    fn paint_marks(&mut self, marks: &[u8], style: Style) {
        if self.repair_pending() {
            return;
        }
        let range = self.token_range();
        let hits: Vec<usize> = self.text.as_bytes()[range.clone()]
            .iter()
            .enumerate()
            .filter(|(_, b)| marks.contains(b))
            .map(|(i, _)| range.start + i)
            .filter(|&at| !self.state().in_literal(at))
            .collect();
        for at in hits {
            self.paint(at, at + 1, style);
        }
    }

    /// Finds `needle` in the token range and paints the matches `accept`
    /// turns into a token end, unless they start inside a literal or the
    /// profile rejects them.
    fn find_tokens(
        &mut self,
        needle: &str,
        condition: Condition,
        accept: impl Fn(&str, usize) -> Option<usize>,
        style: Style,
    ) {
        if needle.is_empty() {
            return;
        }
        let text = self.text;
        let range = self.token_range();
        let mut pos = range.start;
        while let Some(rel) = text[pos..range.end].find(needle) {
            let at = pos + rel;
            pos = scan::next_boundary(text, at);
            let Some(end) = accept(text, at) else { continue };
            if self.state().in_literal(at) || !self.valid(at, condition) {
                continue;
            }
            self.paint(at, end, style);
        }
    }
}
