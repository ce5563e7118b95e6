// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Strings, comments, heredocs and quote operators.

use super::{MarkFinder, SearchPass};
use crate::syntax::color_mapper::Style;
use crate::syntax::intervals::IntervalKind;
use crate::syntax::profile::Condition;
use crate::syntax::scan::{self, Closing};

impl SearchPass<'_> {
    /// Maps and paints double and single quoted strings of the scope.
    ///
    /// With `single_line_only` an unterminated quote stops at the end of its
    /// line, otherwise it runs to the closing mark or the end of the scope.
    /// Under [`Condition::TextBlock`] a tripled quote the profile accepts
    /// opens a text block that spans lines regardless.
    pub fn quote(&mut self, single_line_only: bool) {
        if self.repair_pending() {
            return;
        }
        let condition = self.take_condition();
        let text = self.text;
        let bytes = text.as_bytes();
        let hi = self.scope.end;
        let bounded = &text[..hi];

        let mut tested = 0;
        let mut accepted = 0;
        let mut kind_changed = false;
        let mut pos = self.scope.start;
        while let Some(rel) = bytes[pos..hi].iter().position(|&b| b == b'"' || b == b'\'') {
            let at = pos + rel;
            tested += 1;
            if scan::is_escaped(text, at)
                || self.state().tracker.in_either_string(at).is_some()
                || self.behind_line_comment(at)
                || self.in_block_comment(at)
            {
                pos = at + 1;
                continue;
            }

            let mark = bytes[at];
            let triple = [mark; 3];
            let text_block = condition == Condition::TextBlock
                && bytes[at..hi].starts_with(&triple)
                && self.valid(at, condition);
            let (end, kind) = if text_block {
                let closing = if mark == b'"' { "\"\"\"" } else { "'''" };
                let end = scan::find_unescaped(bounded, at + 3, closing).map_or(hi, |i| i + 3);
                (end, IntervalKind::TextBlock)
            } else {
                let kind = if mark == b'"' { IntervalKind::Double } else { IntervalKind::Single };
                let end = match scan::find_closing(bounded, at + 1, mark, single_line_only) {
                    Closing::Found(i) => i + 1,
                    Closing::LineEnd(i) => i,
                    Closing::Unterminated => hi,
                };
                (end, kind)
            };

            kind_changed |= self.state().quotes.quote_mark_change(accepted, kind);
            accepted += 1;
            self.state_mut().quotes.add(at, end, kind);
            self.paint(at, end, Style::String);
            pos = end.max(at + 1);
        }

        let size_changed = self.state_mut().quotes.size_change(tested, accepted);
        if self.checks_enabled() && (size_changed || kind_changed) {
            self.request_repair("quote marks changed");
        }
    }

    /// Maps and paints line comments opened by any of `marks`.
    pub fn line_comments(&mut self, marks: &[&str]) {
        if self.repair_pending() {
            return;
        }
        let condition = self.take_condition();
        let text = self.text;
        let hi = self.scope.end;
        let mut finder = MarkFinder::new(marks);

        let mut tested = 0;
        let mut accepted = 0;
        let mut pos = self.scope.start;
        while let Some((at, len)) = finder.find(text, pos, hi) {
            tested += 1;
            let state = self.state();
            if state.quotes.in_string(at).is_some()
                || state.tracker.in_either_string(at).is_some()
                || self.in_block_comment(at)
                || !self.valid(at, condition)
            {
                pos = at + len;
                continue;
            }

            let end = scan::line_end(text, at).min(hi);
            let state = self.state_mut();
            state.line_comments.add(at, end, IntervalKind::LineComment);
            state.line_cmnt_starts.push(at);
            self.paint(at, end, Style::Comment);
            accepted += 1;
            pos = end.max(at + len);
        }

        let size_changed = self.state_mut().line_comments.size_change(tested, accepted);
        if self.checks_enabled() && size_changed {
            self.request_repair("line comments changed");
        }
    }

    /// Maps and paints block comments from `start` to `end`. An unclosed
    /// comment runs to the end of the scope.
    ///
    /// Start marks inside a line comment, heredoc, quote operator, embedded
    /// section or earlier block comment never open a comment; with
    /// `ignore_quoted` neither do marks inside quotes.
    pub fn block_comments(&mut self, start: &str, end: &str, ignore_quoted: bool) {
        if self.repair_pending() {
            return;
        }
        let condition = self.take_condition();
        let text = self.text;
        let hi = self.scope.end;

        let mut pos = self.scope.start;
        while let Some(rel) = text[pos..hi].find(start) {
            let at = pos + rel;
            let body = at + start.len();
            let state = self.state();
            if (ignore_quoted && state.quotes.in_string(at).is_some())
                || state.tracker.in_either_string(at).is_some()
                || state.block_comments.in_string(at).is_some()
                || state.embedded.in_string(at).is_some()
                || self.after_line_comment_start(at)
                || !self.valid(at, condition)
            {
                pos = body;
                continue;
            }

            let close = text[body..hi].find(end).map_or(hi, |rel| body + rel + end.len());
            self.state_mut().block_comments.add(at, close, IntervalKind::BlockComment);
            self.paint(at, close, Style::Comment);
            pos = close.max(body);
        }
    }

    /// Whether a recorded line comment starts before `pos` on its line.
    fn after_line_comment_start(&self, pos: usize) -> bool {
        let starts = &self.state().line_cmnt_starts;
        let before = starts.partition_point(|&s| s <= pos);
        before > 0 && !self.text[starts[before - 1]..pos].contains('\n')
    }

    /// Maps heredocs with the profile's heredoc syntax. The opener token and
    /// the body are registered separately; the body starts on the next line
    /// and ends with its terminator, or with the scope. Openers are checked
    /// with [`Condition::Heredoc`], so a profile can reject one inside a
    /// string.
    pub fn map_heredocs(&mut self) {
        if self.repair_pending() {
            return;
        }
        let profile = self.profile;
        let Some(syntax) = profile.heredoc_syntax() else {
            return;
        };
        let text = self.text;
        let (lo, hi) = (self.scope.start, self.scope.end);
        let scope_text = &text[lo..hi];

        let mut tested = 0;
        let mut from = 0;
        while let Some(caps) = syntax.opener.captures_at(scope_text, from) {
            let Some(whole) = caps.get(0) else { break };
            let at = lo + whole.start();
            let opener_end = lo + whole.end();
            tested += 1;
            let tag = syntax.tag(&caps);
            let Some((tag, indented)) = tag.filter(|_| {
                !self.behind_line_comment(at)
                    && !self.in_block_comment(at)
                    && self.valid(at, Condition::Heredoc)
            }) else {
                from = whole.start() + 1;
                continue;
            };

            let body_start = (scan::line_end(text, opener_end) + 1).min(hi);
            let mut body_end = hi;
            let mut line = body_start;
            while line < hi {
                let line_end = scan::line_end(text, line).min(hi);
                if let Some(off) = syntax.terminator_end(&text[line..line_end], tag, indented) {
                    body_end = line + off;
                    break;
                }
                line = line_end + 1;
            }

            let tracker = &mut self.state_mut().tracker;
            tracker.heredocs_mut().add(at, opener_end, IntervalKind::HeredocTag);
            if body_start < body_end {
                tracker.heredocs_mut().add(body_start, body_end, IntervalKind::Heredoc);
            }
            self.paint(at, opener_end, Style::String);
            self.paint(body_start, body_end, Style::String);
            from = body_end.max(opener_end) - lo;
        }

        let changed = self.state_mut().tracker.heredoc_change(tested);
        if self.checks_enabled() && changed {
            self.request_repair("heredocs changed");
        }
    }

    /// Maps quote operators such as `q(...)`, `qw/.../` or `s{...}{...}`.
    /// Bracket delimiters nest; two-part operators take a second delimited
    /// part.
    pub fn map_quote_operators(&mut self) {
        if self.repair_pending() {
            return;
        }
        let profile = self.profile;
        let Some(syntax) = profile.quote_operator_syntax() else {
            return;
        };
        let text = self.text;
        let bytes = text.as_bytes();
        let (lo, hi) = (self.scope.start, self.scope.end);

        let mut tested = 0;
        let mut pos = lo;
        while pos < hi {
            let at = pos;
            pos += 1;
            if !bytes[at].is_ascii_alphabetic() || (at > lo && is_word_byte(bytes[at - 1])) {
                continue;
            }
            let Some(op) = syntax.operators.iter().find(|op| {
                bytes[at..hi].starts_with(op.as_bytes())
                    && !bytes.get(at + op.len()).is_some_and(|&b| is_word_byte(b))
            }) else {
                continue;
            };
            let Some(open) = delimiter_at(bytes, at + op.len(), hi) else {
                continue;
            };
            tested += 1;
            if self.state().tracker.heredocs().in_string(at).is_some()
                || self.behind_line_comment(at)
                || !self.valid(at, Condition::QuoteOperator)
            {
                pos = at + op.len();
                continue;
            }

            let mut end = delimited_end(bytes, open, hi);
            if syntax.two_part.contains(op) && end < hi {
                end = if closing_of(bytes[open]) != bytes[open] {
                    match delimiter_at(bytes, end, hi) {
                        Some(second) => delimited_end(bytes, second, hi),
                        None => end,
                    }
                } else {
                    delimited_end(bytes, end - 1, hi)
                };
            }

            self.state_mut().tracker.quote_operators_mut().add(at, end, IntervalKind::QuoteOperator);
            self.paint(at, end, Style::String);
            pos = end.max(at + op.len());
        }

        let changed = self.state_mut().tracker.quote_operator_change(tested);
        if self.checks_enabled() && changed {
            self.request_repair("quote operators changed");
        }
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

fn closing_of(open: u8) -> u8 {
    match open {
        b'(' => b')',
        b'[' => b']',
        b'{' => b'}',
        b'<' => b'>',
        other => other,
    }
}

/// Offset of the quote-operator delimiter after optional blanks at `from`.
fn delimiter_at(bytes: &[u8], from: usize, hi: usize) -> Option<usize> {
    let at = from + bytes[from.min(hi)..hi].iter().take_while(|b| matches!(b, b' ' | b'\t')).count();
    let b = *bytes[..hi].get(at)?;
    let usable = b.is_ascii_punctuation()
        && !matches!(b, b'=' | b',' | b';' | b')' | b']' | b'}' | b'>' | b'_');
    usable.then_some(at)
}

/// Offset just past the delimiter closing the part opened at `open`, or `hi`.
fn delimited_end(bytes: &[u8], open: usize, hi: usize) -> usize {
    let opener = bytes[open];
    let closer = closing_of(opener);
    let nests = closer != opener;
    let mut depth = 1;
    let mut i = open + 1;
    while i < hi {
        let b = bytes[i];
        if b == b'\\' {
            i += 2;
            continue;
        }
        if nests && b == opener {
            depth += 1;
        } else if b == closer {
            depth -= 1;
            if depth == 0 {
                return i + 1;
            }
        }
        i += 1;
    }
    hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AttributedBuffer;
    use crate::syntax::intervals::IntervalSet;
    use crate::syntax::profile::{JAVA, LanguageProfile, PERL, PHP, PYTHON};
    use crate::syntax::searcher::SyntaxSearcher;

    fn highlighted(profile: &'static dyn LanguageProfile, text: &str) -> (AttributedBuffer, SyntaxSearcher) {
        let mut doc = AttributedBuffer::new(text);
        let mut searcher = SyntaxSearcher::new();
        searcher.highlight_full(profile, text, &mut doc);
        (doc, searcher)
    }

    fn spans<'t>(set: &IntervalSet, text: &'t str) -> Vec<&'t str> {
        set.intervals().iter().map(|iv| &text[iv.start..iv.end]).collect()
    }

    #[test]
    fn test_comment_marks_inside_strings() {
        let text = "String g = \"**/*.java\";\nString t = \"hi\"; // note\n";
        let (doc, searcher) = highlighted(&JAVA, text);
        assert_eq!(spans(searcher.quotes(), text), vec!["\"**/*.java\"", "\"hi\""]);
        assert_eq!(doc.styled(Style::String), vec!["\"**/*.java\"", "\"hi\""]);
        assert_eq!(doc.styled(Style::Comment), vec!["// note"]);

        let text = "String s = \"/*\";\nint x = 1; /* c */\n";
        let (doc, searcher) = highlighted(&JAVA, text);
        assert_eq!(spans(searcher.block_comments(), text), vec!["/* c */"]);
        assert_eq!(doc.styled(Style::String), vec!["\"/*\""]);
        assert_eq!(doc.styled(Style::Keyword), vec!["int"]);
    }

    #[test]
    fn test_block_mark_inside_line_comment() {
        let text = "// see /*\nString t = \"hi\"; // x\n";
        let (doc, searcher) = highlighted(&JAVA, text);
        assert_eq!(spans(searcher.quotes(), text), vec!["\"hi\""]);
        assert_eq!(doc.styled(Style::Comment), vec!["// see /*", "// x"]);
        assert!(searcher.block_comments().is_empty());
    }

    #[test]
    fn test_quotes_inside_block_comment() {
        let text = "/* it's */ char c = 'x';\n";
        let (doc, searcher) = highlighted(&JAVA, text);
        assert_eq!(spans(searcher.quotes(), text), vec!["'x'"]);
        assert_eq!(doc.styled(Style::Comment), vec!["/* it's */"]);
        assert_eq!(doc.styled(Style::Keyword), vec!["char"]);
    }

    #[test]
    fn test_text_block() {
        let text = "s = '''doc\nif'''\nif x: pass\n";
        let (doc, searcher) = highlighted(&PYTHON, text);
        let kinds: Vec<IntervalKind> = searcher.quotes().intervals().iter().map(|iv| iv.kind).collect();
        assert_eq!(kinds, vec![IntervalKind::TextBlock]);
        assert_eq!(doc.styled(Style::String), vec!["'''doc\nif'''"]);
        assert_eq!(doc.styled(Style::Keyword), vec!["if", "pass"]);
    }

    #[test]
    fn test_heredoc_opener_inside_string() {
        let text = "<?php\necho \"use <<<EOT here\";\nif ($y) { return 1; }\n?>\n";
        let (doc, _) = highlighted(&PHP, text);
        assert_eq!(doc.styled(Style::String), vec!["\"use <<<EOT here\""]);
        assert_eq!(doc.styled(Style::Keyword), vec!["echo", "if", "return"]);

        let text = "print \"a <<EOT\";\nmy $v = 1;\n";
        let (doc, searcher) = highlighted(&PERL, text);
        assert!(searcher.tracker().heredocs().is_empty());
        assert_eq!(doc.styled(Style::Keyword), vec!["print", "my"]);
        assert_eq!(doc.styled(Style::Variable), vec!["$v"]);
    }

    #[test]
    fn test_quote_operators() {
        let text = "s{a}{b}; my @w = qw(if my); tr/a/b/;\n";
        let (doc, searcher) = highlighted(&PERL, text);
        let mapped = spans(searcher.tracker().quote_operators(), text);
        assert_eq!(mapped, vec!["s{a}{b}", "qw(if my)", "tr/a/b/"]);
        assert_eq!(doc.styled(Style::String), mapped);
        assert_eq!(doc.styled(Style::Keyword), vec!["my"]);
        assert_eq!(doc.styled(Style::Variable), vec!["@w"]);
    }

    #[test]
    fn test_delimiters() {
        let bytes = b"q {a {b} c} x";
        assert_eq!(delimiter_at(bytes, 1, bytes.len()), Some(2));
        assert_eq!(delimited_end(bytes, 2, bytes.len()), 11);

        let bytes = b"y => 1";
        assert_eq!(delimiter_at(bytes, 1, bytes.len()), None);

        let bytes = b"s/a\\/b/c/";
        assert_eq!(delimited_end(bytes, 1, bytes.len()), 7);
        assert_eq!(delimited_end(bytes, 6, bytes.len()), 9);
    }
}
