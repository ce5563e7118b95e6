// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Tags, markup comments and embedded sections.

use std::ops::Range;

use super::SearchPass;
use crate::syntax::color_mapper::Style;
use crate::syntax::intervals::IntervalKind;
use crate::syntax::profile::{CSS, JAVASCRIPT, LanguageProfile, PHP_CODE};

impl SearchPass<'_> {
    /// Highlights HTML (`is_html`) or XML markup: embedded PHP, comments,
    /// embedded scripts and style sheets (HTML only), then tags.
    pub fn markup(&mut self, is_html: bool) {
        if is_html {
            self.inner_section("<?php", "?>", false, &PHP_CODE);
            self.inner_section("<?=", "?>", false, &PHP_CODE);
        }
        self.block_comments("<!--", "-->", false);
        if is_html {
            self.inner_section("<script", "</script", true, &JAVASCRIPT);
            self.inner_section("<style", "</style", true, &CSS);
        }
        self.tags();
    }

    /// Hands every region between `start_tag` and `end_tag` to `profile`.
    ///
    /// With `requires_closing_bracket` the start tag is an element name: it
    /// must be followed by `>` or whitespace, the region starts after the
    /// `>` closing the opening tag and excludes the end tag, which stays
    /// ordinary markup. Without it the region includes both marks, which are
    /// painted as embedded markers. A region never reaches into a later
    /// embedded section.
    pub fn inner_section(
        &mut self,
        start_tag: &str,
        end_tag: &str,
        requires_closing_bracket: bool,
        profile: &'static dyn LanguageProfile,
    ) {
        if self.repair_pending() || start_tag.is_empty() {
            return;
        }
        let text = self.text;
        let bytes = text.as_bytes();
        let hi = self.scope.end;

        let mut pos = self.scope.start;
        while let Some(rel) = text[pos..hi].find(start_tag) {
            let at = pos + rel;
            let after_tag = at + start_tag.len();
            let state = self.state();
            if state.embedded.in_string(at).is_some() || state.block_comments.in_string(at).is_some() {
                pos = after_tag;
                continue;
            }

            let inner_start = if requires_closing_bracket {
                match bytes[..hi].get(after_tag) {
                    Some(b'>') => after_tag + 1,
                    Some(b) if b.is_ascii_whitespace() => tag_end(bytes, after_tag, hi).unwrap_or(hi),
                    _ => {
                        pos = after_tag;
                        continue;
                    }
                }
            } else {
                after_tag
            };
            let limit = self.next_embedded_start(inner_start).unwrap_or(hi);
            let found = text[inner_start..limit].find(end_tag).map(|rel| inner_start + rel);
            let inner_end = found.unwrap_or(limit);

            let region = if requires_closing_bracket {
                inner_start..inner_end
            } else {
                at..found.map_or(inner_end, |end| end + end_tag.len())
            };
            if !region.is_empty() {
                self.state_mut()
                    .embedded
                    .add(region.start, region.end, IntervalKind::Embedded(profile.name()));
            }
            if !requires_closing_bracket {
                self.paint(at, after_tag, Style::EmbeddedMarker);
                if let Some(end) = found {
                    self.paint(end, end + end_tag.len(), Style::EmbeddedMarker);
                }
            }
            self.delegate(profile, inner_start..inner_end);
            pos = region.end.max(after_tag);
        }
    }

    /// Hands the whole scope to `profile` as one embedded section.
    pub fn embed_scope(&mut self, profile: &'static dyn LanguageProfile) {
        if self.repair_pending() {
            return;
        }
        let range = self.scope.clone();
        if !range.is_empty() {
            self.state_mut()
                .embedded
                .add(range.start, range.end, IntervalKind::Embedded(profile.name()));
        }
        self.delegate(profile, range);
    }

    fn next_embedded_start(&self, from: usize) -> Option<usize> {
        let embedded = self.state().embedded.intervals();
        let after = embedded.partition_point(|iv| iv.start < from);
        embedded.get(after).map(|iv| iv.start)
    }

    /// Maps and paints tags: `<` followed by a name character, `/`, `!` or
    /// `?`. Quoted attribute values are mapped separately; a tag ends at `>`
    /// or just before a `<` that does not open an embedded section.
    fn tags(&mut self) {
        if self.repair_pending() {
            return;
        }
        let text = self.text;
        let bytes = text.as_bytes();
        let hi = self.scope.end;

        let mut pos = self.scope.start;
        while let Some(rel) = bytes[pos..hi].iter().position(|&b| b == b'<') {
            let at = pos + rel;
            let state = self.state();
            if let Some(skip) = state.embedded.interval_at(at).or_else(|| state.block_comments.interval_at(at)) {
                pos = skip.end.max(at + 1);
                continue;
            }
            if !bytes.get(at + 1).is_some_and(|&b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?')) {
                pos = at + 1;
                continue;
            }

            let name_start = if bytes[at + 1] == b'/' { at + 2 } else { at + 1 };
            let name_end = name_start
                + bytes[name_start.min(hi)..hi]
                    .iter()
                    .take_while(|&&b| is_name_byte(b) || matches!(b, b'!' | b'?'))
                    .count();

            let mut values: Vec<Range<usize>> = Vec::new();
            let mut end = hi;
            let mut i = name_end;
            while i < hi {
                match bytes[i] {
                    b'>' => {
                        end = i + 1;
                        break;
                    }
                    b'<' => match self.state().embedded.interval_at(i) {
                        Some(embedded) => {
                            i = embedded.end;
                            continue;
                        }
                        None => {
                            end = i;
                            break;
                        }
                    },
                    quote @ (b'"' | b'\'') => {
                        let close = bytes[i + 1..hi]
                            .iter()
                            .position(|&b| b == quote)
                            .map_or(hi, |rel| i + 1 + rel + 1);
                        values.push(i..close);
                        i = close;
                        continue;
                    }
                    _ => {}
                }
                i += 1;
            }

            let state = self.state_mut();
            state.tags.add(at, end, IntervalKind::Tag);
            for value in &values {
                state.attribute_values.add(value.start, value.end, IntervalKind::AttributeValue);
            }
            self.paint_tag(name_start..name_end, name_end..end, &values);
            pos = end.max(at + 1);
        }
    }

    fn paint_tag(&mut self, name: Range<usize>, rest: Range<usize>, values: &[Range<usize>]) {
        self.paint(name.start, name.end, Style::TagName);

        let text = self.text;
        let bytes = text.as_bytes();
        let mut runs: Vec<Range<usize>> = Vec::new();
        let mut values_iter = values.iter().peekable();
        let mut i = rest.start;
        while i < rest.end {
            if let Some(value) = values_iter.peek() {
                if value.start == i {
                    i = value.end;
                    values_iter.next();
                    continue;
                }
            }
            if is_name_byte(bytes[i]) && self.state().embedded.in_string(i).is_none() {
                let run_start = i;
                while i < rest.end && is_name_byte(bytes[i]) {
                    i += 1;
                }
                runs.push(run_start..i);
                continue;
            }
            i += 1;
        }
        for run in runs {
            self.paint(run.start, run.end, Style::Attribute);
        }
        for value in values {
            self.paint_outside_embedded(value.start, value.end, Style::AttributeValue);
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'.' | b'-')
}

/// Offset just past the `>` closing an opening tag, skipping quoted values.
fn tag_end(bytes: &[u8], from: usize, hi: usize) -> Option<usize> {
    let mut i = from;
    while i < hi {
        match bytes[i] {
            b'>' => return Some(i + 1),
            quote @ (b'"' | b'\'') => {
                i += 1 + bytes[i + 1..hi].iter().position(|&b| b == quote)?;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
