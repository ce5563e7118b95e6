// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The text buffer seam.
//!
//! The engine never owns or edits text. It reads the document through
//! [`StyledDocument`] and paints styles back through it. [`AttributedBuffer`]
//! is the in-memory implementation used by the tests, the benchmark and the
//! baseline binary.

pub mod text_change_notifier;

use std::ops::Range;

use crate::syntax::color_mapper::{ColorMapper, Style};

pub use text_change_notifier::EditNotification;

/// Editable text that accepts style requests over byte ranges.
pub trait StyledDocument {
    /// The current document text.
    fn text(&self) -> &str;

    /// Paints `style` over `len` bytes from `start`.
    fn set_attributes(&mut self, start: usize, len: usize, style: Style);

    /// Clears the styles of `len` bytes from `start` back to plain text.
    fn reset_attributes(&mut self, start: usize, len: usize);
}

/// A string with one style per byte.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributedBuffer {
    text: String,
    styles: Vec<Style>,
}

impl AttributedBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let styles = vec![Style::Plain; text.len()];
        Self { text, styles }
    }

    /// Inserts `s` at `pos` and returns the matching notification. Inserted
    /// bytes start out plain; styles after `pos` move along.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not a char boundary of the text.
    pub fn insert(&mut self, pos: usize, s: &str) -> EditNotification {
        self.text.insert_str(pos, s);
        self.styles.splice(pos..pos, std::iter::repeat_n(Style::Plain, s.len()));
        EditNotification::inserted(pos, s)
    }

    /// Removes `len` bytes at `pos` and returns the matching notification.
    ///
    /// # Panics
    ///
    /// Panics if the range does not fall on char boundaries of the text.
    pub fn remove(&mut self, pos: usize, len: usize) -> EditNotification {
        self.text.replace_range(pos..pos + len, "");
        self.styles.drain(pos..pos + len);
        EditNotification::removed(pos, len)
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn style_at(&self, pos: usize) -> Style {
        self.styles.get(pos).copied().unwrap_or_default()
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Maximal runs of equal style, in document order.
    pub fn style_runs(&self) -> Vec<(Range<usize>, Style)> {
        let mut runs: Vec<(Range<usize>, Style)> = Vec::new();
        for (pos, &style) in self.styles.iter().enumerate() {
            match runs.last_mut() {
                Some((range, last)) if *last == style => range.end = pos + 1,
                _ => runs.push((pos..pos + 1, style)),
            }
        }
        runs
    }

    /// The text of every run painted with `style`.
    pub fn styled(&self, style: Style) -> Vec<&str> {
        self.style_runs()
            .into_iter()
            .filter(|(_, s)| *s == style)
            .map(|(range, _)| &self.text[range])
            .collect()
    }

    /// Renders the text with ANSI foreground colors.
    pub fn render_ansi(&self, mapper: &ColorMapper) -> String {
        let mut out = String::with_capacity(self.text.len() * 2);
        for (range, style) in self.style_runs() {
            let text = &self.text[range];
            if style == Style::Plain {
                out.push_str(text);
            } else {
                out.push_str(&format!("\x1b[{}m{text}\x1b[0m", mapper.get_color(style).ansi_code()));
            }
        }
        out
    }
}

impl StyledDocument for AttributedBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_attributes(&mut self, start: usize, len: usize, style: Style) {
        let end = (start + len).min(self.styles.len());
        if let Some(slots) = self.styles.get_mut(start.min(end)..end) {
            slots.fill(style);
        }
    }

    fn reset_attributes(&mut self, start: usize, len: usize) {
        self.set_attributes(start, len, Style::Plain);
    }
}
