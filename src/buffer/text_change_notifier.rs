// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Edit notifications sent by the text buffer after each modification.
//!
//! The highlighter turns a notification into the byte range of the current
//! document that the edit touched; the section re-lexed after the edit is
//! the full lines around that range.

use std::ops::Range;

/// What the buffer reports after a modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditNotification {
    /// Something changed at `pos`; the size of the change is the difference
    /// between the previous and the current document length.
    Changed { pos: usize, newline_inserted: bool },
    /// `text` was inserted at `pos`.
    Inserted { text: String, pos: usize },
    /// `len` bytes were removed at `pos`.
    Removed { pos: usize, len: usize },
}

impl EditNotification {
    pub fn changed(pos: usize, newline_inserted: bool) -> Self {
        Self::Changed { pos, newline_inserted }
    }

    pub fn inserted(pos: usize, text: &str) -> Self {
        Self::Inserted { text: text.to_owned(), pos }
    }

    pub fn removed(pos: usize, len: usize) -> Self {
        Self::Removed { pos, len }
    }

    /// Position the edit happened at.
    pub fn position(&self) -> usize {
        match *self {
            Self::Changed { pos, .. } | Self::Inserted { pos, .. } | Self::Removed { pos, .. } => pos,
        }
    }

    /// The range of `doc` written by the edit (empty for a removal), given
    /// the document length before the edit.
    ///
    /// Returns `None` when the notification cannot describe the change from
    /// `old_len` to the current length: a position past the end or inside a
    /// character, or a length that does not add up.
    pub fn edited_range(&self, doc: &str, old_len: usize) -> Option<Range<usize>> {
        let new_len = doc.len();
        let range = match self {
            Self::Changed { pos, newline_inserted } => {
                let grown = new_len.saturating_sub(old_len);
                // The line before a fresh line break belongs to the edit too.
                let start = if *newline_inserted { pos.saturating_sub(1) } else { *pos };
                if new_len < old_len && pos + (old_len - new_len) > old_len {
                    return None;
                }
                start..pos + grown
            }
            Self::Inserted { text, pos } => {
                if old_len + text.len() != new_len || doc.get(*pos..pos + text.len()) != Some(text.as_str()) {
                    return None;
                }
                *pos..pos + text.len()
            }
            Self::Removed { pos, len } => {
                if new_len + len != old_len {
                    return None;
                }
                *pos..*pos
            }
        };
        let on_boundaries = range.end <= new_len
            && doc.is_char_boundary(range.start)
            && doc.is_char_boundary(range.end);
        on_boundaries.then_some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserted_range() {
        let notif = EditNotification::inserted(2, "xy");
        assert_eq!(notif.position(), 2);
        assert_eq!(notif.edited_range("abxycd", 4), Some(2..4));
        assert_eq!(notif.edited_range("abxycd", 5), None);
        assert_eq!(notif.edited_range("abzzcd", 4), None);
    }

    #[test]
    fn test_removed_range() {
        let notif = EditNotification::removed(1, 2);
        assert_eq!(notif.edited_range("ad", 4), Some(1..1));
        assert_eq!(notif.edited_range("ad", 3), None);
        assert_eq!(EditNotification::removed(5, 1).edited_range("ad", 3), None);
    }

    #[test]
    fn test_changed_range() {
        assert_eq!(EditNotification::changed(1, false).edited_range("abcd", 2), Some(1..3));
        assert_eq!(EditNotification::changed(3, true).edited_range("ab\n\ncd", 5), Some(2..4));
        assert_eq!(EditNotification::changed(1, false).edited_range("ab", 4), Some(1..1));
        assert_eq!(EditNotification::changed(3, false).edited_range("ab", 4), None);
    }

    #[test]
    fn test_range_must_fall_on_char_boundaries() {
        assert_eq!(EditNotification::changed(1, false).edited_range("é", 2), None);
    }
}
