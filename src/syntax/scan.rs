// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Small text scanning helpers shared by the searcher and the profiles.
//!
//! All positions are byte offsets. Every delimiter the engine looks for is
//! ASCII, so byte-wise scanning can never land inside a multi-byte character
//! on a match.

/// Letters, digits and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn char_before(text: &str, pos: usize) -> Option<char> {
    text.get(..pos)?.chars().next_back()
}

pub fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..)?.chars().next()
}

/// Offset just past the character at `pos`.
pub fn next_boundary(text: &str, pos: usize) -> usize {
    char_at(text, pos).map_or(pos + 1, |c| pos + c.len_utf8())
}

/// Start of the line containing `pos`.
pub fn line_start(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos.min(text.len())]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1)
}

/// Offset of the newline ending the line containing `pos`, or the text length.
pub fn line_end(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text.as_bytes()[pos..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(text.len(), |i| pos + i)
}

/// Whether the character at `pos` is preceded by an odd number of backslashes.
pub fn is_escaped(text: &str, pos: usize) -> bool {
    let backslashes = text.as_bytes()[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();
    backslashes % 2 == 1
}

/// Where a search for a closing quote stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closing {
    /// The closing mark was found at this offset.
    Found(usize),
    /// A single-line search hit the newline at this offset first.
    LineEnd(usize),
    /// The text ended without a closing mark.
    Unterminated,
}

/// Finds the next unescaped `mark` at or after `from`.
pub fn find_closing(text: &str, from: usize, mark: u8, single_line: bool) -> Closing {
    let bytes = text.as_bytes();
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b if b == mark => return Closing::Found(i),
            b'\n' if single_line => return Closing::LineEnd(i),
            _ => {}
        }
        i += 1;
    }
    Closing::Unterminated
}

/// Finds the next occurrence of `pat` at or after `from` that is not
/// preceded by an escaping backslash.
pub fn find_unescaped(text: &str, from: usize, pat: &str) -> Option<usize> {
    let mut cursor = from;
    while let Some(rel) = text.get(cursor..)?.find(pat) {
        let idx = cursor + rel;
        if !is_escaped(text, idx) {
            return Some(idx);
        }
        cursor = idx + 1;
    }
    None
}

/// Reports the first of `marks` that occurs unquoted on the line before
/// `pos`. Quotes are tracked with a plain double/single toggle, which is
/// what a line comment check needs when the strings of the line have not
/// been mapped yet.
pub fn behind_mark_on_line(text: &str, pos: usize, marks: &[&str]) -> Option<usize> {
    behind_mark_on_line_where(text, pos, marks, |_| true)
}

/// Like [`behind_mark_on_line`], but only marks at offsets `accept` agrees
/// with count (`$#array` is not a Perl comment).
pub fn behind_mark_on_line_where(
    text: &str,
    pos: usize,
    marks: &[&str],
    accept: impl Fn(usize) -> bool,
) -> Option<usize> {
    let bytes = text.as_bytes();
    let pos = pos.min(bytes.len());
    let mut quote: Option<u8> = None;
    let mut i = line_start(text, pos);
    while i < pos {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 2;
                continue;
            }
            if b == q {
                quote = None;
            }
        } else if b == b'"' || b == b'\'' {
            quote = Some(b);
        } else if marks.iter().any(|m| bytes[i..].starts_with(m.as_bytes())) && accept(i) {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// Whether `pos` lies inside a quote opened earlier on its line.
pub fn in_quotes_on_line(text: &str, pos: usize) -> bool {
    let bytes = text.as_bytes();
    let pos = pos.min(bytes.len());
    let mut quote: Option<u8> = None;
    let mut i = line_start(text, pos);
    while i < pos {
        match (quote, bytes[i]) {
            (Some(_), b'\\') => i += 1,
            (Some(q), b) if b == q => quote = None,
            (None, b @ (b'"' | b'\'')) => quote = Some(b),
            _ => {}
        }
        i += 1;
    }
    quote.is_some()
}

/// Comment and quote rules of a C-style language, as far as a
/// [`CommentCursor`] needs them.
#[derive(Debug)]
pub struct CommentSyntax {
    /// Line comment marks.
    pub line: &'static [&'static str],
    /// Block comment start and end marks.
    pub block: (&'static str, &'static str),
    /// Whether an unclosed quote continues on the next line.
    pub multiline_quotes: bool,
    /// Whether tripled quotes open a block that ends at the next triple.
    pub text_blocks: bool,
    /// Accepts or rejects a line comment mark at an offset (`#[` is a PHP
    /// attribute).
    pub line_mark: fn(&str, usize) -> bool,
}

/// Line mark filter accepting every mark.
pub fn any_mark(_text: &str, _pos: usize) -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    Quote(u8),
    TextBlock(u8),
    LineComment,
    /// Block comment starting at this offset.
    BlockComment(usize),
}

/// Forward scanner telling whether offsets lie inside a block comment.
///
/// It lexes from its start offset, following quotes and line comments, so a
/// start mark inside a string or a line comment does not open a comment.
/// Queries at non-decreasing offsets continue where the previous one
/// stopped; an earlier offset restarts the scan.
#[derive(Debug)]
pub struct CommentCursor<'a> {
    text: &'a str,
    syntax: &'a CommentSyntax,
    start: usize,
    pos: usize,
    state: Lexeme,
}

impl<'a> CommentCursor<'a> {
    pub fn new(text: &'a str, start: usize, syntax: &'a CommentSyntax) -> Self {
        let start = start.min(text.len());
        Self { text, syntax, start, pos: start, state: Lexeme::Code }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn syntax(&self) -> &'a CommentSyntax {
        self.syntax
    }

    /// Start of the block comment the byte at `target` belongs to. The
    /// start and end marks count as part of the comment.
    pub fn block_comment_at(&mut self, target: usize) -> Option<usize> {
        if target < self.start {
            return None;
        }
        if target < self.pos {
            self.pos = self.start;
            self.state = Lexeme::Code;
        }
        loop {
            if self.pos >= self.text.len() {
                return match self.state {
                    Lexeme::BlockComment(start) => Some(start),
                    _ => None,
                };
            }
            let (len, next, owner) = self.step();
            let len = len.min(self.text.len() - self.pos);
            if self.pos + len > target {
                return owner;
            }
            self.pos += len;
            self.state = next;
        }
    }

    /// Length, following state and owning block comment of the token at
    /// the current offset.
    fn step(&self) -> (usize, Lexeme, Option<usize>) {
        let bytes = self.text.as_bytes();
        let at = self.pos;
        let rest = &bytes[at..];
        let (open, close) = self.syntax.block;
        match self.state {
            Lexeme::BlockComment(start) if rest.starts_with(close.as_bytes()) => {
                (close.len(), Lexeme::Code, Some(start))
            }
            Lexeme::BlockComment(start) => (1, self.state, Some(start)),
            Lexeme::LineComment if rest[0] == b'\n' => (1, Lexeme::Code, None),
            Lexeme::LineComment => (1, self.state, None),
            Lexeme::Quote(_) | Lexeme::TextBlock(_) if rest[0] == b'\\' => (2, self.state, None),
            Lexeme::Quote(q) if rest[0] == q => (1, Lexeme::Code, None),
            Lexeme::Quote(_) if rest[0] == b'\n' && !self.syntax.multiline_quotes => (1, Lexeme::Code, None),
            Lexeme::Quote(_) => (1, self.state, None),
            Lexeme::TextBlock(q) if rest.starts_with(&[q; 3]) => (3, Lexeme::Code, None),
            Lexeme::TextBlock(_) => (1, self.state, None),
            Lexeme::Code => {
                if rest.starts_with(open.as_bytes()) {
                    return (open.len(), Lexeme::BlockComment(at), Some(at));
                }
                let line_mark = self.syntax.line.iter().find(|m| rest.starts_with(m.as_bytes()));
                if let Some(mark) = line_mark.filter(|_| (self.syntax.line_mark)(self.text, at)) {
                    return (mark.len(), Lexeme::LineComment, None);
                }
                match rest[0] {
                    q @ (b'"' | b'\'') if self.syntax.text_blocks && rest.starts_with(&[q; 3]) => {
                        (3, Lexeme::TextBlock(q), None)
                    }
                    q @ (b'"' | b'\'') => (1, Lexeme::Quote(q), None),
                    _ => (1, Lexeme::Code, None),
                }
            }
        }
    }
}
