// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-language lexical profiles.
//!
//! A profile is a fixed strategy: `highlight` calls the searcher's
//! primitives in an order where earlier side effects are visible to later
//! calls. Heredoc and quote-operator mapping come before quotes, quotes
//! before comments, and comments before anything that must not color
//! commented text. Breaking that order gives wrong containment answers, not
//! merely different colors.

mod csharp;
mod css;
mod html;
mod java;
mod javascript;
mod perl;
mod php;
mod python;
mod r;
mod xml;

use regex::{Captures, Regex};

use crate::syntax::language::Language;
use crate::syntax::scan;
use crate::syntax::searcher::SearchPass;

pub use csharp::CSHARP;
pub use css::CSS;
pub use html::HTML;
pub use java::JAVA;
pub use javascript::JAVASCRIPT;
pub use perl::PERL;
pub use php::{PHP, PHP_CODE};
pub use python::PYTHON;
pub use r::R;
pub use xml::XML;

/// Extra context a profile attaches to the next primitive call.
///
/// The searcher hands the tag back to [`LanguageProfile::is_valid`] for each
/// candidate it locates, then clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Condition {
    #[default]
    None,
    /// A tripled quote may open a multi-line text block.
    TextBlock,
    /// A sign character must introduce a variable name.
    Sigil,
    /// A line comment mark must really start a comment.
    CommentMark,
    /// The match must sit at the start of a line.
    LineStart,
    /// Set by the searcher while mapping heredoc openers.
    Heredoc,
    /// Set by the searcher while mapping quote operators.
    QuoteOperator,
}

/// How a heredoc body is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeredocTerminator {
    /// A line consisting of the tag alone (leading whitespace allowed when
    /// the opener asked for an indented heredoc).
    ExactLine,
    /// A line whose first non-blank word is the tag.
    Flexible,
}

/// Heredoc opener and terminator rules of a language.
///
/// `opener` must capture the tag in one of the groups `dq`, `sq` or `bare`
/// and may capture an `indent` flag.
#[derive(Debug)]
pub struct HeredocSyntax {
    pub opener: Regex,
    pub terminator: HeredocTerminator,
}

impl HeredocSyntax {
    /// Tag name and indentation flag of an opener match.
    pub fn tag<'t>(&self, caps: &Captures<'t>) -> Option<(&'t str, bool)> {
        let tag = caps
            .name("dq")
            .or_else(|| caps.name("sq"))
            .or_else(|| caps.name("bare"))?;
        Some((tag.as_str(), caps.name("indent").is_some()))
    }

    /// If `line` closes a heredoc tagged `tag`, the offset within the line
    /// just past the tag.
    pub fn terminator_end(&self, line: &str, tag: &str, indented: bool) -> Option<usize> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        match self.terminator {
            HeredocTerminator::ExactLine => {
                let body = if indented { line.trim_start() } else { line };
                (body == tag).then_some(line.len())
            }
            HeredocTerminator::Flexible => {
                let trimmed = line.trim_start();
                let lead = line.len() - trimmed.len();
                let rest = trimmed.strip_prefix(tag)?;
                let continues_word = rest.chars().next().is_some_and(scan::is_word_char);
                (!continues_word).then_some(lead + tag.len())
            }
        }
    }
}

/// Quote-operator keywords of a language (`q//`, `qq{}`, `s///`, ...).
#[derive(Debug)]
pub struct QuoteOperatorSyntax {
    /// Operators, longest first so `qq` wins over `q`.
    pub operators: &'static [&'static str],
    /// Operators followed by two delimited parts (`s/a/b/`, `tr/a/b/`).
    pub two_part: &'static [&'static str],
}

/// A language's lexical strategy.
pub trait LanguageProfile: Sync {
    /// Short identifier, also used to tag embedded sections.
    fn name(&self) -> &'static str;

    /// Runs this language's primitives, in order, for one pass.
    fn highlight(&self, s: &mut SearchPass<'_>);

    /// Accepts or rejects a candidate the searcher located at `pos`.
    fn is_valid(&self, _text: &str, _pos: usize, _condition: Condition) -> bool {
        true
    }

    /// Start of the line comment `pos` is already in, if any.
    fn behind_line_cmnt_mark(&self, _text: &str, _pos: usize) -> Option<usize> {
        None
    }

    /// Comment and quote rules used to tell whether an offset lies in a
    /// block comment. Languages without block comments return `None`.
    fn comment_syntax(&self) -> Option<&scan::CommentSyntax> {
        None
    }

    /// Start of the block comment `pos` is already in, if any. Start marks
    /// inside strings and line comments do not count.
    fn in_block_cmnt_marks(&self, text: &str, pos: usize) -> Option<usize> {
        let syntax = self.comment_syntax()?;
        scan::CommentCursor::new(text, 0, syntax).block_comment_at(pos)
    }

    fn heredoc_syntax(&self) -> Option<&HeredocSyntax> {
        None
    }

    fn quote_operator_syntax(&self) -> Option<&QuoteOperatorSyntax> {
        None
    }
}

impl std::fmt::Debug for dyn LanguageProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LanguageProfile({})", self.name())
    }
}

/// The profile selected for a document language, if it gets highlighted.
pub fn profile_for(language: Language) -> Option<&'static dyn LanguageProfile> {
    let profile: &'static dyn LanguageProfile = match language {
        Language::Java => &JAVA,
        Language::CSharp => &CSHARP,
        Language::Html => &HTML,
        Language::Css => &CSS,
        Language::JavaScript => &JAVASCRIPT,
        Language::Php => &PHP,
        Language::Perl => &PERL,
        Language::Python => &PYTHON,
        Language::Xml => &XML,
        Language::R => &R,
        Language::PlainText => return None,
    };
    Some(profile)
}

/// `//` and `/* */` comments with single-line quotes.
pub(crate) static C_COMMENTS: scan::CommentSyntax = scan::CommentSyntax {
    line: &["//"],
    block: ("/*", "*/"),
    multiline_quotes: false,
    text_blocks: false,
    line_mark: scan::any_mark,
};

/// Characters ending a sigil variable such as `$name` or `@list`.
pub(crate) const VARIABLE_END: &[char] = &[
    ';', ',', '.', '(', ')', '[', ']', '{', '}', '=', '+', '-', '*', '/', '"', '\'', '<', '>', '!', '?',
    ':', '|', '&', '\\', '~', '^', '#',
];

/// `true` when `pos` starts a line.
pub(crate) fn at_line_start(text: &str, pos: usize) -> bool {
    pos == 0 || text.as_bytes().get(pos - 1) == Some(&b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_highlighted_language_has_a_profile() {
        for language in Language::ALL {
            assert_eq!(profile_for(language).is_some(), language.is_highlighted(), "{language}");
        }
        assert_eq!(profile_for(Language::Php).unwrap().name(), "php");
    }

    #[test]
    fn test_exact_line_terminator() {
        let syntax = HeredocSyntax {
            opener: Regex::new(r"<<(?P<bare>\w+)").unwrap(),
            terminator: HeredocTerminator::ExactLine,
        };
        assert_eq!(syntax.terminator_end("EOT", "EOT", false), Some(3));
        assert_eq!(syntax.terminator_end("EOT\r", "EOT", false), Some(3));
        assert_eq!(syntax.terminator_end("  EOT", "EOT", false), None);
        assert_eq!(syntax.terminator_end("  EOT", "EOT", true), Some(5));
        assert_eq!(syntax.terminator_end("EOTX", "EOT", false), None);
    }

    #[test]
    fn test_flexible_terminator() {
        let syntax = HeredocSyntax {
            opener: Regex::new(r"<<<(?P<bare>\w+)").unwrap(),
            terminator: HeredocTerminator::Flexible,
        };
        assert_eq!(syntax.terminator_end("EOT;", "EOT", false), Some(3));
        assert_eq!(syntax.terminator_end("    EOT, 2);", "EOT", false), Some(7));
        assert_eq!(syntax.terminator_end("EOTS;", "EOT", false), None);
    }
}
