// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::{
    Condition, HeredocSyntax, HeredocTerminator, LanguageProfile, VARIABLE_END,
};
use crate::syntax::scan::{self, CommentSyntax};
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "abstract", "and", "array", "as", "break", "case", "catch", "class", "clone", "const",
    "continue", "declare", "default", "do", "echo", "else", "elseif", "empty", "enum", "extends",
    "false", "final", "finally", "fn", "for", "foreach", "function", "global", "if", "implements",
    "include", "include_once", "instanceof", "interface", "isset", "list", "match", "namespace",
    "new", "null", "or", "print", "private", "protected", "public", "readonly", "require",
    "require_once", "return", "static", "switch", "throw", "trait", "true", "try", "unset", "use",
    "var", "while", "xor", "yield",
];

static HEREDOC: Lazy<HeredocSyntax> = Lazy::new(|| HeredocSyntax {
    opener: Regex::new(
        r#"<<<[ \t]*(?:"(?P<dq>[A-Za-z_]\w*)"|'(?P<sq>[A-Za-z_]\w*)'|(?P<bare>[A-Za-z_]\w*))"#,
    )
    .expect("valid heredoc pattern"),
    terminator: HeredocTerminator::Flexible,
});

static COMMENTS: CommentSyntax = CommentSyntax {
    line: &["//", "#"],
    block: ("/*", "*/"),
    multiline_quotes: true,
    text_blocks: false,
    line_mark: is_comment_mark,
};

/// PHP documents: markup with embedded code once `<?` appears anywhere,
/// plain code otherwise.
pub struct PhpProfile;

pub static PHP: PhpProfile = PhpProfile;

impl LanguageProfile for PhpProfile {
    fn name(&self) -> &'static str {
        "php"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        if s.scope_text().contains("<?") {
            s.markup(true);
        } else {
            s.embed_scope(&PHP_CODE);
        }
    }
}

/// The code between `<?php` and `?>`.
pub struct PhpCodeProfile;

pub static PHP_CODE: PhpCodeProfile = PhpCodeProfile;

impl LanguageProfile for PhpCodeProfile {
    fn name(&self) -> &'static str {
        "php-code"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.map_heredocs();
        s.quote(false);
        s.set_condition(Condition::CommentMark);
        s.line_comments(&["//", "#"]);
        s.block_comments("/*", "*/", true);
        s.keywords(KEYWORDS, true, &['$', '>', ':'], Style::Keyword);
        s.set_condition(Condition::Sigil);
        s.signed_variable('$', VARIABLE_END, &[]);
        s.brackets();
        s.braces();
    }

    fn is_valid(&self, text: &str, pos: usize, condition: Condition) -> bool {
        match condition {
            Condition::CommentMark => is_comment_mark(text, pos),
            Condition::Sigil => {
                scan::char_at(text, pos + 1).is_some_and(|c| c.is_alphabetic() || c == '_')
            }
            Condition::Heredoc => !scan::in_quotes_on_line(text, pos),
            _ => true,
        }
    }

    fn behind_line_cmnt_mark(&self, text: &str, pos: usize) -> Option<usize> {
        scan::behind_mark_on_line_where(text, pos, &["//", "#"], |at| is_comment_mark(text, at))
    }

    fn comment_syntax(&self) -> Option<&CommentSyntax> {
        Some(&COMMENTS)
    }

    fn heredoc_syntax(&self) -> Option<&HeredocSyntax> {
        Some(&HEREDOC)
    }
}

/// `#[Attribute]` is not a comment.
fn is_attribute(text: &str, pos: usize) -> bool {
    text[pos..].starts_with("#[")
}

fn is_comment_mark(text: &str, pos: usize) -> bool {
    !is_attribute(text, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heredoc_opener() {
        let caps = HEREDOC.opener.captures("$x = <<< 'EOT'").unwrap();
        assert_eq!(HEREDOC.tag(&caps), Some(("EOT", false)));
        let caps = HEREDOC.opener.captures("$x = <<<EOT").unwrap();
        assert_eq!(HEREDOC.tag(&caps), Some(("EOT", false)));
    }

    #[test]
    fn test_sigil_needs_a_name() {
        assert!(PHP_CODE.is_valid("$name", 0, Condition::Sigil));
        assert!(PHP_CODE.is_valid("$_x", 0, Condition::Sigil));
        assert!(!PHP_CODE.is_valid("$1", 0, Condition::Sigil));
        assert!(!PHP_CODE.is_valid("$", 0, Condition::Sigil));
    }

    #[test]
    fn test_attributes_are_not_comments() {
        assert!(!PHP_CODE.is_valid("#[Pure] x", 0, Condition::CommentMark));
        assert!(PHP_CODE.is_valid("# note", 0, Condition::CommentMark));
        assert_eq!(PHP_CODE.behind_line_cmnt_mark("#[A] $x; # c", 11), Some(9));
    }

    #[test]
    fn test_heredoc_opener_context() {
        let text = "echo \"use <<<EOT here\"; $x = <<<EOT";
        assert!(!PHP_CODE.is_valid(text, 10, Condition::Heredoc));
        assert!(PHP_CODE.is_valid(text, text.rfind("<<<").unwrap(), Condition::Heredoc));
    }

    #[test]
    fn test_block_comment_marks_in_strings() {
        let text = "$a = \"/*\"; # x /* y\n$b = 1; /* c */";
        assert_eq!(PHP_CODE.in_block_cmnt_marks(text, text.find("$b").unwrap()), None);
        assert_eq!(PHP_CODE.in_block_cmnt_marks(text, text.len() - 3), text.rfind("/*"));
        // An attribute does not start a line comment.
        assert_eq!(PHP_CODE.in_block_cmnt_marks("#[A] /* x */", 7), Some(5));
    }
}
