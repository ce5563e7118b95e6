// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::{Condition, LanguageProfile};
use crate::syntax::scan::{self, CommentSyntax};
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "permits", "private", "protected", "public", "record",
    "return", "sealed", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "var", "void", "volatile", "while", "yield",
];

static COMMENTS: CommentSyntax = CommentSyntax {
    line: &["//"],
    block: ("/*", "*/"),
    multiline_quotes: false,
    text_blocks: true,
    line_mark: scan::any_mark,
};

pub struct JavaProfile;

pub static JAVA: JavaProfile = JavaProfile;

impl LanguageProfile for JavaProfile {
    fn name(&self) -> &'static str {
        "java"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.set_condition(Condition::TextBlock);
        s.quote(true);
        s.line_comments(&["//"]);
        s.block_comments("/*", "*/", true);
        s.keywords(KEYWORDS, true, &['@'], Style::Keyword);
        s.brackets();
        s.braces();
    }

    /// A text block opener must be the last thing on its line.
    fn is_valid(&self, text: &str, pos: usize, condition: Condition) -> bool {
        if condition != Condition::TextBlock || !text[pos..].starts_with("\"\"\"") {
            return true;
        }
        let rest = &text[pos + 3..];
        rest.find('\n').is_some_and(|eol| rest[..eol].trim().is_empty())
    }

    fn behind_line_cmnt_mark(&self, text: &str, pos: usize) -> Option<usize> {
        scan::behind_mark_on_line(text, pos, &["//"])
    }

    fn comment_syntax(&self) -> Option<&CommentSyntax> {
        Some(&COMMENTS)
    }
}
