// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::{C_COMMENTS, LanguageProfile};
use crate::syntax::scan::{self, CommentSyntax};
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for", "from",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var",
    "void", "while", "with", "yield",
];

pub struct JavaScriptProfile;

pub static JAVASCRIPT: JavaScriptProfile = JavaScriptProfile;

impl LanguageProfile for JavaScriptProfile {
    fn name(&self) -> &'static str {
        "javascript"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.quote(true);
        s.line_comments(&["//"]);
        s.block_comments("/*", "*/", true);
        s.keywords(KEYWORDS, true, &['.', '$'], Style::Keyword);
        s.brackets();
        s.braces();
    }

    fn behind_line_cmnt_mark(&self, text: &str, pos: usize) -> Option<usize> {
        scan::behind_mark_on_line(text, pos, &["//"])
    }

    fn comment_syntax(&self) -> Option<&CommentSyntax> {
        Some(&C_COMMENTS)
    }
}
