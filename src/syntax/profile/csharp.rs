// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::{C_COMMENTS, LanguageProfile};
use crate::syntax::scan::{self, CommentSyntax};
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "base", "bool", "break", "byte", "case", "catch", "char",
    "checked", "class", "const", "continue", "decimal", "default", "delegate", "do", "double",
    "else", "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "get", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "partial", "private", "protected", "public", "readonly", "record", "ref", "return", "sbyte",
    "sealed", "set", "short", "sizeof", "stackalloc", "static", "string", "struct", "switch",
    "this", "throw", "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort",
    "using", "var", "virtual", "void", "volatile", "where", "while", "yield",
];

pub struct CSharpProfile;

pub static CSHARP: CSharpProfile = CSharpProfile;

impl LanguageProfile for CSharpProfile {
    fn name(&self) -> &'static str {
        "csharp"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.quote(true);
        s.line_comments(&["//"]);
        s.block_comments("/*", "*/", true);
        s.keywords(KEYWORDS, true, &['@', '.'], Style::Keyword);
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
