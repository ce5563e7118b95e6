// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::{Condition, LanguageProfile};
use crate::syntax::scan;
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "self",
    "try", "while", "with", "yield",
];

pub struct PythonProfile;

pub static PYTHON: PythonProfile = PythonProfile;

impl LanguageProfile for PythonProfile {
    fn name(&self) -> &'static str {
        "python"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.set_condition(Condition::TextBlock);
        s.quote(true);
        s.line_comments(&["#"]);
        s.keywords(KEYWORDS, true, &['.'], Style::Keyword);
        s.brackets();
        s.braces();
    }

    fn behind_line_cmnt_mark(&self, text: &str, pos: usize) -> Option<usize> {
        scan::behind_mark_on_line(text, pos, &["#"])
    }
}
