// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::LanguageProfile;
use crate::syntax::scan;
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "FALSE", "Inf", "NA", "NA_character_", "NA_integer_", "NA_real_", "NULL", "NaN", "TRUE",
    "break", "else", "for", "function", "if", "in", "library", "next", "repeat", "require",
    "return", "while",
];

pub struct RProfile;

pub static R: RProfile = RProfile;

impl LanguageProfile for RProfile {
    fn name(&self) -> &'static str {
        "r"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.quote(false);
        s.line_comments(&["#"]);
        s.keywords(KEYWORDS, true, &['.', '$'], Style::Keyword);
        s.brackets();
        s.braces();
    }

    fn behind_line_cmnt_mark(&self, text: &str, pos: usize) -> Option<usize> {
        scan::behind_mark_on_line(text, pos, &["#"])
    }
}
