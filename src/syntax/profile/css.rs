// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::LanguageProfile;
use crate::syntax::scan::{self, CommentSyntax};
use crate::syntax::searcher::SearchPass;

const SIDES: &[&str] = &["-top", "-right", "-bottom", "-left"];

/// Property families: a base name and the suffixes that extend it.
const EXTENSIBLE: &[(&str, &[&str])] = &[
    (
        "border",
        &[
            "-top-left-radius", "-top-right-radius", "-bottom-left-radius", "-bottom-right-radius",
            "-top-color", "-top-style", "-top-width", "-right-color", "-right-style", "-right-width",
            "-bottom-color", "-bottom-style", "-bottom-width", "-left-color", "-left-style",
            "-left-width", "-top", "-right", "-bottom", "-left", "-color", "-style", "-width",
            "-radius", "-collapse", "-spacing", "-image",
        ],
    ),
    ("margin", SIDES),
    ("padding", SIDES),
    ("font", &["-family", "-size", "-style", "-weight", "-variant"]),
    (
        "background",
        &["-attachment", "-clip", "-color", "-image", "-origin", "-position", "-repeat", "-size"],
    ),
    ("text", &["-align", "-decoration", "-indent", "-overflow", "-shadow", "-transform"]),
    ("outline", &["-color", "-offset", "-style", "-width"]),
    ("flex", &["-basis", "-direction", "-flow", "-grow", "-shrink", "-wrap"]),
    (
        "grid",
        &[
            "-template-columns", "-template-rows", "-template-areas", "-template", "-column-gap",
            "-row-gap", "-auto-flow", "-column", "-row", "-area", "-gap",
        ],
    ),
];

const PROPERTIES: &[&str] = &[
    "align-content", "align-items", "animation", "bottom", "box-shadow", "box-sizing", "clear",
    "color", "content", "cursor", "display", "float", "gap", "height", "justify-content", "left",
    "letter-spacing", "line-height", "list-style", "max-height", "max-width", "min-height",
    "min-width", "opacity", "overflow", "position", "right", "top", "transform", "transition",
    "vertical-align", "visibility", "white-space", "width", "word-spacing", "z-index",
];

static COMMENTS: CommentSyntax = CommentSyntax {
    line: &[],
    block: ("/*", "*/"),
    multiline_quotes: false,
    text_blocks: false,
    line_mark: scan::any_mark,
};

pub struct CssProfile;

pub static CSS: CssProfile = CssProfile;

impl LanguageProfile for CssProfile {
    fn name(&self) -> &'static str {
        "css"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.quote(true);
        s.block_comments("/*", "*/", true);
        for (base, suffixes) in EXTENSIBLE {
            s.extensible_keyword(base, suffixes, Style::Keyword);
        }
        s.keywords(PROPERTIES, true, &['-', '.', '#'], Style::Keyword);
        s.braces();
    }

    fn comment_syntax(&self) -> Option<&CommentSyntax> {
        Some(&COMMENTS)
    }
}
