// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::profile::LanguageProfile;
use crate::syntax::searcher::SearchPass;

/// HTML with embedded scripts, style sheets and PHP.
pub struct HtmlProfile;

pub static HTML: HtmlProfile = HtmlProfile;

impl LanguageProfile for HtmlProfile {
    fn name(&self) -> &'static str {
        "html"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.markup(true);
    }
}
