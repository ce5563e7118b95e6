// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::syntax::profile::LanguageProfile;
use crate::syntax::searcher::SearchPass;

pub struct XmlProfile;

pub static XML: XmlProfile = XmlProfile;

impl LanguageProfile for XmlProfile {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.markup(false);
    }
}
