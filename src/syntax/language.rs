// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Language selection for syntax highlighting.
//!
//! A document's language is chosen once, when the document is opened, either
//! from its file extension or from an explicit tag. There is no content
//! sniffing: switching languages always means a full re-highlight.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::HighlightError;

/// Languages with a lexical profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    CSharp,
    Html,
    Css,
    JavaScript,
    Php,
    Perl,
    Python,
    Xml,
    R,
    /// Plain text (no highlighting)
    PlainText,
}

impl Language {
    /// All languages, in display order.
    pub const ALL: [Language; 11] = [
        Language::CSharp,
        Language::Css,
        Language::Html,
        Language::Java,
        Language::JavaScript,
        Language::Perl,
        Language::Php,
        Language::Python,
        Language::R,
        Language::Xml,
        Language::PlainText,
    ];

    /// Returns the display name of the language.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Java => "Java",
            Language::CSharp => "C#",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::JavaScript => "JavaScript",
            Language::Php => "PHP",
            Language::Perl => "Perl",
            Language::Python => "Python",
            Language::Xml => "XML",
            Language::R => "R",
            Language::PlainText => "Plain Text",
        }
    }

    /// Returns the short tag used in configuration files.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::CSharp => "csharp",
            Language::Html => "html",
            Language::Css => "css",
            Language::JavaScript => "javascript",
            Language::Php => "php",
            Language::Perl => "perl",
            Language::Python => "python",
            Language::Xml => "xml",
            Language::R => "r",
            Language::PlainText => "plaintext",
        }
    }

    /// Returns the primary file extension for this language.
    pub fn primary_extension(self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::CSharp => "cs",
            Language::Html => "html",
            Language::Css => "css",
            Language::JavaScript => "js",
            Language::Php => "php",
            Language::Perl => "pl",
            Language::Python => "py",
            Language::Xml => "xml",
            Language::R => "r",
            Language::PlainText => "txt",
        }
    }

    /// Whether documents in this language get highlighted at all.
    pub fn is_highlighted(self) -> bool {
        self != Language::PlainText
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Language {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let language = match lower.as_str() {
            "java" => Language::Java,
            "csharp" | "c#" | "cs" => Language::CSharp,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "javascript" | "js" => Language::JavaScript,
            "php" => Language::Php,
            "perl" | "pl" => Language::Perl,
            "python" | "py" => Language::Python,
            "xml" => Language::Xml,
            "r" => Language::R,
            "plaintext" | "text" | "txt" => Language::PlainText,
            _ => return Err(HighlightError::UnknownLanguage(s.to_string())),
        };
        Ok(language)
    }
}

/// Global mapping of file extensions to languages.
static EXTENSION_MAP: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    let mut map = HashMap::new();

    map.insert("java", Language::Java);
    map.insert("cs", Language::CSharp);
    map.insert("html", Language::Html);
    map.insert("htm", Language::Html);
    map.insert("xhtml", Language::Html);
    map.insert("css", Language::Css);
    map.insert("js", Language::JavaScript);
    map.insert("mjs", Language::JavaScript);
    map.insert("cjs", Language::JavaScript);
    map.insert("php", Language::Php);
    map.insert("phtml", Language::Php);
    map.insert("pl", Language::Perl);
    map.insert("pm", Language::Perl);
    map.insert("cgi", Language::Perl);
    map.insert("py", Language::Python);
    map.insert("pyw", Language::Python);
    map.insert("xml", Language::Xml);
    map.insert("xsd", Language::Xml);
    map.insert("xsl", Language::Xml);
    map.insert("svg", Language::Xml);
    map.insert("r", Language::R);

    map.insert("txt", Language::PlainText);
    map.insert("text", Language::PlainText);

    map
});

/// Language detector that identifies languages from file paths.
#[derive(Debug, Default)]
pub struct LanguageDetector {
    /// Manual language overrides for specific files
    overrides: HashMap<String, Language>,
}

impl LanguageDetector {
    /// Creates a new language detector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Detects the language from a file path.
    ///
    /// A manual override wins; otherwise the lower-cased extension is looked
    /// up. Unknown or missing extensions give `Language::PlainText`.
    pub fn detect_language<P: AsRef<Path>>(&self, path: P) -> Language {
        let path = path.as_ref();
        let path_str = path.to_string_lossy();

        if let Some(&language) = self.overrides.get(path_str.as_ref()) {
            return language;
        }

        path.extension()
            .and_then(|extension| extension.to_str())
            .and_then(|ext| EXTENSION_MAP.get(ext.to_lowercase().as_str()).copied())
            .unwrap_or(Language::PlainText)
    }

    /// Sets a manual language override for a specific file path.
    pub fn set_language_override<P: AsRef<Path>>(&mut self, path: P, language: Language) {
        let path_str = path.as_ref().to_string_lossy().into_owned();
        self.overrides.insert(path_str, language);
    }

    /// Removes a manual language override, returning the previous value.
    pub fn remove_language_override<P: AsRef<Path>>(&mut self, path: P) -> Option<Language> {
        let path_str = path.as_ref().to_string_lossy();
        self.overrides.remove(path_str.as_ref())
    }

    /// Returns all file extensions that map to the given language.
    pub fn get_extensions_for_language(&self, language: Language) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = EXTENSION_MAP
            .iter()
            .filter_map(|(&ext, &lang)| (lang == language).then_some(ext))
            .collect();
        extensions.sort_unstable();
        extensions
    }

    /// Returns the total number of known file extensions.
    pub fn supported_extension_count() -> usize {
        EXTENSION_MAP.len()
    }
}
