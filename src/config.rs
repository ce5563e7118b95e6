// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Engine configuration.
//!
//! Stored as JSON. Every field has a default, so a partial file only
//! overrides what it names. Nonsensical values are corrected with a warning
//! rather than rejected.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HighlightError, Result};
use crate::syntax::color_mapper::{Color, ColorMapper, Style};
use crate::syntax::language::Language;

/// Environment variable naming a configuration file.
pub const CONFIG_PATH_ENV: &str = "EDIT_HIGHLIGHT_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Master switch; when off every document renders as plain text.
    pub enabled: bool,
    /// When off, every edit is served by a full pass.
    pub incremental: bool,
    /// Languages rendered as plain text.
    pub disabled_languages: Vec<Language>,
    /// Per-style color overrides on top of the default theme.
    pub colors: HashMap<Style, Color>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            incremental: true,
            disabled_languages: Vec::new(),
            colors: HashMap::new(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Reads a JSON configuration file. An empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| HighlightError::Io { path: path.to_path_buf(), source })?;
        if content.trim().is_empty() {
            log::warn!("Config file {} is empty, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::from_json_str(&content)?;
        log::debug!("Loaded highlighting config from {}", path.display());
        Ok(config)
    }

    /// Loads the file named by [`CONFIG_PATH_ENV`], or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Corrects invalid values in place, logging each correction.
    pub fn validate(&mut self) {
        let mut has_issues = false;

        let before = self.disabled_languages.len();
        let mut seen = Vec::with_capacity(before);
        self.disabled_languages.retain(|language| {
            let keep = !seen.contains(language);
            seen.push(*language);
            keep
        });
        if self.disabled_languages.len() != before {
            log::warn!("Duplicate entries in disabled_languages, ignoring repeats");
            has_issues = true;
        }

        if self.disabled_languages.contains(&Language::PlainText) {
            log::warn!("Plain text is never highlighted, dropping it from disabled_languages");
            self.disabled_languages.retain(|&language| language != Language::PlainText);
            has_issues = true;
        }

        if self.colors.remove(&Style::Plain).is_some() {
            log::warn!("Plain text keeps the terminal color, ignoring its override");
            has_issues = true;
        }

        if has_issues {
            log::info!("Highlighting configuration validated with corrections");
        }
    }

    /// Whether documents in `language` get highlighted.
    pub fn is_language_enabled(&self, language: Language) -> bool {
        self.enabled && language.is_highlighted() && !self.disabled_languages.contains(&language)
    }

    /// The default theme with this configuration's overrides applied.
    pub fn color_mapper(&self) -> ColorMapper {
        let mut mapper = ColorMapper::new();
        mapper.load_theme(&self.colors);
        mapper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "incremental": false }"#).unwrap();
        assert!(config.enabled);
        assert!(!config.incremental);
        assert!(config.disabled_languages.is_empty());
    }

    #[test]
    fn test_language_switches() {
        let config =
            EngineConfig::from_json_str(r#"{ "disabled_languages": ["perl", "perl", "plaintext"] }"#).unwrap();
        assert_eq!(config.disabled_languages, vec![Language::Perl]);
        assert!(!config.is_language_enabled(Language::Perl));
        assert!(config.is_language_enabled(Language::Java));
        assert!(!config.is_language_enabled(Language::PlainText));

        let off = EngineConfig { enabled: false, ..EngineConfig::default() };
        assert!(!off.is_language_enabled(Language::Java));
    }

    #[test]
    fn test_color_overrides() {
        let config =
            EngineConfig::from_json_str(r#"{ "colors": { "keyword": "blue", "plain": "red" } }"#).unwrap();
        assert!(!config.colors.contains_key(&Style::Plain));
        let mapper = config.color_mapper();
        assert_eq!(mapper.get_color(Style::Keyword), Color::Blue);
        assert_eq!(mapper.get_color(Style::Comment), Color::Gray);
    }

    #[test]
    fn test_invalid_json_is_a_config_error() {
        let err = EngineConfig::from_json_str("{ enabled: ").unwrap_err();
        assert!(matches!(err, HighlightError::Config(_)));
    }

    #[test]
    fn test_load_round_trip() {
        let path = std::env::temp_dir().join(format!("edit-highlight-config-{}.json", std::process::id()));
        let config = EngineConfig { incremental: false, ..EngineConfig::default() };
        std::fs::write(&path, config.to_json().unwrap()).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);

        let missing = EngineConfig::load(path.with_extension("missing")).unwrap_err();
        assert!(matches!(missing, HighlightError::Io { .. }));
    }
}
