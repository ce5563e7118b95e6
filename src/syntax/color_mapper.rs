// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Lexical styles and the mapping from styles to display colors.
//!
//! The engine only ever paints [`Style`] roles; what a role looks like is
//! decided here, so front ends can re-theme without touching the profiles.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The lexical role painted over a range of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Plain,
    Keyword,
    Bracket,
    Brace,
    Variable,
    String,
    Comment,
    TagName,
    Attribute,
    AttributeValue,
    /// Markers that open or close an embedded section, e.g. `<?php` and `?>`.
    EmbeddedMarker,
}

impl Style {
    pub const ALL: [Style; 11] = [
        Style::Plain,
        Style::Keyword,
        Style::Bracket,
        Style::Brace,
        Style::Variable,
        Style::String,
        Style::Comment,
        Style::TagName,
        Style::Attribute,
        Style::AttributeValue,
        Style::EmbeddedMarker,
    ];
}

/// Named display colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Blue,
    Purple,
    Gray,
    Orange,
    Teal,
}

impl Color {
    /// The ANSI SGR foreground code closest to this color.
    pub fn ansi_code(self) -> &'static str {
        match self {
            Color::Black => "39",
            Color::Red => "31",
            Color::Green => "32",
            Color::Blue => "34",
            Color::Purple => "35",
            Color::Gray => "90",
            Color::Orange => "33",
            Color::Teal => "36",
        }
    }
}

/// Maps styles to colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMapper {
    colors: HashMap<Style, Color>,
}

impl Default for ColorMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorMapper {
    /// Creates a color mapper with the default theme.
    pub fn new() -> Self {
        let mut mapper = Self { colors: HashMap::new() };
        mapper.load_default_theme();
        mapper
    }

    fn load_default_theme(&mut self) {
        self.colors.insert(Style::Plain, Color::Black);
        self.colors.insert(Style::Keyword, Color::Red);
        self.colors.insert(Style::Bracket, Color::Orange);
        self.colors.insert(Style::Brace, Color::Blue);
        self.colors.insert(Style::Variable, Color::Teal);
        self.colors.insert(Style::String, Color::Green);
        self.colors.insert(Style::Comment, Color::Gray);
        self.colors.insert(Style::TagName, Color::Blue);
        self.colors.insert(Style::Attribute, Color::Red);
        self.colors.insert(Style::AttributeValue, Color::Purple);
        self.colors.insert(Style::EmbeddedMarker, Color::Orange);
    }

    /// Gets the color for a style.
    pub fn get_color(&self, style: Style) -> Color {
        self.colors.get(&style).copied().unwrap_or(Color::Black)
    }

    /// Sets a custom color for a style.
    pub fn set_color(&mut self, style: Style, color: Color) {
        self.colors.insert(style, color);
    }

    /// Resets the mapping to the default theme.
    pub fn reset_to_default(&mut self) {
        self.colors.clear();
        self.load_default_theme();
    }

    /// Applies a partial theme on top of the current mapping.
    pub fn load_theme(&mut self, theme: &HashMap<Style, Color>) {
        self.colors.extend(theme.iter().map(|(&style, &color)| (style, color)));
    }

    /// Exports the current theme.
    pub fn export_theme(&self) -> HashMap<Style, Color> {
        self.colors.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors() {
        let mapper = ColorMapper::new();

        assert_eq!(mapper.get_color(Style::TagName), Color::Blue);
        assert_eq!(mapper.get_color(Style::Attribute), Color::Red);
        assert_eq!(mapper.get_color(Style::AttributeValue), Color::Purple);
        assert_eq!(mapper.get_color(Style::Comment), Color::Gray);
        for style in Style::ALL {
            mapper.get_color(style).ansi_code();
        }
    }

    #[test]
    fn test_custom_colors() {
        let mut mapper = ColorMapper::new();

        mapper.set_color(Style::Keyword, Color::Purple);
        assert_eq!(mapper.get_color(Style::Keyword), Color::Purple);

        mapper.reset_to_default();
        assert_eq!(mapper.get_color(Style::Keyword), Color::Red);
    }

    #[test]
    fn test_theme_export_import() {
        let mut mapper = ColorMapper::new();
        mapper.set_color(Style::String, Color::Orange);

        let theme = mapper.export_theme();
        let mut other = ColorMapper::new();
        other.load_theme(&theme);

        assert_eq!(other, mapper);
    }
}
