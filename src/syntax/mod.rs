// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Syntax highlighting infrastructure for the Edit text editor.
//!
//! Highlighting is lexical: per-language profiles drive a shared searcher
//! that finds literals, comments, keywords and markup, records the
//! structural ones as interval sets and paints styles into the document.
//! After an edit only the edited lines are re-lexed, unless the edit
//! changed structure elsewhere, in which case one full pass repairs it.

pub mod color_mapper;
pub mod highlighter;
pub mod intervals;
pub mod language;
pub mod performance;
pub mod profile;
pub mod scan;
pub mod searcher;
pub mod section;
pub mod tracker;

#[cfg(test)]
mod equivalence_test;

pub use color_mapper::{Color, ColorMapper, Style};
pub use highlighter::{HighlightingMetrics, HighlightingService, SyntaxHighlighter};
pub use intervals::{Interval, IntervalKind, IntervalSet};
pub use language::{Language, LanguageDetector};
pub use performance::{
    DocumentSizeCategory, PerformanceBaseline, PerformanceMeasurement, run_baseline_test, sample_document,
};
pub use profile::{Condition, LanguageProfile, profile_for};
pub use searcher::{PassKind, SearchPass, SyntaxSearcher};
pub use section::{EditWindow, Section};
pub use tracker::CompositeIntervalTracker;
