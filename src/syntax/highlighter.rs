// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-document highlighting controller and the service that creates them.
//!
//! A [`SyntaxHighlighter`] owns the searcher state of one document. It turns
//! edit notifications into sections, runs local passes and lets the
//! searcher escalate to a full repair when an edit changed structure
//! outside the edited lines.

use std::path::Path;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::buffer::{EditNotification, StyledDocument};
use crate::config::EngineConfig;
use crate::syntax::color_mapper::ColorMapper;
use crate::syntax::language::{Language, LanguageDetector};
use crate::syntax::profile::{LanguageProfile, profile_for};
use crate::syntax::searcher::{PassKind, SyntaxSearcher};
use crate::syntax::section::{EditWindow, Section};

/// Performance metrics for highlighting passes.
#[derive(Debug, Clone, Default)]
pub struct HighlightingMetrics {
    /// Total time spent in passes
    pub total_time: Duration,
    pub full_passes: usize,
    pub local_passes: usize,
    /// Local passes that escalated to a full pass
    pub repairs: usize,
    /// Bytes of document text lexed by full passes and repairs
    pub bytes_rescanned: usize,
    pub avg_pass_time: Duration,
    pub max_pass_time: Duration,
}

impl HighlightingMetrics {
    /// Updates metrics with a finished request.
    pub fn record_pass(&mut self, kind: PassKind, duration: Duration, doc_len: usize) {
        match kind {
            PassKind::Full => self.full_passes += 1,
            PassKind::Local => self.local_passes += 1,
            PassKind::Repair => self.repairs += 1,
        }
        if kind != PassKind::Local {
            self.bytes_rescanned += doc_len;
        }
        self.total_time += duration;
        let passes = self.passes();
        if passes > 0 {
            self.avg_pass_time = self.total_time / passes as u32;
        }
        if duration > self.max_pass_time {
            self.max_pass_time = duration;
        }
    }

    pub fn passes(&self) -> usize {
        self.full_passes + self.local_passes + self.repairs
    }

    /// Share of edits (local requests) that needed a repair, 0.0 to 1.0.
    pub fn repair_ratio(&self) -> f64 {
        let edits = self.local_passes + self.repairs;
        if edits == 0 { 0.0 } else { self.repairs as f64 / edits as f64 }
    }

    /// Adds another document's metrics to these.
    pub fn absorb(&mut self, other: &HighlightingMetrics) {
        self.total_time += other.total_time;
        self.full_passes += other.full_passes;
        self.local_passes += other.local_passes;
        self.repairs += other.repairs;
        self.bytes_rescanned += other.bytes_rescanned;
        self.max_pass_time = self.max_pass_time.max(other.max_pass_time);
        let passes = self.passes();
        if passes > 0 {
            self.avg_pass_time = self.total_time / passes as u32;
        }
    }

    pub fn reset(&mut self) {
        *self = Default::default();
    }
}

/// Highlighting state and controller of one document.
#[derive(Debug)]
pub struct SyntaxHighlighter {
    language: Language,
    profile: Option<&'static dyn LanguageProfile>,
    searcher: SyntaxSearcher,
    /// Decides which languages are painted and whether edits run locally.
    config: EngineConfig,
    /// Document length after the last pass, `None` until the first one.
    last_len: Option<usize>,
    /// Copy of the document text for the running pass. The pass reads the
    /// text while it paints through the document, so it cannot borrow it;
    /// the buffer is reused across requests.
    snapshot: String,
    pub metrics: HighlightingMetrics,
}

impl SyntaxHighlighter {
    pub fn new(language: Language) -> Self {
        Self::with_config(language, &EngineConfig::default())
    }

    pub fn with_config(language: Language, config: &EngineConfig) -> Self {
        Self {
            language,
            profile: enabled_profile(language, config),
            searcher: SyntaxSearcher::new(),
            config: config.clone(),
            last_len: None,
            snapshot: String::new(),
            metrics: HighlightingMetrics::default(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn is_enabled(&self) -> bool {
        self.profile.is_some()
    }

    /// Switches the document language. The next request is a full pass.
    /// A language the configuration disables renders as plain text.
    pub fn set_language(&mut self, language: Language) {
        debug!("language switched from {} to {language}", self.language);
        self.language = language;
        self.profile = enabled_profile(language, &self.config);
        self.searcher.clear_history();
        self.last_len = None;
    }

    /// Re-lexes and repaints the whole document.
    pub fn highlight_document(&mut self, doc: &mut dyn StyledDocument) -> PassKind {
        let start = Instant::now();
        let len = doc.text().len();
        match self.profile {
            Some(profile) => {
                self.take_snapshot(doc);
                self.searcher.highlight_full(profile, &self.snapshot, doc);
            }
            None => doc.reset_attributes(0, len),
        }
        self.finish(PassKind::Full, start, len)
    }

    /// Repaints the document after the edit described by `notification`.
    ///
    /// Falls back to a full pass before the first pass, when incremental
    /// highlighting is off, or when the notification does not fit the
    /// document.
    pub fn highlight_edit(&mut self, doc: &mut dyn StyledDocument, notification: &EditNotification) -> PassKind {
        let (Some(profile), Some(old_len), true) = (self.profile, self.last_len, self.config.incremental) else {
            return self.highlight_document(doc);
        };
        let len = doc.text().len();
        let Some(edited) = notification.edited_range(doc.text(), old_len) else {
            warn!(
                "edit notification {notification:?} does not fit a document of {len} bytes (was {old_len}), \
                 running a full pass"
            );
            return self.highlight_document(doc);
        };

        let start = Instant::now();
        self.take_snapshot(doc);
        let text = self.snapshot.as_str();
        let section = Section::lines(text, edited.start, edited.end);
        let Some(window) = EditWindow::new(&section, old_len, len) else {
            warn!("edit at {} does not fit its section, running a full pass", notification.position());
            return self.highlight_document(doc);
        };
        let kind = self.searcher.highlight_section(profile, text, doc, section, window);
        self.finish(kind, start, len)
    }

    fn take_snapshot(&mut self, doc: &dyn StyledDocument) {
        self.snapshot.clear();
        self.snapshot.push_str(doc.text());
    }

    fn finish(&mut self, kind: PassKind, start: Instant, doc_len: usize) -> PassKind {
        let elapsed = start.elapsed();
        self.metrics.record_pass(kind, elapsed, doc_len);
        self.last_len = Some(doc_len);
        debug!("{} {kind:?} pass over {doc_len} bytes took {elapsed:?}", self.language);
        kind
    }

    /// The searcher state, for inspecting what the last pass found.
    pub fn searcher(&self) -> &SyntaxSearcher {
        &self.searcher
    }
}

fn enabled_profile(language: Language, config: &EngineConfig) -> Option<&'static dyn LanguageProfile> {
    if config.is_language_enabled(language) { profile_for(language) } else { None }
}

/// Creates highlighters for files and keeps the configuration they share.
#[derive(Debug, Default)]
pub struct HighlightingService {
    language_detector: LanguageDetector,
    config: EngineConfig,
    global_metrics: HighlightingMetrics,
}

impl HighlightingService {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self { language_detector: LanguageDetector::new(), config, global_metrics: HighlightingMetrics::default() }
    }

    /// Creates the highlighter for a file, picking the language from its
    /// extension or an override.
    pub fn create_highlighter<P: AsRef<Path>>(&self, file_path: P) -> SyntaxHighlighter {
        let language = self.language_detector.detect_language(&file_path);
        SyntaxHighlighter::with_config(language, &self.config)
    }

    /// Sets a language override for a specific file.
    pub fn set_language_override<P: AsRef<Path>>(&mut self, file_path: P, language: Language) {
        self.language_detector.set_language_override(file_path, language);
    }

    /// Removes a language override for a specific file.
    pub fn remove_language_override<P: AsRef<Path>>(&mut self, file_path: P) -> Option<Language> {
        self.language_detector.remove_language_override(file_path)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Enables or disables highlighting for highlighters created from now on.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn color_mapper(&self) -> ColorMapper {
        self.config.color_mapper()
    }

    /// Folds a closed document's metrics into the service totals.
    pub fn record_metrics(&mut self, highlighter: &SyntaxHighlighter) {
        self.global_metrics.absorb(&highlighter.metrics);
    }

    pub fn global_metrics(&self) -> &HighlightingMetrics {
        &self.global_metrics
    }

    pub fn reset_metrics(&mut self) {
        self.global_metrics.reset();
    }

    pub fn supported_languages(&self) -> Vec<Language> {
        Language::ALL.into_iter().filter(|l| l.is_highlighted()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::AttributedBuffer;
    use crate::syntax::color_mapper::Style;

    #[test]
    fn test_highlighting_metrics() {
        let mut metrics = HighlightingMetrics::default();
        metrics.record_pass(PassKind::Full, Duration::from_millis(10), 100);
        metrics.record_pass(PassKind::Local, Duration::from_millis(2), 101);
        metrics.record_pass(PassKind::Repair, Duration::from_millis(12), 102);

        assert_eq!(metrics.passes(), 3);
        assert_eq!(metrics.bytes_rescanned, 202);
        assert_eq!(metrics.max_pass_time, Duration::from_millis(12));
        assert_eq!(metrics.avg_pass_time, Duration::from_millis(8));
        assert_eq!(metrics.repair_ratio(), 0.5);

        let mut total = HighlightingMetrics::default();
        total.absorb(&metrics);
        total.absorb(&metrics);
        assert_eq!(total.passes(), 6);
        metrics.reset();
        assert_eq!(metrics.passes(), 0);
    }

    #[test]
    fn test_first_edit_runs_a_full_pass() {
        let mut buffer = AttributedBuffer::new("int a;");
        let mut highlighter = SyntaxHighlighter::new(Language::Java);
        let notif = buffer.insert(0, " ");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Full);
        assert_eq!(buffer.styled(Style::Keyword), vec!["int"]);
    }

    #[test]
    fn test_edit_runs_local_pass() {
        let mut buffer = AttributedBuffer::new("int a;\nint b;\n");
        let mut highlighter = SyntaxHighlighter::new(Language::Java);
        highlighter.highlight_document(&mut buffer);

        let notif = buffer.insert(11, "x");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Local);
        assert_eq!(buffer.styled(Style::Keyword), vec!["int", "int"]);
        assert_eq!(highlighter.metrics.local_passes, 1);
    }

    #[test]
    fn test_inconsistent_notification_falls_back_to_full_pass() {
        let mut buffer = AttributedBuffer::new("int a;\n");
        let mut highlighter = SyntaxHighlighter::new(Language::Java);
        highlighter.highlight_document(&mut buffer);

        buffer.insert(0, "x");
        let wrong = EditNotification::inserted(0, "xyz");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &wrong), PassKind::Full);
        assert!(buffer.styled(Style::Keyword).is_empty());
    }

    #[test]
    fn test_changed_notification() {
        let mut buffer = AttributedBuffer::new("a\nb\n");
        let mut highlighter = SyntaxHighlighter::new(Language::Java);
        highlighter.highlight_document(&mut buffer);

        buffer.insert(2, "int ");
        let notif = EditNotification::changed(2, false);
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Local);
        assert_eq!(buffer.styled(Style::Keyword), vec!["int"]);
    }

    #[test]
    fn test_non_incremental_config() {
        let config = EngineConfig { incremental: false, ..EngineConfig::default() };
        let mut buffer = AttributedBuffer::new("int a;\n");
        let mut highlighter = SyntaxHighlighter::with_config(Language::Java, &config);
        highlighter.highlight_document(&mut buffer);
        let notif = buffer.insert(6, "\n");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Full);
    }

    #[test]
    fn test_set_language() {
        let mut buffer = AttributedBuffer::new("def f(): pass\n");
        let mut highlighter = SyntaxHighlighter::new(Language::Java);
        highlighter.highlight_document(&mut buffer);
        assert!(buffer.styled(Style::Keyword).is_empty());

        highlighter.set_language(Language::Python);
        let notif = buffer.insert(0, " ");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Full);
        assert_eq!(buffer.styled(Style::Keyword), vec!["def", "pass"]);
    }

    #[test]
    fn test_set_language_respects_disabled_languages() {
        let config = EngineConfig::from_json_str(r#"{"disabled_languages":["python"]}"#).unwrap();
        let mut buffer = AttributedBuffer::new("def f(): pass\n");
        let mut highlighter = SyntaxHighlighter::with_config(Language::Java, &config);
        assert!(highlighter.is_enabled());

        highlighter.set_language(Language::Python);
        assert!(!highlighter.is_enabled());
        highlighter.highlight_document(&mut buffer);
        assert!(buffer.styled(Style::Keyword).is_empty());

        highlighter.set_language(Language::Java);
        assert!(highlighter.is_enabled());
    }

    #[test]
    fn test_set_language_after_master_switch_off() {
        let config = EngineConfig { enabled: false, ..EngineConfig::default() };
        let mut highlighter = SyntaxHighlighter::with_config(Language::PlainText, &config);
        highlighter.set_language(Language::Java);
        assert!(!highlighter.is_enabled());
    }

    #[test]
    fn test_edits_after_a_reused_snapshot() {
        let mut buffer = AttributedBuffer::new("int a;\nint b;\nint c;\n");
        let mut highlighter = SyntaxHighlighter::new(Language::Java);
        highlighter.highlight_document(&mut buffer);

        let notif = buffer.insert(11, "x");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Local);
        let notif = buffer.insert(14, " char d = 'x';");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &notif), PassKind::Repair);
        assert_eq!(buffer.styled(Style::Keyword), vec!["int", "int", "char", "int"]);
        assert_eq!(buffer.styled(Style::String), vec!["'x'"]);
    }

    #[test]
    fn test_plain_text_is_never_painted() {
        let mut buffer = AttributedBuffer::new("int a; // x");
        buffer.set_attributes(0, 3, Style::Keyword);
        let mut highlighter = SyntaxHighlighter::new(Language::PlainText);
        assert!(!highlighter.is_enabled());
        highlighter.highlight_document(&mut buffer);
        assert_eq!(buffer.style_runs(), vec![(0..11, Style::Plain)]);
    }

    #[test]
    fn test_highlighting_service() {
        let mut service = HighlightingService::new();
        let highlighter = service.create_highlighter("Main.java");
        assert_eq!(highlighter.language(), Language::Java);
        assert!(highlighter.is_enabled());

        service.set_language_override("build.script", Language::Perl);
        assert_eq!(service.create_highlighter("build.script").language(), Language::Perl);
        assert_eq!(service.remove_language_override("build.script"), Some(Language::Perl));

        service.set_enabled(false);
        assert!(!service.create_highlighter("Main.java").is_enabled());
        assert_eq!(service.supported_languages().len(), 10);
    }

    #[test]
    fn test_service_metrics() {
        let mut service = HighlightingService::new();
        let mut highlighter = service.create_highlighter("page.html");
        let mut buffer = AttributedBuffer::new("<p class=\"x\">hi</p>");
        highlighter.highlight_document(&mut buffer);
        service.record_metrics(&highlighter);
        assert_eq!(service.global_metrics().full_passes, 1);
        service.reset_metrics();
        assert_eq!(service.global_metrics().passes(), 0);
    }
}
