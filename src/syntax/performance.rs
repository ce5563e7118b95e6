// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance monitoring and baseline measurement for syntax highlighting.
//!
//! Pass durations are recorded per pass kind and document size, so the cost
//! of a local pass can be compared against the full pass it replaces.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

use crate::buffer::{AttributedBuffer, StyledDocument};
use crate::syntax::highlighter::SyntaxHighlighter;
use crate::syntax::language::Language;
use crate::syntax::searcher::PassKind;

/// Aggregated pass measurements.
#[derive(Debug, Clone, Default)]
pub struct PerformanceBaseline {
    /// Every recorded pass duration, by pass kind and document size.
    pub pass_times: HashMap<(PassKind, DocumentSizeCategory), Vec<Duration>>,
    /// Average of `pass_times` per key
    pub avg_pass_times: HashMap<(PassKind, DocumentSizeCategory), Duration>,
    pub max_pass_time: Duration,
    pub passes_measured: usize,
    /// Bytes of document text per second of pass time, full passes only.
    pub full_pass_throughput: f64,
    full_pass_bytes: usize,
    full_pass_time: Duration,
}

impl PerformanceBaseline {
    /// Share of edits that had to be repaired with a full pass.
    pub fn repair_ratio(&self) -> f64 {
        let count = |kind: PassKind| -> usize {
            self.pass_times.iter().filter(|((k, _), _)| *k == kind).map(|(_, times)| times.len()).sum()
        };
        let repairs = count(PassKind::Repair);
        let edits = repairs + count(PassKind::Local);
        if edits == 0 { 0.0 } else { repairs as f64 / edits as f64 }
    }
}

/// Document size categories for performance measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentSizeCategory {
    /// Documents under 10KB
    Small,
    /// Documents 10KB - 100KB
    Medium,
    /// Documents 100KB - 1MB
    Large,
    /// Documents over 1MB
    ExtraLarge,
}

impl DocumentSizeCategory {
    /// Determines the size category for a document of `bytes` bytes.
    pub fn from_bytes(bytes: usize) -> Self {
        match bytes {
            0..=10_240 => DocumentSizeCategory::Small,
            10_241..=102_400 => DocumentSizeCategory::Medium,
            102_401..=1_048_576 => DocumentSizeCategory::Large,
            _ => DocumentSizeCategory::ExtraLarge,
        }
    }

    /// Returns the human-readable name of the size category.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentSizeCategory::Small => "Small (< 10KB)",
            DocumentSizeCategory::Medium => "Medium (10KB - 100KB)",
            DocumentSizeCategory::Large => "Large (100KB - 1MB)",
            DocumentSizeCategory::ExtraLarge => "Extra Large (> 1MB)",
        }
    }
}

/// Performance measurement utilities.
#[derive(Debug, Default)]
pub struct PerformanceMeasurement {
    baseline: PerformanceBaseline,
    measurement_start: Option<Instant>,
}

impl PerformanceMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a measurement session.
    pub fn start_measurement(&mut self) {
        self.measurement_start = Some(Instant::now());
    }

    /// Time since [`Self::start_measurement`].
    pub fn elapsed(&self) -> Duration {
        self.measurement_start.map(|start| start.elapsed()).unwrap_or_default()
    }

    /// Records one pass over a document of `doc_len` bytes.
    pub fn record_pass(&mut self, kind: PassKind, doc_len: usize, duration: Duration) {
        let key = (kind, DocumentSizeCategory::from_bytes(doc_len));
        let baseline = &mut self.baseline;

        let times = baseline.pass_times.entry(key).or_default();
        times.push(duration);
        let avg = times.iter().sum::<Duration>() / times.len() as u32;
        baseline.avg_pass_times.insert(key, avg);

        baseline.passes_measured += 1;
        baseline.max_pass_time = baseline.max_pass_time.max(duration);

        if kind != PassKind::Local {
            baseline.full_pass_bytes += doc_len;
            baseline.full_pass_time += duration;
            let secs = baseline.full_pass_time.as_secs_f64();
            if secs > 0.0 {
                baseline.full_pass_throughput = baseline.full_pass_bytes as f64 / secs;
            }
        }
    }

    pub fn get_baseline(&self) -> &PerformanceBaseline {
        &self.baseline
    }

    /// Generates a performance report.
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Performance Baseline Report ===\n\n");

        report.push_str("Pass Times:\n");
        let mut keys: Vec<_> = self.baseline.pass_times.keys().copied().collect();
        keys.sort_by_key(|&(kind, category)| (category, kind as u8));
        for key in keys {
            let times = &self.baseline.pass_times[&key];
            let max = times.iter().max().copied().unwrap_or_default();
            let _ = writeln!(
                report,
                "  {:?} / {}: {} passes, avg {}us, max {}us",
                key.0,
                key.1.name(),
                times.len(),
                self.baseline.avg_pass_times.get(&key).copied().unwrap_or_default().as_micros(),
                max.as_micros()
            );
        }

        report.push_str("\nSummary:\n");
        let _ = writeln!(report, "  Passes: {}", self.baseline.passes_measured);
        let _ = writeln!(report, "  Max pass time: {}us", self.baseline.max_pass_time.as_micros());
        let _ = writeln!(report, "  Repair ratio: {:.1}%", self.baseline.repair_ratio() * 100.0);
        let _ = writeln!(report, "  Full pass throughput: {:.0} bytes/sec", self.baseline.full_pass_throughput);

        report.push_str("\n=== End Report ===\n");
        report
    }

    /// Checks the measurements against the responsiveness requirements.
    pub fn meets_requirements(&self) -> (bool, Vec<String>) {
        let mut issues = Vec::new();

        for (&(kind, category), avg_time) in &self.baseline.avg_pass_times {
            let limit = match (kind, category) {
                (_, DocumentSizeCategory::Large | DocumentSizeCategory::ExtraLarge) => continue,
                (PassKind::Local, _) => Duration::from_millis(16),
                (PassKind::Full | PassKind::Repair, _) => Duration::from_millis(100),
            };
            if *avg_time > limit {
                issues.push(format!(
                    "{kind:?} passes on {} documents exceed {}ms: {}ms",
                    category.name(),
                    limit.as_millis(),
                    avg_time.as_millis()
                ));
            }
        }

        // Repairs are the exception; most edits must stay local.
        if self.baseline.repair_ratio() > 0.5 {
            issues.push(format!(
                "Repair ratio above 50%: {:.1}%",
                self.baseline.repair_ratio() * 100.0
            ));
        }

        (issues.is_empty(), issues)
    }
}

/// A generated document of `lines` lines in `language`, cycling through a
/// block of typical lines with literals, comments and keywords.
pub fn sample_document(language: Language, lines: usize) -> String {
    let block: &[&str] = match language {
        Language::Java | Language::CSharp => &[
            "public class Sample {",
            "    /* counter",
            "       for the loop */",
            "    private static final int LIMIT = 10; // upper bound",
            "    public String name(int i) {",
            "        if (i > LIMIT) { return \"large \" + i; }",
            "        return 'c' + \"small\";",
            "    }",
            "}",
        ],
        Language::JavaScript => &[
            "// helpers",
            "function greet(name) {",
            "    const message = \"Hello, \" + name;",
            "    if (name.length > 3) { return message; }",
            "    /* fall back */ return 'hi';",
            "}",
        ],
        Language::Python => &[
            "def greet(name):",
            "    \"\"\"Say hello.\"\"\"",
            "    if len(name) > 3:  # long names",
            "        return 'Hello, ' + name",
            "    return \"hi\"",
        ],
        Language::R => &[
            "greet <- function(name) {",
            "  # say hello",
            "  if (nchar(name) > 3) return(paste(\"Hello,\", name))",
            "  'hi'",
            "}",
        ],
        Language::Perl => &[
            "my %seen = ();",
            "my @names = qw(alice bob);",
            "foreach my $name (@names) { # each",
            "    print <<\"EOT\";",
            "Hello, $name",
            "EOT",
            "    $seen{$name} = 'yes' if $name =~ m/^a/;",
            "}",
        ],
        Language::Php => &[
            "<?php",
            "function greet($name) {",
            "    // say hello",
            "    $message = \"Hello, \" . $name;",
            "    echo <<<EOT",
            "Dear $name",
            "EOT;",
            "    return $message; # done",
            "}",
            "?>",
            "<p class=\"greeting\">Hi</p>",
        ],
        Language::Html => &[
            "<div class=\"card\" id='main'>",
            "  <!-- greeting -->",
            "  <script>var x = \"a<b\"; if (x) { x = 1; }</script>",
            "  <style>p { margin-top: 0; }</style>",
            "  <p>Hello</p>",
            "</div>",
        ],
        Language::Xml => &[
            "<?xml version=\"1.0\"?>",
            "<!-- items -->",
            "<item name=\"a\" kind='b'>text</item>",
        ],
        Language::Css => &[
            "/* layout */",
            "body { margin: 0; padding-left: 4px; }",
            "a:hover { color: red; border-bottom-width: 1px; }",
            ".card { font-family: \"Segoe UI\"; }",
        ],
        Language::PlainText => &["Plain text, nothing to see here."],
    };

    let mut document = String::new();
    for line in block.iter().cycle().take(lines) {
        document.push_str(line);
        document.push('\n');
    }
    document
}

/// Highlights a generated document per language, then types and deletes
/// one character in the middle of every `stride`-th line, recording every
/// pass.
pub fn run_baseline_test(languages: &[Language], lines: usize, stride: usize) -> PerformanceMeasurement {
    let mut measurement = PerformanceMeasurement::new();
    measurement.start_measurement();
    let stride = stride.max(1);

    for &language in languages {
        let mut buffer = AttributedBuffer::new(sample_document(language, lines));
        let mut highlighter = SyntaxHighlighter::new(language);

        let start = Instant::now();
        let kind = highlighter.highlight_document(&mut buffer);
        measurement.record_pass(kind, buffer.len(), start.elapsed());

        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(buffer.text().match_indices('\n').map(|(i, _)| i + 1))
            .filter(|&pos| pos < buffer.len())
            .step_by(stride)
            .collect();
        for line_start in line_starts {
            let line_len = buffer.text()[line_start..].find('\n').unwrap_or(0);
            let mut pos = line_start + line_len / 2;
            while !buffer.text().is_char_boundary(pos) {
                pos -= 1;
            }

            let edit = buffer.insert(pos, "x");
            let start = Instant::now();
            let kind = highlighter.highlight_edit(&mut buffer, &edit);
            measurement.record_pass(kind, buffer.len(), start.elapsed());

            let edit = buffer.remove(pos, 1);
            let start = Instant::now();
            let kind = highlighter.highlight_edit(&mut buffer, &edit);
            measurement.record_pass(kind, buffer.len(), start.elapsed());
        }
    }

    measurement
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_size_categories() {
        assert_eq!(DocumentSizeCategory::from_bytes(5_000), DocumentSizeCategory::Small);
        assert_eq!(DocumentSizeCategory::from_bytes(50_000), DocumentSizeCategory::Medium);
        assert_eq!(DocumentSizeCategory::from_bytes(500_000), DocumentSizeCategory::Large);
        assert_eq!(DocumentSizeCategory::from_bytes(5_000_000), DocumentSizeCategory::ExtraLarge);
    }

    #[test]
    fn test_performance_measurement() {
        let mut measurement = PerformanceMeasurement::new();
        measurement.start_measurement();

        measurement.record_pass(PassKind::Full, 5_000, Duration::from_millis(4));
        measurement.record_pass(PassKind::Local, 5_000, Duration::from_millis(1));
        measurement.record_pass(PassKind::Local, 5_000, Duration::from_millis(3));
        measurement.record_pass(PassKind::Repair, 50_000, Duration::from_millis(10));

        let baseline = measurement.get_baseline();
        assert_eq!(baseline.passes_measured, 4);
        assert_eq!(baseline.max_pass_time, Duration::from_millis(10));
        assert_eq!(
            baseline.avg_pass_times[&(PassKind::Local, DocumentSizeCategory::Small)],
            Duration::from_millis(2)
        );
        assert!((baseline.repair_ratio() - 1.0 / 3.0).abs() < 1e-9);
        assert!(baseline.full_pass_throughput > 0.0);
    }

    #[test]
    fn test_baseline_requirements() {
        let mut measurement = PerformanceMeasurement::new();
        measurement.record_pass(PassKind::Full, 5_000, Duration::from_millis(20));
        measurement.record_pass(PassKind::Local, 5_000, Duration::from_millis(1));
        let (passes, issues) = measurement.meets_requirements();
        assert!(passes, "Should meet requirements: {issues:?}");

        measurement.record_pass(PassKind::Local, 5_000, Duration::from_millis(200));
        measurement.record_pass(PassKind::Repair, 5_000, Duration::from_millis(1));
        measurement.record_pass(PassKind::Repair, 5_000, Duration::from_millis(1));
        measurement.record_pass(PassKind::Repair, 5_000, Duration::from_millis(1));
        let (passes, issues) = measurement.meets_requirements();
        assert!(!passes);
        assert_eq!(issues.len(), 2, "{issues:?}");
    }

    #[test]
    fn test_sample_document() {
        let doc = sample_document(Language::Java, 20);
        assert_eq!(doc.lines().count(), 20);
        assert!(doc.contains("\"small\""));
        assert!(sample_document(Language::Php, 0).is_empty());
    }

    #[test]
    fn test_performance_report_generation() {
        let measurement = run_baseline_test(&[Language::Java, Language::Html], 30, 5);
        assert!(measurement.get_baseline().passes_measured > 2);

        let report = measurement.generate_report();
        assert!(report.contains("Performance Baseline Report"));
        assert!(report.contains("Full / Small"));
        assert!(report.contains("Repair ratio"));
    }
}
