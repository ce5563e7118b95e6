// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use edit_highlight::syntax::{Language, sample_document};
use edit_highlight::{AttributedBuffer, StyledDocument, SyntaxHighlighter};

const LINES: usize = 2_000;

fn bench_full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pass");
    for language in [Language::Java, Language::Python, Language::Perl, Language::Php, Language::Html, Language::Css] {
        let text = sample_document(language, LINES);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(language.tag()), &text, |b, text| {
            b.iter_batched(
                || (AttributedBuffer::new(text.as_str()), SyntaxHighlighter::new(language)),
                |(mut buffer, mut highlighter)| black_box(highlighter.highlight_document(&mut buffer)),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("keystroke");
    for language in [Language::Java, Language::Perl, Language::Html] {
        let mut buffer = AttributedBuffer::new(sample_document(language, LINES));
        let mut highlighter = SyntaxHighlighter::new(language);
        highlighter.highlight_document(&mut buffer);
        let pos = buffer.text().len() / 2;
        let pos = buffer.text()[..pos].rfind('\n').map_or(0, |i| i + 1);

        group.bench_function(BenchmarkId::from_parameter(language.tag()), |b| {
            b.iter(|| {
                let edit = buffer.insert(pos, " ");
                black_box(highlighter.highlight_edit(&mut buffer, &edit));
                let edit = buffer.remove(pos, 1);
                black_box(highlighter.highlight_edit(&mut buffer, &edit));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_pass, bench_keystroke);
criterion_main!(benches);
