// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance baseline for the highlighting engine.
//!
//! Highlights generated documents in every language, types and deletes
//! characters across them and reports pass times. Given a file path, it
//! also prints that file highlighted with ANSI colors.

use std::process::ExitCode;
use std::time::Instant;

use edit_highlight::syntax::{Language, run_baseline_test};
use edit_highlight::{AttributedBuffer, EngineConfig, HighlightError, HighlightingService};

const DOCUMENT_LINES: usize = 2_000;
const EDIT_STRIDE: usize = 25;

fn main() -> ExitCode {
    env_logger::init();

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = std::env::args_os().nth(1) {
        return match print_highlighted(config, &path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        };
    }

    println!("=== Edit Syntax Highlighting Performance Baseline ===\n");
    let languages: Vec<Language> = Language::ALL.into_iter().filter(|l| l.is_highlighted()).collect();
    println!(
        "Running baseline over {} languages, {DOCUMENT_LINES} lines each, editing every {EDIT_STRIDE}th line...\n",
        languages.len()
    );

    let start_time = Instant::now();
    let measurement = run_baseline_test(&languages, DOCUMENT_LINES, EDIT_STRIDE);
    println!("Baseline test completed in {:.2}s\n", start_time.elapsed().as_secs_f64());
    println!("{}", measurement.generate_report());

    let (meets_requirements, issues) = measurement.meets_requirements();
    if meets_requirements {
        println!("All performance requirements met.");
        ExitCode::SUCCESS
    } else {
        println!("Performance issues detected:");
        for issue in &issues {
            println!("  - {issue}");
        }
        ExitCode::FAILURE
    }
}

fn print_highlighted(config: EngineConfig, path: &std::ffi::OsStr) -> Result<(), HighlightError> {
    let path = std::path::Path::new(path);
    let text = std::fs::read_to_string(path)
        .map_err(|source| HighlightError::Io { path: path.to_path_buf(), source })?;

    let service = HighlightingService::with_config(config);
    let mut highlighter = service.create_highlighter(path);
    let mut buffer = AttributedBuffer::new(text);

    let start = Instant::now();
    highlighter.highlight_document(&mut buffer);
    let elapsed = start.elapsed();

    print!("{}", buffer.render_ansi(&service.color_mapper()));
    eprintln!("\n{} ({}): {} bytes in {elapsed:?}", path.display(), highlighter.language(), buffer.len());
    Ok(())
}
