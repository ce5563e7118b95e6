// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for the highlighting engine.
//!
//! Highlighting itself never fails: a missing delimiter is an expected state,
//! not an error. Errors only surface at the edges, when configuration is
//! loaded or a language tag is parsed.

use std::path::PathBuf;

/// Every error the crate can produce.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// Reading a configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration document could not be parsed.
    #[error("invalid highlighting configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A language tag did not name any supported language.
    #[error("unknown language tag `{0}`")]
    UnknownLanguage(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HighlightError>;
