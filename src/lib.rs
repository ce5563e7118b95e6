// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Incremental lexical syntax highlighting for the Edit text editor.
//!
//! ```
//! use edit_highlight::{AttributedBuffer, Language, Style, SyntaxHighlighter};
//!
//! let mut buffer = AttributedBuffer::new("int x = 1; // one\n");
//! let mut highlighter = SyntaxHighlighter::new(Language::Java);
//! highlighter.highlight_document(&mut buffer);
//!
//! let edit = buffer.insert(0, "final ");
//! highlighter.highlight_edit(&mut buffer, &edit);
//! assert_eq!(buffer.styled(Style::Comment), vec!["// one"]);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod syntax;

pub use buffer::{AttributedBuffer, EditNotification, StyledDocument};
pub use config::EngineConfig;
pub use error::{HighlightError, Result};
pub use syntax::{
    Color, ColorMapper, HighlightingService, Language, PassKind, Style, SyntaxHighlighter,
};
