// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Incremental passes must leave the document exactly as a full pass would.

#[cfg(test)]
mod tests {
    use crate::buffer::{AttributedBuffer, StyledDocument};
    use crate::syntax::{Language, PassKind, Style, SyntaxHighlighter};

    /// Characters that open, close or break most structures.
    const EDIT_CHARS: &[&str] = &["\"", "'", "/", "*", "<", ">", "#", "\n", "x"];

    fn documents() -> Vec<(Language, &'static str)> {
        vec![
            (Language::Java, "int a = \"x\"; // c\n/* b\n c */ char d = 'e';\nString t = \"\"\"\n  text\n  \"\"\";\nif (a) { f(b[0]); }\n"),
            (Language::Java, "String g = \"**/*.java\";\nString t = \"hi\"; // note\n"),
            (Language::CSharp, "var s = \"p\"; // c\n/* b */ class C { int[] x; }\n"),
            (Language::JavaScript, "var x = 'a'; // c\n/* b\n */ if (x) { y[0] = \"z\"; }\n"),
            (Language::Python, "def f(a):  # c\n    s = '''doc\n    '''\n    return \"x\"\n"),
            (Language::R, "f <- function(a) { # c\n  'x' }\n"),
            (Language::Perl, "my $a = 'x'; # c\nprint <<EOT;\nbody $a\nEOT\n$s =~ s/a/b/g;\n=pod\ndoc\n=cut\nmy @l = qw(a b);\n"),
            (Language::Php, "<?php\n$x = <<<EOT\necho\nEOT;\n// c\nfunction f($a) { return \"s\"; }\n?>\n<p class=\"a\">t</p>\n"),
            (Language::Php, "$y = 'a'; # c\nif ($y) { echo \"b\"; }\n"),
            (Language::Html, "<div class=\"a\">\n<!-- c -->\n<script>var x = \"a<b\";</script>\n<style>p { margin: 0; }</style>\n</div>\n"),
            (Language::Xml, "<?xml version=\"1.0\"?>\n<!-- c -->\n<a b='c'>t</a>\n"),
            (Language::Css, "/* c */\nbody { margin-top: 0; font: \"x\"; }\n"),
        ]
    }

    fn full_styles(language: Language, text: &str) -> Vec<Style> {
        let mut buffer = AttributedBuffer::new(text);
        SyntaxHighlighter::new(language).highlight_document(&mut buffer);
        buffer.styles().to_vec()
    }

    fn highlighted(language: Language, text: &str) -> (AttributedBuffer, SyntaxHighlighter) {
        let mut buffer = AttributedBuffer::new(text);
        let mut highlighter = SyntaxHighlighter::new(language);
        highlighter.highlight_document(&mut buffer);
        (buffer, highlighter)
    }

    #[test]
    fn test_idempotence() {
        for (language, doc) in documents() {
            let (mut buffer, mut highlighter) = highlighted(language, doc);
            let first = buffer.styles().to_vec();
            highlighter.highlight_document(&mut buffer);
            assert_eq!(buffer.styles(), first.as_slice(), "{language}: {doc:?}");
        }
    }

    #[test]
    fn test_single_character_edits_match_full_pass() {
        for (language, doc) in documents() {
            let (mut buffer, mut highlighter) = highlighted(language, doc);
            let base = buffer.styles().to_vec();

            for pos in 0..=doc.len() {
                for ch in EDIT_CHARS {
                    let edit = buffer.insert(pos, ch);
                    highlighter.highlight_edit(&mut buffer, &edit);
                    assert_eq!(
                        buffer.styles(),
                        full_styles(language, buffer.text()).as_slice(),
                        "{language}: inserting {ch:?} at {pos} of {doc:?}"
                    );

                    let edit = buffer.remove(pos, ch.len());
                    highlighter.highlight_edit(&mut buffer, &edit);
                    assert_eq!(buffer.styles(), base.as_slice(), "{language}: undoing {ch:?} at {pos} of {doc:?}");
                }

                if pos < doc.len() {
                    let removed = &doc[pos..pos + 1];
                    let edit = buffer.remove(pos, 1);
                    highlighter.highlight_edit(&mut buffer, &edit);
                    assert_eq!(
                        buffer.styles(),
                        full_styles(language, buffer.text()).as_slice(),
                        "{language}: deleting {removed:?} at {pos} of {doc:?}"
                    );

                    let edit = buffer.insert(pos, removed);
                    highlighter.highlight_edit(&mut buffer, &edit);
                    assert_eq!(buffer.styles(), base.as_slice(), "{language}: restoring {removed:?} at {pos} of {doc:?}");
                }
            }
            assert!(highlighter.metrics.local_passes > 0, "{language}");
        }
    }

    #[test]
    fn test_quote_balance() {
        let (buffer, highlighter) = highlighted(Language::Java, "a = \"x\"; b = 'y';");
        let text = buffer.text();
        let quoted: Vec<&str> =
            highlighter.searcher().quotes().intervals().iter().map(|iv| &text[iv.start..iv.end]).collect();
        assert_eq!(quoted, vec!["\"x\"", "'y'"]);
        assert_eq!(buffer.styled(Style::String), vec!["\"x\"", "'y'"]);
    }

    #[test]
    fn test_closing_a_block_comment_repairs_later_lines() {
        let (mut buffer, mut highlighter) = highlighted(Language::Java, "int a;\n/* abc\nint b;\nint c;\n");
        assert_eq!(buffer.styled(Style::Comment), vec!["/* abc\nint b;\nint c;\n"]);

        let edit = buffer.insert(20, "*/");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &edit), PassKind::Repair);
        assert_eq!(buffer.styled(Style::Comment), vec!["/* abc\nint b;*/"]);
        assert_eq!(buffer.styled(Style::Keyword), vec!["int", "int"]);
        assert_eq!(buffer.styles(), full_styles(Language::Java, buffer.text()).as_slice());
    }

    #[test]
    fn test_editing_inside_a_comment_stays_local() {
        let (mut buffer, mut highlighter) = highlighted(Language::Java, "int a;\n/* abc\nint b;\n*/ int c;\n");
        let edit = buffer.insert(16, "x");
        assert_eq!(highlighter.highlight_edit(&mut buffer, &edit), PassKind::Local);
        assert_eq!(buffer.styled(Style::Keyword), vec!["int", "int"]);
    }

    #[test]
    fn test_heredoc_body_is_not_code() {
        for doc in ["$x = <<<EOT\necho\nEOT;\n", "<?php\n$x = <<<EOT\necho\nEOT;\n"] {
            let (buffer, _) = highlighted(Language::Php, doc);
            let echo = doc.find("echo").unwrap();
            assert_eq!(buffer.style_at(echo), Style::String, "{doc:?}");
            assert!(!buffer.styled(Style::Keyword).contains(&"echo"), "{doc:?}");
        }
    }

    #[test]
    fn test_script_string_hides_tag_delimiter() {
        let doc = "<script>var x = \"a<b\";</script>";
        let (buffer, highlighter) = highlighted(Language::Html, doc);
        assert_eq!(highlighter.searcher().tags().len(), 2);
        assert_eq!(buffer.style_at(doc.find("a<b").unwrap() + 1), Style::String);
        assert_eq!(buffer.style_at(8), Style::Keyword);
        assert_eq!(buffer.styled(Style::TagName), vec!["script", "script"]);
    }
}
