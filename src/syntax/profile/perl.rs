// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::syntax::color_mapper::Style;
use crate::syntax::profile::{
    Condition, HeredocSyntax, HeredocTerminator, LanguageProfile, QuoteOperatorSyntax, VARIABLE_END,
    at_line_start,
};
use crate::syntax::scan;
use crate::syntax::searcher::SearchPass;

const KEYWORDS: &[&str] = &[
    "__DATA__", "__END__", "__FILE__", "__LINE__", "__PACKAGE__", "and", "chomp", "close", "cmp",
    "defined", "delete", "die", "do", "each", "else", "elsif", "eq", "eval", "exists", "for",
    "foreach", "ge", "grep", "gt", "if", "join", "keys", "last", "le", "local", "lt", "map", "my",
    "ne", "next", "not", "open", "or", "our", "package", "pop", "print", "printf", "push", "redo",
    "ref", "require", "return", "scalar", "shift", "sort", "split", "sprintf", "sub", "undef",
    "unless", "unshift", "until", "use", "values", "wantarray", "warn", "while", "xor",
];

/// Documentation blocks run from one of these commands to `=cut`.
const POD_STARTS: &[&str] = &["=pod", "=head", "=begin", "=over", "=item", "=encoding"];

static HEREDOC: Lazy<HeredocSyntax> = Lazy::new(|| HeredocSyntax {
    opener: Regex::new(
        r#"<<(?P<indent>~)?(?:"(?P<dq>[A-Za-z_]\w*)"|'(?P<sq>[A-Za-z_]\w*)'|(?P<bare>[A-Za-z_]\w*))"#,
    )
    .expect("valid heredoc pattern"),
    terminator: HeredocTerminator::ExactLine,
});

static QUOTE_OPERATORS: QuoteOperatorSyntax = QuoteOperatorSyntax {
    operators: &["qq", "qw", "qr", "qx", "tr", "q", "m", "s", "y"],
    two_part: &["s", "tr", "y"],
};

pub struct PerlProfile;

pub static PERL: PerlProfile = PerlProfile;

impl LanguageProfile for PerlProfile {
    fn name(&self) -> &'static str {
        "perl"
    }

    fn highlight(&self, s: &mut SearchPass<'_>) {
        s.map_heredocs();
        s.map_quote_operators();
        s.quote(false);
        s.set_condition(Condition::CommentMark);
        s.line_comments(&["#"]);
        for start in POD_STARTS {
            s.set_condition(Condition::LineStart);
            s.block_comments(start, "=cut", false);
        }
        s.keywords(KEYWORDS, true, &['$', '@', '%', '&', '-', '>'], Style::Keyword);
        s.signed_variable('$', VARIABLE_END, &[]);
        s.signed_variable('@', VARIABLE_END, &['{']);
        s.signed_variable('%', VARIABLE_END, &['=', '{', '(']);
        s.brackets();
        s.braces();
    }

    fn is_valid(&self, text: &str, pos: usize, condition: Condition) -> bool {
        match condition {
            Condition::CommentMark => !is_array_length(text, pos),
            Condition::LineStart => at_line_start(text, pos),
            Condition::QuoteOperator => {
                let before = &text[..pos];
                !before.ends_with(['$', '@', '%', '&', '*', '{'])
                    && !before.ends_with("->")
                    && !before.ends_with("::")
                    && !scan::in_quotes_on_line(text, pos)
            }
            Condition::Heredoc => !scan::in_quotes_on_line(text, pos),
            _ => true,
        }
    }

    fn behind_line_cmnt_mark(&self, text: &str, pos: usize) -> Option<usize> {
        scan::behind_mark_on_line_where(text, pos, &["#"], |at| !is_array_length(text, at))
    }

    fn heredoc_syntax(&self) -> Option<&HeredocSyntax> {
        Some(&HEREDOC)
    }

    fn quote_operator_syntax(&self) -> Option<&QuoteOperatorSyntax> {
        Some(&QUOTE_OPERATORS)
    }
}

/// `$#array` is the last index of `@array`, not a comment.
fn is_array_length(text: &str, pos: usize) -> bool {
    pos > 0 && text.as_bytes()[pos - 1] == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heredoc_opener() {
        let caps = HEREDOC.opener.captures("print <<~\"END\";").unwrap();
        assert_eq!(HEREDOC.tag(&caps), Some(("END", true)));
        let caps = HEREDOC.opener.captures("print <<EOT;").unwrap();
        assert_eq!(HEREDOC.tag(&caps), Some(("EOT", false)));
        assert!(HEREDOC.opener.captures("1 << 2").is_none());
    }

    #[test]
    fn test_quote_operator_context() {
        let text = "my $s = 1; $h->s; s/a/b/;";
        assert!(!PERL.is_valid(text, 4, Condition::QuoteOperator));
        assert!(!PERL.is_valid(text, 15, Condition::QuoteOperator));
        assert!(PERL.is_valid(text, 18, Condition::QuoteOperator));
    }

    #[test]
    fn test_heredoc_opener_context() {
        let text = "print \"a <<EOT\"; print <<EOT;";
        assert!(!PERL.is_valid(text, 9, Condition::Heredoc));
        assert!(PERL.is_valid(text, text.rfind("<<").unwrap(), Condition::Heredoc));
    }
}
