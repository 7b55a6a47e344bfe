//! Types produced by the expression scanner.

/// What kind of shell context a buffered token was scanned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Ordinary text, or text inside a grouping that carries no meaning here.
    Plain,
    /// Inside `$(...)` or backticks.
    CommandSubstitution,
    /// Inside `$((...))`.
    ArithmeticCommand,
    /// Inside `${...}`.
    VariableName,
}

impl TokenKind {
    /// Whether a bare identifier in this context is a variable reference.
    pub fn allows_bare_identifier(self) -> bool {
        matches!(self, TokenKind::VariableName | TokenKind::ArithmeticCommand)
    }
}

/// A flushed run of buffered characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

/// A nesting pair: while its open delimiter has been seen and its close
/// delimiter has not, the pair sits on the scanner's frame stack.
#[derive(Debug, PartialEq, Eq)]
pub struct MatcherFrame {
    pub open: &'static str,
    pub close: &'static str,
    pub kind: TokenKind,
}

/// Nesting pairs in match priority order.
///
/// Open delimiters sharing a prefix are listed longest first, so `$((` is
/// tried before `$(` and `[[` before `[`.
pub static NESTING_PAIRS: &[MatcherFrame] = &[
    MatcherFrame {
        open: "$((",
        close: "))",
        kind: TokenKind::ArithmeticCommand,
    },
    MatcherFrame {
        open: "[[",
        close: "]]",
        kind: TokenKind::Plain,
    },
    MatcherFrame {
        open: "`",
        close: "`",
        kind: TokenKind::CommandSubstitution,
    },
    MatcherFrame {
        open: "$(",
        close: ")",
        kind: TokenKind::CommandSubstitution,
    },
    MatcherFrame {
        open: "${",
        close: "}",
        kind: TokenKind::VariableName,
    },
    MatcherFrame {
        open: "{",
        close: "}",
        kind: TokenKind::Plain,
    },
    MatcherFrame {
        open: "[",
        close: "]",
        kind: TokenKind::Plain,
    },
    MatcherFrame {
        open: "(",
        close: ")",
        kind: TokenKind::Plain,
    },
    MatcherFrame {
        open: "\"",
        close: "\"",
        kind: TokenKind::Plain,
    },
];

/// Characters that end the current buffer segment: `:`, `-`, `;`, `/` and whitespace.
pub fn is_boundary(c: char) -> bool {
    matches!(c, ':' | '-' | ';' | '/') || c.is_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longer_open_delimiters_come_first() {
        // Any open delimiter that is a prefix of another must be listed after it.
        for (i, short) in NESTING_PAIRS.iter().enumerate() {
            for long in &NESTING_PAIRS[i + 1..] {
                assert!(
                    !(long.open.starts_with(short.open) && long.open.len() > short.open.len()),
                    "{} shadows {}",
                    short.open,
                    long.open
                );
            }
        }
    }

    #[test]
    fn arithmetic_is_highest_priority() {
        assert_eq!(NESTING_PAIRS[0].open, "$((");
        assert_eq!(NESTING_PAIRS[0].kind, TokenKind::ArithmeticCommand);
    }

    #[test]
    fn double_quote_is_lowest_priority() {
        let last = NESTING_PAIRS.last().unwrap();
        assert_eq!(last.open, "\"");
        assert_eq!(last.close, "\"");
    }

    #[test]
    fn boundary_characters() {
        for c in [':', '-', ';', '/', ' ', '\t', '\n'] {
            assert!(is_boundary(c), "{c:?}");
        }
        for c in ['$', '_', 'a', '{', '"', '.', '='] {
            assert!(!is_boundary(c), "{c:?}");
        }
    }

    #[test]
    fn bare_identifier_contexts() {
        assert!(TokenKind::VariableName.allows_bare_identifier());
        assert!(TokenKind::ArithmeticCommand.allows_bare_identifier());
        assert!(!TokenKind::CommandSubstitution.allows_bare_identifier());
        assert!(!TokenKind::Plain.allows_bare_identifier());
    }
}
