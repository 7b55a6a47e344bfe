//! Ad-hoc scanner that fishes variable references out of a shell value.
//!
//! This is not a shell parser. It tracks nested `$((...))`, `$(...)`,
//! `${...}`, backtick, bracket and quote contexts well enough to tell which
//! identifiers are variable references, and nothing more. In particular it
//! does not distinguish `cat` in `$(cat mouse)` (a command) from `cat` in
//! `$((cat + mouse))` (a variable): once any enclosing context is arithmetic,
//! every identifier counts as a reference.

use super::types::{MatcherFrame, NESTING_PAIRS, Token, TokenKind, is_boundary};

/// Scans shell value expressions and remembers the result of the last scan.
#[derive(Debug, Default)]
pub struct ExpressionTokenizer {
    last: Option<Scan>,
}

impl ExpressionTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `expr`, replacing the result of any previous scan.
    pub fn parse(&mut self, expr: &str) {
        self.last = Some(Scan::run(expr));
    }

    /// Referenced variable names in encounter order, duplicates included.
    ///
    /// `None` until [`parse`](Self::parse) has been called.
    pub fn get_variables(&self) -> Option<&[String]> {
        self.last.as_ref().map(|s| s.variables.as_slice())
    }

    /// Token stream of the last scan.
    pub fn tokens(&self) -> Option<&[Token]> {
        self.last.as_ref().map(|s| s.tokens.as_slice())
    }
}

/// Scan `expr` and return the variable names it references.
pub fn extract_variables(expr: &str) -> Vec<String> {
    Scan::run(expr).variables
}

/// State of one scan over one expression.
#[derive(Debug)]
struct Scan {
    buf: String,
    stack: Vec<&'static MatcherFrame>,
    tokens: Vec<Token>,
    variables: Vec<String>,
}

impl Scan {
    fn run(expr: &str) -> Self {
        let mut scan = Scan {
            buf: String::new(),
            stack: Vec::new(),
            tokens: Vec::new(),
            variables: Vec::new(),
        };

        let chars: Vec<char> = expr.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if is_boundary(chars[i]) {
                scan.flush();
                while i < len && is_boundary(chars[i]) {
                    i += 1;
                }
                continue;
            }

            if let Some(&frame) = scan.stack.last()
                && starts_with_at(&chars, i, frame.close)
            {
                let close_len = frame.close.chars().count();
                scan.flush();
                scan.stack.pop();
                i += close_len;
                continue;
            }

            if let Some(frame) = NESTING_PAIRS
                .iter()
                .find(|f| starts_with_at(&chars, i, f.open))
            {
                scan.flush();
                scan.stack.push(frame);
                i += frame.open.chars().count();
                continue;
            }

            scan.buf.push(chars[i]);
            i += 1;
        }
        scan.flush();
        scan
    }

    /// Bare identifiers count as references inside `${...}` or `$((...))`,
    /// however deeply nested.
    fn sigil_optional(&self) -> bool {
        self.stack.iter().any(|f| f.kind.allows_bare_identifier())
    }

    fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        // Text trailing a substitution is never substitution content itself.
        let kind = match self.tokens.last() {
            Some(prev) if prev.kind == TokenKind::CommandSubstitution => TokenKind::Plain,
            _ => self.stack.last().map_or(TokenKind::Plain, |f| f.kind),
        };
        let text = std::mem::take(&mut self.buf);

        if let Some(name) = first_identifier(&text, self.sigil_optional()) {
            self.variables.push(name.to_string());
        }
        self.tokens.push(Token { kind, text });
    }
}

fn starts_with_at(chars: &[char], at: usize, pat: &str) -> bool {
    let mut idx = at;
    for p in pat.chars() {
        if chars.get(idx) != Some(&p) {
            return false;
        }
        idx += 1;
    }
    true
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// First identifier in `text`; only the first is ever reported, even when a
/// segment holds several (`$a.$b` yields `a`).
fn first_identifier(text: &str, sigil_optional: bool) -> Option<&str> {
    let start = if sigil_optional {
        text.find(is_ident_start)?
    } else {
        text.char_indices().find_map(|(i, c)| {
            let after = i + c.len_utf8();
            (c == '$' && text[after..].starts_with(is_ident_start)).then_some(after)
        })?
    };
    let rest = &text[start..];
    let end = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(expr: &str) -> Vec<String> {
        extract_variables(expr)
    }

    fn kinds(expr: &str) -> Vec<(TokenKind, String)> {
        let mut t = ExpressionTokenizer::new();
        t.parse(expr);
        t.tokens()
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.text.clone()))
            .collect()
    }

    #[test]
    fn no_parse_no_variables() {
        let t = ExpressionTokenizer::new();
        assert!(t.get_variables().is_none());
        assert!(t.tokens().is_none());
    }

    #[test]
    fn parse_replaces_previous_result() {
        let mut t = ExpressionTokenizer::new();
        t.parse("$A");
        assert_eq!(t.get_variables().unwrap(), ["A"]);
        t.parse("ls -l");
        assert!(t.get_variables().unwrap().is_empty());
    }

    #[test]
    fn plain_words_need_sigil() {
        assert!(vars("ls -l").is_empty());
        assert_eq!(vars("   $X   "), ["X"]);
    }

    #[test]
    fn decoy_word_is_skipped() {
        assert_eq!(vars("  $X  $Y  decoy;$z  "), ["X", "Y", "z"]);
    }

    #[test]
    fn boundaries_split_segments() {
        assert_eq!(
            vars("$left:$right:$up:$down;  $high    $low"),
            ["left", "right", "up", "down", "high", "low"]
        );
        assert_eq!(
            vars("$A;__$b/slash-$DASHDIVIDE-$c"),
            ["A", "b", "DASHDIVIDE", "c"]
        );
    }

    #[test]
    fn only_first_identifier_per_segment() {
        assert_eq!(vars("$a.$b"), ["a"]);
        assert_eq!(vars("x$first,$second y"), ["first"]);
    }

    #[test]
    fn duplicates_are_kept() {
        assert_eq!(vars("$A:$A"), ["A", "A"]);
    }

    #[test]
    fn brace_expansion_without_sigil() {
        assert_eq!(vars("${asdf} "), ["asdf"]);
        assert_eq!(
            vars("${bat}  ${cat}${hat}_${mat} "),
            ["bat", "cat", "hat", "mat"]
        );
    }

    #[test]
    fn arithmetic_bare_identifiers() {
        assert_eq!(vars("echo $(( ONE + TWO ))"), ["ONE", "TWO"]);
    }

    #[test]
    fn command_substitution_requires_sigil() {
        assert_eq!(vars(" echo $(echo $NESTY) "), ["NESTY"]);
        assert!(vars("echo $( cat /etc/passwd | wc -l )").is_empty());
    }

    #[test]
    fn arithmetic_ancestor_makes_everything_a_reference() {
        assert_eq!(
            vars("echo $(( $(cat $(echo /etc/passwd) | wc -l) * 2 + 3 + BLAH ))"),
            ["cat", "echo", "etc", "passwd", "wc", "l", "BLAH"]
        );
    }

    #[test]
    fn identifier_after_digits() {
        assert_eq!(vars("$((2abc))"), ["abc"]);
        assert!(vars("$1").is_empty());
        assert_eq!(vars("$1$foo"), ["foo"]);
    }

    #[test]
    fn quotes_and_brackets() {
        assert!(
            vars("if [ \"w\" == \"!\" ]; then echo $(date +%F); else echo date +%s; fi").is_empty()
        );
        assert_eq!(vars("[[ -n $HOME ]]"), ["HOME"]);
    }

    #[test]
    fn unterminated_frame_stays_open() {
        assert_eq!(vars("${a b"), ["a", "b"]);
        assert_eq!(
            kinds("$((x"),
            vec![(TokenKind::ArithmeticCommand, "x".to_string())]
        );
    }

    #[test]
    fn token_kinds_follow_context() {
        assert_eq!(
            kinds("a ${b} $(c)"),
            vec![
                (TokenKind::Plain, "a".to_string()),
                (TokenKind::VariableName, "b".to_string()),
                (TokenKind::CommandSubstitution, "c".to_string()),
            ]
        );
    }

    #[test]
    fn text_after_substitution_is_plain() {
        assert_eq!(
            kinds("$(x $y)"),
            vec![
                (TokenKind::CommandSubstitution, "x".to_string()),
                (TokenKind::Plain, "$y".to_string()),
            ]
        );
    }

    #[test]
    fn backticks_toggle() {
        assert_eq!(
            kinds("`date` $x"),
            vec![
                (TokenKind::CommandSubstitution, "date".to_string()),
                (TokenKind::Plain, "$x".to_string()),
            ]
        );
    }

    #[test]
    fn tokens_in_source_order() {
        let toks = kinds("one two:three");
        let texts: Vec<&str> = toks.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn empty_input() {
        assert!(vars("").is_empty());
        assert!(kinds("").is_empty());
    }
}
