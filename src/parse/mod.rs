pub mod tokenize;
pub mod types;

pub use tokenize::{ExpressionTokenizer, extract_variables};
pub use types::{MatcherFrame, NESTING_PAIRS, Token, TokenKind};
