//! Knobs shared by the tokenizer and the parser.

/// Selects between the permissive reference behavior and a tightened one.
///
/// Lenient (the default):
/// - unknown characters other than `@` and `:` are skipped
/// - an unterminated quoted literal produces no token
/// - running out of tokens where a key, operator or operand is due yields an
///   `EOF` node instead of an error
/// - tokens left over after the root expression are ignored
///
/// Strict turns each of these into an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub strict: bool,
}

impl ParseOptions {
    pub fn lenient() -> Self {
        ParseOptions { strict: false }
    }

    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }
}
