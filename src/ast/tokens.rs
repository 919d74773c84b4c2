use std::fmt;

/// Text carried by the synthetic end-of-stream token and by `EOF` nodes.
pub const EOF_TEXT: &str = "NULL";

/// Classification of a scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Filter key
    ///
    /// Letters, digits, `-`, `.` and `_`, never starting with a digit.
    ///
    /// # Examples
    /// ```text
    /// city
    /// city-district
    /// address.zip_code
    /// ```
    Identifier,

    /// Numeric run or double-quoted string, quotes included
    ///
    /// # Examples
    /// ```text
    /// 123
    /// "São João"
    /// ```
    Literal,

    /// `eq:`, `gt:`, `lt:`, `gte:`, `lte:`, `not:` or `IN:`
    ComparisonOperator,

    /// `&&` or `||`
    LogicalOperator,

    /// `(`, `)`, `[`, `]` or `,`
    Separator,

    /// `:=`
    ///
    /// Scanned but never consumed by the parser.
    AssignOperator,

    /// End of the token stream
    Eof,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Literal => "LITERAL",
            TokenKind::ComparisonOperator => "COMPARISON_OPERATOR",
            TokenKind::LogicalOperator => "LOGICAL_OPERATOR",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::AssignOperator => "ASSIGN_OPERATOR",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scanned unit of query text.
///
/// Equality compares both the kind and the exact text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Identifier, text)
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Literal, text)
    }

    pub fn comparison(text: impl Into<String>) -> Self {
        Token::new(TokenKind::ComparisonOperator, text)
    }

    pub fn logical(text: impl Into<String>) -> Self {
        Token::new(TokenKind::LogicalOperator, text)
    }

    pub fn separator(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Separator, text)
    }

    pub fn assign() -> Self {
        Token::new(TokenKind::AssignOperator, ":=")
    }

    /// The token the parser sees once the stream is exhausted.
    pub fn eof() -> Self {
        Token::new(TokenKind::Eof, EOF_TEXT)
    }

    pub fn opening_paren() -> Self {
        Token::separator("(")
    }

    pub fn closing_paren() -> Self {
        Token::separator(")")
    }

    pub fn in_operator() -> Self {
        Token::comparison("IN:")
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_opening_paren(&self) -> bool {
        self.kind == TokenKind::Separator && self.text == "("
    }

    pub fn is_closing_paren(&self) -> bool {
        self.kind == TokenKind::Separator && self.text == ")"
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(\"{}\")", self.kind, self.text)
    }
}
