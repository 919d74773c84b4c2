//! Front end for UQL, a small filter query language.
//!
//! ```text
//! (city IN: ["São João", "São Paulo"] && number eq: 123) || zipCode eq: "13860123"
//! ```
//!
//! Text goes through the [`Tokenizer`] and then the [`Parser`], which builds a
//! [`Node`] tree rooted at `UQL_EXPR`. Interpreting the tree is left to the
//! caller.
//!
//! ```
//! let tree = uql::parse(r#"city eq: "São João""#).unwrap();
//! assert_eq!(tree.kind, uql::NodeKind::UqlExpr);
//! ```
pub mod ast;
pub mod cli;
pub mod lexer;
pub mod options;
pub mod output;
pub mod parser;

use std::fmt;

pub use ast::{Node, NodeKind, Token, TokenKind};
pub use lexer::{LexError, Tokenizer};
pub use options::ParseOptions;
pub use output::{node_to_json, tokens_to_json};
pub use parser::{ParenHint, ParseError, Parser};

/// Either stage of [`parse`] failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UqlError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for UqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UqlError::Lex(e) => write!(f, "Lexical error: {}", e),
            UqlError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for UqlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UqlError::Lex(e) => Some(e),
            UqlError::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for UqlError {
    fn from(e: LexError) -> Self {
        UqlError::Lex(e)
    }
}

impl From<ParseError> for UqlError {
    fn from(e: ParseError) -> Self {
        UqlError::Parse(e)
    }
}

/// Scan `query` with the default (lenient) options.
pub fn tokenize(query: &str) -> Result<Vec<Token>, LexError> {
    Tokenizer::new(query).tokenize()
}

/// Scan and parse `query` with the default (lenient) options.
pub fn parse(query: &str) -> Result<Node, UqlError> {
    parse_with(query, ParseOptions::default())
}

pub fn parse_with(query: &str, options: ParseOptions) -> Result<Node, UqlError> {
    let tokens = Tokenizer::with_options(query, options).tokenize()?;
    let tree = Parser::with_options(tokens, options)?.parse()?;
    Ok(tree)
}
