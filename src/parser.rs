use std::fmt;

use log::{debug, trace, warn};

use crate::{
    ast::{Node, NodeKind, Token, TokenKind},
    options::ParseOptions,
};

const COMPARISON_OPERATORS: [&str; 6] = ["eq:", "gt:", "lt:", "gte:", "lte:", "not:"];

/// Which side of an unbalanced expression is missing a parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParenHint {
    MissingOpening,
    MissingClosing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The parser was handed no tokens at all.
    EmptyInput,
    /// A specific construct was required but another token was found.
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },
    /// Odd number of parentheses consumed by a production.
    UnbalancedParens(ParenHint),
    /// Tokens ran out where a construct was required (strict mode only).
    UnexpectedEnd { expected: &'static str },
    /// Tokens left over after the root expression (strict mode only).
    TrailingInput { found: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "You must provide a list of tokens"),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expect {}, got '{}'", expected, found)
            }
            ParseError::UnbalancedParens(ParenHint::MissingOpening) => {
                write!(f, "Expected '(' at the beginning of the expression")
            }
            ParseError::UnbalancedParens(ParenHint::MissingClosing) => {
                write!(f, "Expected ')' at the end of the expression")
            }
            ParseError::UnexpectedEnd { expected } => {
                write!(f, "Expect {}, got end of input", expected)
            }
            ParseError::TrailingInput { found } => {
                write!(f, "Unexpected '{}' after the end of the expression", found)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parentheses consumed by one production (or one filters chain).
#[derive(Debug, Default)]
struct ParenBalance {
    count: usize,
    last_was_closing: bool,
}

impl ParenBalance {
    fn record(&mut self, token: &Token) {
        self.count += 1;
        self.last_was_closing = token.is_closing_paren();
    }

    fn check(&self) -> Result<(), ParseError> {
        if self.count % 2 == 0 {
            return Ok(());
        }
        let hint = if self.last_was_closing {
            ParenHint::MissingOpening
        } else {
            ParenHint::MissingClosing
        };
        Err(ParseError::UnbalancedParens(hint))
    }
}

/// Recursive-descent parser over a scanned token stream.
///
/// Once the tokens are exhausted the current token becomes `EOF("NULL")`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    current_token: Token,
    options: ParseOptions,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Result<Self, ParseError> {
        Parser::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: ParseOptions) -> Result<Self, ParseError> {
        let current_token = tokens.first().cloned().ok_or(ParseError::EmptyInput)?;
        Ok(Parser {
            tokens,
            pos: 0,
            current_token,
            options,
        })
    }

    /// Parse the whole stream into a tree rooted at `UQL_EXPR`.
    pub fn parse(mut self) -> Result<Node, ParseError> {
        let root = self.parse_uql_expr()?;

        if self.pos < self.tokens.len() {
            if self.options.strict {
                return Err(ParseError::TrailingInput {
                    found: self.current_token.text.clone(),
                });
            }
            warn!(
                "ignoring {} token(s) after the expression, starting at '{}'",
                self.tokens.len() - self.pos,
                self.current_token.text
            );
        }

        debug!("parsed {} tokens", self.pos.min(self.tokens.len()));
        Ok(root)
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.current_token = self.tokens.get(self.pos).cloned().unwrap_or_else(Token::eof);
    }

    fn next_is_opening_paren(&self) -> bool {
        self.tokens
            .get(self.pos + 1)
            .is_some_and(Token::is_opening_paren)
    }

    /// Move the current token into the tree as a leaf.
    fn take_leaf(&mut self) -> Node {
        let node = Node::from(&self.current_token);
        self.advance();
        node
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current_token.text.clone(),
        }
    }

    /// Out of tokens where `expected` was due.
    fn exhausted(&self, expected: &'static str) -> Result<Node, ParseError> {
        if self.options.strict {
            return Err(ParseError::UnexpectedEnd { expected });
        }
        trace!("input exhausted while expecting {}", expected);
        Ok(Node::eof())
    }

    /// UQL_EXPR := WRAP_OPEN* FILTERS WRAP_CLOSE?
    ///
    /// A `(` is only peeled off as a wrapper when another `(` follows it;
    /// a single group belongs to FILTERS.
    fn parse_uql_expr(&mut self) -> Result<Node, ParseError> {
        let mut node = Node::new(NodeKind::UqlExpr);
        let mut parens = ParenBalance::default();

        while self.current_token.is_opening_paren() && self.next_is_opening_paren() {
            parens.record(&self.current_token);
            let wrapper = self.take_leaf();
            node.push_front(wrapper);
        }

        let filters = self.parse_filters()?;
        node.push_back(filters);

        if self.current_token.is_closing_paren() {
            parens.record(&self.current_token);
            let wrapper = self.take_leaf();
            node.push_back(wrapper);
        }

        parens.check()?;
        Ok(node)
    }

    /// FILTERS := GROUP_OPEN? FILTER GROUP_CLOSE? (LOGICAL_OP FILTERS)?
    ///
    /// The chain is read one segment at a time and folded from the tail, so
    /// `a && b && c` still nests as `a && (b && c)` without one stack frame
    /// per filter.
    fn parse_filters(&mut self) -> Result<Node, ParseError> {
        let mut parens = ParenBalance::default();
        let mut heads = Vec::new();

        let mut tail = loop {
            let mut segment = self.parse_filters_segment(&mut parens)?;

            if self.current_token.kind != TokenKind::LogicalOperator {
                break segment;
            }
            let operator = self.take_leaf();
            segment.push_back(operator);
            heads.push(segment);
        };

        // Every paren in the chain is recorded before any level is closed,
        // so each level would see this same count.
        parens.check()?;

        while let Some(mut head) = heads.pop() {
            head.push_back(tail);
            tail = head;
        }
        Ok(tail)
    }

    /// GROUP_OPEN? FILTER GROUP_CLOSE?
    fn parse_filters_segment(&mut self, parens: &mut ParenBalance) -> Result<Node, ParseError> {
        trace!("FILTERS at token {}", self.pos);
        let mut node = Node::new(NodeKind::FiltersNode);

        if self.current_token.is_opening_paren() {
            parens.record(&self.current_token);
            let open = self.take_leaf();
            node.push_front(open);
        }

        let filter = self.parse_filter()?;
        node.push_back(filter);

        if self.current_token.is_closing_paren() {
            parens.record(&self.current_token);
            let close = self.take_leaf();
            node.push_back(close);
        }
        Ok(node)
    }

    /// FILTER := KEY COMPARISON_EXPR
    fn parse_filter(&mut self) -> Result<Node, ParseError> {
        let key = self.parse_key()?;
        let comparison = self.parse_comparison_expr()?;

        Ok(Node::new(NodeKind::FilterNode)
            .with_child(key)
            .with_child(comparison))
    }

    fn parse_key(&mut self) -> Result<Node, ParseError> {
        if self.current_token.is_eof() {
            return self.exhausted("identifier");
        }
        if self.current_token.kind != TokenKind::Identifier {
            return Err(self.unexpected("identifier"));
        }
        Ok(self.take_leaf())
    }

    /// COMPARISON_EXPR := (IN_OP IN_OPERAND) | (COMP_OP OPERAND)
    fn parse_comparison_expr(&mut self) -> Result<Node, ParseError> {
        let (operator, operand) = if self.current_token == Token::in_operator() {
            let operator = self.parse_in_operator()?;
            (operator, self.parse_in_operand()?)
        } else {
            let operator = self.parse_comparison_operator()?;
            (operator, self.parse_operand()?)
        };

        Ok(Node::new(NodeKind::ComparisonExp)
            .with_child(operator)
            .with_child(operand))
    }

    fn parse_in_operator(&mut self) -> Result<Node, ParseError> {
        if self.current_token.is_eof() {
            return self.exhausted("IN: operator");
        }
        if self.current_token != Token::in_operator() {
            return Err(self.unexpected("IN: operator"));
        }
        Ok(self.take_leaf())
    }

    /// IN_OPERAND := "[" LITERAL ("," LITERAL)* "]"
    ///
    /// Tokens are buffered up to the first `]` and then checked by position:
    /// `[` first, `]` last, literals at odd indexes and commas at the
    /// remaining even ones.
    fn parse_in_operand(&mut self) -> Result<Node, ParseError> {
        let mut buffered = Vec::new();
        loop {
            if self.current_token.is_eof() {
                return self.exhausted("]");
            }
            let closed = self.current_token.text == "]";
            buffered.push(self.current_token.clone());
            if closed {
                break;
            }
            self.advance();
        }

        let mut node = Node::new(NodeKind::OperandIn);
        let last = buffered.len() - 1;

        for (i, token) in buffered.iter().enumerate() {
            let expected = if i == 0 {
                (token.text != "[").then_some("[")
            } else if i == last {
                (token.text != "]").then_some("]")
            } else if i % 2 == 1 {
                (token.kind != TokenKind::Literal).then_some("literal")
            } else {
                (token.text != ",").then_some("',' separator")
            };

            if let Some(expected) = expected {
                return Err(ParseError::UnexpectedToken {
                    expected,
                    found: token.text.clone(),
                });
            }
            node.push_back(Node::from(token));
        }

        // An even count means `[]` or a trailing comma before `]`.
        if self.options.strict && buffered.len() % 2 == 0 {
            return Err(ParseError::UnexpectedToken {
                expected: "literal",
                found: buffered[last].text.clone(),
            });
        }

        self.advance();
        Ok(node)
    }

    fn parse_comparison_operator(&mut self) -> Result<Node, ParseError> {
        if self.current_token.is_eof() {
            return self.exhausted("comparison operator");
        }
        if self.current_token.kind != TokenKind::ComparisonOperator
            || !COMPARISON_OPERATORS.contains(&self.current_token.text.as_str())
        {
            return Err(self.unexpected("comparison operator"));
        }
        Ok(self.take_leaf())
    }

    fn parse_operand(&mut self) -> Result<Node, ParseError> {
        if self.current_token.is_eof() {
            return self.exhausted("literal");
        }
        if self.current_token.kind != TokenKind::Literal {
            return Err(self.unexpected("literal"));
        }
        Ok(self.take_leaf())
    }
}
