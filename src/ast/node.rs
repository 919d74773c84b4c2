use std::collections::VecDeque;
use std::fmt;

use super::tokens::{EOF_TEXT, Token, TokenKind};

/// Grammar symbol or token kind labelling a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    UqlExpr,
    FiltersNode,
    FilterNode,
    ComparisonExp,
    ComparisonOperator,
    Literal,
    Identifier,
    LogicalOperator,
    Separator,
    OperandIn,
    AssignOperator,
    Eof,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::UqlExpr => "UQL_EXPR",
            NodeKind::FiltersNode => "FILTERS_NODE",
            NodeKind::FilterNode => "FILTER_NODE",
            NodeKind::ComparisonExp => "COMPARISON_EXP",
            NodeKind::ComparisonOperator => "COMPARISON_OPERATOR",
            NodeKind::Literal => "LITERAL",
            NodeKind::Identifier => "IDENTIFIER",
            NodeKind::LogicalOperator => "LOGICAL_OPERATOR",
            NodeKind::Separator => "SEPARATOR",
            NodeKind::OperandIn => "OPERAND_IN",
            NodeKind::AssignOperator => "ASSIGN_OPERATOR",
            NodeKind::Eof => "EOF",
        }
    }
}

impl From<TokenKind> for NodeKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Identifier => NodeKind::Identifier,
            TokenKind::Literal => NodeKind::Literal,
            TokenKind::ComparisonOperator => NodeKind::ComparisonOperator,
            TokenKind::LogicalOperator => NodeKind::LogicalOperator,
            TokenKind::Separator => NodeKind::Separator,
            TokenKind::AssignOperator => NodeKind::AssignOperator,
            TokenKind::Eof => NodeKind::Eof,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labeled parse tree element.
///
/// A node owns its children; order is significant. For `COMPARISON_EXP`
/// child 0 is always the operator and child 1 the operand.
///
/// `==` compares whole subtrees. Use [`Node::same_symbol`] to compare only
/// the label and value.
///
/// Equality, rendering and drop walk the tree with an explicit stack, so a
/// long right-nested filter chain does not exhaust the call stack.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub value: Option<String>,
    pub children: VecDeque<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Node {
            kind,
            value: None,
            children: VecDeque::new(),
        }
    }

    pub fn with_value(kind: NodeKind, value: impl Into<String>) -> Self {
        Node {
            kind,
            value: Some(value.into()),
            children: VecDeque::new(),
        }
    }

    /// Terminal produced when the parser runs out of tokens.
    pub fn eof() -> Self {
        Node::with_value(NodeKind::Eof, EOF_TEXT)
    }

    pub fn push_back(&mut self, child: Node) -> &mut Self {
        self.children.push_back(child);
        self
    }

    pub fn push_front(&mut self, child: Node) -> &mut Self {
        self.children.push_front(child);
        self
    }

    /// Builder form of [`Node::push_back`].
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push_back(child);
        self
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == NodeKind::Eof
    }

    /// Shallow equality: label and value, children ignored.
    pub fn same_symbol(&self, other: &Node) -> bool {
        self.kind == other.kind && self.value == other.value
    }

    /// Deep equality, position by position.
    pub fn structurally_eq(&self, other: &Node) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((a, b)) = pending.pop() {
            if !a.same_symbol(b) || a.children.len() != b.children.len() {
                return false;
            }
            pending.extend(a.children.iter().zip(b.children.iter()));
        }
        true
    }

    /// Multi-line diagnostic rendering.
    ///
    /// ```text
    /// Node[UQL_EXPR = 'null']
    /// └─ Node[FILTERS_NODE = 'null']
    ///    └─ Node[FILTER_NODE = 'null']
    /// ```
    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![(self, 0usize)];

        while let Some((node, depth)) = pending.pop() {
            if depth > 0 {
                out.push('\n');
                out.push_str(&"   ".repeat(depth - 1));
                out.push_str("└─ ");
            }
            out.push_str("Node[");
            out.push_str(node.kind.as_str());
            out.push_str(" = '");
            out.push_str(node.value.as_deref().unwrap_or("null"));
            out.push_str("']");

            // reversed so the first child is rendered first
            pending.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_eq(other)
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = self.children.drain(..).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..));
        }
    }
}

impl From<&Token> for Node {
    fn from(token: &Token) -> Self {
        Node::with_value(token.kind.into(), token.text.clone())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tree_string())
    }
}
