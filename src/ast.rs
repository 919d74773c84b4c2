//! # UQL - Tokens and Parse Tree
//!
//! Shared data model between the [`Tokenizer`](crate::lexer::Tokenizer) and
//! the [`Parser`](crate::parser::Parser).
//!
//! - **[tokens]** - kind + literal text produced by scanning
//! - **[node]** - labeled n-ary tree produced by parsing
//!
//! ## Quick Start
//!
//! ```text
//! (city IN: ["São João", "São Paulo"] && number eq: 123) || (zipCode eq: "13860123")
//! ```
//!
//! ## Tree Shape
//!
//! Every tree is rooted at `UQL_EXPR`. Filters chained with `&&`/`||` nest to
//! the right, so `a && b && c` reads as `a && (b && c)`:
//!
//! ```text
//! Node[UQL_EXPR = 'null']
//! └─ Node[FILTERS_NODE = 'null']
//!    └─ Node[FILTER_NODE = 'null']
//!    └─ Node[LOGICAL_OPERATOR = '&&']
//!    └─ Node[FILTERS_NODE = 'null']
//!       └─ Node[FILTER_NODE = 'null']
//!       └─ Node[LOGICAL_OPERATOR = '&&']
//!       └─ Node[FILTERS_NODE = 'null']
//! ```
//!
//! Parentheses stay in the tree as `SEPARATOR` children of the node that
//! consumed them.
pub mod node;
pub mod tokens;

pub use node::{Node, NodeKind};
pub use tokens::{Token, TokenKind};
