//! JSON export of token streams and parse trees.
//!
//! Tokens become `{"kind": "IDENTIFIER", "text": "city"}`. Nodes become
//! `{"type": "FILTER_NODE", "value": null, "children": [...]}`, with
//! `children` left out for leaves so that literal-heavy trees stay compact.
//!
//! # Examples
//!
//! ```
//! use uql::ast::Token;
//! use uql::output::tokens_to_json;
//!
//! let json = tokens_to_json(&[Token::identifier("city")]);
//! assert_eq!(json.to_string(), r#"[{"kind":"IDENTIFIER","text":"city"}]"#);
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{Node, Token};

pub fn token_to_json(token: &Token) -> Value {
    json!({
        "kind": token.kind.as_str(),
        "text": token.text,
    })
}

pub fn tokens_to_json(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(token_to_json).collect())
}

/// Converts children before their parent, using an explicit stack.
pub fn node_to_json(node: &Node) -> Value {
    let mut pending = vec![(node, false)];
    let mut built: Vec<Value> = Vec::new();

    while let Some((node, children_done)) = pending.pop() {
        if !children_done {
            pending.push((node, true));
            pending.extend(node.children.iter().rev().map(|child| (child, false)));
            continue;
        }
        let children = built.split_off(built.len() - node.children.len());
        built.push(node_object(node, children));
    }
    built.pop().unwrap_or(Value::Null)
}

fn node_object(node: &Node, children: Vec<Value>) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), Value::String(node.kind.as_str().to_string()));
    object.insert(
        "value".to_string(),
        node.value.clone().map(Value::String).unwrap_or(Value::Null),
    );

    if !children.is_empty() {
        object.insert("children".to_string(), Value::Array(children));
    }
    Value::Object(object)
}

/// Serialize with or without 2-space indentation.
pub fn to_json_string(value: &Value, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
