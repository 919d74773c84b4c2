//! Run uql queries through the tokenizer and parser

use super::CliError;
use crate::output::{node_to_json, to_json_string, tokens_to_json};
use crate::{ParseOptions, Parser, Tokenizer};

/// What to do with the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Only report whether the query is valid
    #[default]
    Check,
    /// Print the token stream
    Tokens,
    /// Print the parse tree
    Tree,
}

/// Options for a CLI run
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query text
    pub query: String,
    pub command: Command,
    /// Emit JSON instead of the text rendering
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Reject inputs the lenient mode lets through
    pub strict: bool,
}

/// Result of a CLI run
#[derive(Debug, PartialEq, Eq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Rendered tokens or tree, ready to print
    Rendered(String),
}

/// Execute a uql CLI operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let parse_options = if options.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::lenient()
    };

    let tokens = Tokenizer::with_options(&options.query, parse_options).tokenize()?;

    if options.command == Command::Tokens {
        let rendered = if options.json {
            to_json_string(&tokens_to_json(&tokens), options.pretty)?
        } else {
            tokens
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        };
        return Ok(CheckResult::Rendered(rendered));
    }

    let tree = Parser::with_options(tokens, parse_options)?.parse()?;

    match options.command {
        Command::Check => Ok(CheckResult::SyntaxValid),
        _ if options.json => Ok(CheckResult::Rendered(to_json_string(
            &node_to_json(&tree),
            options.pretty,
        )?)),
        _ => Ok(CheckResult::Rendered(tree.tree_string())),
    }
}
