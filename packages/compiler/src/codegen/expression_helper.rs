//! Expression Helper
//!
//! Extracts the member path from simple lambdas such as `m => m.Address.City`,
//! used when a tag helper property expects a model expression.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::error::{GeneratorError, Result};

static LAMBDA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\(?\s*@?([A-Za-z_][A-Za-z0-9_]*)\s*\)?\s*=>\s*(.*?)\s*$").unwrap()
});

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@?[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]").unwrap());

/// The construct that made an expression unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    /// Not a `param => body` lambda at all.
    NotLambda,
    Call,
    ArrayIndex,
    Conditional,
    Binary,
    Constant,
    Convert,
    /// The member chain does not start at the lambda parameter.
    UnboundMemberAccess,
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpressionKind::NotLambda => "a non-lambda expression",
            ExpressionKind::Call => "a method call",
            ExpressionKind::ArrayIndex => "an indexer",
            ExpressionKind::Conditional => "a conditional",
            ExpressionKind::Binary => "a binary operator",
            ExpressionKind::Constant => "a constant",
            ExpressionKind::Convert => "a cast",
            ExpressionKind::UnboundMemberAccess => "a member access not rooted at the parameter",
        };
        f.write_str(name)
    }
}

/// Returns the dotted member path of `expression` without the parameter,
/// e.g. `"Address.City"` for `m => m.Address.City` and `""` for `m => m`.
pub fn get_expression_text(expression: &str) -> Result<String> {
    let unsupported = |kind: ExpressionKind| GeneratorError::UnsupportedExpression {
        kind,
        expression: expression.to_string(),
    };

    let captures = LAMBDA
        .captures(expression)
        .ok_or_else(|| unsupported(ExpressionKind::NotLambda))?;
    let parameter = captures[1].to_string();
    let body = captures[2].trim();

    let mut segments = body.split('.').map(str::trim);
    let root = segments.next().unwrap_or_default();
    if root.trim_start_matches('@') != parameter {
        return Err(unsupported(classify(root)));
    }

    let mut path: Vec<&str> = Vec::new();
    for segment in segments {
        if !IDENTIFIER.is_match(segment) {
            return Err(unsupported(classify(segment)));
        }
        path.push(segment);
    }
    Ok(path.join("."))
}

fn classify(segment: &str) -> ExpressionKind {
    if segment.starts_with('(') {
        ExpressionKind::Convert
    } else if segment.contains('(') {
        ExpressionKind::Call
    } else if segment.contains('[') {
        ExpressionKind::ArrayIndex
    } else if segment.contains('?') {
        ExpressionKind::Conditional
    } else if segment.contains(['+', '-', '*', '/', '%', '&', '|', '<', '>', '=', '!', '^']) {
        ExpressionKind::Binary
    } else if segment.is_empty()
        || NUMERIC.is_match(segment)
        || segment.starts_with('"')
        || segment.starts_with('\'')
    {
        ExpressionKind::Constant
    } else {
        ExpressionKind::UnboundMemberAccess
    }
}
