//! Errors surfaced by chunk tree loading and code generation.

use crate::codegen::expression_helper::ExpressionKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// A model-expression attribute value is not a plain member-access chain.
    #[error(
        "The expression '{expression}' is not supported: only simple member access chains are allowed, found {kind}"
    )]
    UnsupportedExpression {
        kind: ExpressionKind,
        expression: String,
    },

    /// A chunk tree that cannot be represented, e.g. an unbalanced parent chunk.
    #[error("invalid chunk tree: {0}")]
    InvalidChunkTree(String),

    /// A chunk tree or host configuration document that failed to deserialize.
    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot build source map: {0}")]
    SourceMap(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
