use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving a tool call.
///
/// These are carried as values inside the conversation rather than raised:
/// the loop folds them back in as error-tagged tool results so the model can
/// see and react to them. Transport failures from a provider are a separate
/// category and abort the current query.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum AgentError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Tool execution failed: {0}")]
    ExecutionError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
