//! Error types for the backend, the sandbox, and tool dispatch.

use thiserror::Error;

/// Failure talking to the text-generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("backend returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("could not decode backend response: {0}")]
    Parse(String),
}

/// The only failure `Agent::process_request` lets escape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("Model backend error: {0}")]
    BackendUnavailable(#[from] BackendError),
}

/// A path that would leave the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathViolation {
    #[error("Absolute paths are not allowed: {0}")]
    Absolute(String),

    #[error("Path escapes workspace: {0}")]
    Escapes(String),
}

/// Errors raised while turning a directive into a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Malformed arguments for a tool with a fixed argument convention.
    #[error("Use format: {expected}")]
    ArgumentFormat { expected: &'static str },

    /// Anything else that went wrong while running the tool.
    #[error("{0}")]
    Execution(String),
}
