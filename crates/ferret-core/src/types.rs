//! Core types — TaggedResult, ToolSpec, Directive, listings.

use serde::Serialize;

// ── Tagged results ──

/// Semantic kind of a tool result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Result,
    Error,
    Weather,
    Content,
    Success,
    Listing,
    Image,
    Resource,
}

impl ResultKind {
    pub fn tag(self) -> &'static str {
        match self {
            ResultKind::Result => "RESULT",
            ResultKind::Error => "ERROR",
            ResultKind::Weather => "WEATHER",
            ResultKind::Content => "CONTENT",
            ResultKind::Success => "SUCCESS",
            ResultKind::Listing => "LISTING",
            ResultKind::Image => "IMAGE",
            ResultKind::Resource => "RESOURCE",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Output of every tool. `Display` renders the `"<TAG>: <payload>"` wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedResult {
    pub kind: ResultKind,
    pub payload: String,
}

impl TaggedResult {
    pub fn new(kind: ResultKind, payload: impl Into<String>) -> Self {
        Self {
            kind,
            payload: payload.into(),
        }
    }

    pub fn result(payload: impl Into<String>) -> Self {
        Self::new(ResultKind::Result, payload)
    }

    pub fn error(payload: impl Into<String>) -> Self {
        Self::new(ResultKind::Error, payload)
    }

    pub fn success(payload: impl Into<String>) -> Self {
        Self::new(ResultKind::Success, payload)
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResultKind::Error
    }
}

impl std::fmt::Display for TaggedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.payload)
    }
}

// ── Tool definitions ──

/// How a tool's raw argument string is split before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentConvention {
    /// Passed through unmodified.
    Single,
    /// `first,second` with the second parsed as an integer (default 100).
    CommaPair,
    /// `path|content`, split on the first pipe.
    PipePair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// Argument hint shown to the model in the system prompt.
    pub usage: &'static str,
    pub argument_convention: ArgumentConvention,
}

/// `{name, description}` pair served by `GET /tools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

impl From<&ToolSpec> for ToolInfo {
    fn from(spec: &ToolSpec) -> Self {
        Self {
            name: spec.name.to_string(),
            description: spec.description.to_string(),
        }
    }
}

// ── Directives ──

/// A tool invocation extracted from model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub tool_name: String,
    pub raw_arguments: String,
}

// ── Resources ──

/// Metadata for an entry in the in-memory resource table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceInfo {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}
