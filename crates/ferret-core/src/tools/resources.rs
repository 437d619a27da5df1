//! In-memory resource table — read-only sample documents addressed by URI.

use crate::types::{ResourceInfo, ResultKind, TaggedResult};

const URI_SCHEME: &str = "file://";

struct Resource {
    uri: &'static str,
    name: &'static str,
    description: &'static str,
    mime_type: &'static str,
    content: &'static str,
}

const RESOURCES: &[Resource] = &[
    Resource {
        uri: "file://sample.txt",
        name: "Sample Text File",
        description: "A sample text file",
        mime_type: "text/plain",
        content: "This is a sample text file content.",
    },
    Resource {
        uri: "file://data.json",
        name: "Sample JSON Data",
        description: "Sample JSON configuration",
        mime_type: "application/json",
        content: r#"{"name": "test", "value": 42}"#,
    },
    Resource {
        uri: "file://info.md",
        name: "Sample Markdown",
        description: "Sample markdown document",
        mime_type: "text/markdown",
        content: "# Sample Markdown\n\nThis is **bold** text.",
    },
];

/// Accepts `file://name` or a bare `name`.
fn lookup(uri: &str) -> Option<&'static Resource> {
    let uri = uri.trim();
    let name = uri.strip_prefix(URI_SCHEME).unwrap_or(uri);
    RESOURCES
        .iter()
        .find(|r| r.uri.strip_prefix(URI_SCHEME) == Some(name))
}

pub fn list_resources() -> Vec<ResourceInfo> {
    RESOURCES
        .iter()
        .map(|r| ResourceInfo {
            uri: r.uri.to_string(),
            name: r.name.to_string(),
            description: r.description.to_string(),
            mime_type: r.mime_type.to_string(),
        })
        .collect()
}

pub fn read_resource(uri: &str) -> TaggedResult {
    match lookup(uri) {
        Some(r) => TaggedResult::new(ResultKind::Resource, r.content),
        None => TaggedResult::error(format!("Resource not found: {}", uri.trim())),
    }
}

/// Like [`read_resource`] but prefixed with a header naming the resource.
pub fn embed_resource(uri: &str) -> TaggedResult {
    match lookup(uri) {
        Some(r) => TaggedResult::new(
            ResultKind::Resource,
            format!("[{} ({})]\n{}", r.uri, r.mime_type, r.content),
        ),
        None => TaggedResult::error(format!("Resource not found: {}", uri.trim())),
    }
}
