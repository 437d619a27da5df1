//! Sandboxed file manager — read, write, delete, list, mkdir.
//!
//! Every operation resolves its path through [`Sandbox::resolve`] first and
//! reports failure as an `ERROR` result instead of an `io::Error`.

use tracing::info;

use super::sandbox::Sandbox;
use crate::types::{ResultKind, TaggedResult};

pub fn read(sandbox: &Sandbox, path: &str) -> TaggedResult {
    let target = match sandbox.resolve(path) {
        Ok(p) => p,
        Err(e) => return TaggedResult::error(e.to_string()),
    };
    let shown = sandbox.display(&target);

    if !target.exists() {
        return TaggedResult::error(format!("File not found: {}", shown));
    }
    if !target.is_file() {
        return TaggedResult::error(format!("Not a file: {}", shown));
    }

    match std::fs::read(&target) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => TaggedResult::new(ResultKind::Content, text),
            Err(_) => TaggedResult::error(format!("File is not valid UTF-8: {}", shown)),
        },
        Err(e) => TaggedResult::error(format!("Failed to read {}: {}", shown, e)),
    }
}

pub fn write(sandbox: &Sandbox, path: &str, content: &str) -> TaggedResult {
    let target = match sandbox.resolve(path) {
        Ok(p) => p,
        Err(e) => return TaggedResult::error(e.to_string()),
    };
    let shown = sandbox.display(&target);

    if target == sandbox.root() || target.is_dir() {
        return TaggedResult::error(format!("Is a directory: {}", shown));
    }
    if let Some(parent) = target.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            return TaggedResult::error(format!("Failed to create directories for {}: {}", shown, e));
        }
    }

    match std::fs::write(&target, content) {
        Ok(()) => {
            info!("Wrote {} bytes to {}", content.len(), shown);
            TaggedResult::success(format!("Written to {}", shown))
        }
        Err(e) => TaggedResult::error(format!("Failed to write {}: {}", shown, e)),
    }
}

/// Symlinks are removed as links; their targets are never touched.
pub fn delete(sandbox: &Sandbox, path: &str) -> TaggedResult {
    let target = match sandbox.resolve_entry(path) {
        Ok(p) => p,
        Err(e) => return TaggedResult::error(e.to_string()),
    };
    let shown = sandbox.display(&target);

    if target == sandbox.root() {
        return TaggedResult::error("Refusing to delete the workspace root");
    }
    let Ok(meta) = target.symlink_metadata() else {
        return TaggedResult::error(format!("Path not found: {}", shown));
    };

    let (kind, outcome) = if meta.file_type().is_symlink() {
        ("link", std::fs::remove_file(&target))
    } else if meta.is_dir() {
        ("directory", std::fs::remove_dir_all(&target))
    } else {
        ("file", std::fs::remove_file(&target))
    };

    match outcome {
        Ok(()) => {
            info!("Deleted {} {}", kind, shown);
            TaggedResult::success(format!("Deleted {} {}", kind, shown))
        }
        Err(e) => TaggedResult::error(format!("Failed to delete {}: {}", shown, e)),
    }
}

pub fn list(sandbox: &Sandbox, path: &str) -> TaggedResult {
    let path = if path.trim().is_empty() { "." } else { path };
    let target = match sandbox.resolve(path) {
        Ok(p) => p,
        Err(e) => return TaggedResult::error(e.to_string()),
    };
    let shown = sandbox.display(&target);

    if !target.exists() {
        return TaggedResult::error(format!("Directory not found: {}", shown));
    }
    if !target.is_dir() {
        return TaggedResult::error(format!("Not a directory: {}", shown));
    }

    let entries = match std::fs::read_dir(&target) {
        Ok(entries) => entries,
        Err(e) => return TaggedResult::error(format!("Failed to list {}: {}", shown, e)),
    };

    let mut children: Vec<(bool, String)> = entries
        .flatten()
        .map(|entry| {
            let is_dir = entry.path().is_dir();
            (is_dir, sandbox.display(&entry.path()))
        })
        .collect();
    children.sort_by(|a, b| a.1.cmp(&b.1));

    if children.is_empty() {
        return TaggedResult::new(ResultKind::Listing, "(empty directory)");
    }

    let lines: Vec<String> = children
        .into_iter()
        .map(|(is_dir, rel)| {
            if is_dir {
                format!("DIR: {}", rel)
            } else {
                format!("FILE: {}", rel)
            }
        })
        .collect();
    TaggedResult::new(ResultKind::Listing, lines.join("\n"))
}

pub fn mkdir(sandbox: &Sandbox, path: &str) -> TaggedResult {
    let target = match sandbox.resolve(path) {
        Ok(p) => p,
        Err(e) => return TaggedResult::error(e.to_string()),
    };
    let shown = sandbox.display(&target);

    if target.exists() && !target.is_dir() {
        return TaggedResult::error(format!("A file already exists at {}", shown));
    }

    match std::fs::create_dir_all(&target) {
        Ok(()) => TaggedResult::success(format!("Created directory {}", shown)),
        Err(e) => TaggedResult::error(format!("Failed to create {}: {}", shown, e)),
    }
}
