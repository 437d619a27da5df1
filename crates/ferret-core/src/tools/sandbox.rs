//! Path sandbox — every file tool resolves its target through here.
//!
//! Resolution walks the relative path one component at a time, following
//! symlinks for every component that already exists and applying `..`
//! against the resolved prefix, so the containment check sees the real
//! location on disk rather than the joined string.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::error::PathViolation;

/// The workspace root all file operations are confined to.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    /// Create the root directory if needed and pin its canonical location.
    pub fn new(root: &Path) -> Result<Self> {
        std::fs::create_dir_all(root)
            .with_context(|| format!("Failed to create workspace: {}", root.display()))?;
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve workspace: {}", root.display()))?;
        debug!("Sandbox root: {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a workspace-relative path to an absolute path inside the root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, PathViolation> {
        self.walk(Path::new(relative), relative)
    }

    /// Like [`Sandbox::resolve`], but a symlink in the final position names
    /// the link itself rather than its target. Only the parent is followed.
    pub fn resolve_entry(&self, relative: &str) -> Result<PathBuf, PathViolation> {
        let requested = Path::new(relative);
        match (requested.components().next_back(), requested.parent()) {
            (Some(Component::Normal(name)), Some(parent)) => {
                Ok(self.walk(parent, relative)?.join(name))
            }
            _ => self.resolve(relative),
        }
    }

    fn walk(&self, requested: &Path, relative: &str) -> Result<PathBuf, PathViolation> {
        if requested.has_root() || requested.is_absolute() {
            warn!("Rejected absolute path: {}", relative);
            return Err(PathViolation::Absolute(relative.to_string()));
        }

        let mut current = self.root.clone();
        for component in requested.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    current.pop();
                }
                Component::Normal(name) => {
                    let next = current.join(name);
                    current = if next.symlink_metadata().is_ok() {
                        // A dangling symlink cannot be verified, so it counts as an escape
                        next.canonicalize()
                            .map_err(|_| PathViolation::Escapes(relative.to_string()))?
                    } else {
                        next
                    };
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathViolation::Absolute(relative.to_string()));
                }
            }
        }

        if current.starts_with(&self.root) {
            Ok(current)
        } else {
            warn!("Rejected path outside workspace: {}", relative);
            Err(PathViolation::Escapes(relative.to_string()))
        }
    }

    /// Render a resolved path relative to the root (`.` for the root itself).
    pub fn display(&self, resolved: &Path) -> String {
        match resolved.strip_prefix(&self.root) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => rel.to_string_lossy().to_string(),
            Err(_) => resolved.to_string_lossy().to_string(),
        }
    }
}
