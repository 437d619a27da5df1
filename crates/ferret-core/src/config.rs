//! Configuration — YAML config + env var overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Ollama-compatible backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent with every generate request
    #[serde(default = "default_model")]
    pub model: String,

    /// Workspace directory for the file tools (relative to the project root)
    #[serde(default = "default_workspace_path")]
    pub workspace_path: String,

    /// Upper bound on a single backend call
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Resolved project root (set at load time, not serialized from YAML)
    #[serde(skip)]
    pub project_root: PathBuf,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "qwen3:30b-a3b".into()
}
fn default_workspace_path() -> String {
    "workspace".into()
}
fn default_request_timeout() -> u64 {
    60
}

impl Config {
    /// Load config from a YAML file, then apply env overrides and validate.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let mut config: Config =
            serde_yaml::from_str(&content).context("Failed to parse config.yaml")?;

        let parent = config_path.parent().unwrap_or(Path::new("."));
        config.project_root = parent
            .canonicalize()
            .unwrap_or_else(|_| parent.to_path_buf());

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load `project_root/config.yaml` if present, else defaults plus env overrides.
    pub fn load_from_dir(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(CONFIG_FILE);
        if config_path.is_file() {
            return Self::load(&config_path);
        }

        let mut config = Config {
            project_root: project_root.to_path_buf(),
            ..Config::default()
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `OLLAMA_*` / `FERRET_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("OLLAMA_BASE_URL") {
            self.base_url = url;
        }
        if let Some(model) = lookup("OLLAMA_DEFAULT_MODEL") {
            self.model = model;
        }
        if let Some(path) = lookup("FERRET_WORKSPACE") {
            self.workspace_path = path;
        }
        if let Some(secs) = lookup("FERRET_TIMEOUT_SECS") {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("FERRET_TIMEOUT_SECS is not a number: {:?}", secs))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!("base_url must start with http:// or https://, got {:?}", self.base_url);
        }
        if self.model.trim().is_empty() {
            anyhow::bail!("model must not be empty");
        }
        Ok(())
    }

    /// Absolute workspace location; relative paths hang off the project root.
    pub fn workspace_root(&self) -> PathBuf {
        let p = Path::new(&self.workspace_path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.project_root.join(p)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            workspace_path: default_workspace_path(),
            request_timeout_secs: default_request_timeout(),
            project_root: PathBuf::from("."),
        }
    }
}
