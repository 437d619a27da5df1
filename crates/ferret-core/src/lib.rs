//! ferret-core — Tool-using agent logic, no HTTP.
//!
//! A message goes to the model with a catalogue of tools; if the reply
//! carries a `USE_TOOL:` directive the named tool runs (file tools confined
//! to a sandboxed workspace) and its tagged result is normalized into the
//! answer. The web crate wraps [`agent::Agent`] in an axum router.

pub mod agent;
pub mod config;
pub mod directive;
pub mod error;
pub mod normalize;
pub mod prompts;
pub mod providers;
pub mod tools;
pub mod types;

pub use agent::Agent;
pub use config::Config;
pub use error::{AgentError, BackendError};
pub use providers::{ModelBackend, OllamaBackend};
