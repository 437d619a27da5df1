//! Agent orchestrator — prompt, model call, directive dispatch, normalization.
//!
//! Every request ends in a string except a failed backend call, which is the
//! one error the HTTP layer has to turn into a 5xx.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::directive;
use crate::error::{AgentError, BackendError, ToolError};
use crate::normalize::{normalize, normalize_result};
use crate::prompts::build_prompt;
use crate::providers::ModelBackend;
use crate::tools::{self, resources, sandbox::Sandbox};
use crate::types::{ResourceInfo, TaggedResult, ToolInfo};

/// Max chars of model output echoed into the logs.
const LOG_PREVIEW_CHARS: usize = 120;

pub struct Agent<B> {
    config: Config,
    backend: B,
    sandbox: Sandbox,
}

impl<B: ModelBackend> Agent<B> {
    /// Build the agent and create its workspace directory.
    pub fn new(config: Config, backend: B) -> anyhow::Result<Self> {
        let sandbox = Sandbox::new(&config.workspace_root())?;
        info!(
            "Agent ready: model={} workspace={}",
            config.model,
            sandbox.root().display()
        );
        Ok(Self {
            config,
            backend,
            sandbox,
        })
    }

    pub fn tools(&self) -> Vec<ToolInfo> {
        tools::tool_listing()
    }

    pub fn resources(&self) -> Vec<ResourceInfo> {
        resources::list_resources()
    }

    /// Answer one message. With `sanitize` off, tool output and model text
    /// come back exactly as produced.
    pub async fn process_request(&self, message: &str, sanitize: bool) -> Result<String, AgentError> {
        let span = info_span!("request", request_id = %Uuid::new_v4(), sanitize);
        self.handle(message, sanitize).instrument(span).await
    }

    async fn handle(&self, message: &str, sanitize: bool) -> Result<String, AgentError> {
        let prompt = build_prompt(&tools::tool_specs(), message);
        let reply = self.generate(&prompt).await?;
        info!("Model reply: {}", preview(&reply));

        let Some(directive) = directive::parse(&reply) else {
            return Ok(finish(reply, sanitize));
        };

        match tools::execute_tool(&directive.tool_name, &directive.raw_arguments, &self.sandbox) {
            Ok(Some(result)) => {
                info!(
                    tool = %directive.tool_name,
                    kind = %result.kind,
                    "Tool finished"
                );
                Ok(render(&result, sanitize))
            }
            Ok(None) => {
                warn!("Unknown tool {:?}, answering with model text", directive.tool_name);
                Ok(finish(reply, sanitize))
            }
            Err(e @ ToolError::ArgumentFormat { .. }) => {
                warn!(tool = %directive.tool_name, "Bad arguments: {}", e);
                Ok(render(&TaggedResult::error(e.to_string()), sanitize))
            }
            Err(ToolError::Execution(msg)) => {
                warn!(tool = %directive.tool_name, "Tool failed: {}", msg);
                Ok(format!("Tool execution error: {}", msg))
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let secs = self.config.request_timeout_secs;
        let reply = timeout(Duration::from_secs(secs), self.backend.generate(prompt))
            .await
            .map_err(|_| BackendError::Timeout(secs))?;
        reply.map_err(|e| {
            warn!("Backend call failed: {}", e);
            AgentError::from(e)
        })
    }
}

fn render(result: &TaggedResult, sanitize: bool) -> String {
    if sanitize {
        normalize_result(result)
    } else {
        result.to_string()
    }
}

fn finish(text: String, sanitize: bool) -> String {
    if sanitize {
        normalize(&text)
    } else {
        text
    }
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
    if text.chars().count() > LOG_PREVIEW_CHARS {
        out.push_str("...");
    }
    out.replace('\n', "\\n")
}
