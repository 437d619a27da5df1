//! Prompt construction — tool catalogue plus the user's message.

use crate::directive::MARKER;
use crate::types::ToolSpec;

/// Build the single-turn prompt sent to the backend.
pub fn build_prompt(tools: &[ToolSpec], message: &str) -> String {
    let mut prompt = String::from("Available tools:\n");
    for tool in tools {
        prompt.push_str(&format!(
            "- {}: {} (arguments: {})\n",
            tool.name, tool.description, tool.usage
        ));
    }
    prompt.push_str(&format!(
        "\nIf you need to use a tool, respond with exactly: {MARKER}tool_name:arguments\n\
         Use only one tool per response. Otherwise respond normally."
    ));
    prompt.push_str(&format!("\n\nUser: {}", message));
    prompt
}
