//! Directive parser — finds `USE_TOOL:<name>:<arguments>` in model output.

use crate::types::Directive;

pub const MARKER: &str = "USE_TOOL:";

/// Parse the first line carrying the marker. Anything before the marker on
/// that line is ignored, and later marker lines are never considered.
pub fn parse(model_output: &str) -> Option<Directive> {
    let line = model_output.lines().find(|l| l.contains(MARKER))?;
    let start = line.find(MARKER)?;

    let mut parts = line[start..].splitn(3, ':');
    let _marker = parts.next()?;
    let tool_name = parts.next()?.trim();
    let raw_arguments = parts.next()?.trim();

    Some(Directive {
        tool_name: tool_name.to_string(),
        raw_arguments: raw_arguments.to_string(),
    })
}
