//! Tool registry — calculator, weather, image, resources, sandboxed files.

pub mod calculator;
pub mod files;
pub mod image;
pub mod resources;
pub mod sandbox;
pub mod weather;

use tracing::debug;

use crate::error::ToolError;
use crate::types::{ArgumentConvention, TaggedResult, ToolInfo, ToolSpec};
use sandbox::Sandbox;

/// A tool's callable; the variant fixes how raw arguments are split.
#[derive(Clone, Copy)]
enum Handler {
    Single(fn(&Sandbox, &str) -> TaggedResult),
    CommaPair(fn(&str, u32) -> TaggedResult),
    PipePair(fn(&Sandbox, &str, &str) -> TaggedResult),
}

struct RegisteredTool {
    name: &'static str,
    description: &'static str,
    usage: &'static str,
    handler: Handler,
}

impl RegisteredTool {
    fn spec(&self) -> ToolSpec {
        let argument_convention = match self.handler {
            Handler::Single(_) => ArgumentConvention::Single,
            Handler::CommaPair(_) => ArgumentConvention::CommaPair,
            Handler::PipePair(_) => ArgumentConvention::PipePair,
        };
        ToolSpec {
            name: self.name,
            description: self.description,
            usage: self.usage,
            argument_convention,
        }
    }
}

const REGISTRY: &[RegisteredTool] = &[
    RegisteredTool {
        name: "calculate",
        description: "Perform mathematical calculations",
        usage: "expression, e.g. 15*7+3",
        handler: Handler::Single(calculate),
    },
    RegisteredTool {
        name: "get_weather",
        description: "Get weather information for a city",
        usage: "city name",
        handler: Handler::Single(get_weather),
    },
    RegisteredTool {
        name: "create_image",
        description: "Create a simple colored SVG image",
        usage: "color,size (size in pixels, default 100)",
        handler: Handler::CommaPair(image::create_image),
    },
    RegisteredTool {
        name: "read_resource",
        description: "Read a built-in resource by URI",
        usage: "resource URI, e.g. file://sample.txt",
        handler: Handler::Single(read_resource),
    },
    RegisteredTool {
        name: "embed_resource",
        description: "Embed a built-in resource with its metadata",
        usage: "resource URI, e.g. file://data.json",
        handler: Handler::Single(embed_resource),
    },
    RegisteredTool {
        name: "read_file",
        description: "Read a text file from the workspace",
        usage: "relative path",
        handler: Handler::Single(files::read),
    },
    RegisteredTool {
        name: "write_file",
        description: "Write text to a file in the workspace",
        usage: "path|content",
        handler: Handler::PipePair(files::write),
    },
    RegisteredTool {
        name: "delete_file",
        description: "Delete a file or directory in the workspace",
        usage: "relative path",
        handler: Handler::Single(files::delete),
    },
    RegisteredTool {
        name: "list_files",
        description: "List the contents of a workspace directory",
        usage: "relative path (empty for the workspace root)",
        handler: Handler::Single(files::list),
    },
    RegisteredTool {
        name: "create_directory",
        description: "Create a directory in the workspace",
        usage: "relative path",
        handler: Handler::Single(files::mkdir),
    },
];

fn calculate(_: &Sandbox, expression: &str) -> TaggedResult {
    calculator::evaluate(expression)
}

fn get_weather(_: &Sandbox, city: &str) -> TaggedResult {
    weather::get_weather(city)
}

fn read_resource(_: &Sandbox, uri: &str) -> TaggedResult {
    resources::read_resource(uri)
}

fn embed_resource(_: &Sandbox, uri: &str) -> TaggedResult {
    resources::embed_resource(uri)
}

/// Every registered tool, in prompt order.
pub fn tool_specs() -> Vec<ToolSpec> {
    REGISTRY.iter().map(RegisteredTool::spec).collect()
}

/// `{name, description}` pairs for the HTTP listing.
pub fn tool_listing() -> Vec<ToolInfo> {
    tool_specs().iter().map(ToolInfo::from).collect()
}

/// Run a tool by name. `Ok(None)` means no such tool is registered.
pub fn execute_tool(
    name: &str,
    raw_arguments: &str,
    sandbox: &Sandbox,
) -> Result<Option<TaggedResult>, ToolError> {
    let Some(tool) = REGISTRY.iter().find(|t| t.name == name) else {
        debug!("No tool named {:?}", name);
        return Ok(None);
    };

    let result = match tool.handler {
        Handler::Single(call) => call(sandbox, raw_arguments),
        Handler::CommaPair(call) => {
            let (first, size) = split_comma_pair(raw_arguments)?;
            call(first, size)
        }
        Handler::PipePair(call) => {
            let (path, content) = split_pipe_pair(raw_arguments)?;
            call(sandbox, path, content)
        }
    };
    Ok(Some(result))
}

/// `color[,size]`; a missing or empty size falls back to the image default.
fn split_comma_pair(raw: &str) -> Result<(&str, u32), ToolError> {
    let Some((first, second)) = raw.split_once(',') else {
        return Ok((raw.trim(), image::DEFAULT_SIZE));
    };
    let second = second.trim();
    if second.is_empty() {
        return Ok((first.trim(), image::DEFAULT_SIZE));
    }
    let size = second.parse::<u32>().map_err(|_| {
        ToolError::Execution(format!("invalid image size: {:?}", second))
    })?;
    Ok((first.trim(), size))
}

/// `path|content`; content is kept byte-for-byte, including later pipes.
fn split_pipe_pair(raw: &str) -> Result<(&str, &str), ToolError> {
    raw.split_once('|')
        .map(|(path, content)| (path.trim(), content))
        .ok_or(ToolError::ArgumentFormat {
            expected: "path|content",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ResultKind;

    fn sandbox() -> (tempfile::TempDir, Sandbox) {
        let tmp = tempfile::tempdir().unwrap();
        let sandbox = Sandbox::new(&tmp.path().join("workspace")).unwrap();
        (tmp, sandbox)
    }

    #[test]
    fn test_tool_specs_conventions() {
        let specs = tool_specs();
        let convention = |name: &str| {
            specs
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.argument_convention)
        };
        assert_eq!(convention("calculate"), Some(ArgumentConvention::Single));
        assert_eq!(convention("create_image"), Some(ArgumentConvention::CommaPair));
        assert_eq!(convention("write_file"), Some(ArgumentConvention::PipePair));
        assert_eq!(convention("teleport"), None);
    }

    #[test]
    fn test_tool_listing_has_every_tool() {
        let names: Vec<String> = tool_listing().into_iter().map(|t| t.name).collect();
        for expected in [
            "calculate",
            "get_weather",
            "create_image",
            "read_resource",
            "embed_resource",
            "read_file",
            "write_file",
            "delete_file",
            "list_files",
            "create_directory",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_unknown_tool_is_none() {
        let (_tmp, sb) = sandbox();
        assert_eq!(execute_tool("teleport", "mars", &sb), Ok(None));
    }

    #[test]
    fn test_single_argument_passthrough() {
        let (_tmp, sb) = sandbox();
        let result = execute_tool("calculate", "2+2", &sb).unwrap().unwrap();
        assert_eq!(result.to_string(), "RESULT: 4");
        let weather = execute_tool("get_weather", "Tokyo", &sb).unwrap().unwrap();
        assert_eq!(weather.kind, ResultKind::Weather);
    }

    #[test]
    fn test_comma_pair_default_and_explicit_size() {
        assert_eq!(split_comma_pair("red"), Ok(("red", 100)));
        assert_eq!(split_comma_pair("red, "), Ok(("red", 100)));
        assert_eq!(split_comma_pair(" red , 150 "), Ok(("red", 150)));
    }

    #[test]
    fn test_comma_pair_bad_size_is_execution_error() {
        let (_tmp, sb) = sandbox();
        let err = execute_tool("create_image", "red, big", &sb).unwrap_err();
        assert_eq!(err, ToolError::Execution("invalid image size: \"big\"".into()));
    }

    #[test]
    fn test_pipe_pair_splits_on_first_pipe() {
        assert_eq!(split_pipe_pair("a.txt|x|y"), Ok(("a.txt", "x|y")));
        assert_eq!(split_pipe_pair(" a.txt |hello"), Ok(("a.txt", "hello")));
    }

    #[test]
    fn test_pipe_pair_without_pipe_is_format_error() {
        let (_tmp, sb) = sandbox();
        let err = execute_tool("write_file", "notes.txt", &sb).unwrap_err();
        assert_eq!(
            err,
            ToolError::ArgumentFormat {
                expected: "path|content"
            }
        );
    }

    #[test]
    fn test_file_tools_share_the_sandbox() {
        let (_tmp, sb) = sandbox();
        execute_tool("write_file", "notes/a.txt|hello", &sb).unwrap();
        let read = execute_tool("read_file", "notes/a.txt", &sb).unwrap().unwrap();
        assert_eq!(read.to_string(), "CONTENT: hello");
        let listing = execute_tool("list_files", "", &sb).unwrap().unwrap();
        assert_eq!(listing.payload, "DIR: notes");
    }
}
