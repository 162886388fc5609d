//! Refined prompt composition
//!
//! Turns the editor inputs (title, target tool, tech stack, tone and the raw
//! prompt) into the markdown document that the preview renders and the
//! clipboard copy strips.

use serde::{Deserialize, Serialize};

use crate::Error;

/// Tech stack choices offered by the editor.
pub const TECH_STACK_OPTIONS: [&str; 12] = [
    "React",
    "Next.js",
    "Node.js",
    "Express",
    "MongoDB",
    "PostgreSQL",
    "TypeScript",
    "Tailwind CSS",
    "Python",
    "Go",
    "Prisma",
    "GraphQL",
];

/// Title used when the editor title is left blank.
pub const UNTITLED_PROMPT: &str = "Untitled Prompt";

/// Tool the refined prompt is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Cursor,
    V0,
    Generic,
}

impl ToolMode {
    /// Parse a wire name. Anything unknown is treated as `Generic`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "cursor" => ToolMode::Cursor,
            "v0" => ToolMode::V0,
            _ => ToolMode::Generic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Cursor => "Cursor",
            ToolMode::V0 => "v0",
            ToolMode::Generic => "Generic",
        }
    }
}

/// Writing style requested for the refined prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Strict,
    #[default]
    Structured,
    Minimal,
    Detailed,
}

impl Tone {
    /// Parse a wire name. Anything unknown is treated as `Structured`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "strict" => Tone::Strict,
            "minimal" => Tone::Minimal,
            "detailed" => Tone::Detailed,
            _ => Tone::Structured,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Strict => "Strict",
            Tone::Structured => "Structured",
            Tone::Minimal => "Minimal",
            Tone::Detailed => "Detailed",
        }
    }

    /// Short hint shown next to the tone picker.
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Strict => "Rigid, rule-heavy output",
            Tone::Structured => "Organized, clear sections",
            Tone::Minimal => "Concise, to-the-point",
            Tone::Detailed => "Thorough, exhaustive",
        }
    }
}

/// Editor inputs for a refinement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub tool_mode: ToolMode,
    #[serde(default = "default_tech_stack")]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub tone: Tone,
    pub raw_prompt: String,
}

impl RefineRequest {
    /// A request with the editor defaults and the given raw prompt.
    pub fn new(raw_prompt: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            tool_mode: ToolMode::default(),
            tech_stack: default_tech_stack(),
            tone: Tone::default(),
            raw_prompt: raw_prompt.into(),
        }
    }
}

fn default_tech_stack() -> Vec<String> {
    vec!["React".to_string(), "TypeScript".to_string()]
}

/// Compose the refined prompt markdown for `request`.
///
/// Fails with [`Error::EmptyPrompt`] when the raw prompt is blank. The raw
/// prompt itself is embedded verbatim.
pub fn compose_refined_prompt(request: &RefineRequest) -> Result<String, Error> {
    if request.raw_prompt.trim().is_empty() {
        return Err(Error::EmptyPrompt);
    }

    let title = if request.title.is_empty() {
        UNTITLED_PROMPT
    } else {
        request.title.as_str()
    };
    let tool = request.tool_mode.label();
    let tone = request.tone.label();
    let tone_lower = tone.to_lowercase();
    let tech = request.tech_stack.join(", ");
    let raw = &request.raw_prompt;

    Ok(format!(
        "## {title}\n\n\
         **Target Tool:** {tool}\n\
         **Tech Stack:** {tech}\n\
         **Tone:** {tone}\n\n\
         ---\n\n\
         ### Instructions\n\n\
         You are an expert developer working with {tech}. Follow {tone_lower} guidelines.\n\n\
         {raw}\n\n\
         ### Constraints\n\n\
         - Use best practices for {tech}\n\
         - Follow {tone_lower} output format\n\
         - Ensure production-ready code quality\n\
         - Include proper error handling and type safety"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // compose_refined_prompt tests
    // ============================================================================

    #[test]
    fn test_compose_refined_prompt_defaults() {
        let request = RefineRequest::new("Build a login form");
        let prompt = compose_refined_prompt(&request).unwrap();

        let expected = "## Untitled Prompt\n\n\
            **Target Tool:** Cursor\n\
            **Tech Stack:** React, TypeScript\n\
            **Tone:** Structured\n\n\
            ---\n\n\
            ### Instructions\n\n\
            You are an expert developer working with React, TypeScript. Follow structured guidelines.\n\n\
            Build a login form\n\n\
            ### Constraints\n\n\
            - Use best practices for React, TypeScript\n\
            - Follow structured output format\n\
            - Ensure production-ready code quality\n\
            - Include proper error handling and type safety";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_compose_refined_prompt_custom_fields() {
        let request = RefineRequest {
            title: "Dashboard".to_string(),
            tool_mode: ToolMode::V0,
            tech_stack: vec!["Next.js".to_string()],
            tone: Tone::Minimal,
            raw_prompt: "Add charts".to_string(),
        };
        let prompt = compose_refined_prompt(&request).unwrap();

        assert!(prompt.starts_with("## Dashboard\n"));
        assert!(prompt.contains("**Target Tool:** v0\n"));
        assert!(prompt.contains("**Tech Stack:** Next.js\n"));
        assert!(prompt.contains("**Tone:** Minimal\n"));
        assert!(prompt.contains("Follow minimal guidelines."));
        assert!(prompt.contains("- Follow minimal output format"));
    }

    #[test]
    fn test_compose_refined_prompt_empty_tech_stack() {
        let mut request = RefineRequest::new("x");
        request.tech_stack.clear();
        let prompt = compose_refined_prompt(&request).unwrap();
        assert!(prompt.contains("**Tech Stack:** \n"));
    }

    #[test]
    fn test_compose_refined_prompt_blank_prompt_rejected() {
        let request = RefineRequest::new("   \n\t");
        assert_eq!(compose_refined_prompt(&request), Err(Error::EmptyPrompt));
    }

    #[test]
    fn test_compose_refined_prompt_keeps_raw_prompt_verbatim() {
        let request = RefineRequest::new("  keep **this**  ");
        let prompt = compose_refined_prompt(&request).unwrap();
        assert!(prompt.contains("\n\n  keep **this**  \n\n"));
    }

    // ============================================================================
    // ToolMode / Tone tests
    // ============================================================================

    #[test]
    fn test_tool_mode_from_name() {
        assert_eq!(ToolMode::from_name("cursor"), ToolMode::Cursor);
        assert_eq!(ToolMode::from_name("v0"), ToolMode::V0);
        assert_eq!(ToolMode::from_name("copilot"), ToolMode::Generic);
    }

    #[test]
    fn test_tone_from_name_falls_back_to_structured() {
        assert_eq!(Tone::from_name("strict"), Tone::Strict);
        assert_eq!(Tone::from_name("detailed"), Tone::Detailed);
        assert_eq!(Tone::from_name("loud"), Tone::Structured);
    }

    #[test]
    fn test_tone_description() {
        assert_eq!(Tone::Strict.description(), "Rigid, rule-heavy output");
        assert_eq!(Tone::Detailed.description(), "Thorough, exhaustive");
    }

    #[test]
    fn test_tech_stack_options_contains_defaults() {
        for tech in default_tech_stack() {
            assert!(TECH_STACK_OPTIONS.contains(&tech.as_str()));
        }
    }

    #[test]
    fn test_refine_request_deserialize_defaults() {
        let request: RefineRequest =
            serde_json::from_str(r#"{"rawPrompt": "hi", "toolMode": "v0"}"#).unwrap();
        assert_eq!(request.tool_mode, ToolMode::V0);
        assert_eq!(request.tone, Tone::Structured);
        assert_eq!(request.tech_stack, vec!["React", "TypeScript"]);
        assert!(request.title.is_empty());
    }
}
