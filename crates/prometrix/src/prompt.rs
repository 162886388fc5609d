use crate::input::Source;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use prometrix_core::markdown::{convert, RenderOptions, Target};
use prometrix_core::refine::{compose_refined_prompt, RefineRequest};
use prometrix_core::version::{build_version, score_percentage, Version};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Cursor editor (default)
    Cursor,
    /// Vercel v0
    V0,
    /// Any other assistant
    Generic,
}

impl From<ToolMode> for prometrix_core::refine::ToolMode {
    fn from(mode: ToolMode) -> Self {
        match mode {
            ToolMode::Cursor => prometrix_core::refine::ToolMode::Cursor,
            ToolMode::V0 => prometrix_core::refine::ToolMode::V0,
            ToolMode::Generic => prometrix_core::refine::ToolMode::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Rigid, rule-heavy output
    Strict,
    /// Organized, clear sections (default)
    Structured,
    /// Concise, to-the-point
    Minimal,
    /// Thorough, exhaustive
    Detailed,
}

impl From<Tone> for prometrix_core::refine::Tone {
    fn from(tone: Tone) -> Self {
        match tone {
            Tone::Strict => prometrix_core::refine::Tone::Strict,
            Tone::Structured => prometrix_core::refine::Tone::Structured,
            Tone::Minimal => prometrix_core::refine::Tone::Minimal,
            Tone::Detailed => prometrix_core::refine::Tone::Detailed,
        }
    }
}

/// How a prompt document is printed.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The markdown document as-is
    #[default]
    Markdown,
    /// HTML fragment for previews
    Html,
    /// Plain text for the clipboard
    Text,
}

impl OutputFormat {
    /// Apply the format to a markdown document.
    pub fn apply(&self, markdown: &str, options: RenderOptions) -> String {
        match self {
            OutputFormat::Markdown => markdown.to_string(),
            OutputFormat::Html => convert(markdown, Target::Html, options),
            OutputFormat::Text => convert(markdown, Target::Text, options),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(name = "prompt")]
#[command(about = "Compose refined prompts")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Compose a refined prompt and its version record
    #[clap(name = "refine")]
    Refine(RefineArgs),
}

#[derive(Debug, clap::Args, Clone)]
pub struct RefineArgs {
    /// Raw prompt text
    #[arg(long, conflicts_with = "prompt_file")]
    prompt: Option<String>,

    /// File holding the raw prompt (stdin when neither this nor --prompt is given)
    #[arg(long, env = "PROMETRIX_PROMPT_FILE")]
    prompt_file: Option<PathBuf>,

    /// Prompt title
    #[arg(long, env = "PROMETRIX_TITLE", default_value = "")]
    title: String,

    /// Tool the prompt targets
    #[arg(long, env = "PROMETRIX_TOOL", default_value = "cursor")]
    tool: ToolMode,

    /// Tech stack entries (repeatable)
    #[arg(long = "tech", env = "PROMETRIX_TECH", value_delimiter = ',', default_values_t = vec!["React".to_string(), "TypeScript".to_string()])]
    tech_stack: Vec<String>,

    /// Tone of the refined prompt
    #[arg(long, env = "PROMETRIX_TONE", default_value = "structured")]
    tone: Tone,

    /// Number of versions that already exist for this prompt
    #[arg(long, env = "PROMETRIX_PREVIOUS_VERSIONS", default_value = "0")]
    previous_versions: usize,

    /// Output format for the refined prompt
    #[arg(long, env = "PROMETRIX_FORMAT", default_value = "markdown")]
    format: OutputFormat,

    /// Escape &, < and > when rendering HTML
    #[arg(long, env = "PROMETRIX_ESCAPE_HTML")]
    escape_html: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct RefineOutput {
    pub version: Version,
    pub format: OutputFormat,
    pub content: String,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Refine(args) => refine(args),
    }
}

fn refine(args: RefineArgs) -> Result<()> {
    let output = refine_data(&args, &chrono::Local::now())?;

    if args.json {
        let json = serde_json::to_string_pretty(&output)?;
        println!("{}", json);
    } else {
        output_formatted(&output);
    }

    Ok(())
}

/// Compose the refined prompt described by `args` as of `now`.
pub fn refine_data<Tz>(args: &RefineArgs, now: &chrono::DateTime<Tz>) -> Result<RefineOutput>
where
    Tz: chrono::TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let raw_prompt = match &args.prompt {
        Some(prompt) => prompt.clone(),
        None => Source::new(args.prompt_file.clone()).read()?,
    };

    let request = RefineRequest {
        title: args.title.clone(),
        tool_mode: args.tool.into(),
        tech_stack: args.tech_stack.clone(),
        tone: args.tone.into(),
        raw_prompt,
    };

    let markdown = compose_refined_prompt(&request).wrap_err("Could not refine prompt")?;
    let content = args.format.apply(
        &markdown,
        RenderOptions {
            escape_html: args.escape_html,
        },
    );
    let version = build_version(args.previous_versions, markdown, now);

    log::debug!("composed version {} ({})", version.id, version.label);

    Ok(RefineOutput {
        version,
        format: args.format,
        content,
    })
}

fn output_formatted(output: &RefineOutput) {
    if std::io::stdout().is_terminal() {
        let version = &output.version;
        let scores = &version.scores;

        eprintln!("{}", "=".repeat(80).bright_cyan());
        eprintln!(
            "{} {}",
            format!("VERSION {} ({})", version.id, version.label)
                .bright_cyan()
                .bold(),
            version.timestamp.dimmed()
        );
        eprintln!(
            "{}: {}/10 ({:.0}%)  {}: {}/10 ({:.0}%)  {}: {:?}",
            "Clarity".green(),
            scores.clarity,
            score_percentage(scores.clarity),
            "Structure".green(),
            scores.structure,
            score_percentage(scores.structure),
            "Ambiguity".green(),
            scores.ambiguity
        );
        eprintln!("{}", "=".repeat(80).bright_cyan());
    }

    println!("{}", output.content);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clap::Parser;

    #[derive(Debug, clap::Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RefineArgs,
    }

    fn parse(argv: &[&str]) -> RefineArgs {
        let mut full = vec!["refine"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_refine_data_defaults() {
        let args = parse(&["--prompt", "Build a todo app"]);
        let output = refine_data(&args, &now()).unwrap();

        assert_eq!(output.version.id, 1);
        assert_eq!(output.version.label, "Raw");
        assert_eq!(output.version.timestamp, "09:30");
        assert!(output.content.starts_with("## Untitled Prompt\n"));
        assert!(output.content.contains("**Tech Stack:** React, TypeScript"));
        assert_eq!(output.content, output.version.prompt);
    }

    #[test]
    fn test_refine_data_custom_args() {
        let args = parse(&[
            "--prompt",
            "Add auth",
            "--title",
            "API",
            "--tool",
            "v0",
            "--tech",
            "Go,PostgreSQL",
            "--tone",
            "strict",
            "--previous-versions",
            "2",
        ]);
        let output = refine_data(&args, &now()).unwrap();

        assert_eq!(output.version.id, 3);
        assert_eq!(output.version.label, "Optimized");
        assert!(output.content.contains("**Target Tool:** v0"));
        assert!(output.content.contains("**Tech Stack:** Go, PostgreSQL"));
        assert!(output.content.contains("Follow strict guidelines."));
    }

    #[test]
    fn test_refine_data_text_format() {
        let args = parse(&["--prompt", "Do it", "--title", "T", "--format", "text"]);
        let output = refine_data(&args, &now()).unwrap();

        assert!(output.content.starts_with("T\n\nTarget Tool: Cursor\n"));
        assert!(output.version.prompt.starts_with("## T\n"));
    }

    #[test]
    fn test_refine_data_html_format() {
        let args = parse(&["--prompt", "Do it", "--format", "html"]);
        let output = refine_data(&args, &now()).unwrap();
        assert!(output.content.starts_with("<h2>Untitled Prompt</h2>"));
    }

    #[test]
    fn test_refine_data_blank_prompt() {
        let args = parse(&["--prompt", "   "]);
        let err = refine_data(&args, &now()).unwrap_err();
        assert_eq!(err.to_string(), "Could not refine prompt");
        assert_eq!(err.root_cause().to_string(), "Please write a prompt first");
    }

    #[test]
    fn test_output_format_markdown_is_identity() {
        let doc = "## A\n**b**";
        assert_eq!(OutputFormat::Markdown.apply(doc, RenderOptions::default()), doc);
    }
}
