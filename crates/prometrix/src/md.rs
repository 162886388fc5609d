use crate::input::Source;
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use prometrix_core::markdown::{convert, RenderOptions, Target};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, clap::Parser)]
#[command(name = "md")]
#[command(about = "Convert refined prompt markdown to HTML or plain text")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Render markdown as an HTML fragment
    #[clap(name = "render")]
    Render(RenderArgs),

    /// Strip markdown markers for clipboard-ready plain text
    #[clap(name = "plain")]
    Plain(PlainArgs),
}

#[derive(Debug, clap::Args, Clone)]
pub struct RenderArgs {
    /// Markdown file to read (stdin when omitted or "-")
    #[clap(env = "PROMETRIX_INPUT")]
    input: Option<PathBuf>,

    /// Escape &, < and > before rendering (use for untrusted input)
    #[arg(long, env = "PROMETRIX_ESCAPE_HTML")]
    escape_html: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct PlainArgs {
    /// Markdown file to read (stdin when omitted or "-")
    #[clap(env = "PROMETRIX_INPUT")]
    input: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    pub source: String,
    pub target: Target,
    pub source_length: usize,
    pub content: String,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Render(args) => {
            let options = RenderOptions {
                escape_html: args.escape_html,
            };
            let output = convert_data(Source::new(args.input), Target::Html, options)?;
            emit(&output, args.json)
        }
        Commands::Plain(args) => {
            let output =
                convert_data(Source::new(args.input), Target::Text, RenderOptions::default())?;
            emit(&output, args.json)
        }
    }
}

/// Read `source` and apply the `target` transform.
pub fn convert_data(source: Source, target: Target, options: RenderOptions) -> Result<ConvertOutput> {
    let markdown = source.read()?;
    let content = convert(&markdown, target, options);

    log::debug!(
        "converted {} -> {:?} ({} -> {} bytes)",
        source.name(),
        target,
        markdown.len(),
        content.len()
    );

    Ok(ConvertOutput {
        source: source.name(),
        target,
        source_length: markdown.len(),
        content,
    })
}

fn emit(output: &ConvertOutput, json: bool) -> Result<()> {
    if json {
        let json = serde_json::to_string_pretty(output)?;
        println!("{}", json);
        return Ok(());
    }

    // Decorations only when a person is reading; pipes get the bare content.
    if std::io::stdout().is_terminal() {
        let heading = match output.target {
            Target::Html => "HTML FRAGMENT",
            Target::Text => "PLAIN TEXT",
        };
        eprintln!("{}", "=".repeat(80).bright_cyan());
        eprintln!("{} {}", heading.bright_cyan().bold(), output.source.dimmed());
        eprintln!("{}", "=".repeat(80).bright_cyan());
    }

    println!("{}", output.content);

    Ok(())
}
