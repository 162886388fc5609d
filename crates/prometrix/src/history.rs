use crate::input::Source;
use crate::prelude::{eprintln, println, *};
use crate::prompt::OutputFormat;
use colored::Colorize;
use prometrix_core::history::{
    find_item, format_date, next_page, prev_page, prompt_to_open, transform_history, HistoryPage,
    HistoryResponse,
};
use prometrix_core::markdown::RenderOptions;
use std::path::PathBuf;

/// Characters of the preview shown per row.
const PREVIEW_WIDTH: usize = 60;

#[derive(Debug, clap::Parser)]
#[command(name = "history")]
#[command(about = "Inspect saved prompt history responses")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List the entries of a history response
    #[clap(name = "list")]
    List(ListArgs),

    /// Print the prompt an entry opens in the editor
    #[clap(name = "open")]
    Open(OpenArgs),
}

#[derive(Debug, clap::Args, Clone)]
pub struct ListArgs {
    /// JSON response of the history endpoint (stdin when omitted or "-")
    #[clap(env = "PROMETRIX_HISTORY")]
    input: Option<PathBuf>,

    /// Page the response was requested for
    #[arg(short, long, env = "PROMETRIX_PAGE", default_value = "1")]
    page: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct OpenArgs {
    /// Id of the history entry
    id: String,

    /// JSON response of the history endpoint (stdin when omitted or "-")
    #[clap(env = "PROMETRIX_HISTORY")]
    input: Option<PathBuf>,

    /// Output format for the prompt
    #[arg(long, env = "PROMETRIX_FORMAT", default_value = "markdown")]
    format: OutputFormat,
}

pub fn run(app: App, _global: crate::Global) -> Result<()> {
    match app.command {
        Commands::List(args) => list(args),
        Commands::Open(args) => open(args),
    }
}

/// Read and map a history response.
pub fn load_history(source: &Source, page: usize) -> Result<HistoryPage> {
    let content = source.read_non_empty()?;
    let response: HistoryResponse = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Invalid history response in {}", source.name()))?;

    let history = transform_history(response, page)?;
    log::debug!(
        "loaded {} history items (page {}/{})",
        history.items.len(),
        history.pagination.page,
        history.pagination.total_pages
    );

    Ok(history)
}

fn list(args: ListArgs) -> Result<()> {
    let history = load_history(&Source::new(args.input), args.page)?;

    if args.json {
        let json = serde_json::to_string_pretty(&history)?;
        println!("{}", json);
        return Ok(());
    }

    if history.items.is_empty() {
        eprintln!("No prompt history yet. Refine a prompt to see it here.");
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID", "Title", "Tool", "Versions", "Updated", "Preview"
    ]);

    for item in &history.items {
        let updated = format_date(&item.created_at, &chrono::Local);
        let preview = truncate(&item.preview, PREVIEW_WIDTH);
        table.add_row(prettytable::row![
            &item.id,
            &item.title,
            &item.tool_mode,
            item.versions,
            updated,
            preview
        ]);
    }

    table.printstd();

    let pagination = &history.pagination;
    eprintln!(
        "\n{} {}/{} ({} total)",
        "Page".green(),
        pagination.page,
        pagination.total_pages,
        pagination.total
    );
    if let Some(page) = prev_page(pagination) {
        eprintln!("  {}: --page {}", "Previous".bright_white().bold(), page);
    }
    if let Some(page) = next_page(pagination) {
        eprintln!("  {}: --page {}", "Next".bright_white().bold(), page);
    }

    Ok(())
}

fn open(args: OpenArgs) -> Result<()> {
    let history = load_history(&Source::new(args.input), 1)?;
    let item = find_item(&history.items, &args.id)?;

    let prompt = prompt_to_open(item);
    if prompt.is_empty() {
        eprintln!("{}", "Entry has no prompt text.".yellow());
        return Ok(());
    }

    println!("{}", args.format.apply(prompt, RenderOptions::default()));

    Ok(())
}

/// Single-line preview of at most `width` characters.
fn truncate(text: &str, width: usize) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() <= width && !text.contains('\n') {
        return line.to_string();
    }
    let mut short: String = line.chars().take(width.saturating_sub(3)).collect();
    short.push_str("...");
    short
}
