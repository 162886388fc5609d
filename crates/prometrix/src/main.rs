use crate::prelude::*;
use clap::Parser;

mod error;
mod history;
mod input;
mod md;
mod prelude;
mod prompt;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Render, strip and compose refined prompts"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "PROMETRIX_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert refined prompt markdown to HTML or plain text
    MD(crate::md::App),

    /// Compose refined prompts
    Prompt(crate::prompt::App),

    /// Inspect saved prompt history responses
    History(crate::history::App),
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let app = App::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if app.global.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    log::debug!("running {:?}", app.command);

    match app.command {
        SubCommands::MD(sub_app) => crate::md::run(sub_app, app.global),
        SubCommands::Prompt(sub_app) => crate::prompt::run(sub_app, app.global),
        SubCommands::History(sub_app) => crate::history::run(sub_app, app.global),
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
