use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotstats::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show listening stats in the terminal
    Stats(StatsOptions),

    /// Render listening stats as SVG infographics
    Render(RenderOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Print every group while it is fetched
    #[clap(long, short)]
    pub verbose: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderOptions {
    /// Section to render: artists, songs or albums
    #[clap(long, default_value = "artists", conflicts_with = "all")]
    pub section: String,

    /// Time range for artists and songs: short_term or long_term
    #[clap(long, conflicts_with = "all")]
    pub time_range: Option<String>,

    /// Visual profile: detailed or compact
    #[clap(long, default_value = "detailed")]
    pub profile: String,

    /// Write the document to this file instead of stdout
    #[clap(long, short, conflicts_with = "all")]
    pub output: Option<PathBuf>,

    /// Render every section and time range
    #[clap(long, requires = "out_dir")]
    pub all: bool,

    /// Directory for the documents written by --all
    #[clap(long)]
    pub out_dir: Option<PathBuf>,

    /// Print every group while it is fetched
    #[clap(long, short)]
    pub verbose: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Stats(opt) => cli::stats(opt.verbose).await,
        Command::Render(opt) => match (opt.all, opt.out_dir) {
            (true, Some(out_dir)) => cli::render_all(opt.profile, out_dir, opt.verbose).await,
            _ => {
                cli::render(
                    opt.section,
                    opt.time_range,
                    opt.profile,
                    opt.output,
                    opt.verbose,
                )
                .await
            }
        },
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
