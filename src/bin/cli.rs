//! go2web CLI
//!
//! Fetches a page or runs a web search and prints a plain-text view.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, error::ErrorKind};
use go2web::{
    models::Config,
    pipeline::{self, Operation},
    storage::LocalStore,
};

/// go2web - fetch web pages and search results from the terminal
#[derive(Parser, Debug)]
#[command(
    name = "go2web",
    version,
    about = "Fetch web pages and search results from the terminal",
    arg_required_else_help = true
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "go2web.toml", global = true)]
    config: PathBuf,

    /// Override the cache file location
    #[arg(long, global = true)]
    cache: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and display content from <URL>
    #[command(short_flag = 'u')]
    Fetch {
        /// Page to fetch
        url: String,

        /// Remove nested tags and entities from headings and link labels
        #[arg(long)]
        strip_tags: bool,
    },

    /// Search <TERM> and display result links
    #[command(short_flag = 's')]
    Search {
        /// Search term; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
}

impl From<Command> for Operation {
    fn from(command: Command) -> Self {
        match command {
            Command::Fetch { url, strip_tags } => Operation::Fetch { url, strip_tags },
            Command::Search { term } => Operation::Search {
                term: term.join(" "),
            },
        }
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// One-line hint for input that names no known command or flag.
fn usage_hint(err: &clap::Error) -> Option<&'static str> {
    match err.kind() {
        ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument => {
            Some("Unknown option. Use '-h' for help.")
        }
        _ => None,
    }
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match usage_hint(&e) {
            Some(hint) => {
                eprintln!("{hint}");
                return ExitCode::from(2);
            }
            None => e.exit(),
        },
    };
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(path) = cli.cache {
        config.cache.path = path;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return ExitCode::FAILURE;
    }

    let store = LocalStore::new(&config.cache.path);
    let operation = Operation::from(cli.command);

    match pipeline::run_operation(&config, &store, &operation).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}: {}", operation.failure_label(), e);
            ExitCode::FAILURE
        }
    }
}
