use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::Context;
use commands::{add, config, delete, edit, import, list, toggle};
use std::path::PathBuf;
use watchlist_models::{SortOption, WatchedFilter};

mod app;
mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Watchlist - keep track of the movies you want to see")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Configuration file (defaults to <config dir>/watchlist/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to a daily rolling file ([logging] file, or the default location)
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    /// Database file, overrides [database] path
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your movies
    #[command(long_about = "Show the movie list, filtered by title search and watched state and sorted by the chosen criterion. Defaults come from the [display] section of the configuration.")]
    List {
        /// Case-insensitive title search
        #[arg(long, short)]
        search: Option<String>,

        /// Watched filter: all, watched or unwatched
        #[arg(long, short)]
        filter: Option<WatchedFilter>,

        /// Sort order: newest, oldest, year-asc, year-desc or rating
        #[arg(long)]
        sort: Option<SortOption>,
    },
    /// Add a movie
    #[command(long_about = "Add a movie to the list. Any field not given as a flag is prompted for when running in a terminal.")]
    Add {
        #[arg(long)]
        title: Option<String>,

        /// Release year (1900 to the current year)
        #[arg(long)]
        year: Option<String>,

        /// Personal rating from 1 to 5
        #[arg(long)]
        rating: Option<String>,
    },
    /// Edit a movie's title, year or rating
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        rating: Option<String>,
    },
    /// Mark a movie as watched or unwatched
    Toggle {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Delete a movie
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Import movies from the remote catalog
    #[command(long_about = "Fetch a JSON list of movies and add every entry whose title and year are not already in the list. Use --suggested to import the built-in list of well-known films instead.")]
    Import {
        /// Catalog URL, overrides [import] url
        #[arg(long, conflicts_with = "suggested")]
        url: Option<String>,

        /// Import the built-in suggestions
        #[arg(long, action = ArgAction::SetTrue)]
        suggested: bool,
    },
    /// View or initialise configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Show configuration, database and log file locations
    Path,
    /// Write a default config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let ctx = app::Context::load(cli.config, cli.db)?;

    let log_file = ctx.log_file(cli.log_file);
    logging::init_logging(cli.verbose, cli.quiet, &ctx.config.logging.level, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::List { search, filter, sort } => {
            list::run_list(&ctx, search, filter, sort, &output)
        }
        Commands::Add { title, year, rating } => add::run_add(&ctx, title, year, rating, &output),
        Commands::Edit { id, title, year, rating } => {
            edit::run_edit(&ctx, id, title, year, rating, &output)
        }
        Commands::Toggle { id, yes } => toggle::run_toggle(&ctx, id, yes, &output),
        Commands::Delete { id, yes } => delete::run_delete(&ctx, id, yes, &output),
        Commands::Import { url, suggested } => {
            import::run_import(&ctx, url, suggested, &output).await
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(&ctx, cmd, &output).wrap_err("Config command failed")
        }
    }
}
