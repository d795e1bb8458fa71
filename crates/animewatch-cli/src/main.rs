use anime_watch_models::WatchStatus;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{browse, catalog, clear, config, preferences, watchlist};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "animewatch")]
#[command(about = "AnimeWatch - Track the anime you're watching, finished, and planning to watch")]
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

    #[command(subcommand)]
    command: Commands,
}

/// Watch status as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Watching,
    Completed,
    #[value(name = "plan-to-watch", alias = "plan")]
    PlanToWatch,
}

impl From<StatusArg> for WatchStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Watching => WatchStatus::Watching,
            StatusArg::Completed => WatchStatus::Completed,
            StatusArg::PlanToWatch => WatchStatus::PlanToWatch,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
enum Commands {
    /// Show anime airing this season
    #[command(long_about = "List the titles airing in the current broadcast season (first 24). Titles in mature genres are hidden unless adult content is switched on.")]
    Ongoing,

    /// Search the catalog by keyword
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Show your watchlist
    #[command(long_about = "Show tracked titles. Without a status, all three lists are shown with their counts.")]
    List {
        /// Only show this list
        #[arg(value_enum)]
        status: Option<StatusArg>,
    },

    /// Start tracking a title by its MyAnimeList id
    Add {
        /// Catalog (MyAnimeList) id
        id: u64,

        /// Initial status
        #[arg(long, short, value_enum, default_value = "watching")]
        status: StatusArg,
    },

    /// Mark a tracked title as completed
    Complete {
        id: u64,
    },

    /// Stop tracking a title
    Remove {
        id: u64,
    },

    /// Show full details for a title
    Show {
        id: u64,
    },

    /// Show or change whether adult content is shown
    Adult {
        #[arg(value_enum)]
        value: Option<Toggle>,
    },

    /// Interactive session: browse views, search, and manage your watchlist
    Browse,

    /// Clear stored data
    #[command(long_about = "Reset persisted state. Use --watchlist to forget tracked titles, --preferences to reset the adult content setting, or --all for both.")]
    Clear {
        /// Clear the watchlist and preferences
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,

        /// Reset preferences
        #[arg(long, action = ArgAction::SetTrue)]
        preferences: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a configuration file with default values
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

    let paths = anime_watch_config::PathManager::default();
    let app_config = config::load_config(&paths)?;

    logging::init_logging(cli.verbose, cli.quiet, &app_config.logging)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Ongoing => catalog::run_ongoing(&app_config, &paths, &output).await,
        Commands::Search { query } => catalog::run_search(&query.join(" "), &app_config, &paths, &output).await,
        Commands::Show { id } => catalog::run_show(id, &app_config, &paths, &output).await,
        Commands::List { status } => watchlist::run_list(status.map(Into::into), &app_config, &paths, &output),
        Commands::Add { id, status } => watchlist::run_add(id, status.into(), &app_config, &paths, &output).await,
        Commands::Complete { id } => watchlist::run_complete(id, &app_config, &paths, &output),
        Commands::Remove { id } => watchlist::run_remove(id, &app_config, &paths, &output),
        Commands::Adult { value } => preferences::run_adult(value, &app_config, &paths, &output),
        Commands::Browse => browse::run_browse(&app_config, &paths, &output).await,
        Commands::Clear { all, watchlist, preferences } => {
            clear::run_clear(all, watchlist, preferences, &app_config, &paths, &output)
        }
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &app_config, &paths, &output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_add_status(args: &[&str]) -> WatchStatus {
        match Cli::try_parse_from(args).map(|cli| cli.command) {
            Ok(Commands::Add { status, .. }) => status.into(),
            _ => panic!("expected add command for {:?}", args),
        }
    }

    #[test]
    fn test_add_status_parsing() {
        assert_eq!(parse_add_status(&["animewatch", "add", "5"]), WatchStatus::Watching);
        assert_eq!(
            parse_add_status(&["animewatch", "add", "5", "--status", "plan-to-watch"]),
            WatchStatus::PlanToWatch
        );
        assert_eq!(
            parse_add_status(&["animewatch", "add", "5", "-s", "plan"]),
            WatchStatus::PlanToWatch
        );
        assert_eq!(
            parse_add_status(&["animewatch", "add", "5", "--status", "completed"]),
            WatchStatus::Completed
        );
        assert!(Cli::try_parse_from(["animewatch", "add", "5", "--status", "dropped"]).is_err());
    }

    #[test]
    fn test_list_status_is_optional() {
        match Cli::try_parse_from(["animewatch", "list"]).map(|cli| cli.command) {
            Ok(Commands::List { status }) => assert!(status.is_none()),
            _ => panic!("expected list command"),
        }
    }
}
