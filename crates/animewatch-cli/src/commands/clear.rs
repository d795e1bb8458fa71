use super::open_context;
use crate::output::Output;
use anime_watch_config::{Config, PathManager};
use anime_watch_core::AppContext;
use color_eyre::Result;

pub fn run_clear(
    all: bool,
    watchlist: bool,
    preferences: bool,
    config: &Config,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    if !(all || watchlist || preferences) {
        output.warn("No clear option specified. Use --watchlist, --preferences, or --all");
        output.info("\nExample: animewatch clear --watchlist");
        return Ok(());
    }

    let context = open_context(config, paths)?;

    if all || watchlist {
        clear_watchlist(&context, output);
    }
    if all || preferences {
        clear_preferences(&context, output);
    }
    if all {
        output.success("Watchlist and preferences cleared");
    }
    Ok(())
}

fn clear_watchlist(context: &AppContext, output: &Output) {
    let mut store = context.watchlist();
    if store.is_empty() {
        output.info("Watchlist is already empty");
        return;
    }
    let count = store.len();
    store.clear();
    output.success(format!("Removed {} titles from the watchlist", count));
}

fn clear_preferences(context: &AppContext, output: &Output) {
    context.preferences().reset();
    output.success("Preferences reset to defaults");
}
