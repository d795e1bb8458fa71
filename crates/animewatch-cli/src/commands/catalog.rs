use super::open_context;
use crate::output::Output;
use crate::render;
use anime_watch_config::{Config, PathManager};
use anime_watch_core::{DetailOverlay, Listing, OverlayState, ViewController};
use color_eyre::Result;
use serde_json::json;

pub async fn run_ongoing(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut controller = open_context(config, paths)?.controller();

    let spinner = output.spinner("Loading ongoing anime...");
    controller.start().await;
    spinner.finish_and_clear();

    print_listing(&controller, "ongoing", output);
    Ok(())
}

pub async fn run_search(query: &str, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut controller = open_context(config, paths)?.controller();

    let spinner = output.spinner(format!("Searching for \"{}\"...", query.trim()));
    controller.submit_search(query).await;
    spinner.finish_and_clear();

    if controller.last_search_failed() {
        output.warn("Search request failed; showing no results");
    }
    print_listing(&controller, "search", output);
    Ok(())
}

pub async fn run_show(id: u64, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut controller = open_context(config, paths)?.controller();

    let spinner = output.spinner("Loading anime details...");
    controller.open_detail_by_id(id).await;
    spinner.finish_and_clear();

    let Some(overlay) = controller.overlay() else {
        return Ok(());
    };

    match &overlay.state {
        OverlayState::Loaded(detail) => {
            if output.is_human() {
                render::print_detail(detail);
                if let Some(tracked) = controller.watchlist().find_by_id(id) {
                    output.info(format!("In your {} list", tracked.watch_status.label()));
                }
            } else {
                output.json(&json!({
                    "detail": detail,
                    "watchStatus": controller.watchlist().find_by_id(id).map(|t| t.watch_status),
                }));
            }
            Ok(())
        }
        OverlayState::Failed | OverlayState::Loading => {
            Err(color_eyre::eyre::eyre!("{} (id {})", DetailOverlay::FAILED_MESSAGE, id))
        }
    }
}

fn print_listing(controller: &ViewController, view: &str, output: &Output) {
    let listing = controller.listing();

    if output.is_human() {
        render::print_listing(&listing, |id| !controller.can_add(id));
        return;
    }

    let value = match &listing {
        Listing::Catalog(entries) => json!({ "view": view, "entries": entries }),
        Listing::Watchlist(entries) => json!({ "view": view, "entries": entries }),
        Listing::Empty(state) => json!({ "view": view, "entries": [], "message": state.message() }),
    };
    output.json(&value);
}
