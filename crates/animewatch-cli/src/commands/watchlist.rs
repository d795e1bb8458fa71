use super::open_context;
use crate::output::Output;
use crate::render;
use anime_watch_config::{Config, PathManager};
use anime_watch_core::{DetailOverlay, Listing, OverlayState, View};
use anime_watch_models::WatchStatus;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use tracing::debug;

pub fn run_list(
    status: Option<WatchStatus>,
    config: &Config,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    let controller = open_context(config, paths)?.controller();
    let statuses: Vec<WatchStatus> = match status {
        Some(status) => vec![status],
        None => WatchStatus::ALL.to_vec(),
    };

    if !output.is_human() {
        let lists: serde_json::Map<String, serde_json::Value> = statuses
            .iter()
            .map(|status| {
                let entries = controller.watchlist().list_by_status(*status);
                (status.as_key().to_string(), json!(entries))
            })
            .collect();
        output.json(&json!(lists));
        return Ok(());
    }

    for status in statuses {
        let view = View::from(status);
        let count = controller.watchlist().counts().get(status);
        println!("\n{} {}", view.label().bright_cyan().bold(), format!("({})", count).dimmed());
        match controller.listing_for(view) {
            Listing::Watchlist(entries) => println!("{}", render::watchlist_table(&entries)),
            Listing::Empty(state) => render::print_empty(&state),
            Listing::Catalog(_) => {}
        }
    }
    Ok(())
}

/// Fetch the full record for `id` and start tracking it
pub async fn run_add(
    id: u64,
    status: WatchStatus,
    config: &Config,
    paths: &PathManager,
    output: &Output,
) -> Result<()> {
    let mut controller = open_context(config, paths)?.controller();

    if let Some(tracked) = controller.watchlist().find_by_id(id) {
        output.warn(format!(
            "{} is already in your {} list",
            tracked.entry.display_title(),
            tracked.watch_status.label()
        ));
        return Ok(());
    }

    let spinner = output.spinner("Loading anime details...");
    controller.open_detail_by_id(id).await;
    spinner.finish_and_clear();

    let loaded = matches!(
        controller.overlay().map(|overlay| &overlay.state),
        Some(OverlayState::Loaded(_))
    );
    if !loaded {
        return Err(color_eyre::eyre::eyre!("{} (id {})", DetailOverlay::FAILED_MESSAGE, id));
    }

    match controller.add_from_overlay(status) {
        Some(tracked) => {
            debug!("Tracking {} as {}", tracked.id(), tracked.watch_status);
            if output.is_human() {
                output.success(format!(
                    "Added {} to {}",
                    tracked.entry.display_title(),
                    tracked.watch_status.label()
                ));
            } else {
                output.json(&json!({ "added": tracked }));
            }
        }
        None => output.warn(format!("Nothing to add for id {}", id)),
    }
    Ok(())
}

pub fn run_complete(id: u64, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut controller = open_context(config, paths)?.controller();

    let tracked = controller
        .complete_entry(id)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    output.success(format!("Marked {} as completed", tracked.entry.display_title()));
    Ok(())
}

pub fn run_remove(id: u64, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut controller = open_context(config, paths)?.controller();

    match controller.remove_entry(id) {
        Some(removed) => output.success(format!(
            "Removed {} from your {} list",
            removed.entry.display_title(),
            removed.watch_status.label()
        )),
        None => output.warn(format!("Id {} is not in your watchlist", id)),
    }
    Ok(())
}
