use super::{open_context, prompts};
use crate::output::Output;
use crate::render;
use anime_watch_config::{Config, PathManager};
use anime_watch_core::{Listing, OverlayState, View, ViewController};
use anime_watch_models::WatchStatus;
use color_eyre::Result;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

enum Action {
    Go(View),
    Search,
    Open,
    ToggleMature,
    Quit,
}

enum OverlayAction {
    Add(WatchStatus),
    Complete,
    Remove,
    Close,
}

/// Interactive session over the view controller
pub async fn run_browse(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    if !output.is_human() || !std::io::stdin().is_terminal() {
        return Err(color_eyre::eyre::eyre!(
            "browse needs an interactive terminal and human output"
        ));
    }

    let mut controller = open_context(config, paths)?.controller();

    let spinner = output.spinner("Loading ongoing anime...");
    controller.start().await;
    spinner.finish_and_clear();

    loop {
        println!("\n{}", render::tab_bar(&controller.tab_counts(), controller.active_view()));

        let listing = controller.listing();
        render::print_listing(&listing, |id| !controller.can_add(id));
        let titles = listing_titles(&listing);
        let reveal = matches!(&listing, Listing::Empty(state) if state.offers_mature_toggle());
        drop(listing);

        let mut actions = Vec::new();
        let mut labels = Vec::new();
        if !titles.is_empty() {
            actions.push(Action::Open);
            labels.push("Open a title".to_string());
        }
        actions.push(Action::Search);
        labels.push("Search".to_string());
        for (view, count) in controller.tab_counts() {
            if view != controller.active_view() {
                actions.push(Action::Go(view));
                labels.push(format!("Go to {} ({})", view.label(), count));
            }
        }
        actions.push(Action::ToggleMature);
        labels.push(match (controller.show_mature(), reveal) {
            (true, _) => "Hide adult content".to_string(),
            (false, true) => "Show adult content (reveals filtered titles)".to_string(),
            (false, false) => "Show adult content".to_string(),
        });
        actions.push(Action::Quit);
        labels.push("Quit".to_string());

        let Some(choice) = prompts::prompt_select("What next?", &labels)? else {
            break;
        };

        match &actions[choice] {
            Action::Go(view) => {
                let view = *view;
                if view == View::Ongoing {
                    let spinner = output.spinner("Loading ongoing anime...");
                    controller.select_view(view).await;
                    spinner.finish_and_clear();
                } else {
                    controller.select_view(view).await;
                }
            }
            Action::Search => {
                let query = prompts::prompt_string("Search anime")?;
                let spinner = output.spinner(format!("Searching for \"{}\"...", query.trim()));
                controller.submit_search(&query).await;
                spinner.finish_and_clear();
                if controller.last_search_failed() {
                    output.warn("Search request failed");
                }
            }
            Action::Open => {
                let names: Vec<&str> = titles.iter().map(|(_, name)| name.as_str()).collect();
                if let Some(index) = prompts::prompt_select("Open which title?", &names)? {
                    let id = titles[index].0;
                    open_overlay(&mut controller, id, output).await?;
                }
            }
            Action::ToggleMature => {
                let show = controller.toggle_mature();
                output.info(if show { "Adult content shown" } else { "Adult content hidden" });
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

fn listing_titles(listing: &Listing<'_>) -> Vec<(u64, String)> {
    match listing {
        Listing::Catalog(entries) => entries
            .iter()
            .map(|entry| (entry.id, entry.display_title().to_string()))
            .collect(),
        Listing::Watchlist(entries) => entries
            .iter()
            .map(|tracked| (tracked.id(), tracked.entry.display_title().to_string()))
            .collect(),
        Listing::Empty(_) => Vec::new(),
    }
}

async fn open_overlay(controller: &mut ViewController, id: u64, output: &Output) -> Result<()> {
    let spinner = output.spinner("Loading anime details...");
    controller.open_detail_by_id(id).await;
    spinner.finish_and_clear();

    let loaded = match controller.overlay() {
        Some(overlay) => {
            render::print_overlay(overlay);
            matches!(overlay.state, OverlayState::Loaded(_))
        }
        None => false,
    };

    let tracked_status = controller.watchlist().find_by_id(id).map(|t| t.watch_status);
    let mut actions = Vec::new();
    match tracked_status {
        None if loaded => {
            actions.push((OverlayAction::Add(WatchStatus::Watching), "Add to Watching".to_string()));
            actions.push((
                OverlayAction::Add(WatchStatus::PlanToWatch),
                "Add to Plan to Watch".to_string(),
            ));
        }
        None => {}
        Some(status) => {
            println!("{}", format!("In your {} list", status.label()).dimmed());
            if status != WatchStatus::Completed {
                actions.push((OverlayAction::Complete, "Mark as completed".to_string()));
            }
            actions.push((OverlayAction::Remove, "Remove from watchlist".to_string()));
        }
    }
    actions.push((OverlayAction::Close, "Close".to_string()));

    let labels: Vec<&str> = actions.iter().map(|(_, label)| label.as_str()).collect();
    let choice = prompts::prompt_select("Action", &labels)?;

    match choice.map(|index| &actions[index].0) {
        Some(OverlayAction::Add(status)) => {
            if let Some(tracked) = controller.add_from_overlay(*status) {
                output.success(format!(
                    "Added {} to {}",
                    tracked.entry.display_title(),
                    tracked.watch_status.label()
                ));
            }
        }
        Some(OverlayAction::Complete) => {
            let tracked = controller
                .complete_entry(id)
                .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
            output.success(format!("Marked {} as completed", tracked.entry.display_title()));
        }
        Some(OverlayAction::Remove) => {
            if prompts::prompt_yes_no("Remove this title from your watchlist?", false)? {
                if let Some(removed) = controller.remove_entry(id) {
                    output.success(format!("Removed {}", removed.entry.display_title()));
                }
            }
        }
        Some(OverlayAction::Close) | None => {}
    }

    controller.close_detail();
    Ok(())
}
