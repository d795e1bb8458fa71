use super::open_context;
use crate::output::Output;
use crate::Toggle;
use anime_watch_config::{Config, PathManager};
use color_eyre::Result;
use serde_json::json;

pub fn run_adult(value: Option<Toggle>, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let mut preferences = open_context(config, paths)?.preferences();

    if let Some(value) = value {
        preferences.set(value == Toggle::On);
    }
    let show = preferences.get();

    if output.is_human() {
        let state = if show { "shown" } else { "hidden" };
        match value {
            Some(_) => output.success(format!("Adult content is now {}", state)),
            None => output.info(format!("Adult content is {}", state)),
        }
    } else {
        output.json(&json!({ "showAdultContent": show }));
    }
    Ok(())
}
