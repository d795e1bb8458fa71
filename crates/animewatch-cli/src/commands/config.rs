use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use anime_watch_config::{Config, PathManager};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

/// Load the config file, falling back to defaults when it does not exist
pub fn load_config(paths: &PathManager) -> Result<Config> {
    let config_file = paths.config_file();
    Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })
}

pub fn run_config(cmd: ConfigCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(config, paths, output),
        ConfigCommands::Path => {
            let path = paths.config_file();
            match output.format() {
                OutputFormat::Human => println!("{}", path.display()),
                OutputFormat::Json | OutputFormat::JsonPretty => {
                    output.json(&json!({ "path": path.display().to_string() }))
                }
            }
            Ok(())
        }
        ConfigCommands::Init { force } => init_config(force, paths, output),
    }
}

fn show_config(config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let data_dir = config
        .storage
        .data_dir
        .clone()
        .unwrap_or_else(|| paths.data_dir().to_path_buf());

    if !output.is_human() {
        output.json(&json!({
            "configFile": config_file.display().to_string(),
            "fileExists": config_file.exists(),
            "dataDir": data_dir.display().to_string(),
            "config": config,
        }));
        return Ok(());
    }

    println!("\n{}", "Configuration".bright_cyan().bold());
    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}; using defaults. Run 'animewatch config init' to create one.",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);

    let logging_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());
    let logging_json = match config.logging.json {
        Some(true) => "json",
        Some(false) => "plain",
        None => "auto",
    };

    for (key, value) in [
        ("Config file", config_file.display().to_string()),
        ("Catalog URL", config.catalog.base_url.clone()),
        ("Timeout", format!("{}s", config.catalog.timeout_secs)),
        ("User agent", config.catalog.user_agent.clone()),
        ("Data directory", data_dir.display().to_string()),
        ("Log output", logging_file),
        ("Log format", logging_json.to_string()),
    ] {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    println!("{}", table);
    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    let mut config = Config::default();
    config.logging.file = Some(paths.default_log_file());
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
