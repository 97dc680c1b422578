use crate::app::Context;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_config::Config;

pub fn run_config(ctx: &Context, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(ctx, output),
        ConfigCommands::Path => show_paths(ctx, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
    }
}

fn show_config(ctx: &Context, output: &Output) -> Result<()> {
    let config = &ctx.config;

    if !output.is_human() {
        let value = serde_json::to_value(config)?;
        output.json(&json!({
            "config_file": ctx.config_path,
            "exists": ctx.config_path.exists(),
            "config": value,
        }));
        return Ok(());
    }

    if !ctx.config_path.exists() {
        output.warn(format!(
            "No configuration file at {}, showing defaults. Run 'watchlist config init' to create one.",
            ctx.config_path.display()
        ));
    }

    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    let seed = if config.database.seed_on_startup {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    };
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(stderr)".to_string());

    let rows = [
        ("database.path", ctx.db_path.display().to_string()),
        ("database.seed_on_startup", seed),
        ("import.url", config.import.url.clone()),
        ("display.sort", config.display.sort.to_string()),
        ("display.filter", config.display.filter.to_string()),
        ("logging.level", config.logging.level.clone()),
        ("logging.file", log_file),
    ];
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key).fg(comfy_table::Color::Cyan), Cell::new(value)]);
    }

    println!("{table}");
    Ok(())
}

fn show_paths(ctx: &Context, output: &Output) -> Result<()> {
    let log_file = ctx.config.logging.file.as_ref();
    let default_log_file = ctx.paths.log_file();

    if !output.is_human() {
        output.json(&json!({
            "config_file": ctx.config_path,
            "database": ctx.db_path,
            "log_file": log_file,
            "default_log_file": default_log_file,
        }));
        return Ok(());
    }

    println!("{} {}", "Config:  ".bold(), ctx.config_path.display());
    println!("{} {}", "Database:".bold(), ctx.db_path.display());
    match log_file {
        Some(path) => println!("{} {}", "Logs:    ".bold(), path.display()),
        None => println!(
            "{} stderr (--log-file writes to {})",
            "Logs:    ".bold(),
            default_log_file.display()
        ),
    }
    Ok(())
}

fn init_config(ctx: &Context, force: bool, output: &Output) -> Result<()> {
    if ctx.config_path.exists() && !force {
        output.error(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            ctx.config_path.display()
        ));
        return Err(eyre!("Configuration file already exists"));
    }

    ctx.paths.ensure_directories().map_err(|e| eyre!("{}", e))?;
    Config::default()
        .save_to_file(&ctx.config_path)
        .map_err(|e| eyre!("Failed to write {}: {}", ctx.config_path.display(), e))?;

    output.success(format!("Wrote default configuration to {}", ctx.config_path.display()));
    Ok(())
}
