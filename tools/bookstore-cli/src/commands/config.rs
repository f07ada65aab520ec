//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use bookstore_data::Operation;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    ctx.output.kv("timeout_ms", &api.timeout_ms.to_string());
    ctx.output.kv("retry_attempts", &api.retry_attempts.to_string());
    ctx.output.kv("retry_delay_ms", &api.retry_delay_ms.to_string());

    ctx.output.info("[api.payload_fields]");
    for operation in Operation::ALL {
        ctx.output
            .kv(operation.as_str(), api.payload_fields.field_for(operation).as_str());
    }

    let logging = &ctx.config.logging;
    ctx.output.info("[logging]");
    ctx.output.kv("level", logging.level.as_directive());
    ctx.output.kv("format", &logging.format.to_string());
    ctx.output.kv("with_target", &logging.with_target.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
