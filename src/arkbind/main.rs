use arkbind::api::{ArkApi, CmdMessage, MessageLevel};
use arkbind::authority::process::ProcessRunner;
use arkbind::config::{ArkConfig, LogLevel};
use arkbind::error::Result;
use arkbind::logging;
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use tracing::debug;

mod args;
use args::{Cli, Commands};

/// Exit status when `validate` finds an identifier NOID rejects.
const EXIT_INVALID: i32 = 2;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(1);
        }
    }
}

struct AppContext {
    api: ArkApi<ProcessRunner>,
    config: ArkConfig,
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Commands::Mint { count } => handle_mint(&ctx, count),
        Commands::Bind {
            identifier,
            element,
            value,
            how,
        } => handle_bind(&ctx, &identifier, &element, value.as_deref(), &how),
        Commands::BindMany {
            identifier,
            pairs,
            how,
        } => handle_bind_many(&ctx, &identifier, &pairs, &how),
        Commands::Get {
            identifier,
            elements,
        } => handle_lookup(&ctx, &identifier, &elements, false),
        Commands::Fetch {
            identifier,
            elements,
        } => handle_lookup(&ctx, &identifier, &elements, true),
        Commands::Validate { identifiers } => handle_validate(&ctx, &identifiers),
        Commands::BindDir { dir, extensions } => handle_bind_dir(&ctx, dir, &extensions),
        Commands::Config => handle_config(&ctx),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let (mut config, source) = ArkConfig::discover(cli.config.as_deref())?;

    if let Some(path) = &cli.noid_path {
        config.noid.noid_path = path.clone();
    }
    if let Some(path) = &cli.db_path {
        config.noid.db_path = path.clone();
    }
    config.validate()?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.logging.level
    };
    logging::init(level)?;

    match &source {
        Some(path) => debug!(config = %path.display(), "Loaded configuration"),
        None => debug!("No config file found, using defaults"),
    }

    let api = ArkApi::from_config(&config, ProcessRunner::new());
    Ok(AppContext { api, config })
}

fn handle_mint(ctx: &AppContext, count: u32) -> Result<i32> {
    let result = ctx.api.mint(count)?;
    for id in &result.minted {
        println!("{}", id);
    }
    print_messages(&result.messages);
    Ok(if result.minted.is_empty() { 1 } else { 0 })
}

fn handle_bind(
    ctx: &AppContext,
    identifier: &str,
    element: &str,
    value: Option<&str>,
    how: &str,
) -> Result<i32> {
    let identifier = arkbind::model::normalize_identifier(identifier);
    let result = ctx.api.bind(identifier, element, value, how)?;
    if let Some(output) = &result.output {
        print!("{}", output);
    }
    print_messages(&result.messages);
    Ok(0)
}

fn handle_bind_many(
    ctx: &AppContext,
    identifier: &str,
    pairs: &[String],
    how: &str,
) -> Result<i32> {
    let identifier = arkbind::model::normalize_identifier(identifier);
    let result = ctx.api.bind_many(identifier, pairs, how)?;
    print_messages(&result.messages);
    Ok(0)
}

fn handle_lookup(
    ctx: &AppContext,
    identifier: &str,
    elements: &[String],
    verbose: bool,
) -> Result<i32> {
    let identifier = arkbind::model::normalize_identifier(identifier);
    let result = if verbose {
        ctx.api.fetch(identifier, elements)?
    } else {
        ctx.api.get(identifier, elements)?
    };

    match &result.output {
        Some(text) => {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
            Ok(0)
        }
        None => {
            print_messages(&result.messages);
            Ok(1)
        }
    }
}

fn handle_validate(ctx: &AppContext, identifiers: &[String]) -> Result<i32> {
    let result = ctx.api.validate(identifiers)?;
    print_messages(&result.messages);
    Ok(if result.all_valid() { 0 } else { EXIT_INVALID })
}

fn handle_bind_dir(ctx: &AppContext, dir: PathBuf, extensions: &[String]) -> Result<i32> {
    let result = ctx.api.bind_directory(&dir, extensions)?;
    print_messages(&result.messages);
    Ok(0)
}

fn handle_config(ctx: &AppContext) -> Result<i32> {
    print!("{}", ctx.config.to_yaml()?);
    Ok(0)
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}
