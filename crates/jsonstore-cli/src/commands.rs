use colored::Colorize;

use jsonstore_server::{JsonStoreServer, ServerConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

/// Resolve configuration: file if given, environment otherwise, then flags.
fn resolve_config(source: &ConfigSource) -> anyhow::Result<ServerConfig> {
    let mut config = match &source.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::from_env()?,
    };
    if let Some(bind) = source.bind {
        config.bind_addr = bind;
    }
    if let Some(timeout_ms) = source.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.source)?;
    println!(
        "{} JsonStore on {} (timeout {} ms)",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.request_timeout_ms
    );
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(JsonStoreServer::new(config).serve())?;
    tracing::info!("bye");
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.source)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
