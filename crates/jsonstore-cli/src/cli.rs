use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "jsonstore",
    about = "JsonStore: named JSON documents over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the resolved configuration as TOML
    Config(ConfigArgs),
}

/// Where configuration comes from, plus flag overrides.
#[derive(Args, Clone, Debug, Default)]
pub struct ConfigSource {
    /// TOML configuration file; without it, SERVE_PORT and
    /// SERVER_TIMEOUT_MS are read from the environment
    #[arg(long, short)]
    pub config: Option<PathBuf>,
    /// Listen address, overriding the configuration
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Per-request timeout in milliseconds, overriding the configuration
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_serve() {
        let cli = Cli::try_parse_from(["jsonstore", "serve"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert!(args.source.config.is_none());
            assert!(args.source.bind.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "jsonstore", "serve", "--config", "store.toml", "--bind", "0.0.0.0:9000", "--timeout-ms", "50",
        ])
        .unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.source.config, Some(PathBuf::from("store.toml")));
            assert_eq!(args.source.bind, Some("0.0.0.0:9000".parse().unwrap()));
            assert_eq!(args.source.timeout_ms, Some(50));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_config_short_flag() {
        let cli = Cli::try_parse_from(["jsonstore", "config", "-c", "a.toml"]).unwrap();
        if let Command::Config(args) = cli.command {
            assert_eq!(args.source.config, Some(PathBuf::from("a.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn reject_bad_bind_address() {
        assert!(Cli::try_parse_from(["jsonstore", "serve", "--bind", "nowhere"]).is_err());
    }

    #[test]
    fn reject_unknown_command() {
        assert!(Cli::try_parse_from(["jsonstore", "frobnicate"]).is_err());
    }
}
