//! Server configuration.
//!
//! A [`ServerConfig`] comes from one of two places: a TOML file
//! ([`ServerConfig::load`]) or the process environment
//! ([`ServerConfig::from_env`]). The environment form reads:
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `SERVE_PORT` | yes | TCP port to listen on (all interfaces) |
//! | `SERVER_TIMEOUT_MS` | no | per-request timeout, default 10000 |

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ServerError, ServerResult};

pub const SERVE_PORT_KEY: &str = "SERVE_PORT";
pub const SERVER_TIMEOUT_KEY: &str = "SERVER_TIMEOUT_MS";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub request_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 8080)),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> ServerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Every missing mandatory variable is reported at once; when none are
    /// missing, every malformed value is reported at once.
    pub fn from_lookup<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut vars = EnvVars::new(lookup);
        let port: u16 = vars.mandatory(SERVE_PORT_KEY);
        let request_timeout_ms = vars.optional(SERVER_TIMEOUT_KEY, DEFAULT_REQUEST_TIMEOUT_MS);
        vars.finish()?;

        Ok(Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            request_timeout_ms,
        })
    }

    /// Parse a TOML document. Absent keys take their default values.
    pub fn from_toml_str(text: &str) -> ServerResult<Self> {
        toml::from_str(text).map_err(|e| ServerError::Config(format!("invalid TOML: {e}")))
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string(self).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Collects environment lookups and the problems found along the way.
struct EnvVars<F> {
    lookup: F,
    missing: Vec<String>,
    malformed: Vec<String>,
}

impl<F> EnvVars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn new(lookup: F) -> Self {
        Self {
            lookup,
            missing: Vec::new(),
            malformed: Vec::new(),
        }
    }

    /// Empty values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.is_empty())
    }

    fn mandatory<T: FromStr + Default>(&mut self, key: &str) -> T {
        let Some(raw) = self.get(key) else {
            self.missing.push(key.to_string());
            return T::default();
        };
        raw.parse().unwrap_or_else(|_| {
            self.malformed
                .push(format!("mandatory {key} (value={raw:?}) is not a number"));
            T::default()
        })
    }

    fn optional<T: FromStr>(&mut self, key: &str, fallback: T) -> T {
        let Some(raw) = self.get(key) else {
            return fallback;
        };
        match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                self.malformed
                    .push(format!("optional {key} (value={raw:?}) is not a number"));
                fallback
            }
        }
    }

    fn finish(self) -> ServerResult<()> {
        if !self.missing.is_empty() {
            return Err(ServerError::Config(format!(
                "missing mandatory configuration: {}",
                self.missing.join(", ")
            )));
        }
        if !self.malformed.is_empty() {
            return Err(ServerError::Config(format!(
                "malformed configuration: {}",
                self.malformed.join(", ")
            )));
        }
        Ok(())
    }
}
