use std::fs;
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port used when `bind` is not configured.
pub const DEFAULT_PORT: u16 = 8711;
/// Cookie name used when `session_cookie` is not configured.
pub const DEFAULT_SESSION_COOKIE: &str = "medireg_session";

/// Which browser sessions share a record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreScope {
    /// Every session gets its own store; registrations stay private to it.
    #[default]
    Session,
    /// One process-wide store visible to every session.
    Shared,
}

/// Contents of `medireg.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address.
    pub bind: SocketAddr,
    /// Store sharing between sessions.
    pub scope: StoreScope,
    /// Name of the session cookie.
    pub session_cookie: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            scope: StoreScope::Session,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
        }
    }
}

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for [`ServerConfig`].
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    /// `session_cookie` cannot be used as a cookie name.
    #[error("session_cookie must be a non-empty token without spaces, ';' or '='")]
    InvalidCookieName,
}

impl ServerConfig {
    fn check(self) -> Result<Self, ConfigError> {
        let name = self.session_cookie.as_str();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_graphic() && !matches!(c, ';' | '=' | ',' | '"'));
        if valid {
            Ok(self)
        } else {
            Err(ConfigError::InvalidCookieName)
        }
    }
}

/// Parses and checks configuration text.
pub fn parse_config(text: &str) -> Result<ServerConfig, ConfigError> {
    toml::from_str::<ServerConfig>(text)?.check()
}

/// Reads the config file at `path`, or returns defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    match path {
        None => Ok(ServerConfig::default()),
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            parse_config(&text)
        }
    }
}
