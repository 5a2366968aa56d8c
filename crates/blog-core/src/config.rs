use home::home_dir;
use serde::Deserialize;
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    constant::{
        CHANNEL_CAPACITY, CONFIG_DIR, CONFIG_ENV, CONFIG_FILE, DEFAULT_BASE_URL,
        DEFAULT_LOG_LEVEL, DEFAULT_PORT,
    },
    BlogError,
};

/// Settings shared by the server and the client. Every key of the TOML
/// file is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Socket address used to serve. Should be <ip>:<port>
    /// Example: 0.0.0.0:3000
    pub socket: SocketAddr,
    /// Where the client reaches the server.
    pub base_url: String,
    /// Used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Depth of the queue in front of the post store.
    pub channel_capacity: usize,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            socket: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), DEFAULT_PORT),
            base_url: DEFAULT_BASE_URL.into(),
            log_level: DEFAULT_LOG_LEVEL.into(),
            channel_capacity: CHANNEL_CAPACITY,
        }
    }
}

impl BlogConfig {
    /// Load the config. `path` is the file named on the command line; when
    /// absent the `BLOGCONF` variable and then `~/.blog/blog.toml` are tried.
    /// Only an explicitly named file has to exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        debug!("Reading config from {}", path.display());
        let buf = std::fs::read_to_string(path).map_err(|e| {
            BlogError::config_error(format!("Unable to read {}: {e}", path.display()))
        })?;
        Self::parse(&buf)
    }

    pub fn parse(buf: &str) -> anyhow::Result<Self> {
        let config: Self =
            toml::from_str(buf).map_err(|e| BlogError::config_error(e.message().into()))?;
        if config.channel_capacity == 0 {
            return Err(BlogError::config_error("channel_capacity must be positive".into()).into());
        }
        Ok(config)
    }

    /// `~/.blog/blog.toml`, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}
