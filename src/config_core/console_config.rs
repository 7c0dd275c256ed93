use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "~/.config/cdn-console/config.yml";

lazy_static! {
    pub static ref DEFAULT_ENDPOINT: Url = "http://localhost:8080/".parse().unwrap();
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where new entries go in the navigation list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NavOrder {
    MostRecentFirst,
    InsertionOrder,
}

impl Default for NavOrder {
    fn default() -> Self {
        NavOrder::MostRecentFirst
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not expand config path: {0}")]
    Expand(#[from] shellexpand::LookupError<std::env::VarError>),

    #[error("error parsing config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("endpoint scheme `{0}` is not supported. Should be http or https")]
    UnsupportedScheme(String),

    #[error("endpoint `{0}` cannot be used as a base url")]
    NotABase(Url),

    #[error("`{0}` should be greater than zero")]
    ZeroTimeout(&'static str),
}

fn default_endpoint() -> Url {
    DEFAULT_ENDPOINT.clone()
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ConsoleConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: Url,

    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    #[serde(default)]
    pub nav_order: NavOrder,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        ConsoleConfig {
            endpoint: default_endpoint(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            nav_order: NavOrder::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn parse(yaml: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let yaml = yaml.as_ref();

        let cfg = if yaml.iter().all(u8::is_ascii_whitespace) {
            ConsoleConfig::default()
        } else {
            serde_yaml::from_slice::<ConsoleConfig>(yaml)?
        };
        cfg.validate()?;

        Ok(cfg)
    }

    /// Reads the config at `path`. `~` and environment variables are expanded.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let path = expand(path)?;
        let yaml = std::fs::read(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Use config at {}", path.display());

        Self::parse(yaml)
    }

    /// Like [`ConsoleConfig::load`], but a missing file yields the defaults.
    pub fn load_optional(path: &str) -> Result<Self, ConfigError> {
        let expanded = expand(path)?;
        if !Path::new(&expanded).exists() {
            debug!("no config at {}, using defaults", expanded.display());
            return Ok(ConsoleConfig::default());
        }

        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.endpoint.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        if self.endpoint.cannot_be_a_base() {
            return Err(ConfigError::NotABase(self.endpoint.clone()));
        }
        if self.timeout == Duration::from_secs(0) {
            return Err(ConfigError::ZeroTimeout("timeout"));
        }
        if self.connect_timeout == Duration::from_secs(0) {
            return Err(ConfigError::ZeroTimeout("connect-timeout"));
        }

        Ok(())
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Result<Self, ConfigError> {
        self.endpoint = endpoint;
        self.validate()?;

        Ok(self)
    }
}

fn expand(path: &str) -> Result<PathBuf, ConfigError> {
    Ok(PathBuf::from(shellexpand::full(path)?.into_owned()))
}
