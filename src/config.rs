use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "daygrade";
const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "grades.json";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings read from the optional TOML configuration file.  Command-line
/// options take precedence over everything here.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Path to the grades file
    pub(crate) store: Option<PathBuf>,
    /// Prepended to every date key in the grades file
    pub(crate) key_prefix: String,
    pub(crate) log_level: Option<String>,
}

impl Config {
    /// Load the configuration from `path`, or from the default location if
    /// `path` is `None`.  A missing file at the default location yields the
    /// default configuration; a missing file at an explicit path is an error.
    pub(crate) fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match default_config_path() {
                Some(p) => (p, false),
                None => return Ok(Config::default()),
            },
        };
        match fs::read_to_string(&path) {
            Ok(s) => Config::parse(&s).map_err(|source| ConfigError::Parse { path, source }),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => Ok(Config::default()),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    fn parse(s: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(s)
    }

    pub(crate) fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

pub(crate) fn default_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join(APP_DIR).join(CONFIG_FILE))
}

pub(crate) fn default_store_path() -> Option<PathBuf> {
    Some(dirs::data_dir()?.join(APP_DIR).join(STORE_FILE))
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
