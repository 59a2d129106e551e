use std::{env, fs, path};

use serde::{Deserialize, Serialize};

/// Default probe cadence.
pub const DEFAULT_INTERVAL_SECONDS: u64 = 60;
/// Default per-probe response timeout.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file: {0}")]
    ReadFailed(#[source] std::io::Error),
    #[error("failed to write config file: {0}")]
    WriteFailed(#[source] std::io::Error),
    #[error("failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    SerializeFailed(#[from] toml::ser::Error),
    #[error("no config path available (set XDG_CONFIG_HOME or HOME)")]
    ConfigPathUnavailable,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub pinger: Pinger,
    pub bootstrap: Bootstrap,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Pinger {
    /// Path of the local status database.
    pub db_path: String,
    pub interval_seconds: u64,
    pub timeout_seconds: u64,
}

/// Seed data written into the store the first time it is created. Ignored
/// once the store holds targets.
#[derive(Debug, Serialize, Deserialize)]
pub struct Bootstrap {
    pub sink_url: String,
    #[serde(default)]
    pub targets: Vec<TargetSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSeed {
    pub name: String,
    pub url: String,
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Get default config path ($XDG_CONFIG_HOME/pingping/config.toml or
/// $HOME/.config/...)
fn default_config_path() -> Result<path::PathBuf, Error> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else if let Some(home_dir) = env::home_dir() {
        home_dir.join(".config")
    } else {
        return Err(Error::ConfigPathUnavailable);
    };

    Ok(path.join("pingping/config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pinger: Pinger {
                db_path: "pingping.db".into(),
                interval_seconds: DEFAULT_INTERVAL_SECONDS,
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
            bootstrap: Bootstrap { sink_url: String::new(), targets: Vec::new() },
        }
    }
}

impl Config {
    /// Generate Config structure from file
    ///
    /// Creates a default config in ~/.config/pingping/config.toml
    /// or the specified path, with the name config.toml if one does not
    /// exist
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, Error> {
        let config_path: path::PathBuf = if let Some(path) = optional_path {
            normalize_toml_path(path.as_ref())
        } else {
            default_config_path()?
        };

        if config_path.exists() {
            let raw_string = fs::read_to_string(&config_path).map_err(Error::ReadFailed)?;
            Ok(toml::from_str(raw_string.as_str())?)
        } else {
            let config = Self::default();
            config.write_config(&config_path)?;
            Ok(config)
        }
    }

    /// Serialize and write a config to a file
    pub fn write_config(&self, path: &std::path::Path) -> Result<(), Error> {
        let config_str: String = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::WriteFailed)?;
        }

        std::fs::write(path, config_str).map_err(Error::WriteFailed)
    }
}
