mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::{debug, warn};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads `CONFIG_PATH` (or `config.yaml`) and applies environment overrides.
pub async fn load() -> Result<Config> {
    let config = load_from(env::var("CONFIG_PATH").ok().as_deref()).await?;
    apply_overrides(config, |key| env::var(key).ok())
}

/// Reads `explicit`, or `config.yaml` when no path was given.
///
/// A missing `config.yaml` at the default location yields the built-in
/// defaults; an explicit path must exist.
pub async fn load_from(explicit: Option<&str>) -> Result<Config> {
    let config_path = explicit.unwrap_or(DEFAULT_CONFIG_PATH);

    debug!("Loading configuration from: {}", config_path);

    match tokio::fs::read_to_string(config_path).await {
        Ok(config_str) => from_yaml(&config_str),
        Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, using default configuration", config_path);
            Ok(Config::default())
        }
        Err(e) => Err(Error::config(format!(
            "failed to read {}: {}",
            config_path, e
        ))),
    }
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    // serde_yaml rejects an empty document
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(config_str)?)
}

/// `MODEL_PATH` replaces the model file and `PORT` the listen port.
pub fn apply_overrides(
    mut config: Config,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    if let Some(path) = lookup("MODEL_PATH") {
        config.model.path = path;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .parse()
            .map_err(|_| Error::config(format!("PORT is not a valid port number: {}", port)))?;
    }
    Ok(config)
}
