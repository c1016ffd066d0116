mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::scoring::{WeightConfig, WeightKey};

/// Get the config directory path (~/.config/clutch-puck/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("clutch-puck"))
}

/// Get the default config file path (~/.config/clutch-puck/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses default path
///   (~/.config/clutch-puck/config.yaml) and falls back to defaults when it
///   does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Build the weight snapshot for one pass.
///
/// Layers, lowest first: the dataset's stored weights, the config file's
/// `weights`, then `--set` assignments from the command line.
pub fn effective_weights(
    stored: &WeightConfig,
    config: &Config,
    assignments: &[(WeightKey, f64)],
) -> Result<WeightConfig> {
    let mut weights = *stored;
    weights
        .apply_overrides(&config.weights)
        .context("Invalid weights in config file")?;
    for (key, value) in assignments {
        weights.set(*key, *value);
    }
    Ok(weights)
}
