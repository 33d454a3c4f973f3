use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use teamnet_graph::NetworkConfig;

pub(crate) const CONFIG_ENV: &str = "TEAMNET_CONFIG";

/// Config path from the flag, falling back to `TEAMNET_CONFIG`
pub(crate) fn config_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Load the run configuration; defaults when no file is given
pub(crate) fn load_config(flag: Option<&Path>) -> Result<NetworkConfig> {
    let Some(path) = config_path(flag) else {
        return Ok(NetworkConfig::default());
    };

    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = NetworkConfig::from_toml(&text)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
