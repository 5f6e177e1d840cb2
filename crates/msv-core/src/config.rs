use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Global configuration loaded from `~/.config/msv/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MsvConfig {
    /// Connect timeout per fetch, in seconds.
    pub connect_timeout_secs: u64,
    /// Overall transfer timeout per fetch, in seconds. Mod archives are
    /// usually small, but some mirrors are slow.
    pub fetch_timeout_secs: u64,
    /// Maximum redirects followed per fetch.
    pub max_redirects: u32,
}

impl Default for MsvConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            fetch_timeout_secs: 300,
            max_redirects: 10,
        }
    }
}

impl MsvConfig {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.fetch_timeout_secs),
            max_redirects: self.max_redirects,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("msv")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MsvConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MsvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: MsvConfig = toml::from_str(&data)?;
    Ok(cfg)
}
