use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/mdimg/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MdimgConfig {
    /// Default path for the plan report (overridden by `--plan-summary`).
    pub plan_summary: PathBuf,
    /// Default path for the execution report (overridden by `--execution-summary`).
    pub execution_summary: PathBuf,
    /// Maximum number of HTTP redirects followed per image GET.
    pub max_redirections: u32,
    /// Optional `User-Agent` sent with image requests; libcurl's default when unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for MdimgConfig {
    fn default() -> Self {
        Self {
            plan_summary: PathBuf::from("/tmp/markdown_image_download_plan_summary.md"),
            execution_summary: PathBuf::from("/tmp/markdown_image_download_execution_summary.md"),
            max_redirections: 10,
            user_agent: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("mdimg")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MdimgConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<MdimgConfig> {
    if !path.exists() {
        let default_cfg = MdimgConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MdimgConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
