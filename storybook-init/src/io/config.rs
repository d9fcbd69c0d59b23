//! Optional `storybook-init.toml` settings.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "storybook-init.toml";

/// Init configuration (TOML).
///
/// Every field is optional in the file; missing fields take the defaults
/// below. CLI flags override values loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InitConfig {
    /// Package manifest, relative to the workspace root.
    pub manifest_path: PathBuf,

    /// Nx workspace configuration, relative to the workspace root.
    pub workspace_config_path: PathBuf,

    /// Do not run the install command after changing the manifest.
    pub skip_install: bool,

    pub install_timeout_secs: u64,

    /// Truncate captured install output beyond this many bytes.
    pub install_output_limit_bytes: usize,

    pub install: InstallConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallConfig {
    /// Command run in the workspace root (e.g. `["npm","install"]`).
    pub command: Vec<String>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            command: vec!["npm".to_string(), "install".to_string()],
        }
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from("package.json"),
            workspace_config_path: PathBuf::from("nx.json"),
            skip_install: false,
            install_timeout_secs: 10 * 60,
            install_output_limit_bytes: 100_000,
            install: InstallConfig::default(),
        }
    }
}

impl InitConfig {
    pub fn validate(&self) -> Result<()> {
        if self.manifest_path.as_os_str().is_empty() {
            return Err(anyhow!("manifest_path must not be empty"));
        }
        if self.workspace_config_path.as_os_str().is_empty() {
            return Err(anyhow!("workspace_config_path must not be empty"));
        }
        if self.install_timeout_secs == 0 {
            return Err(anyhow!("install_timeout_secs must be > 0"));
        }
        if self.install_output_limit_bytes == 0 {
            return Err(anyhow!("install_output_limit_bytes must be > 0"));
        }
        if self.install.command.is_empty() || self.install.command[0].trim().is_empty() {
            return Err(anyhow!("install.command must be a non-empty array"));
        }
        Ok(())
    }

    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install_timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `InitConfig::default()`.
pub fn load_config(path: &Path) -> Result<InitConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        let cfg = InitConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: InitConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(path = %path.display(), ?cfg, "config loaded");
    Ok(cfg)
}
