//! Package install task run after the manifest changes.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::io::config::InitConfig;
use crate::io::process::run_command_with_timeout;

#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub workdir: PathBuf,
    pub command: Vec<String>,
    pub timeout: Duration,
    pub output_limit_bytes: usize,
}

impl InstallRequest {
    pub fn from_config(workdir: impl Into<PathBuf>, cfg: &InitConfig) -> Self {
        Self {
            workdir: workdir.into(),
            command: cfg.install.command.clone(),
            timeout: cfg.install_timeout(),
            output_limit_bytes: cfg.install_output_limit_bytes,
        }
    }
}

pub trait Installer {
    fn install(&self, request: &InstallRequest) -> Result<()>;
}

/// Runs the configured package manager command.
pub struct CommandInstaller;

impl Installer for CommandInstaller {
    fn install(&self, request: &InstallRequest) -> Result<()> {
        let Some((program, args)) = request.command.split_first() else {
            bail!("install command is empty");
        };
        info!(command = ?request.command, workdir = %request.workdir.display(), "running install");

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&request.workdir);
        let output = run_command_with_timeout(cmd, request.timeout, request.output_limit_bytes)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!(stdout = %stdout.trim_end(), truncated = output.truncated, "install output");

        if output.timed_out {
            bail!(
                "`{}` timed out after {}s",
                request.command.join(" "),
                request.timeout.as_secs()
            );
        }
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(exit_code = ?output.status.code(), "install failed");
            let mut message = format!(
                "`{}` failed with {}:\n{}",
                request.command.join(" "),
                output.status,
                stderr.trim_end()
            );
            if output.truncated > 0 {
                message.push_str(&format!("\n[install output truncated {} bytes]", output.truncated));
            }
            bail!(message);
        }
        Ok(())
    }
}

/// Run `installer` if the pipeline scheduled an install.
///
/// Returns whether the install ran.
pub fn run_install_if_scheduled<I: Installer>(
    scheduled: bool,
    installer: &I,
    request: &InstallRequest,
) -> Result<bool> {
    if !scheduled {
        return Ok(false);
    }
    installer.install(request)?;
    Ok(true)
}
