//! Prepare an Nx workspace for Storybook.
//!
//! Adds the Storybook dev dependencies for the chosen UI framework to
//! `package.json`, moves `@nrwl/storybook` into `devDependencies`, and marks
//! `build-storybook` cacheable in `nx.json`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use storybook_init::core::framework::UiFramework;
use storybook_init::exit_codes;
use storybook_init::init::{InitOptions, plan, run_init};
use storybook_init::io::config::{DEFAULT_CONFIG_FILE, InitConfig, load_config};
use storybook_init::io::install::{CommandInstaller, InstallRequest, run_install_if_scheduled};
use storybook_init::io::tree::WorkspaceTree;
use storybook_init::logging;

#[derive(Parser)]
#[command(
    name = "storybook-init",
    version,
    about = "Prepare an Nx workspace for Storybook"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add Storybook dependencies and cache `build-storybook` in nx.json.
    Init {
        #[command(flatten)]
        target: Target,
        /// Print the files that would change without writing them.
        #[arg(long)]
        dry_run: bool,
        /// Do not run the install command after editing package.json.
        #[arg(long)]
        skip_install: bool,
    },
    /// Print the dependencies `init` would stage, as JSON.
    Plan {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(Args)]
struct Target {
    /// UI framework package: @storybook/angular, @storybook/react or @storybook/html.
    #[arg(long)]
    ui_framework: Option<UiFramework>,
    /// Workspace root containing package.json and nx.json.
    #[arg(long, default_value = ".")]
    root: PathBuf,
    /// Config file. Defaults to `storybook-init.toml` in the workspace root.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Target {
    fn ui_framework(&self) -> UiFramework {
        self.ui_framework.unwrap_or_default()
    }

    fn load_config(&self) -> Result<InitConfig> {
        let path = self
            .config
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_CONFIG_FILE));
        load_config(&path)
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init {
            target,
            dry_run,
            skip_install,
        } => cmd_init(&target, dry_run, skip_install),
        Command::Plan { target } => cmd_plan(&target),
    }
}

fn cmd_init(target: &Target, dry_run: bool, skip_install: bool) -> Result<()> {
    let cfg = target.load_config()?;
    let mut options = InitOptions::from_config(&cfg, target.ui_framework());
    options.skip_install |= skip_install;

    let mut tree = WorkspaceTree::new(&target.root);
    let report = run_init(&mut tree, &options)?;
    for change in &report.changes {
        println!("{change}");
    }

    if dry_run {
        println!("\nNOTE: --dry-run was set, no changes were written.");
        return Ok(());
    }

    tree.flush().context("write workspace changes")?;
    let request = InstallRequest::from_config(&target.root, &cfg);
    run_install_if_scheduled(report.install_scheduled, &CommandInstaller, &request)
        .context("install dependencies")?;
    Ok(())
}

fn cmd_plan(target: &Target) -> Result<()> {
    let cfg = target.load_config()?;
    let tree = WorkspaceTree::new(&target.root);
    let pending = plan(&tree, &cfg.manifest_path, target.ui_framework())?;
    println!(
        "{}",
        serde_json::to_string_pretty(&pending).context("serialize plan")?
    );
    Ok(())
}
