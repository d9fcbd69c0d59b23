//! Orchestration for `storybook-init init`.
//!
//! Runs the three workspace edits in order against a [`WorkspaceTree`]:
//! dependency planning and merge, relocation of `@nrwl/storybook` into
//! `devDependencies`, and the `nx.json` cache patch. Each step reads the
//! previous step's staged output. Nothing reaches disk until the caller
//! flushes the tree.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tracing::{debug, info, instrument};

use crate::core::cache_config::{BUILD_STORYBOOK_TASK, add_cacheable_operation};
use crate::core::framework::UiFramework;
use crate::core::manifest::{merge_dependencies, relocate_to_dev};
use crate::core::planner::{NRWL_STORYBOOK, plan_dependencies};
use crate::core::types::{MergeSummary, PendingDependencies};
use crate::io::config::InitConfig;
use crate::io::tree::{FileChange, WorkspaceTree, read_json, update_json};

/// Inputs for a single init run.
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub ui_framework: UiFramework,
    /// Do not schedule an install even if the manifest changed.
    pub skip_install: bool,
    pub manifest_path: PathBuf,
    pub workspace_config_path: PathBuf,
}

impl InitOptions {
    pub fn new(ui_framework: UiFramework) -> Self {
        Self::from_config(&InitConfig::default(), ui_framework)
    }

    pub fn from_config(cfg: &InitConfig, ui_framework: UiFramework) -> Self {
        Self {
            ui_framework,
            skip_install: cfg.skip_install,
            manifest_path: cfg.manifest_path.clone(),
            workspace_config_path: cfg.workspace_config_path.clone(),
        }
    }
}

/// What an init run staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    /// Dependencies the planner asked for, before the merge.
    pub staged: PendingDependencies,
    /// Entries the merge actually added.
    pub merged: MergeSummary,
    /// `@nrwl/storybook` was moved out of `dependencies`.
    pub relocated: bool,
    /// `build-storybook` was added to the cacheable operations.
    pub cache_config_updated: bool,
    pub install_scheduled: bool,
    pub changes: Vec<FileChange>,
}

/// Run every init step against `tree`.
///
/// A failing step returns early; changes staged by earlier steps remain in
/// the tree but are never flushed by the CLI.
#[instrument(skip_all, fields(ui_framework = %options.ui_framework))]
pub fn run_init(tree: &mut WorkspaceTree, options: &InitOptions) -> Result<InitReport> {
    let (staged, merged) = add_dependencies(tree, &options.manifest_path, options.ui_framework)?;
    let relocated = move_to_dev_dependencies(tree, &options.manifest_path)?;
    let cache_config_updated = add_storybook_cache(tree, &options.workspace_config_path)?;

    let install_scheduled = !options.skip_install && tree.is_changed(&options.manifest_path);
    let changes = tree.changes();
    info!(
        relocated,
        cache_config_updated,
        install_scheduled,
        changed_files = changes.len(),
        "init steps complete"
    );

    Ok(InitReport {
        staged,
        merged,
        relocated,
        cache_config_updated,
        install_scheduled,
        changes,
    })
}

/// Compute the dependencies `init` would stage, without editing anything.
pub fn plan(
    tree: &WorkspaceTree,
    manifest_path: &Path,
    ui_framework: UiFramework,
) -> Result<PendingDependencies> {
    let manifest = read_json(tree, manifest_path)?;
    Ok(plan_dependencies(&manifest, ui_framework))
}

fn add_dependencies(
    tree: &mut WorkspaceTree,
    manifest_path: &Path,
    ui_framework: UiFramework,
) -> Result<(PendingDependencies, MergeSummary)> {
    let staged = plan(tree, manifest_path, ui_framework)?;
    debug!(?staged, "planned dependencies");
    let merged = update_json(tree, manifest_path, |manifest| {
        merge_dependencies(manifest, &staged).map_err(|err| anyhow!(err))
    })?;
    info!(
        added = ?merged.added_dev_dependencies,
        "merged dev dependencies"
    );
    Ok((staged, merged))
}

fn move_to_dev_dependencies(tree: &mut WorkspaceTree, manifest_path: &Path) -> Result<bool> {
    let moved = update_json(tree, manifest_path, |manifest| {
        relocate_to_dev(manifest, NRWL_STORYBOOK).map_err(|err| anyhow!(err))
    })?;
    if moved {
        info!(package = NRWL_STORYBOOK, "moved to devDependencies");
    }
    Ok(moved)
}

fn add_storybook_cache(tree: &mut WorkspaceTree, workspace_config_path: &Path) -> Result<bool> {
    let added = update_json(tree, workspace_config_path, |config| {
        add_cacheable_operation(config, BUILD_STORYBOOK_TASK).map_err(|err| anyhow!(err))
    })?;
    if added {
        info!(task = BUILD_STORYBOOK_TASK, "marked task cacheable");
    } else {
        debug!("nx.json left unchanged");
    }
    Ok(added)
}
