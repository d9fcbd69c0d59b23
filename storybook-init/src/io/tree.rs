//! Staged view of workspace files.
//!
//! Reads fall through to disk unless a path has a pending write. Writes stay
//! in memory until [`WorkspaceTree::flush`], so a failing pipeline leaves the
//! workspace untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Update,
}

/// A pending (or flushed) write, relative to the tree root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            ChangeKind::Create => "CREATE",
            ChangeKind::Update => "UPDATE",
        };
        write!(f, "{label} {}", self.path.display())
    }
}

#[derive(Debug, Clone)]
struct StagedFile {
    contents: String,
    kind: ChangeKind,
}

#[derive(Debug)]
pub struct WorkspaceTree {
    root: PathBuf,
    staged: BTreeMap<PathBuf, StagedFile>,
}

impl WorkspaceTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staged: BTreeMap::new(),
        }
    }

    /// Current contents of `path`, or `None` if it exists neither staged nor on disk.
    pub fn read(&self, path: &Path) -> Result<Option<String>> {
        if let Some(staged) = self.staged.get(path) {
            return Ok(Some(staged.contents.clone()));
        }
        read_disk(&self.root.join(path))
    }

    /// Stage `contents` for `path`.
    ///
    /// Writing what is already on disk drops any pending change for the path.
    pub fn write(&mut self, path: &Path, contents: String) -> Result<()> {
        let on_disk = read_disk(&self.root.join(path))?;
        let kind = match on_disk {
            Some(existing) if existing == contents => {
                debug!(path = %path.display(), "write matches disk, nothing staged");
                self.staged.remove(path);
                return Ok(());
            }
            Some(_) => ChangeKind::Update,
            None => ChangeKind::Create,
        };
        debug!(path = %path.display(), ?kind, "staging write");
        self.staged
            .insert(path.to_path_buf(), StagedFile { contents, kind });
        Ok(())
    }

    /// Pending changes in path order.
    pub fn changes(&self) -> Vec<FileChange> {
        self.staged
            .iter()
            .map(|(path, staged)| FileChange {
                path: path.clone(),
                kind: staged.kind,
            })
            .collect()
    }

    pub fn is_changed(&self, path: &Path) -> bool {
        self.staged.contains_key(path)
    }

    /// Write every staged file to disk and clear the stage.
    pub fn flush(&mut self) -> Result<Vec<FileChange>> {
        let changes = self.changes();
        for (path, staged) in &self.staged {
            write_atomic(&self.root.join(path), &staged.contents)?;
        }
        self.staged.clear();
        info!(files = changes.len(), root = %self.root.display(), "flushed workspace changes");
        Ok(changes)
    }
}

/// Parse `path` as JSON. A missing file is an error.
pub fn read_json(tree: &WorkspaceTree, path: &Path) -> Result<Value> {
    let contents = tree
        .read(path)?
        .ok_or_else(|| anyhow!("cannot find {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Apply `update` to the parsed JSON at `path` and stage the result.
///
/// Nothing is staged if `update` fails.
pub fn update_json<T, F>(tree: &mut WorkspaceTree, path: &Path, update: F) -> Result<T>
where
    F: FnOnce(&mut Value) -> Result<T>,
{
    let mut doc = read_json(tree, path)?;
    let out = update(&mut doc).with_context(|| format!("update {}", path.display()))?;
    let mut buf = serde_json::to_string_pretty(&doc).context("serialize json")?;
    buf.push('\n');
    tree.write(path, buf)?;
    Ok(out)
}

fn read_disk(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
    }
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("path missing file name {}", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
