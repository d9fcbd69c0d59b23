//! Test-only helpers for building scratch workspaces.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

use crate::io::tree::WorkspaceTree;

pub const MANIFEST: &str = "package.json";
pub const NX_JSON: &str = "nx.json";

/// Temporary workspace root seeded with `package.json` and `nx.json`.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new(manifest: &Value, nx_json: &Value) -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp workspace")?;
        let ws = Self { dir };
        ws.write_json(MANIFEST, manifest)?;
        ws.write_json(NX_JSON, nx_json)?;
        Ok(ws)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn tree(&self) -> WorkspaceTree {
        WorkspaceTree::new(self.path())
    }

    pub fn write_json(&self, name: &str, value: &Value) -> Result<()> {
        let mut buf = serde_json::to_string_pretty(value)?;
        buf.push('\n');
        let path = self.path().join(name);
        fs::write(&path, buf).with_context(|| format!("write {}", path.display()))
    }

    pub fn read_manifest_raw(&self) -> Result<String> {
        self.read_raw(MANIFEST)
    }

    pub fn read_manifest(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.read_manifest_raw()?)?)
    }

    pub fn read_nx_json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.read_raw(NX_JSON)?)?)
    }

    pub fn remove_nx_json(&self) -> Result<()> {
        let path = self.path().join(NX_JSON);
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))
    }

    fn read_raw(&self, name: &str) -> Result<String> {
        let path = self.path().join(name);
        fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))
    }
}
