//! Dependency planning for a Storybook-enabled workspace.
//!
//! The planner only reads the manifest; merging is a separate step so the
//! staged set can be inspected (`storybook-init plan`) without writing.

use serde_json::Value;

use crate::core::framework::UiFramework;
use crate::core::manifest::is_declared;
use crate::core::types::PendingDependencies;
use crate::core::versions::VERSIONS;

pub const NRWL_STORYBOOK: &str = "@nrwl/storybook";
pub const WEBPACK_TYPES: &str = "@types/webpack";
pub const ADDON_KNOBS: &str = "@storybook/addon-knobs";
pub const STORYBOOK_ANGULAR: &str = "@storybook/angular";
pub const ANGULAR_FORMS: &str = "@angular/forms";
pub const STORYBOOK_REACT: &str = "@storybook/react";
pub const SVGR_WEBPACK: &str = "@svgr/webpack";
pub const URL_LOADER: &str = "url-loader";
pub const BABEL_LOADER: &str = "babel-loader";
pub const BABEL_CORE: &str = "@babel/core";
pub const BABEL_PRESET_TYPESCRIPT: &str = "@babel/preset-typescript";
pub const STORYBOOK_HTML: &str = "@storybook/html";

/// Compute the dependencies to add for `framework` given the current manifest.
///
/// Only development dependencies are ever staged. Packages the user already
/// declared are left alone where a presence check applies; see the per-rule
/// comments for the two entries that are staged regardless.
pub fn plan_dependencies(manifest: &Value, framework: UiFramework) -> PendingDependencies {
    let mut pending = PendingDependencies::default();

    pending.stage_dev(NRWL_STORYBOOK, VERSIONS.nx);
    pending.stage_dev(WEBPACK_TYPES, VERSIONS.webpack_types);

    // Never upgrade an existing Storybook install.
    if !is_declared(manifest, ADDON_KNOBS) {
        pending.stage_dev(ADDON_KNOBS, VERSIONS.storybook);
    }

    match framework {
        UiFramework::Angular => {
            if !is_declared(manifest, STORYBOOK_ANGULAR) {
                pending.stage_dev(STORYBOOK_ANGULAR, VERSIONS.storybook);
            }
            // Staged without a presence check.
            pending.stage_dev(ANGULAR_FORMS, "*");
        }
        UiFramework::React => {
            pending.stage_dev(STORYBOOK_REACT, VERSIONS.storybook);
            pending.stage_dev(SVGR_WEBPACK, VERSIONS.svgr);
            pending.stage_dev(URL_LOADER, VERSIONS.url_loader);
            pending.stage_dev(BABEL_LOADER, VERSIONS.babel_loader);
            pending.stage_dev(BABEL_CORE, VERSIONS.babel_core);
            pending.stage_dev(BABEL_PRESET_TYPESCRIPT, VERSIONS.babel_preset_typescript);
        }
        UiFramework::Html => {
            pending.stage_dev(STORYBOOK_HTML, VERSIONS.storybook);
        }
        UiFramework::Unspecified => {}
    }

    pending
}
