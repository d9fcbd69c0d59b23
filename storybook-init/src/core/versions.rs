//! Pinned package versions staged by the init pipeline.

/// Fixed version specifiers for every package the planner may stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Versions {
    pub nx: &'static str,
    pub storybook: &'static str,
    pub babel_core: &'static str,
    pub babel_loader: &'static str,
    pub babel_preset_typescript: &'static str,
    pub svgr: &'static str,
    pub url_loader: &'static str,
    pub webpack_types: &'static str,
}

pub const VERSIONS: Versions = Versions {
    nx: "*",
    storybook: "5.3.9",
    babel_core: "7.8.3",
    babel_loader: "8.0.6",
    babel_preset_typescript: "7.8.3",
    svgr: "^5.0.1",
    url_loader: "^3.0.0",
    webpack_types: "4.41.21",
};
