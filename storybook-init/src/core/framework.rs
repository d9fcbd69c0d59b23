//! UI framework selection.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Storybook flavour requested by the caller.
///
/// Parsing never fails: anything other than the three known package names
/// becomes [`UiFramework::Unspecified`], which stages no framework packages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UiFramework {
    /// `@storybook/angular`
    Angular,
    /// `@storybook/react`
    React,
    /// `@storybook/html`
    Html,
    #[default]
    Unspecified,
}

impl UiFramework {
    pub fn package_name(self) -> Option<&'static str> {
        match self {
            UiFramework::Angular => Some("@storybook/angular"),
            UiFramework::React => Some("@storybook/react"),
            UiFramework::Html => Some("@storybook/html"),
            UiFramework::Unspecified => None,
        }
    }
}

impl FromStr for UiFramework {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "@storybook/angular" => UiFramework::Angular,
            "@storybook/react" => UiFramework::React,
            "@storybook/html" => UiFramework::Html,
            _ => UiFramework::Unspecified,
        })
    }
}

impl From<String> for UiFramework {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(framework) => framework,
            Err(never) => match never {},
        }
    }
}

impl From<UiFramework> for String {
    fn from(value: UiFramework) -> Self {
        value.package_name().unwrap_or_default().to_string()
    }
}

impl fmt::Display for UiFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package_name().unwrap_or("unspecified"))
    }
}
