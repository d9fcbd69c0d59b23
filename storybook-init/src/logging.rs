//! Diagnostic tracing for storybook-init.
//!
//! Tracing goes to stderr and is controlled by `RUST_LOG`. The list of changed
//! files and `plan` output go to stdout and are unaffected by the filter.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: this crate's warnings only.
pub const DEFAULT_DIRECTIVE: &str = concat!(env!("CARGO_CRATE_NAME"), "=warn");

/// Initialize the tracing subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=storybook_init=debug storybook-init init --ui-framework @storybook/react
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .compact();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directive_targets_this_crate() {
        assert_eq!(DEFAULT_DIRECTIVE, "storybook_init=warn");
    }
}
