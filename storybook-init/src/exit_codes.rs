//! Stable exit codes for storybook-init commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Missing or malformed workspace files, invalid config, or a failed install.
pub const INVALID: i32 = 1;
