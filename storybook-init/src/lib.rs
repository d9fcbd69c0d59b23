//! Prepare an Nx workspace for Storybook.
//!
//! A one-shot setup step that edits `package.json` and `nx.json`:
//!
//! - **[`core`]**: Pure logic over parsed JSON (dependency planning, merge,
//!   relocation, cache config patch). No I/O.
//! - **[`io`]**: Staged file tree, config loading and the install command.
//!
//! [`init`] chains the steps for the `storybook-init` binary.

pub mod core;
pub mod exit_codes;
pub mod init;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
