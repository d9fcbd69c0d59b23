//! I/O helpers for init commands.

pub mod config;
pub mod install;
pub mod process;
pub mod tree;
