//! ctfsh - a capture-the-flag terminal over an in-memory filesystem
//!
//! This crate provides:
//! - A fixed table of shell builtins (ls, cd, cat, rmdir, ...)
//! - Session state: working directory, scrollback and up/down recall
//! - A line-editor front end in the `ctfsh` binary

pub mod error;
pub mod eval;
pub mod help;
pub mod session;
pub mod shell;

pub use error::{CommandError, CtfResult, Reason, ShellError};
pub use eval::Builtin;
pub use session::{CommandHistory, ScrollbackEntry, Session};
pub use shell::{lock_shell, Dispatch, SharedShell, Shell, ShellBuilder};
