//! Error types for ctfsh

use thiserror::Error;

/// Result type alias for shell operations that can fault
pub type CtfResult<T> = Result<T, ShellError>;

/// Program faults. User mistakes never end up here; they are
/// [`CommandError`]s rendered into the scrollback.
#[derive(Error, Debug)]
pub enum ShellError {
    /// IO error (script files, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ctf_config::ConfigError),

    /// Line editor failure
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Why a create or remove command failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    #[error("File exists")]
    FileExists,
    #[error("No such file")]
    NoSuchFile,
    #[error("No such directory")]
    NoSuchDirectory,
    #[error("No such file or directory")]
    NoSuchFileOrDirectory,
    #[error("Is a directory")]
    IsDirectory,
    #[error("Not a directory")]
    NotDirectory,
    #[error("Directory not empty")]
    DirectoryNotEmpty,
    #[error("Device or resource busy")]
    Busy,
}

/// A rejected command. The `Display` text is exactly what the player sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("No such directory")]
    NoSuchDirectory,

    #[error("cd: no such file or directory: {0}")]
    Cd(String),

    #[error("cat: {0}: No such file")]
    Cat(String),

    #[error("touch: cannot create file '{name}': {reason}")]
    Touch { name: String, reason: Reason },

    #[error("mkdir: cannot create directory '{name}': {reason}")]
    Mkdir { name: String, reason: Reason },

    #[error("rm: cannot remove '{name}': {reason}")]
    Rm { name: String, reason: Reason },

    #[error("rmdir: failed to remove '{name}': {reason}")]
    Rmdir { name: String, reason: Reason },

    #[error("No manual entry for {0}")]
    NoManualEntry(String),
}

impl CommandError {
    /// Status reported to `-c` and script runs.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandNotFound(_) => 127,
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_terminal_output() {
        assert_eq!(CommandError::Usage("cd <directory>").to_string(), "Usage: cd <directory>");
        assert_eq!(
            CommandError::Touch { name: "x".into(), reason: Reason::FileExists }.to_string(),
            "touch: cannot create file 'x': File exists"
        );
        assert_eq!(
            CommandError::Rmdir { name: "d".into(), reason: Reason::DirectoryNotEmpty }.to_string(),
            "rmdir: failed to remove 'd': Directory not empty"
        );
        assert_eq!(CommandError::Cat("nope".into()).to_string(), "cat: nope: No such file");
    }

    #[test]
    fn exit_codes() {
        assert_eq!(CommandError::CommandNotFound("sudo".into()).exit_code(), 127);
        assert_eq!(CommandError::Usage("rm <file>").exit_code(), 2);
        assert_eq!(CommandError::NoSuchDirectory.exit_code(), 1);
    }
}
