use super::CmdResult;
use crate::error::CommandError;
use crate::help::{format_help, get_help};
use crate::shell::Shell;

/// `date` output, independent of the process locale.
pub(crate) const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S %z";

impl Shell {
    /// Numbered listing of the lines submitted before this one.
    pub(super) fn cmd_history(&self) -> String {
        self.session
            .history()
            .entries()
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{}  {}", i + 1, line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(super) fn cmd_man(&self, args: &[&str]) -> CmdResult {
        let Some(name) = args.first() else {
            return Err(CommandError::Usage("man <command>"));
        };
        get_help(name)
            .map(format_help)
            .ok_or_else(|| CommandError::NoManualEntry((*name).to_string()))
    }

    pub(super) fn cmd_date(&self) -> String {
        chrono::Local::now().format(DATE_FORMAT).to_string()
    }
}
