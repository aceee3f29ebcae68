//! Command dispatcher

use crate::error::CommandError;
use crate::shell::{Dispatch, Shell};
use tracing::debug;

mod builtins_fs;
mod builtins_shell;

pub(crate) type CmdResult = Result<String, CommandError>;

/// The fixed command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Ls,
    Cd,
    Cat,
    Pwd,
    Clear,
    Help,
    Echo,
    Whoami,
    History,
    Touch,
    Mkdir,
    Rm,
    Rmdir,
    Tree,
    Man,
    Date,
}

impl Builtin {
    pub const ALL: [Self; 16] = [
        Self::Ls,
        Self::Cd,
        Self::Cat,
        Self::Pwd,
        Self::Clear,
        Self::Help,
        Self::Echo,
        Self::Whoami,
        Self::History,
        Self::Touch,
        Self::Mkdir,
        Self::Rm,
        Self::Rmdir,
        Self::Tree,
        Self::Man,
        Self::Date,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ls => "ls",
            Self::Cd => "cd",
            Self::Cat => "cat",
            Self::Pwd => "pwd",
            Self::Clear => "clear",
            Self::Help => "help",
            Self::Echo => "echo",
            Self::Whoami => "whoami",
            Self::History => "history",
            Self::Touch => "touch",
            Self::Mkdir => "mkdir",
            Self::Rm => "rm",
            Self::Rmdir => "rmdir",
            Self::Tree => "tree",
            Self::Man => "man",
            Self::Date => "date",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

impl Shell {
    /// Runs one non-blank line and records it in the scrollback.
    pub(crate) fn dispatch(&mut self, line: &str) -> Dispatch {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();
        let cwd_at_entry = self.session.cwd().clone();

        let result = match Builtin::from_name(name) {
            Some(Builtin::Clear) => {
                debug!("clearing scrollback");
                self.session.clear_scrollback();
                return Dispatch::Cleared;
            }
            Some(builtin) => {
                debug!(command = name, args = ?args, "dispatch");
                self.run_builtin(builtin, &args)
            }
            None => Err(CommandError::CommandNotFound(name.to_string())),
        };

        let (text, exit_code) = match result {
            Ok(text) => (text, 0),
            Err(err) => {
                debug!(error = %err, "command rejected");
                let code = err.exit_code();
                (err.to_string(), code)
            }
        };

        self.session.push_input(line, cwd_at_entry);
        self.session.push_output(text.clone());
        Dispatch::Output { text, exit_code }
    }

    fn run_builtin(&mut self, builtin: Builtin, args: &[&str]) -> CmdResult {
        match builtin {
            Builtin::Ls => self.cmd_ls(args),
            Builtin::Cd => self.cmd_cd(args),
            Builtin::Cat => self.cmd_cat(args),
            Builtin::Pwd => Ok(self.session.cwd().to_string()),
            Builtin::Touch => self.cmd_touch(args),
            Builtin::Mkdir => self.cmd_mkdir(args),
            Builtin::Rm => self.cmd_rm(args),
            Builtin::Rmdir => self.cmd_rmdir(args),
            Builtin::Tree => self.cmd_tree(args),
            Builtin::Help => Ok(crate::help::format_help_list()),
            Builtin::Echo => Ok(args.join(" ")),
            Builtin::Whoami => Ok(self.settings.user.clone()),
            Builtin::History => Ok(self.cmd_history()),
            Builtin::Man => self.cmd_man(args),
            Builtin::Date => Ok(self.cmd_date()),
            Builtin::Clear => unreachable!("clear is handled by dispatch"),
        }
    }
}
