//! Shell state and construction

use crate::session::{ScrollbackEntry, Session};
use ctf_config::ShellConfig;
use ctf_core::{MemoryTree, NodePath};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// A shell shared between the REPL loop and the line editor callbacks.
pub type SharedShell = Arc<Mutex<Shell>>;

/// Locks a [`SharedShell`]. A poisoned lock still holds a consistent
/// session because every dispatch completes before the guard drops.
pub fn lock_shell(shell: &SharedShell) -> MutexGuard<'_, Shell> {
    shell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// What a submitted line did to the scrollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The echoed line and this output block were appended.
    Output { text: String, exit_code: i32 },
    /// The scrollback was emptied.
    Cleared,
}

impl Dispatch {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Output { exit_code, .. } => *exit_code,
            Self::Cleared => 0,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Output { text, .. } => text,
            Self::Cleared => "",
        }
    }
}

pub struct Shell {
    pub(crate) tree: MemoryTree,
    pub(crate) session: Session,
    pub(crate) settings: ShellConfig,
}

impl Shell {
    /// A session on a fresh seed tree with default settings.
    #[must_use]
    pub fn new() -> Self {
        ShellBuilder::new().build()
    }

    #[must_use]
    pub fn tree(&self) -> &MemoryTree {
        &self.tree
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    #[must_use]
    pub fn settings(&self) -> &ShellConfig {
        &self.settings
    }

    #[must_use]
    pub fn cwd(&self) -> &NodePath {
        self.session.cwd()
    }

    /// Submits a line as if the player pressed enter. Blank lines are
    /// ignored entirely and return `None`.
    pub fn submit(&mut self, line: &str) -> Option<Dispatch> {
        if line.trim().is_empty() {
            return None;
        }
        let dispatch = self.dispatch(line);
        self.session.finish_submit(line);
        Some(dispatch)
    }

    /// Steps the recall cursor back and returns the new pending line.
    pub fn recall_previous(&mut self) -> &str {
        self.session.recall_previous();
        self.session.pending()
    }

    /// Steps the recall cursor forward and returns the new pending line.
    pub fn recall_next(&mut self) -> &str {
        self.session.recall_next();
        self.session.pending()
    }

    /// The configured prompt with colour placeholders expanded.
    #[must_use]
    pub fn prompt(&self) -> String {
        self.render_prompt(self.session.cwd(), true)
    }

    fn render_prompt(&self, cwd: &NodePath, colour: bool) -> String {
        let base = self
            .settings
            .prompt
            .replace("{user}", &self.settings.prompt_user)
            .replace("{host}", &self.settings.host)
            .replace("{cwd}", &cwd.to_string());
        COLOURS.iter().fold(base, |text, &(name, code)| {
            text.replace(name, if colour { code } else { "" })
        })
    }

    /// The scrollback as plain text, input lines prefixed by the prompt
    /// they were typed at.
    #[must_use]
    pub fn transcript(&self) -> String {
        let lines: Vec<String> = self
            .session
            .scrollback()
            .iter()
            .map(|entry| match entry {
                ScrollbackEntry::Input { line, cwd } => {
                    format!("{}{}", self.render_prompt(cwd, false), line)
                }
                ScrollbackEntry::Output(text) => text.clone(),
            })
            .collect();
        lines.join("\n")
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

const COLOURS: &[(&str, &str)] = &[
    ("{red}", "\x1b[31m"),
    ("{green}", "\x1b[32m"),
    ("{yellow}", "\x1b[33m"),
    ("{blue}", "\x1b[34m"),
    ("{magenta}", "\x1b[35m"),
    ("{cyan}", "\x1b[36m"),
    ("{bold}", "\x1b[1m"),
    ("{reset}", "\x1b[0m"),
];

/// Builds a [`Shell`] from settings and an optional custom tree.
pub struct ShellBuilder {
    settings: ShellConfig,
    tree: Option<MemoryTree>,
}

impl ShellBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            settings: ShellConfig::default(),
            tree: None,
        }
    }

    #[must_use]
    pub fn settings(mut self, settings: ShellConfig) -> Self {
        self.settings = settings;
        self
    }

    /// Starts from `tree` instead of the seed tree.
    #[must_use]
    pub fn tree(mut self, tree: MemoryTree) -> Self {
        self.tree = Some(tree);
        self
    }

    #[must_use]
    pub fn build(self) -> Shell {
        let tree = self.tree.unwrap_or_else(MemoryTree::seeded);
        let mut home = NodePath::parse(&self.settings.home);
        if !tree.is_dir(&home) {
            warn!(home = %self.settings.home, "home is not a directory, starting at /");
            home = NodePath::root();
        }
        let welcome = Some(self.settings.welcome.as_str()).filter(|w| !w.is_empty());
        let session = Session::new(home, welcome);
        Shell {
            tree,
            session,
            settings: self.settings,
        }
    }
}

impl Default for ShellBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_creation() {
        let shell = Shell::new();
        assert_eq!(shell.cwd().to_string(), "/home/user");
        assert_eq!(shell.session().scrollback().len(), 1);
        assert!(shell.session().history().is_empty());
    }

    #[test]
    fn missing_home_falls_back_to_root() {
        let settings = ShellConfig {
            home: "/nowhere".to_string(),
            ..ShellConfig::default()
        };
        let shell = ShellBuilder::new().settings(settings).build();
        assert!(shell.cwd().is_root());
    }

    #[test]
    fn empty_welcome_leaves_scrollback_empty() {
        let settings = ShellConfig {
            welcome: String::new(),
            ..ShellConfig::default()
        };
        let shell = ShellBuilder::new()
            .settings(settings)
            .tree(MemoryTree::new())
            .build();
        assert!(shell.session().scrollback().is_empty());
        assert!(shell.cwd().is_root());
    }

    #[test]
    fn prompt_expands_placeholders() {
        let settings = ShellConfig {
            prompt: "{bold}{user}@{host}:{cwd}{reset}$ ".to_string(),
            ..ShellConfig::default()
        };
        let shell = ShellBuilder::new().settings(settings).build();
        assert_eq!(shell.prompt(), "\x1b[1mctf@react:/home/user\x1b[0m$ ");
    }

    #[test]
    fn blank_lines_are_ignored() {
        let mut shell = Shell::new();
        assert_eq!(shell.submit("   "), None);
        assert_eq!(shell.submit(""), None);
        assert_eq!(shell.session().scrollback().len(), 1);
        assert!(shell.session().history().is_empty());
    }

    #[test]
    fn transcript_echoes_prompt_at_entry() {
        let mut shell = Shell::new();
        shell.submit("cd ..");
        shell.submit("pwd");

        let expected = "\
Welcome to Capture the Flag Terminal! Type \"help\" for commands.
ctf@react:/home/user$ cd ..

ctf@react:/home$ pwd
/home";
        assert_eq!(shell.transcript(), expected);
    }

    #[test]
    fn shared_shell_recall() {
        let shared: SharedShell = Arc::new(Mutex::new(Shell::new()));
        lock_shell(&shared).submit("a");
        lock_shell(&shared).submit("b");

        let mut shell = lock_shell(&shared);
        assert_eq!(shell.recall_previous(), "b");
        assert_eq!(shell.recall_previous(), "a");
        assert_eq!(shell.recall_previous(), "a");
        assert_eq!(shell.recall_next(), "b");
        assert_eq!(shell.recall_next(), "");
    }
}
