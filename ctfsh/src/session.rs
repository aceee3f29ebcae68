//! Per-session state: working directory, scrollback and command recall.

use ctf_core::NodePath;

/// One block of the visible terminal history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollbackEntry {
    /// An echoed command line with the directory it was typed in.
    Input { line: String, cwd: NodePath },
    /// Command output; may be empty.
    Output(String),
}

/// Previously submitted lines plus the up/down recall cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
}

impl CommandHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Index of the recalled entry, `None` when not recalling.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
        self.cursor = None;
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    /// Steps toward older entries, stopping at the oldest. Returns the
    /// recalled line, or `None` when the history is empty.
    pub fn previous(&mut self) -> Option<&str> {
        let newest = self.entries.len().checked_sub(1)?;
        let index = self.cursor.map_or(newest, |i| i.saturating_sub(1));
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }

    /// Steps toward newer entries. Passing the newest entry leaves recall
    /// mode and yields an empty line. Returns `None` when not recalling.
    pub fn next(&mut self) -> Option<&str> {
        let index = self.cursor? + 1;
        if index >= self.entries.len() {
            self.cursor = None;
            return Some("");
        }
        self.cursor = Some(index);
        self.entries.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    cwd: NodePath,
    scrollback: Vec<ScrollbackEntry>,
    history: CommandHistory,
    pending: String,
}

impl Session {
    /// A session at `cwd` whose scrollback starts with `welcome`, if any.
    #[must_use]
    pub fn new(cwd: NodePath, welcome: Option<&str>) -> Self {
        let scrollback = welcome
            .map(|text| vec![ScrollbackEntry::Output(text.to_string())])
            .unwrap_or_default();
        Self {
            cwd,
            scrollback,
            history: CommandHistory::new(),
            pending: String::new(),
        }
    }

    #[must_use]
    pub fn cwd(&self) -> &NodePath {
        &self.cwd
    }

    pub(crate) fn set_cwd(&mut self, cwd: NodePath) {
        self.cwd = cwd;
    }

    #[must_use]
    pub fn scrollback(&self) -> &[ScrollbackEntry] {
        &self.scrollback
    }

    #[must_use]
    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// The line currently being edited.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn set_pending(&mut self, text: impl Into<String>) {
        self.pending = text.into();
    }

    /// Loads the previous history entry into the pending line. Returns
    /// false when there is nothing to recall.
    pub fn recall_previous(&mut self) -> bool {
        match self.history.previous() {
            Some(line) => {
                self.pending = line.to_string();
                true
            }
            None => false,
        }
    }

    /// Loads the next history entry (or an empty line after the newest)
    /// into the pending line. Returns false when not recalling.
    pub fn recall_next(&mut self) -> bool {
        match self.history.next() {
            Some(line) => {
                self.pending = line.to_string();
                true
            }
            None => false,
        }
    }

    /// Drops the pending line and leaves recall mode.
    pub fn abandon_input(&mut self) {
        self.pending.clear();
        self.history.reset_cursor();
    }

    pub(crate) fn push_input(&mut self, line: &str, cwd: NodePath) {
        self.scrollback.push(ScrollbackEntry::Input {
            line: line.to_string(),
            cwd,
        });
    }

    pub(crate) fn push_output(&mut self, text: impl Into<String>) {
        self.scrollback.push(ScrollbackEntry::Output(text.into()));
    }

    pub(crate) fn clear_scrollback(&mut self) {
        self.scrollback.clear();
    }

    /// Bookkeeping after a line was dispatched.
    pub(crate) fn finish_submit(&mut self, line: &str) {
        self.history.record(line);
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(lines: &[&str]) -> CommandHistory {
        let mut history = CommandHistory::new();
        for line in lines {
            history.record(*line);
        }
        history
    }

    #[test]
    fn previous_on_empty_history_does_nothing() {
        let mut history = CommandHistory::new();
        assert_eq!(history.previous(), None);
        assert_eq!(history.cursor(), None);
        assert_eq!(history.next(), None);
    }

    #[test]
    fn previous_walks_back_and_stops_at_oldest() {
        let mut history = history_of(&["a", "b"]);
        assert_eq!(history.previous(), Some("b"));
        assert_eq!(history.previous(), Some("a"));
        assert_eq!(history.previous(), Some("a"));
        assert_eq!(history.cursor(), Some(0));
    }

    #[test]
    fn next_walks_forward_then_leaves_recall() {
        let mut history = history_of(&["a", "b"]);
        history.previous();
        history.previous();

        assert_eq!(history.next(), Some("b"));
        assert_eq!(history.next(), Some(""));
        assert_eq!(history.cursor(), None);
        assert_eq!(history.next(), None);
    }

    #[test]
    fn record_resets_cursor() {
        let mut history = history_of(&["a"]);
        history.previous();
        history.record("b");
        assert_eq!(history.cursor(), None);
        assert_eq!(history.entries(), ["a", "b"]);
    }

    #[test]
    fn session_recall_updates_pending() {
        let mut session = Session::new(NodePath::root(), None);
        assert!(!session.recall_previous());

        session.finish_submit("a");
        session.finish_submit("b");
        assert!(session.recall_previous());
        assert!(session.recall_previous());
        assert_eq!(session.pending(), "a");

        assert!(session.recall_next());
        assert_eq!(session.pending(), "b");
        assert!(session.recall_next());
        assert_eq!(session.pending(), "");
        assert!(!session.recall_next());
    }

    #[test]
    fn abandon_input_leaves_recall() {
        let mut session = Session::new(NodePath::root(), None);
        session.finish_submit("ls");
        session.recall_previous();
        session.abandon_input();

        assert_eq!(session.pending(), "");
        assert_eq!(session.history().cursor(), None);
    }

    #[test]
    fn welcome_is_first_scrollback_block() {
        let session = Session::new(NodePath::root(), Some("hello"));
        assert_eq!(session.scrollback(), [ScrollbackEntry::Output("hello".into())]);

        let silent = Session::new(NodePath::root(), None);
        assert!(silent.scrollback().is_empty());
    }
}
