use ctfsh::{lock_shell, SharedShell};
use rustyline::{
    Cmd, ConditionalEventHandler, Event, EventContext, EventHandler, KeyCode, KeyEvent, Modifiers,
    Movement, RepeatCount,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Previous,
    Next,
}

/// Routes Up/Down through the session's recall cursor instead of the
/// editor's own history.
struct RecallHandler {
    shell: SharedShell,
    direction: Direction,
}

impl ConditionalEventHandler for RecallHandler {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        _ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        let mut shell = lock_shell(&self.shell);
        let session = shell.session_mut();
        let moved = match self.direction {
            Direction::Previous => session.recall_previous(),
            Direction::Next => session.recall_next(),
        };
        if !moved {
            return Some(Cmd::Noop);
        }
        Some(Cmd::Replace(
            Movement::WholeLine,
            Some(session.pending().to_string()),
        ))
    }
}

/// Binds Up and Down on `rl` to the shared session.
pub fn bind_recall_keys<H: rustyline::Helper, I: rustyline::history::History>(
    rl: &mut rustyline::Editor<H, I>,
    shell: &SharedShell,
) {
    for (code, direction) in [
        (KeyCode::Up, Direction::Previous),
        (KeyCode::Down, Direction::Next),
    ] {
        let handler = RecallHandler {
            shell: shell.clone(),
            direction,
        };
        rl.bind_sequence(
            KeyEvent(code, Modifiers::NONE),
            EventHandler::Conditional(Box::new(handler)),
        );
    }
}
