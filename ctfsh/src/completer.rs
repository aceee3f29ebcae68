use ctfsh::{lock_shell, Builtin, SharedShell};
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;

pub struct CtfHelper {
    pub shell: SharedShell,
}

impl CtfHelper {
    pub fn new(shell: SharedShell) -> Self {
        Self { shell }
    }

    fn complete_entry(&self, word: &str) -> Vec<Pair> {
        let (dir_part, partial) = word
            .rfind('/')
            .map_or(("", word), |slash| (&word[..=slash], &word[slash + 1..]));

        let shell = lock_shell(&self.shell);
        let Ok(entries) = shell
            .tree()
            .resolve(shell.cwd(), dir_part)
            .and_then(|dir| shell.tree().list(&dir))
        else {
            return vec![];
        };

        entries
            .into_iter()
            .filter(|e| e.name.starts_with(partial))
            .map(|e| {
                let display = if e.kind.is_dir() {
                    format!("{}/", e.name)
                } else {
                    e.name
                };
                Pair {
                    replacement: format!("{dir_part}{display}"),
                    display,
                }
            })
            .collect()
    }
}

impl Completer for CtfHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);
        let is_first_word = line_to_cursor[..start].trim().is_empty();

        if is_first_word {
            if word.is_empty() {
                return Ok((pos, vec![]));
            }
            let names = Builtin::ALL
                .iter()
                .map(|b| b.name())
                .filter(|name| name.starts_with(word))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect();
            return Ok((start, names));
        }

        Ok((start, self.complete_entry(word)))
    }
}

fn find_word_start(line: &str) -> (usize, &str) {
    let start = line
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    (start, &line[start..])
}

impl Hinter for CtfHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CtfHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for CtfHelper {}

impl Helper for CtfHelper {}
