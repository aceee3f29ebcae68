pub struct CommandHelp {
    pub name: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
}

/// Built-in commands in the order `help` lists them.
pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "ls",
        summary: "List files and directories in the current directory.",
        usage: "ls [dir]",
    },
    CommandHelp {
        name: "cd",
        summary: "Change directory. Use '..' to go up, '/' for root.",
        usage: "cd <dir>",
    },
    CommandHelp {
        name: "cat",
        summary: "Show file content.",
        usage: "cat <file>",
    },
    CommandHelp {
        name: "pwd",
        summary: "Print working directory.",
        usage: "pwd",
    },
    CommandHelp {
        name: "clear",
        summary: "Clear the terminal.",
        usage: "clear",
    },
    CommandHelp {
        name: "help",
        summary: "Show available commands.",
        usage: "help",
    },
    CommandHelp {
        name: "echo",
        summary: "Print text to the terminal.",
        usage: "echo <text>",
    },
    CommandHelp {
        name: "whoami",
        summary: "Show your username.",
        usage: "whoami",
    },
    CommandHelp {
        name: "history",
        summary: "Show command history.",
        usage: "history",
    },
    CommandHelp {
        name: "touch",
        summary: "Create an empty file.",
        usage: "touch <file>",
    },
    CommandHelp {
        name: "mkdir",
        summary: "Create a new directory.",
        usage: "mkdir <dir>",
    },
    CommandHelp {
        name: "rm",
        summary: "Remove a file.",
        usage: "rm <file>",
    },
    CommandHelp {
        name: "rmdir",
        summary: "Remove an empty directory.",
        usage: "rmdir <dir>",
    },
    CommandHelp {
        name: "tree",
        summary: "Show directory tree.",
        usage: "tree [dir]",
    },
    CommandHelp {
        name: "man",
        summary: "Show help for a command.",
        usage: "man <command>",
    },
    CommandHelp {
        name: "date",
        summary: "Show the current date and time.",
        usage: "date",
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// The one-line manual page printed by `man`.
pub fn format_help(cmd: &CommandHelp) -> String {
    format!("{}: {}", cmd.usage, cmd.summary)
}

pub fn format_help_list() -> String {
    let names: Vec<&str> = COMMANDS.iter().map(|c| c.name).collect();
    format!("Available commands:\n{}", names.join(", "))
}
