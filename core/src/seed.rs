//! The game's fixed starting filesystem.

use crate::path::NodePath;
use crate::tree::MemoryTree;
use once_cell::sync::Lazy;

pub const README: &str = "Welcome to the CTF! Try to find the real flag. Use `man` for help.";
pub const FAKE_FLAG: &str = "Nope! This is a fake flag. Keep looking!";
pub const HINT: &str = "Try looking in /var/logs for something interesting.";
pub const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash\nuser:x:1000:1000:User,,,:/home/user:/bin/bash";
pub const SYSTEM_LOG: &str = "System running smoothly. Nothing to see here.";
pub const FLAG: &str = "Congrats! The real flag is: CTF{terminal_master_2024}";

/// Directories created up front, including empty ones.
pub const SEED_DIRS: &[&str] = &["/home/user/notes", "/etc", "/var/logs", "/tmp"];

pub const SEED_FILES: &[(&str, &str)] = &[
    ("/home/user/readme.txt", README),
    ("/home/user/fake_flag.txt", FAKE_FLAG),
    ("/home/user/notes/hint.txt", HINT),
    ("/etc/passwd", PASSWD),
    ("/var/logs/system.log", SYSTEM_LOG),
    ("/var/logs/flag.log", FLAG),
];

/// Default working directory of a new session.
pub const HOME: &str = "/home/user";

pub(crate) static SEED_TREE: Lazy<MemoryTree> = Lazy::new(build);

fn build() -> MemoryTree {
    let mut tree = MemoryTree::new();
    for dir in SEED_DIRS {
        tree.create_dir_all(&NodePath::parse(dir))
            .unwrap_or_else(|e| unreachable!("seed directory {dir}: {e}"));
    }
    for (path, content) in SEED_FILES {
        tree.create_file(&NodePath::parse(path), *content)
            .unwrap_or_else(|e| unreachable!("seed file {path}: {e}"));
    }
    tree
}
