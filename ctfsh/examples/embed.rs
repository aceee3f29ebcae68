//! Drive a ctfsh session from Rust code.
//!
//! Run:  cargo run -p ctfsh --example embed

use ctf_config::ShellConfig;
use ctf_core::{MemoryTree, NodePath};
use ctfsh::{Dispatch, ShellBuilder};

fn print_dispatch(line: &str, dispatch: Option<Dispatch>) {
    println!("\n== {line} ==");
    match dispatch {
        Some(Dispatch::Output { text, exit_code }) => {
            println!("exit: {exit_code}");
            if text.is_empty() {
                println!("output: <empty>");
            } else {
                println!("output:\n{text}");
            }
        }
        Some(Dispatch::Cleared) => println!("scrollback cleared"),
        None => println!("ignored"),
    }
}

fn main() -> Result<(), ctf_core::FsError> {
    let mut tree = MemoryTree::seeded();
    tree.create_dir_all(&NodePath::parse("/srv/challenge"))?;
    tree.create_file(
        &NodePath::parse("/srv/challenge/notice.txt"),
        "Round two starts here.",
    )?;

    let settings = ShellConfig {
        user: "player1".to_string(),
        home: "/srv/challenge".to_string(),
        ..ShellConfig::default()
    };
    let mut shell = ShellBuilder::new().settings(settings).tree(tree).build();

    println!("ctfsh embedded demo");
    for line in ["whoami", "ls", "cat notice.txt", "cd ..", "tree", "cat nope"] {
        print_dispatch(line, shell.submit(line));
    }

    println!("\n== recall ==");
    println!("previous: {}", shell.recall_previous());
    println!("previous: {}", shell.recall_previous());

    println!("\n== transcript ==\n{}", shell.transcript());
    Ok(())
}
