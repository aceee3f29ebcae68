use clap::Parser;
use ctf_config::{CtfConfig, LogFormat, LoggingConfig};
use ctfsh::{lock_shell, Builtin, CtfResult, Dispatch, SharedShell, Shell, ShellBuilder};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod completer;
mod recall;

/// ctfsh - Capture the Flag terminal
#[derive(Parser, Debug)]
#[command(name = "ctfsh", version, about)]
struct Args {
    /// Execute command and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Config file (replaces the default search path)
    #[arg(long)]
    config: Option<String>,

    /// Force debug logging
    #[arg(short, long)]
    debug: bool,

    /// Script file to execute
    script: Option<String>,
}

fn main() {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ctf_config::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}, using defaults");
            CtfConfig::default()
        }),
        None => ctf_config::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}, using defaults");
            CtfConfig::default()
        }),
    };
    init_tracing(&config.logging, args.debug);

    let mut shell = ShellBuilder::new().settings(config.shell).build();

    let code = if let Some(command) = args.command {
        run_line(&mut shell, &command)
    } else if let Some(script_path) = args.script {
        match std::fs::read_to_string(&script_path) {
            Ok(content) => run_script(&mut shell, &content),
            Err(e) => {
                eprintln!("ctfsh: cannot read '{script_path}': {e}");
                1
            }
        }
    } else {
        match run_repl(shell) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("ctfsh: {e}");
                1
            }
        }
    };
    std::process::exit(code);
}

fn init_tracing(logging: &LoggingConfig, debug: bool) {
    let directives = if debug {
        "debug".to_string()
    } else {
        logging.directives()
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)),
        )
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Runs one line and prints its output. Returns the exit code.
fn run_line(shell: &mut Shell, line: &str) -> i32 {
    match shell.submit(line) {
        Some(Dispatch::Output { text, exit_code }) => {
            print_output(line, &text);
            exit_code
        }
        Some(Dispatch::Cleared) | None => 0,
    }
}

/// Empty blocks stay silent except for `echo`, whose empty output is a
/// blank line.
fn print_output(line: &str, text: &str) {
    if output_visible(line, text) {
        println!("{text}");
    }
}

fn output_visible(line: &str, text: &str) -> bool {
    !text.is_empty()
        || line.split_whitespace().next().and_then(Builtin::from_name) == Some(Builtin::Echo)
}

fn run_script(shell: &mut Shell, content: &str) -> i32 {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .fold(0, |_, line| run_line(shell, line))
}

fn run_repl(shell: Shell) -> CtfResult<()> {
    use completer::CtfHelper;
    use rustyline::error::ReadlineError;
    use rustyline::history::DefaultHistory;
    use rustyline::{CompletionType, Config, Editor};

    let welcome = shell.settings().welcome.clone();
    let shell: SharedShell = Arc::new(Mutex::new(shell));

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();
    let mut rl: Editor<CtfHelper, DefaultHistory> = Editor::with_config(rl_config)?;
    rl.set_helper(Some(CtfHelper::new(shell.clone())));
    recall::bind_recall_keys(&mut rl, &shell);

    if !welcome.is_empty() {
        println!("{welcome}");
    }

    loop {
        let prompt = lock_shell(&shell).prompt();

        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line == "exit" || line == "quit" {
                    break;
                }

                let dispatch = lock_shell(&shell).submit(line);
                match dispatch {
                    Some(Dispatch::Output { text, exit_code }) => {
                        debug!(exit_code, "command finished");
                        print_output(line, &text);
                    }
                    Some(Dispatch::Cleared) => rl.clear_screen()?,
                    None => {}
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                lock_shell(&shell).session_mut().abandon_input();
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                warn!(error = %err, "line editor failed");
                return Err(err.into());
            }
        }
    }

    Ok(())
}
