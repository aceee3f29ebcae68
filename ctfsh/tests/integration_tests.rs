//! Integration tests for ctfsh
//!
//! This test harness:
//! 1. Discovers all .ctf test scripts
//! 2. Runs each script through the ctfsh binary with a pinned config
//! 3. Compares stdout with the expected .out file
//! 4. Reports differences

use ctfsh::{Dispatch, Shell};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S %z";

/// Default settings written out so files on the host cannot leak in.
const PINNED_CONFIG: &str = "\
shell:
  user: user
  home: /home/user
logging:
  level: error
";

fn pinned_config() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PINNED_CONFIG.as_bytes()).unwrap();
    file
}

/// Discover all .ctf test scripts
fn discover_test_scripts() -> Vec<PathBuf> {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let scripts_dir = manifest_dir.join("tests/integration/scripts");

    let mut scripts: Vec<PathBuf> = fs::read_dir(&scripts_dir)
        .map(|entries| {
            entries
                .flatten()
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "ctf"))
                .collect()
        })
        .unwrap_or_default();
    scripts.sort();
    scripts
}

#[derive(Debug)]
enum TestResult {
    Passed,
    Failed {
        expected: String,
        actual: String,
        stderr: String,
        exit_code: i32,
    },
    Skipped {
        reason: String,
    },
}

/// Run a single test script and compare output
fn run_test_script(
    script_path: &Path,
    config_path: &Path,
) -> Result<TestResult, Box<dyn std::error::Error>> {
    let expected_path = script_path.with_extension("out");
    if !expected_path.exists() {
        return Ok(TestResult::Skipped {
            reason: format!("Missing expected output file: {expected_path:?}"),
        });
    }
    let expected = fs::read_to_string(&expected_path)?;

    let output = Command::new(env!("CARGO_BIN_EXE_ctfsh"))
        .arg("--config")
        .arg(config_path)
        .arg(script_path)
        .env_remove("CTFSH_CONFIG")
        .env_remove("CTFSH_USER")
        .env_remove("CTFSH_HOST")
        .env_remove("CTFSH_HOME")
        .env_remove("CTFSH_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if matches_pattern(&expected, &stdout) {
        Ok(TestResult::Passed)
    } else {
        Ok(TestResult::Failed {
            expected,
            actual: stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        })
    }
}

#[test]
fn integration_tests() {
    let scripts = discover_test_scripts();
    assert!(!scripts.is_empty(), "no scripts in tests/integration/scripts/");
    let config = pinned_config();

    let mut passed = 0;
    let mut failed = 0;
    let mut skipped = 0;

    for script in &scripts {
        let name = script.file_stem().unwrap().to_string_lossy();
        print!("Running {name}... ");

        match run_test_script(script, config.path()) {
            Ok(TestResult::Passed) => {
                println!("PASSED");
                passed += 1;
            }
            Ok(TestResult::Failed {
                expected,
                actual,
                stderr,
                exit_code,
            }) => {
                println!("FAILED");
                println!("  Exit code: {exit_code}");
                println!("  Expected:\n{}", indent(&expected, "    "));
                println!("  Actual:\n{}", indent(&actual, "    "));
                if !stderr.is_empty() {
                    println!("  Stderr:\n{}", indent(&stderr, "    "));
                }
                failed += 1;
            }
            Ok(TestResult::Skipped { reason }) => {
                println!("SKIPPED: {reason}");
                skipped += 1;
            }
            Err(e) => {
                println!("ERROR: {e}");
                failed += 1;
            }
        }
    }

    println!();
    println!("Results: {passed} passed, {failed} failed, {skipped} skipped");
    assert_eq!(failed, 0, "{failed} tests failed");
}

fn indent(s: &str, prefix: &str) -> String {
    s.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line-by-line comparison. A `{date}` line matches any `date` output.
fn matches_pattern(expected: &str, actual: &str) -> bool {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();

    expected_lines.len() == actual_lines.len()
        && expected_lines
            .iter()
            .zip(&actual_lines)
            .all(|(exp, act)| line_matches(exp, act))
}

fn line_matches(pattern: &str, actual: &str) -> bool {
    if pattern == "{date}" {
        return chrono::DateTime::parse_from_str(actual, DATE_FORMAT).is_ok();
    }
    pattern == actual
}

fn ctfsh(args: &[&str]) -> std::process::Output {
    let config = pinned_config();
    Command::new(env!("CARGO_BIN_EXE_ctfsh"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env_remove("CTFSH_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn command_flag_exit_codes() {
    let ok = ctfsh(&["-c", "cat notes/hint.txt"]);
    assert_eq!(ok.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&ok.stdout),
        "Try looking in /var/logs for something interesting.\n"
    );

    assert_eq!(ctfsh(&["-c", "cat ghost"]).status.code(), Some(1));
    assert_eq!(ctfsh(&["-c", "cat"]).status.code(), Some(2));
    assert_eq!(ctfsh(&["-c", "sudo"]).status.code(), Some(127));
}

#[test]
fn config_overrides_user_and_home() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"shell:\n  user: alice\n  home: /var/logs\n")
        .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ctfsh"))
        .arg("--config")
        .arg(file.path())
        .args(["-c", "whoami"])
        .env_remove("CTFSH_CONFIG")
        .env_remove("CTFSH_USER")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "alice\n");

    let output = Command::new(env!("CARGO_BIN_EXE_ctfsh"))
        .arg("--config")
        .arg(file.path())
        .args(["-c", "pwd"])
        .env_remove("CTFSH_CONFIG")
        .env_remove("CTFSH_HOME")
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "/var/logs\n");
}

#[test]
fn hint_leads_to_the_real_flag() {
    let mut shell = Shell::new();
    let hint = shell.submit("cat notes/hint.txt").unwrap();
    assert!(hint.text().contains("/var/logs"));

    let fake = shell.submit("cat fake_flag.txt").unwrap();
    assert!(fake.text().contains("fake"));

    shell.submit("cd /var/logs");
    let flag = shell.submit("cat flag.log").unwrap();
    let text = flag.text();
    let start = text.find("CTF{").unwrap();
    assert!(text[start..].contains('}'));
}

#[test]
fn recall_walks_history() {
    let mut shell = Shell::new();
    shell.submit("a");
    shell.submit("b");

    assert_eq!(shell.recall_previous(), "b");
    assert_eq!(shell.recall_previous(), "a");
    assert_eq!(shell.recall_previous(), "a");
    assert_eq!(shell.recall_next(), "b");
    assert_eq!(shell.recall_next(), "");
    assert_eq!(shell.session().history().cursor(), None);

    assert_eq!(shell.submit("pwd"), Some(Dispatch::Output {
        text: "/home/user".to_string(),
        exit_code: 0,
    }));
    assert_eq!(shell.session().pending(), "");
}

#[test]
fn every_seed_directory_round_trips_to_root() {
    let mut shell = Shell::new();
    let dirs = shell.tree().directories();
    for dir in dirs {
        shell.submit("cd /");
        for segment in dir.segments() {
            shell.submit(&format!("cd {segment}"));
        }
        assert_eq!(shell.cwd(), &dir);
        for _ in 0..dir.depth() {
            shell.submit("cd ..");
        }
        assert!(shell.cwd().is_root());
    }
}
