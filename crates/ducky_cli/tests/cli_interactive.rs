use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn run_interactive(store_path: &Path, extra_env: &[(&str, &str)], input: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_ducky"));
    command
        .env("DUCKY_STORE_PATH", store_path)
        .env("DUCKY_CONFIG_PATH", store_path.with_extension("json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in extra_env {
        command.env(key, value);
    }

    let mut child = command.spawn().expect("failed to spawn interactive session");
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin
            .write_all(input.as_bytes())
            .expect("failed to write to stdin");
    }

    child
        .wait_with_output()
        .expect("failed to read interactive output")
}

#[test]
fn session_adds_then_lists() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("tasks.txt");

    let output = run_interactive(
        &store_path,
        &[],
        "todo buy milk\ndeadline return book /by 2024-03-05\nlist\nbye\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Hello! I'm Ducky."));
    assert!(stdout.contains("1. [T][ ] buy milk\n2. [D][ ] return book (by: Mar 5 2024)\n"));
    assert!(stdout.trim_end().ends_with("Bye. Hope to see you again soon!"));
}

#[test]
fn errors_do_not_end_the_session() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("tasks.txt");

    let output = run_interactive(&store_path, &[], "nope\nmark 1\ntodo still here\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: unknown_command"));
    assert!(stderr.contains("ERROR: index_out_of_range"));
    assert_eq!(
        std::fs::read_to_string(&store_path).unwrap(),
        "T | 0 | still here\n"
    );
}

#[test]
fn help_shows_usage() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("tasks.txt");

    let output = run_interactive(&store_path, &[], "help\nexit\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("event <description> /from <start> /to <end>"));
}

#[test]
fn config_aliases_apply_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("tasks.txt");
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, r#"{ "aliases": { "t": "todo" } }"#).unwrap();

    let output = run_interactive(
        &store_path,
        &[("DUCKY_CONFIG_PATH", config_path.to_str().unwrap())],
        "t water plants\nquit\n",
    );

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&store_path).unwrap(),
        "T | 0 | water plants\n"
    );
}

#[test]
fn invalid_config_falls_back_with_a_warning() {
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("tasks.txt");
    let config_path = dir.path().join("config.json");
    std::fs::write(&config_path, "{ not json").unwrap();

    let output = run_interactive(
        &store_path,
        &[("DUCKY_CONFIG_PATH", config_path.to_str().unwrap())],
        "list\nbye\n",
    );

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("WARNING: using default settings"));
}
