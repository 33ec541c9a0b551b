//! End-to-end tests driving the promptdock binary

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn write_config(dir: &Path) -> PathBuf {
    let config = format!(
        r#"plugin_dir = "{plugins}"

[reader]
settings_file = "{settings}"

[prompts]
history_file = "{history}"
paste_target = "input"

[logging]
level = "warn"
"#,
        plugins = dir.join("plugins").display(),
        settings = dir.join("file_reader_settings.json").display(),
        history = dir.join("prompt_history.json").display(),
    );
    let path = dir.join("config.toml");
    std::fs::write(&path, config).unwrap();
    path
}

fn promptdock(config: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_promptdock"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_shell_reads_folder_and_records_prompt() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let tree = dir.path().join("tree");
    std::fs::create_dir_all(tree.join(".git")).unwrap();
    std::fs::write(tree.join(".git").join("HEAD"), "ref").unwrap();
    std::fs::write(tree.join("notes.txt"), "remember the milk").unwrap();
    std::fs::write(tree.join("build.log"), "noise").unwrap();

    let script = format!("2 {}\n8 summarize the notes\nquit\n", tree.display());
    let output = promptdock(&config, &[], &script);
    assert!(output.status.success(), "{:?}", output);

    let out = stdout(&output);
    assert!(out.contains("Plugins\n  File Reader\n     1. Show/Hide File Reader"));
    assert!(out.contains("     8. Confirm"));
    assert!(out.contains("│ File: notes.txt"));
    assert!(out.contains("│ remember the milk"));
    assert!(!out.contains("build.log"));
    assert!(!out.contains("HEAD"));

    let history: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("prompt_history.json")).unwrap())
            .unwrap();
    let groups = history.as_array().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["prompts"][0], "summarize the notes");
    assert!(dir.path().join("plugins").is_dir());
}

#[test]
fn test_each_session_starts_a_new_group() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    promptdock(&config, &[], "8 first\n");
    promptdock(&config, &[], "8 second\n");

    let output = promptdock(&config, &["history"], "");
    assert!(output.status.success());
    let out = stdout(&output);
    // The history command does not start a group of its own
    let second = out.find("=== Group 2").unwrap();
    let first = out.find("=== Group 1").unwrap();
    assert!(second < first);
    assert!(out.contains("Prompts:\nsecond"));
    assert!(out.contains("Prompts:\nfirst"));
    assert!(!out.contains("=== Group 3"));
}

#[test]
fn test_listing_plugins_leaves_history_alone() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let history = dir.path().join("prompt_history.json");

    promptdock(&config, &["plugins"], "");
    assert!(!history.exists());

    promptdock(&config, &[], "8 kept\n");
    let before = std::fs::read_to_string(&history).unwrap();
    for _ in 0..3 {
        let output = promptdock(&config, &["plugins"], "");
        assert!(output.status.success());
    }
    assert_eq!(std::fs::read_to_string(&history).unwrap(), before);
}

#[test]
fn test_manifest_disables_plugin() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let plugins = dir.path().join("plugins");
    std::fs::create_dir_all(&plugins).unwrap();
    std::fs::write(plugins.join("file_reader.toml"), "enabled = false\n").unwrap();
    std::fs::write(plugins.join("prompt_manager.toml"), "").unwrap();

    let output = promptdock(&config, &["plugins"], "");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Prompt Manager (prompt_manager)"));
    assert!(!out.contains("File Reader"));
    assert!(out.contains("     1. Show/Hide Prompt Manager"));
}

#[test]
fn test_scan_uses_saved_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    std::fs::write(
        dir.path().join("file_reader_settings.json"),
        r#"{"excluded_files": ["secret.txt"], "excluded_extensions": []}"#,
    )
    .unwrap();
    let tree = dir.path().join("tree");
    std::fs::create_dir_all(&tree).unwrap();
    std::fs::write(tree.join("secret.txt"), "hidden").unwrap();
    std::fs::write(tree.join("public.txt"), "shown").unwrap();

    let output = promptdock(&config, &["scan", tree.to_str().unwrap()], "");
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("File: public.txt"));
    assert!(!out.contains("secret.txt"));

    let missing = promptdock(&config, &["scan", dir.path().join("nope").to_str().unwrap()], "");
    assert!(!missing.status.success());
}

#[test]
fn test_missing_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = promptdock(&dir.path().join("absent.toml"), &["version"], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let output = promptdock(&config, &["version"], "");
    assert_eq!(
        stdout(&output).trim(),
        format!("Promptdock v{}", env!("CARGO_PKG_VERSION"))
    );
}
