//! End-to-end tests of the `complete-from-text` binary

use std::fs;
use std::process::Command;

use indoc::indoc;
use tempfile::TempDir;

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_complete-from-text"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run binary");
    (output.status.success(), String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn test_cli_completes_from_documents() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let current = temp_dir.path().join("notes.txt");
    let other = temp_dir.path().join("other.txt");
    fs::write(&current, "please\npl").unwrap();
    fs::write(&other, "plenty plural").unwrap();

    let (ok, stdout) = run(&[current.to_str().unwrap(), "--line", "2", "--column", "2"]);
    assert!(ok);
    assert_eq!(stdout, "plain|please\n");

    let (ok, stdout) = run(&[
        current.to_str().unwrap(),
        other.to_str().unwrap(),
        "--line",
        "2",
        "--column",
        "2",
        "--all-documents",
    ]);
    assert!(ok);
    assert_eq!(
        stdout,
        "plain|please|notes.txt\nplain|plenty|other.txt\nplain|plural|other.txt\n"
    );
}

#[test]
fn test_cli_settings_and_dictionary() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = temp_dir.path().join("notes.md");
    fs::write(&document, "forest\nfo").unwrap();

    let settings = temp_dir.path().join("settings.json");
    fs::write(&settings, r#"{"dictionary_first": true}"#).unwrap();

    let autocomplete = temp_dir.path().join("data").join("autocomplete");
    fs::create_dir_all(&autocomplete).unwrap();
    fs::write(
        autocomplete.join("Markdown.acp"),
        indoc! {"
            #chars
            ^ foreach(x)|loop over x
        "},
    )
    .unwrap();

    let (ok, stdout) = run(&[
        document.to_str().unwrap(),
        "--line",
        "2",
        "--column",
        "2",
        "--language",
        "Markdown",
        "--settings",
        settings.to_str().unwrap(),
        "--data-dir",
        temp_dir.path().join("data").to_str().unwrap(),
    ]);
    assert!(ok);
    assert_eq!(stdout, "^|foreach|(x)\tloop over x\nplain|forest\n");
}

#[test]
fn test_cli_no_candidates_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let document = temp_dir.path().join("main.rs");
    fs::write(&document, "please\npl").unwrap();

    let (ok, stdout) = run(&[
        document.to_str().unwrap(),
        "--line",
        "2",
        "--column",
        "2",
        "--language",
        "Rust",
    ]);
    assert!(!ok);
    assert!(stdout.is_empty());
}
