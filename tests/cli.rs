//! End-to-end runs of the orgfolder binary

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const MANIFEST: &str = r#"
[[factory]]
id = "workflow-multibranch"
display_name = "Multibranch Pipeline"

[[provider]]
id = "github"
display_name = "GitHub Organization"

[[provider]]
id = "gitea"
display_name = "Gitea Organization"
name_inference = false
"#;

fn orgfolder(manifest: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_orgfolder"))
        .arg("--config")
        .arg(manifest)
        .arg("--color")
        .arg("false")
        .args(args)
        .output()
        .expect("failed to run orgfolder")
}

fn manifest(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("orgfolder.toml");
    std::fs::write(&path, MANIFEST).unwrap();
    path
}

#[test]
fn test_list_in_view_shows_delegating_entry() {
    let dir = TempDir::new().unwrap();
    let output = orgfolder(&manifest(&dir), &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("organization-folder.github"));
    assert!(!stdout.contains("organization-folder.gitea"));
}

#[test]
fn test_list_json_outside_views() {
    let dir = TempDir::new().unwrap();
    let output = orgfolder(&manifest(&dir), &["list", "--context", "item-group", "--json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["organization-folder", "organization-folder.github"]);
}

#[test]
fn test_record_appends_when_asked() {
    let dir = TempDir::new().unwrap();
    let manifest = manifest(&dir);
    let record = dir.path().join("records").join("listing.txt");
    let record_arg = record.to_string_lossy().to_string();

    let first = orgfolder(&manifest, &["list", "--record", &record_arg]);
    let second = orgfolder(&manifest, &["list", "--record", &record_arg, "--append"]);

    assert!(first.status.success() && second.status.success());
    let content = std::fs::read_to_string(&record).unwrap();
    assert_eq!(content.matches("organization-folder.github").count(), 2);
}

#[test]
fn test_create_through_delegating_descriptor() {
    let dir = TempDir::new().unwrap();
    let output = orgfolder(
        &manifest(&dir),
        &["create", "organization-folder.github", "acme"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created acme"));
    assert!(stdout.contains("navigator: github (acme)"));
}

#[test]
fn test_unknown_descriptor_fails() {
    let dir = TempDir::new().unwrap();
    let output = orgfolder(&manifest(&dir), &["create", "organization-folder.gitea", "acme"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("organization-folder.gitea"));
}

#[test]
fn test_missing_manifest_fails() {
    let dir = TempDir::new().unwrap();
    let output = orgfolder(&dir.path().join("absent.toml"), &["list"]);

    assert!(!output.status.success());
}
