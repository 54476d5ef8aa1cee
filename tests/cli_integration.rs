//! CLI integration tests for tina
//!
//! Each test runs the binary against a throwaway project directory.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the tina binary, isolated from the user's
/// environment and global config
fn tina_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("tina"));
    cmd.env_remove("TINA_CONFIG")
        .env_remove("TINA_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

/// Create a temporary directory and initialize a tina project
fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    tina_cmd(dir.path())
        .arg("init")
        .arg(dir.path())
        .assert()
        .success();
    dir
}

fn write_config(dir: &Path, content: &str) {
    fs::write(dir.join(".tina/config.toml"), content).unwrap();
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let dir = TempDir::new().unwrap();

    tina_cmd(dir.path())
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized tina project"));

    let config = fs::read_to_string(dir.path().join(".tina/config.toml")).unwrap();
    assert!(config.contains("[sidebar]"));
    assert!(config.contains("position = \"displace\""));
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    tina_cmd(dir.path()).arg("init").arg(dir.path()).assert().success();

    write_config(dir.path(), "[sidebar]\nposition = \"float\"\n");
    tina_cmd(dir.path()).arg("init").arg(dir.path()).assert().success();

    let config = fs::read_to_string(dir.path().join(".tina/config.toml")).unwrap();
    assert!(config.contains("float"));
}

// =============================================================================
// Registry listings
// =============================================================================

#[test]
fn test_fields_lists_builtins_in_order() {
    let dir = setup_project();

    let output = tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("fields")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split('\t').next())
        .collect();
    assert_eq!(
        names,
        [
            "text",
            "textarea",
            "date",
            "image",
            "color",
            "number",
            "toggle",
            "select",
            "markdown",
            "html",
            "group",
            "group-list",
            "blocks"
        ]
    );
}

#[test]
fn test_fields_json() {
    let dir = setup_project();

    let output = tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["--format", "json", "fields"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let fields: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let fields = fields.as_array().unwrap();
    assert_eq!(fields.len(), 13);
    assert_eq!(fields[0]["name"], "text");
    assert_eq!(fields[4]["default_value"], "#000000");
}

// Global config location follows XDG only on Linux
#[cfg(target_os = "linux")]
#[test]
fn test_global_default_format() {
    let dir = setup_project();
    let global_dir = dir.path().join(".config/tina");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(global_dir.join("config.toml"), "default_format = \"json\"\n").unwrap();

    let output = tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("screens")
        .output()
        .unwrap();
    assert!(output.status.success());

    let screens: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(screens, serde_json::json!([]));
}

#[test]
fn test_screens_empty() {
    let dir = setup_project();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("screens")
        .assert()
        .success()
        .stdout(predicate::str::contains("No screens registered"));
}

#[test]
fn test_configured_plugins_are_listed() {
    let dir = setup_project();
    write_config(
        dir.path(),
        r#"
[[plugins]]
__type = "screen"
name = "Settings"
layout = "fullscreen"
description = "Site settings"

[[plugins]]
__type = "toolbar"
name = "Bold"

[[plugins]]
__type = "form"
name = "post"
label = "Blog Post"
"#,
    );

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("screens")
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings\tfullscreen\tSite settings"));

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("forms")
        .assert()
        .success()
        .stdout(predicate::str::contains("post\tBlog Post\t0"));

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("field (13)"))
        .stdout(predicate::str::contains("toolbar (1)"));
}

#[test]
fn test_plugins_by_type_json() {
    let dir = setup_project();
    write_config(
        dir.path(),
        "[[plugins]]\n__type = \"toolbar\"\nname = \"Bold\"\n\n[[plugins]]\n__type = \"toolbar\"\nname = \"Italic\"\n",
    );

    let output = tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["plugins", "--type", "toolbar", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let collections: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        collections,
        serde_json::json!([{"type": "toolbar", "names": ["Bold", "Italic"]}])
    );
}

#[test]
fn test_plugins_unknown_type_fails() {
    let dir = setup_project();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["plugins", "--type", "toolbar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No plugins of type 'toolbar'"));
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_defaults() {
    let dir = setup_project();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sidebar.position\tdisplace"))
        .stdout(predicate::str::contains("sidebar.buttons.save\tSave"))
        .stdout(predicate::str::contains("media.store\t(not configured)"));
}

#[test]
fn test_config_json_reflects_file() {
    let dir = setup_project();
    write_config(
        dir.path(),
        "[sidebar]\nhidden = true\nposition = \"overlay\"\n\n[sidebar.buttons]\nsave = \"Publish\"\n",
    );

    let output = tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["config", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["sidebar"]["hidden"], true);
    assert_eq!(config["sidebar"]["position"], "overlay");
    assert_eq!(config["sidebar"]["buttons"]["save"], "Publish");
    assert_eq!(config["sidebar"]["buttons"]["reset"], "Reset");
    assert_eq!(config["media"]["configured"], false);
}

#[test]
fn test_invalid_position_is_config_error() {
    let dir = setup_project();
    write_config(dir.path(), "[sidebar]\nposition = \"sideways\"\n");

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load project config"));
}

#[test]
fn test_plugin_without_type_is_config_error() {
    let dir = setup_project();
    write_config(dir.path(), "[[plugins]]\nname = \"Mystery\"\n");

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .arg("fields")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing __type"));
}

#[test]
fn test_explicit_config_path() {
    let dir = setup_project();
    write_config(dir.path(), "[sidebar]\nposition = \"fixed\"\n");
    let elsewhere = TempDir::new().unwrap();

    tina_cmd(dir.path())
        .current_dir(elsewhere.path())
        .arg("--config")
        .arg(dir.path().join(".tina/config.toml"))
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("sidebar.position\tfixed"));
}

// =============================================================================
// Uploads
// =============================================================================

#[test]
fn test_upload_without_store_alerts() {
    let dir = setup_project();
    fs::write(dir.path().join("photo.png"), b"png").unwrap();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["upload", "photo.png", "--directory", "img"])
        .assert()
        .success()
        .stdout(predicate::str::contains("img/photo.png"))
        .stderr(predicate::str::contains("No media store configured"));

    assert!(!dir.path().join("public").exists());
}

#[test]
fn test_upload_with_filesystem_store() {
    let dir = setup_project();
    write_config(
        dir.path(),
        "[media]\nstore = \"filesystem\"\nroot = \"public/uploads\"\naccept = \"image/*\"\n",
    );
    fs::write(dir.path().join("photo.png"), b"png").unwrap();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["upload", "photo.png", "-d", "img"])
        .assert()
        .success()
        .stdout(predicate::str::contains("img/photo.png"))
        .stderr(predicate::str::contains("No media store configured").not());

    let stored = fs::read(dir.path().join("public/uploads/img/photo.png")).unwrap();
    assert_eq!(stored, b"png");
}

#[test]
fn test_upload_rejects_unaccepted_type() {
    let dir = setup_project();
    write_config(
        dir.path(),
        "[media]\nstore = \"filesystem\"\naccept = \"image/*\"\n",
    );
    fs::write(dir.path().join("notes.txt"), b"notes").unwrap();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["upload", "notes.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not accepted"));
}

#[test]
fn test_upload_missing_file_fails() {
    let dir = setup_project();

    tina_cmd(dir.path())
        .current_dir(dir.path())
        .args(["upload", "missing.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a file"));
}
