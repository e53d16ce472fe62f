#![warn(clippy::pedantic)]

//! Integration tests for the irl CLI.
//!
//! These tests spawn the compiled `irl` binary and check its stdout, stderr,
//! exit codes and the files it leaves behind.
//!
//! ## Test Strategy
//!
//! 1. **Help and headless mode**: CLI metadata, no TUI without a terminal
//! 2. **Config and profile**: Settings persisted under `IRL_HOME`
//! 3. **Init**: Naming, scaffold layout, plan rendering, collisions
//! 4. **List**: Table and JSON output
//! 5. **Adopt**: Copy semantics, plan preservation, workspace guard
//! 6. **Templates and update**: Offline fallback to the built-in set
//! 7. **Doctor**: Report format
//!
//! ## Test Infrastructure
//!
//! Every command runs with `IRL_HOME` pointing at a fresh temporary directory
//! and the template URLs pointing at a closed local port, so no test touches
//! the real home directory or the network.

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;

/// An address nothing listens on; connections are refused immediately.
const DEAD_URL: &str = "http://127.0.0.1:9";

/// Builds an `irl` command isolated under `home`.
fn irl(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("irl"));
    cmd.env("IRL_HOME", home)
        .env("IRL_TEMPLATES_URL", DEAD_URL)
        .env("IRL_TEMPLATES_RAW_URL", DEAD_URL)
        .env("IRL_NO_TUI", "1")
        .env_remove("VISUAL")
        .env_remove("EDITOR")
        .env_remove("RUST_LOG");
    cmd
}

/// Creates a temp home and workspace, with the workspace configured.
fn configured() -> (assert_fs::TempDir, assert_fs::TempDir) {
    let home = assert_fs::TempDir::new().unwrap();
    let workspace = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .args(["config", "set-dir"])
        .arg(workspace.path())
        .assert()
        .success();
    (home, workspace)
}

// =============================================================================
// Help and Headless Mode
// =============================================================================

/// Verifies that `--help` lists every subcommand.
///
/// **Expected behavior**: Exit 0 with each subcommand name in stdout.
#[test]
fn help_lists_subcommands() {
    let home = assert_fs::TempDir::new().unwrap();
    let assert = irl(home.path()).arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for name in [
        "init",
        "adopt",
        "list",
        "open",
        "config",
        "profile",
        "templates",
        "update",
        "doctor",
    ] {
        assert!(stdout.contains(name), "help should mention {name}");
    }
    assert!(stdout.contains("IRL_HOME"));
}

/// Verifies that running without a subcommand outside a terminal prints a
/// usage note instead of starting the TUI.
///
/// **Expected behavior**: Exit 0 and a pointer to `--help`.
#[test]
fn no_subcommand_prints_usage() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .arg("--headless")
        .assert()
        .success()
        .stdout(predicate::str::contains("irl --help"));
}

/// Verifies that an unknown subcommand is rejected by the parser.
///
/// **Expected behavior**: Non-zero exit with a clap error on stderr.
#[test]
fn unknown_subcommand_fails() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("frobnicate"));
}

// =============================================================================
// Config and Profile
// =============================================================================

/// Verifies that `config set-dir` persists and `config show` reports it.
///
/// **Expected behavior**: The configured path appears in `config show` and
/// `config show --json`.
#[test]
fn config_set_dir_then_show() {
    let (home, workspace) = configured();
    let expected = workspace.path().display().to_string();

    irl(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.clone()));

    let output = irl(home.path())
        .args(["config", "show", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["default_directory"], expected.as_str());
    home.child("config.json").assert(predicate::path::exists());
}

/// Verifies that commands needing a workspace fail cleanly without one.
///
/// **Expected behavior**: Exit 1 with a hint about `config set-dir`.
#[test]
fn missing_workspace_is_reported() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("set-dir"));
}

/// Verifies that a blank editor command is rejected.
///
/// **Expected behavior**: Exit 1 and no config file written.
#[test]
fn config_set_editor_rejects_blank() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .args(["config", "set-editor", "  "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("must not be empty"));
    home.child("config.json").assert(predicate::path::missing());
}

/// Verifies the profile set, show and clear cycle.
///
/// **Expected behavior**: Set fields appear in JSON, an empty value clears a
/// field, and `clear` empties the profile.
#[test]
fn profile_set_show_clear() {
    let home = assert_fs::TempDir::new().unwrap();

    irl(home.path())
        .args(["profile", "set", "--name", "Ada Lovelace", "--title", "Fellow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile updated"));

    irl(home.path())
        .args(["profile", "set", "--title", ""])
        .assert()
        .success();

    let output = irl(home.path())
        .args(["profile", "show", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], "Ada Lovelace");
    assert!(json.get("title").is_none());

    irl(home.path())
        .args(["profile", "clear"])
        .assert()
        .success();
    irl(home.path())
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile set"));
}

/// Verifies that `profile set` with no fields is an error.
///
/// **Expected behavior**: Exit 1 naming the available flags.
#[test]
fn profile_set_requires_a_field() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .args(["profile", "set"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--name"));
}

// =============================================================================
// Init
// =============================================================================

/// Verifies that `init` derives a dated slug and creates the full layout.
///
/// **Test setup**: `--no-git` to avoid depending on git.
///
/// **Expected behavior**: A `YYMMDD-slug` folder with the plan, placeholders,
/// activity log and `.gitignore`.
#[test]
fn init_creates_dated_project() {
    let (home, workspace) = configured();

    irl(home.path())
        .args(["init", "effects", "of", "sleep", "on", "memory", "--no-git"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"Created project '\d{6}-effects-sleep-memory'").unwrap());

    let entries: Vec<_> = std::fs::read_dir(workspace.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let project = &entries[0];

    for file in [
        "plans/main-plan.md",
        "01-plans/.gitkeep",
        "02-data/raw/.gitkeep",
        "02-data/derived/.gitkeep",
        "03-outputs/figures/.gitkeep",
        "04-logs/activity-log.md",
        ".gitignore",
    ] {
        assert!(project.join(file).exists(), "{file} should exist");
    }
}

/// Verifies that the plan is rendered from the template and profile.
///
/// **Expected behavior**: The project name and profile name replace their
/// placeholders; unset fields leave no `{{...}}` behind.
#[test]
fn init_renders_plan_with_profile() {
    let (home, workspace) = configured();
    irl(home.path())
        .args(["profile", "set", "--name", "Grace Hopper"])
        .assert()
        .success();

    irl(home.path())
        .args(["init", "--name", "compiler-notes", "--no-git"])
        .assert()
        .success();

    let plan = workspace.child("compiler-notes/plans/main-plan.md");
    plan.assert(predicate::str::contains("# compiler-notes"));
    plan.assert(predicate::str::contains("Grace Hopper"));
    plan.assert(predicate::str::contains("{{").not());
}

/// Verifies that `init` refuses to reuse an existing folder.
///
/// **Expected behavior**: The second run exits 1 with "already exists" and
/// leaves the first plan untouched.
#[test]
fn init_fails_if_project_exists() {
    let (home, workspace) = configured();
    let init = |home: &Path| {
        irl(home)
            .args(["init", "--name", "pilot", "--no-git"])
            .assert()
    };

    init(home.path()).success();
    let plan = workspace.child("pilot/plans/main-plan.md");
    std::fs::write(plan.path(), "edited").unwrap();

    init(home.path())
        .code(1)
        .stderr(predicate::str::contains("already exists"));
    plan.assert("edited");
}

/// Verifies that `init` needs a purpose or a name.
///
/// **Expected behavior**: Exit 1 without touching the workspace.
#[test]
fn init_requires_purpose_or_name() {
    let (home, workspace) = configured();
    irl(home.path())
        .args(["init", "--no-git"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--name"));
    assert_eq!(std::fs::read_dir(workspace.path()).unwrap().count(), 0);
}

/// Verifies that `--dir` overrides the configured workspace.
///
/// **Expected behavior**: The project lands in the `--dir` location, which is
/// created if missing.
#[test]
fn init_honors_dir_flag() {
    let home = assert_fs::TempDir::new().unwrap();
    let other = assert_fs::TempDir::new().unwrap();
    let target = other.child("nested/workspace");

    irl(home.path())
        .args(["init", "--name", "elsewhere", "--no-git", "--dir"])
        .arg(target.path())
        .assert()
        .success();

    target
        .child("elsewhere/plans/main-plan.md")
        .assert(predicate::path::exists());
}

/// Verifies that an unknown template name fails before anything is created.
///
/// **Expected behavior**: Exit 1 with "not found" and no project folder.
#[test]
fn init_unknown_template_fails() {
    let (home, workspace) = configured();
    irl(home.path())
        .args(["init", "--name", "x", "--template", "no-such-template", "--no-git"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
    workspace.child("x").assert(predicate::path::missing());
}

// =============================================================================
// List
// =============================================================================

/// Verifies list output on an empty workspace.
///
/// **Expected behavior**: A friendly message in table mode and `[]` in JSON.
#[test]
fn list_empty_workspace() {
    let (home, _workspace) = configured();
    irl(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));
    irl(home.path())
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

/// Verifies that only folders with a plan are listed.
///
/// **Expected behavior**: The created project appears in JSON; a plain folder
/// without a plan does not.
#[test]
fn list_json_includes_projects_only() {
    let (home, workspace) = configured();
    irl(home.path())
        .args(["init", "--name", "alpha", "--no-git"])
        .assert()
        .success();
    workspace.child("not-a-project").create_dir_all().unwrap();

    let output = irl(home.path()).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha"]);
}

// =============================================================================
// Adopt
// =============================================================================

/// Verifies that `adopt` copies the folder, scaffolds it and keeps the source.
///
/// **Expected behavior**: The copy holds the original files plus the layout
/// and a fresh plan; the source is unchanged.
#[test]
fn adopt_copies_and_scaffolds() {
    let (home, workspace) = configured();
    let outside = assert_fs::TempDir::new().unwrap();
    let source = outside.child("field-notes");
    source.child("notes.txt").write_str("day one").unwrap();

    irl(home.path())
        .arg("adopt")
        .arg(source.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Adopted 'field-notes'"))
        .stdout(predicate::str::contains("written from template"));

    let adopted = workspace.child("field-notes");
    adopted.child("notes.txt").assert("day one");
    adopted
        .child("plans/main-plan.md")
        .assert(predicate::path::exists());
    adopted
        .child("04-logs/activity-log.md")
        .assert(predicate::path::exists());

    source.child("notes.txt").assert("day one");
    source.child("plans").assert(predicate::path::missing());
}

/// Verifies that an existing plan in the source is kept as is.
///
/// **Expected behavior**: The plan content survives and the output says so.
#[test]
fn adopt_keeps_existing_plan() {
    let (home, workspace) = configured();
    let outside = assert_fs::TempDir::new().unwrap();
    let source = outside.child("old-analysis");
    source
        .child("main-plan.md")
        .write_str("# my own plan")
        .unwrap();

    irl(home.path())
        .arg("adopt")
        .arg(source.path())
        .args(["--rename", "renamed-analysis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept the existing plan"));

    let adopted = workspace.child("renamed-analysis");
    adopted.child("main-plan.md").assert("# my own plan");
    adopted
        .child("plans/main-plan.md")
        .assert(predicate::path::missing());
}

/// Verifies that a folder inside the workspace cannot be adopted.
///
/// **Expected behavior**: Exit 1 with "already inside the workspace" and the
/// workspace left unchanged.
#[test]
fn adopt_inside_workspace_fails() {
    let (home, workspace) = configured();
    let inner = workspace.child("inner");
    inner.child("data.csv").write_str("a,b").unwrap();

    irl(home.path())
        .arg("adopt")
        .arg(inner.path())
        .args(["--rename", "copy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already inside the workspace"));

    workspace.child("copy").assert(predicate::path::missing());
    inner.child("plans").assert(predicate::path::missing());
}

/// Verifies that adopting a missing folder fails.
///
/// **Expected behavior**: Exit 1 with "not found".
#[test]
fn adopt_missing_source_fails() {
    let (home, _workspace) = configured();
    let outside = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .arg("adopt")
        .arg(outside.child("nope").path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

// =============================================================================
// Open
// =============================================================================

/// Verifies that `open` on an unknown project fails before choosing an editor.
///
/// **Expected behavior**: Exit 1 with "not found".
#[test]
fn open_unknown_project_fails() {
    let (home, _workspace) = configured();
    irl(home.path())
        .args(["open", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

/// Verifies that `open` without any editor source reports how to set one.
///
/// **Expected behavior**: Exit 1 mentioning `set-editor`.
#[test]
fn open_without_editor_fails() {
    let (home, _workspace) = configured();
    irl(home.path())
        .args(["init", "--name", "beta", "--no-git"])
        .assert()
        .success();
    irl(home.path())
        .args(["open", "beta"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("set-editor"));
}

/// Verifies that `open` runs the editor given on the command line.
///
/// **Test setup**: Uses `true` as a terminal editor that exits at once.
///
/// **Expected behavior**: Exit 0 and the plan path in stdout.
#[cfg(unix)]
#[test]
fn open_runs_editor_flag() {
    let (home, _workspace) = configured();
    irl(home.path())
        .args(["init", "--name", "gamma", "--no-git"])
        .assert()
        .success();
    irl(home.path())
        .args(["open", "gamma", "--editor", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("main-plan.md"));
}

// =============================================================================
// Templates and Update
// =============================================================================

/// Verifies that `templates` falls back to the built-in set offline.
///
/// **Expected behavior**: Exit 0 listing the default template.
#[test]
fn templates_falls_back_offline() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"));

    let output = irl(home.path())
        .args(["templates", "--json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(
        json.as_array()
            .unwrap()
            .iter()
            .any(|t| t["name"] == "default")
    );
}

/// Verifies that `update` reports a fetch failure offline.
///
/// **Expected behavior**: Exit 1 with a fetch error and no cache index.
#[test]
fn update_fails_offline() {
    let home = assert_fs::TempDir::new().unwrap();
    irl(home.path())
        .arg("update")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fetch error"));
    home.child("cache/templates/index.json")
        .assert(predicate::path::missing());
}

// =============================================================================
// Doctor
// =============================================================================

/// Verifies that `doctor` runs every check and prints a summary.
///
/// **Expected behavior**: Exit 0 with the header, check lines and a summary.
#[test]
fn doctor_reports_checks() {
    let (home, _workspace) = configured();
    irl(home.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking irl setup"))
        .stdout(predicate::str::contains("git"))
        .stdout(
            predicate::str::contains("All checks passed")
                .or(predicate::str::contains("[WARN]"))
                .or(predicate::str::contains("[FAIL]")),
        );
}
