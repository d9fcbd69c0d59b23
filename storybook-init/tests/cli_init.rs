//! CLI tests for `storybook-init init` and `storybook-init plan`.
//!
//! Spawns the binary against scratch workspaces and checks exit codes,
//! stdout and the files left on disk.

use std::fs;
use std::process::{Command, Output};

use serde_json::{Value, json};
use storybook_init::exit_codes;
use storybook_init::test_support::TestWorkspace;

fn nx_json() -> Value {
    json!({
        "npmScope": "proj",
        "tasksRunnerOptions": {
            "default": {
                "runner": "@nrwl/workspace/tasks-runners/default",
                "options": { "cacheableOperations": ["build"] }
            }
        }
    })
}

fn run(ws: &TestWorkspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_storybook-init"))
        .current_dir(ws.path())
        .args(args)
        .output()
        .expect("spawn storybook-init")
}

#[test]
fn init_writes_manifest_and_nx_json() {
    let ws = TestWorkspace::new(
        &json!({ "dependencies": { "@nrwl/storybook": "1.0.0" } }),
        &nx_json(),
    )
    .expect("workspace");

    let output = run(
        &ws,
        &["init", "--ui-framework", "@storybook/html", "--skip-install"],
    );
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("UPDATE nx.json"));
    assert!(stdout.contains("UPDATE package.json"));

    let manifest = ws.read_manifest().expect("manifest");
    assert_eq!(manifest["devDependencies"]["@nrwl/storybook"], json!("1.0.0"));
    assert_eq!(manifest["devDependencies"]["@storybook/html"], json!("5.3.9"));
    assert!(manifest["dependencies"].get("@nrwl/storybook").is_none());

    let nx = ws.read_nx_json().expect("nx.json");
    assert_eq!(
        nx["tasksRunnerOptions"]["default"]["options"]["cacheableOperations"],
        json!(["build", "build-storybook"])
    );
}

#[test]
fn dry_run_leaves_files_untouched() {
    let ws = TestWorkspace::new(&json!({}), &nx_json()).expect("workspace");
    let before = ws.read_manifest_raw().expect("manifest");

    let output = run(&ws, &["init", "--dry-run"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(String::from_utf8_lossy(&output.stdout).contains("UPDATE package.json"));
    assert_eq!(ws.read_manifest_raw().expect("manifest"), before);
}

#[test]
fn malformed_manifest_exits_invalid() {
    let ws = TestWorkspace::new(&json!({}), &nx_json()).expect("workspace");
    fs::write(ws.path().join("package.json"), "{ nope").expect("corrupt manifest");
    let nx_before = fs::read_to_string(ws.path().join("nx.json")).expect("nx.json");

    let output = run(&ws, &["init", "--skip-install"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("parse package.json"));
    assert_eq!(
        fs::read_to_string(ws.path().join("nx.json")).expect("nx.json"),
        nx_before
    );
}

#[test]
fn plan_prints_staged_dependencies() {
    let ws = TestWorkspace::new(&json!({}), &nx_json()).expect("workspace");

    let output = run(&ws, &["plan", "--ui-framework", "@storybook/angular"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let plan: Value = serde_json::from_slice(&output.stdout).expect("plan json");
    assert_eq!(plan["dependencies"], json!({}));
    assert_eq!(plan["devDependencies"]["@angular/forms"], json!("*"));
    assert_eq!(plan["devDependencies"]["@storybook/angular"], json!("5.3.9"));
}

#[cfg(unix)]
#[test]
fn init_runs_configured_install_command() {
    let ws = TestWorkspace::new(&json!({}), &nx_json()).expect("workspace");
    fs::write(
        ws.path().join("storybook-init.toml"),
        "[install]\ncommand = [\"sh\", \"-c\", \"touch installed\"]\n",
    )
    .expect("write config");

    let output = run(&ws, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(ws.path().join("installed").is_file());
}

#[cfg(unix)]
#[test]
fn failed_install_exits_invalid_after_writing() {
    let ws = TestWorkspace::new(&json!({}), &nx_json()).expect("workspace");
    fs::write(
        ws.path().join("storybook-init.toml"),
        "[install]\ncommand = [\"sh\", \"-c\", \"exit 7\"]\n",
    )
    .expect("write config");

    let output = run(&ws, &["init"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("install dependencies"));
    let manifest = ws.read_manifest().expect("manifest");
    assert!(manifest["devDependencies"].get("@nrwl/storybook").is_some());
}
