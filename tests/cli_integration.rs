//! CLI integration tests for obumbra.
//!
//! Each test builds a throwaway project directory with a `gradle.properties`
//! and/or `.obumbra/config.toml` and runs the binary against it.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the obumbra binary command, isolated from the user's home config.
fn obumbra(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("obumbra").unwrap();
    cmd.env("HOME", project.join("home"))
        .arg("--project-dir")
        .arg(project)
        .arg("--no-color");
    cmd
}

fn write(project: &Path, rel: &str, contents: &str) {
    let path = project.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// A complete NeoForge + Embeddium project.
fn embeddium_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "gradle.properties",
        "compat.shaders.enabled=true\n\
         minecraft.version=1.21.1\n\
         compat.shaders.versions.iris.version=1.8.0\n\
         compat.shaders.versions.embeddium=1.0.11\n\
         compat.shaders.versions.monocle=0.1.6\n",
    );
    write(
        tmp.path(),
        ".obumbra/config.toml",
        "[shaders]\nplatform = \"neoforge\"\nimplementations = [\"embeddium\"]\n",
    );
    tmp
}

// ============================================================================
// obumbra check
// ============================================================================

#[test]
fn test_check_passes_for_complete_project() {
    let tmp = embeddium_project();

    obumbra(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Checked neoforge-embeddium"));
}

#[test]
fn test_check_reports_unsupported_pair() {
    let tmp = embeddium_project();

    obumbra(tmp.path())
        .args(["--platform", "fabric", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "error[shaders.implementation.unsupported]: Embeddium is not supported on Fabric",
        ))
        .stderr(predicate::str::contains("Embeddium supports: NeoForge"));
}

#[test]
fn test_check_reports_missing_platform() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "gradle.properties", "compat.shaders.enabled=true\n");

    obumbra(tmp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[shaders.platform.missing]"));
}

#[test]
fn test_check_reports_first_missing_version() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .args([
            "--enable",
            "--platform",
            "neoforge",
            "-i",
            "sodium",
            "--version-slot",
            "minecraft=1.21.1",
            "--version-slot",
            "iris.version=1.8.0",
            "check",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[shaders.versions.sodium.version.missing]"))
        .stderr(predicate::str::contains("sodium.fabric_api").not());
}

#[test]
fn test_check_disabled_is_not_an_error() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .args(["--platform", "fabric", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("shader compatibility is disabled"));
}

// ============================================================================
// obumbra plan
// ============================================================================

#[test]
fn test_plan_lists_workspace() {
    let tmp = embeddium_project();

    obumbra(tmp.path())
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workspace neoforge-embeddium:"))
        .stdout(predicate::str::contains(
            "staged_install maven.modrinth:monocle-iris:0.1.6",
        ))
        .stdout(predicate::str::contains("src/shaders/neoforge/embeddium/java"))
        .stdout(predicate::str::contains(
            "installModsClientWithEmbeddiumShaders",
        ));
}

#[test]
fn test_plan_json() {
    let tmp = embeddium_project();

    let output = obumbra(tmp.path())
        .args(["plan", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        plan["buckets"]["neoforgeEmbeddiumModDownloads"]["coordinates"][0],
        "maven.modrinth:monocle-iris:0.1.6"
    );
    assert_eq!(plan["runs"]["client"]["working_dir"], "runs/client/no-shader");
    assert_eq!(
        plan["runs"]["clientWithEmbeddiumShaders"]["working_dir"],
        "runs/client/embeddium-shader"
    );
}

#[test]
fn test_plan_fails_with_diagnostic() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .args(["--enable", "-i", "sodium", "plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[shaders.platform.missing]"))
        .stderr(predicate::str::contains(
            "error: invalid shader compatibility configuration",
        ))
        .stderr(predicate::str::contains("Re-run with `--verbose`"));
}

#[test]
fn test_plan_failure_in_verbose_mode_omits_verbose_hint() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .args(["--verbose", "--enable", "-i", "sodium", "plan"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[shaders.platform.missing]"))
        .stderr(predicate::str::contains("Re-run with `--verbose`").not());
}

// ============================================================================
// obumbra coordinates
// ============================================================================

#[test]
fn test_coordinates_fabric_sodium() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        ".obumbra/config.toml",
        r#"
[shaders]
platform = "fabric"
implementations = ["sodium"]

[shaders.versions]
minecraft = "1.21.1"

[shaders.versions.sodium]
version = "0.6.0"

[shaders.versions.iris]
version = "1.8.0"
jcpp = "1.4.14"
"#,
    );

    obumbra(tmp.path())
        .arg("coordinates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sodium on Fabric:"))
        .stdout(predicate::str::contains(
            "compile_only   maven.modrinth:sodium:mc1.21.1-0.6.0-fabric",
        ))
        .stdout(predicate::str::contains(
            "runtime_only   maven.modrinth:iris:1.8.0+1.21.1-fabric",
        ))
        .stdout(predicate::str::contains("org.anarres:jcpp:1.4.14"));
}

#[test]
fn test_coordinates_requires_platform() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .arg("coordinates")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no platform selected"));
}

// ============================================================================
// obumbra stage
// ============================================================================

#[test]
fn test_stage_copies_into_run_mods() {
    let tmp = embeddium_project();
    write(tmp.path(), "downloads/monocle-iris-0.1.6.jar", "jar");

    obumbra(tmp.path())
        .args([
            "stage",
            "--run",
            "clientWithEmbeddiumShaders",
            "downloads/monocle-iris-0.1.6.jar",
        ])
        .assert()
        .success();

    assert!(tmp
        .path()
        .join("runs/client/embeddium-shader/mods/monocle-iris-0.1.6.jar")
        .exists());
}

#[test]
fn test_stage_unknown_run() {
    let tmp = embeddium_project();
    write(tmp.path(), "downloads/a.jar", "jar");

    obumbra(tmp.path())
        .args(["stage", "--run", "server", "downloads/a.jar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no staging task targets run `server`"));
}

// ============================================================================
// obumbra completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("obumbra"));
}

#[test]
fn test_invalid_platform_rejected() {
    let tmp = TempDir::new().unwrap();

    obumbra(tmp.path())
        .args(["--platform", "forge", "check"])
        .assert()
        .failure();
}
