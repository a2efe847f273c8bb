/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DIGEST: &str = "tests/fixtures/digest-2024-01.txt";
const CONFIG: &str = "tests/fixtures/errata-import.config.yml";

/// Writes a config whose x86_64 package directory is `package_dir`
fn write_config(dir: &TempDir, package_dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.path().join("errata-import.config.yml");
    fs::write(
        &path,
        format!(
            "target_version: 9\nsearch_strategies: [dir]\narchitectures:\n  x86_64:\n    channel: centos9-updates-x86_64\n    package_dir: {}\n",
            package_dir.display()
        ),
    )
    .unwrap();
    path
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("errata-import").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("errata-import")
            .arg("--version")
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("errata-import")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("errata-import")
            .args(["-f", "html", DIGEST])
            .assert()
            .code(2);
    }

    /// Exit code 2: No target version anywhere
    #[test]
    fn test_exit_code_missing_target_version() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("errata-import")
            .current_dir(dir.path())
            .args(["-t", "digest.txt"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("No target version configured"));
    }

    /// Exit code 2: digest format without an input file
    #[test]
    fn test_exit_code_missing_input_argument() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("errata-import")
            .current_dir(dir.path())
            .args(["--target-version", "9", "-t"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("requires an input file"));
    }

    /// Exit code 2: deprecated search strategy
    #[test]
    fn test_exit_code_deprecated_strategy() {
        cargo_bin_cmd!("errata-import")
            .args([
                "--target-version",
                "9",
                "--search-strategies",
                "spacewalk",
                "-t",
                DIGEST,
            ])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("deprecated"));
    }

    /// Exit code 2: input file does not exist
    #[test]
    fn test_exit_code_missing_input_file() {
        cargo_bin_cmd!("errata-import")
            .args(["--target-version", "9", "-t", "/nonexistent/digest.txt"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("File does not exist"));
    }

    /// Exit code 3: Application error - input is not a digest
    #[test]
    fn test_exit_code_not_a_digest() {
        cargo_bin_cmd!("errata-import")
            .args(["--target-version", "9", "-t", "Cargo.toml"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("does not appear to be a digest"));
    }
}

#[test]
fn test_show_config_masks_password() {
    cargo_bin_cmd!("errata-import")
        .args(["-c", CONFIG, "--show-config"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("centos9-updates-x86_64"))
        .stdout(predicate::str::contains("/srv/centos/9.3/x86_64/"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("secret").not());
}

#[test]
fn test_show_config_command_line_overrides() {
    cargo_bin_cmd!("errata-import")
        .args(["-c", CONFIG, "--show-config", "-f", "archive", "-s", "other.example.org"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("format: archive"))
        .stdout(predicate::str::contains("other.example.org"));
}

#[test]
fn test_show_config_rejects_unknown_architecture() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yml");
    fs::write(&path, "target_version: 9\narchitectures:\n  vax:\n    channel: c9\n").unwrap();

    cargo_bin_cmd!("errata-import")
        .args(["-c", path.to_str().unwrap(), "--show-config"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("architectures.vax"));
}

#[test]
fn test_dry_run_lists_prepared_advisories() {
    let dir = TempDir::new().unwrap();
    let packages = dir.path().join("x86_64");
    fs::create_dir(&packages).unwrap();
    // Not a real RPM: resolution fails and the advisory is dropped
    fs::write(packages.join("foo-1.0-1.x86_64.rpm"), b"not an rpm").unwrap();
    let config = write_config(&dir, &packages);

    cargo_bin_cmd!("errata-import")
        .args(["-c", config.to_str().unwrap(), "-t", DIGEST])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("No advisories to publish"))
        .stderr(predicate::str::contains("foo-1.0-1.x86_64.rpm"));
}

#[test]
fn test_dry_run_aborts_on_missing_package_dir() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, &dir.path().join("missing"));

    cargo_bin_cmd!("errata-import")
        .args(["-c", config.to_str().unwrap(), "-t", DIGEST])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}
