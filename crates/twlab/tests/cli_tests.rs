//! Integration tests for the twlab binary

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use twlab_tailwind::Platform;
use twlab_testkit::{fake_binary_bytes, get_shared_mock_server, temp_dir_in_workspace};

fn twlab() -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.env_remove("TWLAB_ENV").env_remove("TWLAB_CONTENT_ROOT");
    cmd
}

/// Writes a twlab.toml pinning the cache inside `root`
fn write_config(root: &Path, version: &str, extra: &str) {
    let config = format!(
        r#"
[tailwind]
version = "{version}"
install_directory = "cache"
{extra}
"#
    );
    fs::write(root.join("twlab.toml"), config).expect("Failed to write config");
}

fn expected_binary(root: &Path, version: &str) -> PathBuf {
    let platform = Platform::current();
    root.join("cache")
        .join(version)
        .join(platform.cache_key())
        .join(platform.binary_name())
}

#[test]
fn test_cli_version_flag() {
    twlab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("twlab"));
}

#[test]
fn test_cli_help_lists_commands() {
    twlab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_status_json_reports_missing_binary() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(root, "v4.0.0", "");

    let output = twlab()
        .args(["status", "--json"])
        .current_dir(root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["version"], "4.0.0");
    assert_eq!(status["installed"], false);
    assert_eq!(
        PathBuf::from(status["path"].as_str().unwrap()),
        expected_binary(root, "4.0.0")
    );
    assert!(!root.join("cache").exists(), "status must not create the cache");
}

#[test]
fn test_status_sees_cached_binary() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(root, "4.0.1", "");

    let binary = expected_binary(root, "4.0.1");
    fs::create_dir_all(binary.parent().unwrap()).unwrap();
    fs::write(&binary, fake_binary_bytes("4.0.1")).unwrap();

    twlab()
        .args(["status", "--content-root"])
        .arg(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("installed: yes"));
}

#[test]
fn test_version_flag_overrides_config() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(root, "4.0.0", "");

    let output = twlab()
        .args(["status", "--json", "--version", "v3.4.17"])
        .current_dir(root)
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["version"], "3.4.17");
}

#[test]
fn test_malformed_config_fails() {
    let temp = temp_dir_in_workspace();
    fs::write(temp.path().join("twlab.toml"), "[tailwind\nversion = ").unwrap();

    twlab()
        .arg("status")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("twlab.toml"));
}

#[test]
fn test_watch_outside_development_is_noop() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(root, "4.0.2", r#"download_base_url = "http://127.0.0.1:9""#);

    twlab()
        .args(["watch", "--environment", "Production"])
        .current_dir(root)
        .assert()
        .success();

    assert!(!root.join("cache").exists());
    assert!(!root.join("dist").exists());
}

#[test]
fn test_watch_environment_from_env_var() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(root, "4.0.3", r#"download_base_url = "http://127.0.0.1:9""#);

    twlab()
        .arg("watch")
        .env("TWLAB_ENV", "Staging")
        .current_dir(root)
        .assert()
        .success();

    assert!(!root.join("cache").exists());
}

#[test]
fn test_watch_reports_provisioning_failure() {
    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(root, "4.0.4", r#"download_base_url = "http://127.0.0.1:9""#);

    twlab()
        .args(["watch", "--environment", "development"])
        .current_dir(root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("did not start"));
}

#[test]
fn test_install_downloads_into_cache() {
    let version = "4.0.5";
    let Ok(asset) = Platform::current().asset_name() else {
        // No release asset for this host
        return;
    };

    let body = fake_binary_bytes(version);
    let (asset_mock, base_url) = {
        let mut server = get_shared_mock_server();
        let mock = server
            .mock(
                "GET",
                format!("/tailwindlabs/tailwindcss/releases/download/v{version}/{asset}").as_str(),
            )
            .with_body(&body)
            .expect(1)
            .create();
        (mock, server.url())
    };

    let temp = temp_dir_in_workspace();
    let root = temp.path();
    write_config(
        root,
        version,
        &format!("download_base_url = \"{base_url}\"\nverify_checksum = false"),
    );

    twlab()
        .arg("install")
        .current_dir(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installed tailwindcss 4.0.5"));

    twlab()
        .arg("install")
        .current_dir(root)
        .assert()
        .success()
        .stdout(predicate::str::contains("already installed"));

    asset_mock.assert();
    assert_eq!(fs::read(expected_binary(root, version)).unwrap(), body);
}
