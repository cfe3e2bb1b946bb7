use std::fs;
use std::path::Path;

use assert_cmd::{cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::TempDir;

/// Command isolated from the developer's environment and `.env`.
fn publish_helper(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("publish-helper");
    cmd.current_dir(dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("API_PORT")
        .env_remove("PUBLISH_HELPER_SETTINGS_FILE")
        .env_remove("PUBLISH_HELPER_HOME")
        .env_remove("PUBLISH_HELPER_LOG_DIR")
        .env("LOG_LEVEL", "warn");
    cmd
}

fn settings_file(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("static").join("settings.json")
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

mod help_and_version {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("reset"));
    }

    #[test]
    fn test_no_args_shows_usage() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Usage:"));
    }
}

mod get_and_set {
    use super::*;

    #[test]
    fn test_get_bootstraps_defaults() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["get", "api_port"])
            .assert()
            .success()
            .stdout("15372\n");
        assert!(settings_file(&dir).exists());
    }

    #[test]
    fn test_environment_overrides_document() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .env("API_PORT", "9999")
            .args(["get", "api_port"])
            .assert()
            .success()
            .stdout("9999\n");
        assert_eq!(read_json(&settings_file(&dir))["api_port"], "15372");
    }

    #[test]
    fn test_get_source_reports_environment() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .env("API_PORT", "9999")
            .args(["get", "api_port", "--source"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"environment\""))
            .stdout(predicate::str::contains("API_PORT"));
    }

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["set", "test_key", "test_value"])
            .assert()
            .success()
            .stderr(predicate::str::contains("not a recognized setting"));
        publish_helper(&dir)
            .args(["get", "test_key"])
            .assert()
            .success()
            .stdout("test_value\n");
    }

    #[test]
    fn test_get_migrates_legacy_placeholder() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["set", "second_title_movie", "类型：{category}"])
            .assert()
            .success();
        publish_helper(&dir)
            .args(["get", "second_title_movie"])
            .assert()
            .success()
            .stdout("类型：{categories}\n");
    }

    #[test]
    fn test_missing_key_fails_without_default() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["get", "no_such_key"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not set"));
        publish_helper(&dir)
            .args(["get", "no_such_key", "--default", "fallback"])
            .assert()
            .success()
            .stdout("fallback\n");
    }

    #[test]
    fn test_explicit_settings_path() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("conf").join("custom.json");
        publish_helper(&dir)
            .arg("--settings")
            .arg(&custom)
            .args(["set", "make_dir", "False"])
            .assert()
            .success();
        assert_eq!(read_json(&custom)["make_dir"], "False");
        assert!(!settings_file(&dir).exists());
    }
}

mod list_reset_migrate {
    use super::*;

    #[test]
    fn test_list_masks_token() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["list", "--json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"picture_bed_api_token\": \"6d20***\""))
            .stdout(predicate::str::contains("6d207e02198a847aa98d0a2a901485a5").not());
        publish_helper(&dir)
            .args(["list", "--json", "--show-secrets"])
            .assert()
            .success()
            .stdout(predicate::str::contains("6d207e02198a847aa98d0a2a901485a5"));
    }

    #[test]
    fn test_list_table_marks_overrides() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .env("API_PORT", "9999")
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("overridden by API_PORT"));
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["set", "api_port", "1"])
            .assert()
            .success();
        publish_helper(&dir)
            .arg("reset")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--yes"));
        assert_eq!(read_json(&settings_file(&dir))["api_port"], "1");

        publish_helper(&dir)
            .args(["reset", "--yes"])
            .assert()
            .success();
        assert_eq!(read_json(&settings_file(&dir))["api_port"], "15372");
    }

    #[test]
    fn test_migrate_persists_current_placeholders() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .args(["set", "second_title_tv", "{total_episode} | {category}"])
            .assert()
            .success();
        publish_helper(&dir)
            .arg("migrate")
            .assert()
            .success()
            .stdout(predicate::str::contains("second_title_tv"));
        assert_eq!(
            read_json(&settings_file(&dir))["second_title_tv"],
            "{total_episodes} | {categories}"
        );
        publish_helper(&dir)
            .arg("migrate")
            .assert()
            .success()
            .stdout(predicate::str::contains("No legacy template variables"));
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = settings_file(&dir);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ broken").unwrap();

        publish_helper(&dir)
            .args(["get", "api_port"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid settings file"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ broken");
    }

    #[test]
    fn test_path_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        publish_helper(&dir)
            .arg("path")
            .assert()
            .success()
            .stdout(predicate::str::contains("settings.json"));
        assert!(!settings_file(&dir).exists());
    }
}
