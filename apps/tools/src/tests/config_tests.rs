use super::{load_settings_with, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_root(label: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let root = env::temp_dir().join(format!("packer_tools_{label}_{suffix}"));
    fs::create_dir_all(&root).expect("temp root");
    root
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_without_file_or_env() {
    let settings = Settings::default();
    assert_eq!(settings.log_filter, "info");
    assert!(settings.pretty);
}

#[test]
fn file_values_override_defaults() {
    let root = temp_root("config_file");
    let path = root.join("packer.toml");
    fs::write(&path, "log_filter = \"packer_core=debug\"\npretty = false\n").expect("write");

    let settings = load_settings_with(Some(path.as_path()), env_from(&[])).expect("load");
    assert_eq!(
        settings,
        Settings {
            log_filter: "packer_core=debug".to_string(),
            pretty: false,
        }
    );

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let root = temp_root("config_partial");
    let path = root.join("packer.toml");
    fs::write(&path, "pretty = false\n").expect("write");

    let settings = load_settings_with(Some(path.as_path()), env_from(&[])).expect("load");
    assert_eq!(settings.log_filter, "info");
    assert!(!settings.pretty);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let root = temp_root("config_env");
    let path = root.join("packer.toml");
    fs::write(&path, "log_filter = \"warn\"\n").expect("write");

    let settings = load_settings_with(
        Some(path.as_path()),
        env_from(&[
            ("PACKER_LOG", "debug"),
            ("APP__LOG_FILTER", "trace"),
            ("APP__PRETTY", "false"),
        ]),
    )
    .expect("load");
    assert_eq!(settings.log_filter, "trace");
    assert!(!settings.pretty);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn unparseable_pretty_flag_is_ignored() {
    let root = temp_root("config_bad_flag");
    let path = root.join("packer.toml");
    fs::write(&path, "").expect("write");

    let settings = load_settings_with(
        Some(path.as_path()),
        env_from(&[("APP__PRETTY", "sometimes")]),
    )
    .expect("load");
    assert!(settings.pretty);

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn missing_explicit_file_is_an_error() {
    let root = temp_root("config_missing");
    let err = load_settings_with(Some(root.join("absent.toml").as_path()), env_from(&[]))
        .expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));

    fs::remove_dir_all(root).expect("cleanup");
}

#[test]
fn malformed_file_is_an_error() {
    let root = temp_root("config_malformed");
    let path = root.join("packer.toml");
    fs::write(&path, "pretty = \"yes\"\n").expect("write");

    let err = load_settings_with(Some(path.as_path()), env_from(&[])).expect_err("bad type");
    assert!(err.to_string().contains("failed to parse config file"));

    fs::remove_dir_all(root).expect("cleanup");
}
