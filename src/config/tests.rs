use std::fs;

use tempfile::tempdir;

use super::{ConfigError, ShellConfig, load_config, save_config};
use crate::analytics::CompositePolicy;

#[test]
fn yaml_config_fills_missing_fields_with_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("shell.yaml");
    fs::write(
        &path,
        "canvas:\n  width: 640\n  height: 480\ncomposite:\n  kind: alpha_weighted\n",
    )
    .expect("write");

    let config = load_config(&path).expect("load");
    assert_eq!(config.canvas.width, 640);
    assert_eq!(config.canvas.height, 480);
    assert_eq!(config.cascade_step, ShellConfig::default().cascade_step);
    assert!(matches!(
        config.composite,
        Some(CompositePolicy::AlphaWeighted { .. })
    ));
}

#[test]
fn json_config_loads() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("shell.json");
    fs::write(
        &path,
        r#"{"cascade_step": 12, "max_recent_files": 3, "luminance": {"red": 0.2126, "green": 0.7152, "blue": 0.0722}}"#,
    )
    .expect("write");

    let config = load_config(&path).expect("load");
    assert_eq!(config.cascade_step, 12);
    assert_eq!(config.max_recent_files, 3);
    assert!((config.luminance.green - 0.7152).abs() < 1e-6);
    assert_eq!(config.composite, None);
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("bad.yml");
    fs::write(&path, "cascade_step: 0\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

    fs::write(&path, "canvas:\n  width: 0\n  height: 10\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));

    fs::write(&path, "unknown_key: 1\n").expect("write");
    assert!(matches!(load_config(&path), Err(ConfigError::Yaml(_))));
}

#[test]
fn saved_config_loads_back() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("saved.json");
    let mut config = ShellConfig::default();
    config.max_recent_files = 4;
    save_config(&path, &config).expect("save");
    assert_eq!(load_config(&path).expect("load"), config);
}
