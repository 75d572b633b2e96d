//! Tests for loading host configuration from disk.

use std::io::Write;
use strictly_host::{HostConfig, MemoryStore, Runtime};
use strictly_program::{PlayerKey, derive_game_address};

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
game_seed = "match"
registry_seed = "counter"
allow_self_play = true
log_filter = "debug"
"#
    )
    .expect("write config");

    let config = HostConfig::from_file(file.path()).expect("valid config");
    assert_eq!(config.game_seed(), "match");
    assert_eq!(config.registry_seed(), "counter");
    assert!(*config.allow_self_play());
    assert_eq!(config.log_filter(), "debug");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = HostConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "allow_self_play = \"sometimes\"").expect("write config");
    let err = HostConfig::from_file(file.path()).unwrap_err();
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_seed_tag_changes_addresses() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, r#"game_seed = "match""#).expect("write config");
    let config = HostConfig::from_file(file.path()).expect("valid config");

    let runtime = Runtime::new(MemoryStore::new(), config);
    let a = PlayerKey::from_label("a");
    let b = PlayerKey::from_label("b");
    assert_eq!(
        runtime.game_address(&a, &b, 0),
        derive_game_address(b"match", &a, &b, 0)
    );
    assert_ne!(
        runtime.game_address(&a, &b, 0),
        derive_game_address(b"game", &a, &b, 0)
    );
}
