// Config loading and validation tests

use std::io::Write;

use sysreport::config::AppConfig;

const VALID_CONFIG: &str = r#"
[report]
format = false
partition = "/home"

[runtime]
memory_limit = "128M"
execution_time_limit_secs = 30

[commands]
timeout_ms = 2500
max_output_bytes = 8192
max_file_bytes = 4096
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert!(!config.report.format);
    assert_eq!(config.report.partition, "/home");
    assert_eq!(config.runtime.memory_limit, "128M");
    assert_eq!(config.runtime.memory_limit_bytes(), 128 * 1024 * 1024);
    assert_eq!(config.runtime.execution_time_limit_secs, 30);
    assert_eq!(config.commands.timeout_ms, 2500);
    assert_eq!(config.commands.max_output_bytes, 8192);
    assert_eq!(config.commands.max_file_bytes, 4096);
}

#[test]
fn test_config_empty_uses_defaults() {
    let config = AppConfig::load_from_str("").expect("empty config");
    assert!(config.report.format);
    assert_eq!(config.report.partition, "/");
    assert_eq!(config.runtime.memory_limit_bytes(), 0);
    assert_eq!(config.runtime.execution_time_limit_secs, 0);
    assert_eq!(config.commands.timeout_ms, 5000);
    assert_eq!(config.commands.max_output_bytes, 65536);
}

#[test]
fn test_config_partial_section_keeps_other_defaults() {
    let config = AppConfig::load_from_str("[commands]\ntimeout_ms = 100\n").expect("partial");
    assert_eq!(config.commands.timeout_ms, 100);
    assert_eq!(config.commands.max_file_bytes, 1024 * 1024);
    assert!(config.report.format);
}

#[test]
fn test_config_validation_rejects_empty_partition() {
    let bad = VALID_CONFIG.replace("partition = \"/home\"", "partition = \"  \"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("report.partition"));
}

#[test]
fn test_config_validation_rejects_bad_memory_limit() {
    let bad = VALID_CONFIG.replace("memory_limit = \"128M\"", "memory_limit = \"lots\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("runtime.memory_limit"));
}

#[test]
fn test_config_validation_rejects_timeout_zero() {
    let bad = VALID_CONFIG.replace("timeout_ms = 2500", "timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("commands.timeout_ms"));
}

#[test]
fn test_config_validation_rejects_output_bound_zero() {
    let bad = VALID_CONFIG.replace("max_output_bytes = 8192", "max_output_bytes = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("commands.max_output_bytes"));
}

#[test]
fn test_config_validation_rejects_file_bound_zero() {
    let bad = VALID_CONFIG.replace("max_file_bytes = 4096", "max_file_bytes = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("commands.max_file_bytes"));
}

#[test]
fn test_config_rejects_wrong_types() {
    assert!(AppConfig::load_from_str("[report]\nformat = \"yes\"\n").is_err());
}

#[test]
fn test_config_loads_from_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(VALID_CONFIG.as_bytes()).expect("write config");
    let path = file.path().to_string_lossy().into_owned();
    let config = AppConfig::load_from_path(&path).expect("load_from_path");
    assert_eq!(config.report.partition, "/home");
}

#[test]
fn test_config_missing_explicit_path_is_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = AppConfig::load_from_path(&path.to_string_lossy()).unwrap_err();
    assert!(err.to_string().contains("reading config"));
}
