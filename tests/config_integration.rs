use fms::config::AppConfig;
use serial_test::serial;
use std::env;
use std::fs;

// Helper to clear environment variables that might interfere with tests
fn clear_env_vars() {
    unsafe {
        env::remove_var("FMS_SERVER__PORT");
        env::remove_var("FMS_SECRET_KEY");
        env::remove_var("FMS_SECURITY__JWT_SECRET");
        env::remove_var("FMS_STORAGE__UPLOADS_DIR");
        env::remove_var("CONFIG_FILE");
        env::remove_var("PORT");
        env::remove_var("DATABASE_URL");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let (config, cli) = AppConfig::load_from_args(["fms"]).expect("Failed to load config");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.storage.uploads_dir, "uploads/logos");
    assert_eq!(config.security.token_ttl_minutes, 1440);
    assert!(config.uses_default_secret());
    assert!(cli.command.is_none());
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    unsafe {
        env::set_var("FMS_SERVER__PORT", "9090");
        env::set_var("FMS_STORAGE__UPLOADS_DIR", "/srv/logos");
    }

    let (config, _) = AppConfig::load_from_args(["fms"]).expect("Failed to load config");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.storage.uploads_dir, "/srv/logos");

    clear_env_vars();
}

#[test]
#[serial]
fn test_legacy_secret_key_env() {
    clear_env_vars();
    unsafe {
        env::set_var("FMS_SECRET_KEY", "from-legacy-env");
    }

    let (config, _) = AppConfig::load_from_args(["fms"]).expect("Failed to load config");
    assert_eq!(config.security.jwt_secret, "from-legacy-env");
    assert!(!config.uses_default_secret());

    clear_env_vars();
}

#[test]
#[serial]
fn test_cli_flag_beats_env() {
    clear_env_vars();
    unsafe {
        env::set_var("FMS_SERVER__PORT", "9090");
    }

    let (config, _) =
        AppConfig::load_from_args(["fms", "--port", "7001"]).expect("Failed to load config");
    assert_eq!(config.server.port, 7001);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let file_path = dir.path().join("fms-test.yaml");
    fs::write(
        &file_path,
        r#"
server:
  port: 7070
log:
  format: json
    "#,
    )
    .expect("Failed to write temp config");

    let path = file_path.display().to_string();
    let (config, _) =
        AppConfig::load_from_args(["fms", "--config", path.as_str()]).expect("Failed to load config from file");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.log.format, "json");
    // Keys absent from the file keep their defaults.
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();

    let result = AppConfig::load_from_args(["fms", "--config", "/definitely/not/here.yaml"]);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_cwd_config_fallback() {
    clear_env_vars();

    let config_content = r#"
server:
  port: 6060
    "#;
    let cwd_path = "config.yaml";
    fs::write(cwd_path, config_content).expect("Failed to write ./config.yaml");

    let loaded = AppConfig::load_from_args(["fms"]);

    fs::remove_file(cwd_path).unwrap();

    let (config, _) = loaded.expect("Failed to load config");
    assert_eq!(config.server.port, 6060);
}
