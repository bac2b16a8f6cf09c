use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use mindsignal_server::config::{
    DEFAULT_BIND_ADDR, DEFAULT_MODEL_DIR, SecretsFile, ServerConfig, redact_secret,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn full_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("MINDSIGNAL_CLIENT_ID", "env-client-id"),
        ("MINDSIGNAL_CLIENT_SECRET", "env-secret"),
        ("MINDSIGNAL_USER_AGENT", "mindsignal/0.1 by tester"),
    ]
}

#[test]
fn env_credentials_with_defaults() {
    let config =
        ServerConfig::from_sources(lookup(&full_env()), SecretsFile::default(), None).unwrap();

    assert_eq!(config.credentials.client_id, "env-client-id");
    assert_eq!(config.credentials.client_secret, "env-secret");
    assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    assert_eq!(config.model_dir, PathBuf::from(DEFAULT_MODEL_DIR));
    assert_eq!(config.hot_limit, 20);
    assert_eq!(config.user_post_limit, 25);
    assert_eq!(config.forum_timeout, Duration::from_secs(15));
}

#[test]
fn secrets_file_fills_missing_credentials() {
    let secrets = SecretsFile {
        client_id: Some("file-id".to_string()),
        client_secret: Some("file-secret".to_string()),
        user_agent: Some("file-agent".to_string()),
    };
    let env = lookup(&[("MINDSIGNAL_CLIENT_ID", "env-id")]);

    let config = ServerConfig::from_sources(env, secrets, None).unwrap();

    // Environment wins where both are set.
    assert_eq!(config.credentials.client_id, "env-id");
    assert_eq!(config.credentials.client_secret, "file-secret");
    assert_eq!(config.credentials.user_agent, "file-agent");
}

#[test]
fn missing_credentials_are_an_error() {
    let env = lookup(&[("MINDSIGNAL_CLIENT_ID", "id"), ("MINDSIGNAL_USER_AGENT", "ua")]);
    let err = ServerConfig::from_sources(env, SecretsFile::default(), None).unwrap_err();
    assert!(err.to_string().contains("client_secret"));
}

#[test]
fn blank_credentials_count_as_missing() {
    let mut vars = full_env();
    vars[2] = ("MINDSIGNAL_USER_AGENT", "   ");
    let err = ServerConfig::from_sources(lookup(&vars), SecretsFile::default(), None).unwrap_err();
    assert!(err.to_string().contains("user_agent"));
}

#[test]
fn overrides_are_parsed() {
    let mut vars = full_env();
    vars.extend([
        ("MINDSIGNAL_BIND", "0.0.0.0:9000"),
        ("MINDSIGNAL_MODEL_DIR", "/opt/models/clf"),
        ("MINDSIGNAL_HOT_LIMIT", "50"),
        ("MINDSIGNAL_USER_POST_LIMIT", "10"),
        ("MINDSIGNAL_FORUM_TIMEOUT_SECS", "5"),
    ]);
    let config = ServerConfig::from_sources(lookup(&vars), SecretsFile::default(), None).unwrap();

    assert_eq!(config.bind_addr.port(), 9000);
    assert_eq!(config.model_dir, PathBuf::from("/opt/models/clf"));
    assert_eq!(config.hot_limit, 50);
    assert_eq!(config.user_post_limit, 10);
    assert_eq!(config.forum_timeout, Duration::from_secs(5));
}

#[test]
fn invalid_numbers_are_rejected() {
    let mut vars = full_env();
    vars.push(("MINDSIGNAL_HOT_LIMIT", "lots"));
    assert!(ServerConfig::from_sources(lookup(&vars), SecretsFile::default(), None).is_err());

    let mut vars = full_env();
    vars.push(("MINDSIGNAL_USER_POST_LIMIT", "0"));
    assert!(ServerConfig::from_sources(lookup(&vars), SecretsFile::default(), None).is_err());

    let mut vars = full_env();
    vars.push(("MINDSIGNAL_BIND", "not an address"));
    assert!(ServerConfig::from_sources(lookup(&vars), SecretsFile::default(), None).is_err());
}

#[test]
fn secrets_file_loads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"client_id": "disk-id", "client_secret": "disk-secret"}}"#
    )
    .unwrap();

    let secrets = SecretsFile::load(file.path()).unwrap();
    assert_eq!(secrets.client_id.as_deref(), Some("disk-id"));
    assert_eq!(secrets.client_secret.as_deref(), Some("disk-secret"));
    assert!(secrets.user_agent.is_none());
}

#[test]
fn malformed_secrets_file_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "client_id = 'toml?'").unwrap();
    assert!(SecretsFile::load(file.path()).is_err());
}

#[test]
fn info_redacts_credentials() {
    let vars = [
        ("MINDSIGNAL_CLIENT_ID", "abcd1234efgh5678"),
        ("MINDSIGNAL_CLIENT_SECRET", "super-secret-value"),
        ("MINDSIGNAL_USER_AGENT", "ua"),
    ];
    let config = ServerConfig::from_sources(lookup(&vars), SecretsFile::default(), None).unwrap();
    let info = config.info();

    assert_eq!(info.client_id_hint, "abcd...5678");
    let logged = format!("{info:?}");
    assert!(!logged.contains("super-secret-value"));
    assert!(!logged.contains("abcd1234efgh5678"));
}

#[test]
fn short_secrets_are_fully_masked() {
    assert_eq!(redact_secret("short"), "****");
    assert_eq!(redact_secret("123456789"), "1234...6789");
}
