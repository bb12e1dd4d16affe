//! Integration tests for configuration loading.

use std::io::Write;

use infini_mcp_bridge::{
    BridgeError, Environment, InfiniClient, InfiniConfig,
    config::MISSING_CREDENTIALS,
    transport::{HttpVersion, Transport},
};

#[test]
fn test_full_configuration_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        api_key = "k1"
        api_secret = "s3cr3t"
        webhook_secret = "whsec123"
        environment = "production"

        [http]
        pool_max_idle_per_host = 4
        timeout_secs = 20
        connect_timeout_secs = 5
        http_version = "http1"
        "#
    )
    .unwrap();

    let config = InfiniConfig::from_file(file.path()).unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.http.http_version, HttpVersion::Http1);

    let client = InfiniClient::new(&config).unwrap();
    assert_eq!(client.environment(), Environment::Production);
    assert_eq!(client.base_url().as_str(), "https://openapi.infini.money/");
    assert_eq!(client.transport().protocol_name(), "http/1.1");
    assert!(client.has_credentials());
}

#[test]
fn test_sandbox_and_production_coexist() {
    let sandbox = InfiniConfig::from_toml("api_key = \"sk\"\napi_secret = \"ss\"\n").unwrap();
    let production = InfiniConfig::from_toml(
        "api_key = \"pk\"\napi_secret = \"ps\"\nenvironment = \"production\"\n",
    )
    .unwrap();

    let sandbox = InfiniClient::new(&sandbox).unwrap();
    let production = InfiniClient::new(&production).unwrap();

    assert_eq!(sandbox.base_url().host_str(), Some("openapi-sandbox.infini.money"));
    assert_eq!(production.base_url().host_str(), Some("openapi.infini.money"));
}

#[test]
fn test_invalid_http_settings_rejected() {
    let err = InfiniConfig::from_toml("[http]\ntimeout_secs = 0\n").unwrap_err();
    assert!(matches!(err, BridgeError::ConfigError(_)));
}

#[test]
fn test_insecure_base_url_rejected() {
    let err = InfiniConfig::from_toml("base_url = \"http://openapi.infini.money\"\n").unwrap_err();
    assert!(err.to_string().contains("HTTPS"));
}

#[test]
fn test_unknown_environment_in_file_rejected() {
    assert!(InfiniConfig::from_toml("environment = \"staging\"\n").is_err());
}

#[test]
fn test_lookup_without_credentials() {
    let config = InfiniConfig::from_lookup(|_| None).unwrap();

    assert!(!config.has_credentials());
    let err = config.request_signer().unwrap_err();
    assert!(matches!(err, BridgeError::ConfigError(ref msg) if msg == MISSING_CREDENTIALS));
}
