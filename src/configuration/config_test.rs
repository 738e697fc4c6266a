use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>().unwrap();

    assert_eq!(
        doc.get("backend-url").and_then(|e| return e.as_str()),
        Some("http://localhost:8000")
    );
    assert_eq!(
        doc.get("backend-health-check-timeout")
            .and_then(|e| return e.as_integer()),
        Some(1000)
    );
    assert!(res.contains("# username = \"\""));
    assert!(!res.contains("session-id"));
}

#[test]
fn it_defaults_storage_to_cache_dir() {
    let storage_file = Config::default(ConfigKey::StorageFile);
    assert!(storage_file.ends_with("storage.yaml"));
    assert!(storage_file.contains("parley"));
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "parley",
        "chat",
        "-c",
        "./config.example.toml",
    ])?;
    let chat_matches = matches.subcommand_matches("chat").unwrap();
    Config::load(vec![&matches, chat_matches]).await?;

    assert_eq!(Config::get(ConfigKey::BackendHealthCheckTimeout), "1000");
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "parley",
        "chat",
        "-c",
        "./test/bad-config.toml",
    ])?;
    let chat_matches = matches.subcommand_matches("chat").unwrap();
    let res = Config::load(vec![&matches, chat_matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[test]
fn it_rejects_invalid_values() {
    assert!(Config::validate(ConfigKey::BackendHealthCheckTimeout, "soon").is_err());
    assert!(Config::validate(ConfigKey::BackendURL, "localhost:8000").is_err());
    assert!(Config::validate(ConfigKey::BackendURL, "https://agent.example.com").is_ok());
}
