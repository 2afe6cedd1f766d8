use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    insta::assert_snapshot!(res, @r###"
    # Time to wait in milliseconds before timing out when checking the chatbot server health at startup.
    health-check-timeout = 1000

    # Chatbot server address every request is sent to. Can be edited in the UI.
    server-url = "http://192.168.1.10:5050"
    "###);
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec![
        "healthchat",
        "-c",
        "./config.example.toml",
    ])?;
    Config::load(cli::build(), vec![&matches]).await?;

    assert_eq!(Config::get(ConfigKey::ServerURL), "http://127.0.0.1:5050");
    assert_eq!(Config::get(ConfigKey::HealthCheckTimeout), "1500");

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["healthchat", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;
    assert!(res.is_err());
    return Ok(());
}

#[test]
fn it_rejects_invalid_server_urls_from_cli() {
    let res = cli::build().try_get_matches_from(vec!["healthchat", "-u", "192.168.1.10:5050"]);
    assert!(res.is_err());
}
