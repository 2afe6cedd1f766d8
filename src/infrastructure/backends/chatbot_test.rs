use anyhow::Result;
use mockito::Matcher;
use serde_json::json;

use super::endpoint;
use super::ChatbotServer;
use crate::domain::models::Backend;
use crate::domain::models::HealthReport;
use crate::domain::models::RequestEnvelope;
use crate::domain::models::RequestError;
use crate::domain::models::RequestKind;
use crate::domain::models::ResponseStatus;

fn backend() -> ChatbotServer {
    return ChatbotServer::new("200".to_string()).unwrap();
}

/// Address nothing listens on.
fn closed_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    return format!("http://127.0.0.1:{port}");
}

#[test]
fn it_joins_base_url_and_path() {
    assert_eq!(endpoint("http://host:5050", "/ask"), "http://host:5050/ask");
    assert_eq!(endpoint("http://host:5050/", "/ask"), "http://host:5050/ask");
    assert_eq!(
        endpoint(" http://host:5050 ", "/summary"),
        "http://host:5050/summary"
    );
}

#[tokio::test]
async fn it_successfully_health_checks() -> Result<()> {
    let body = r#"{"endpoints":["ask","translate","summary"],"model_loaded":true,"server":"running","status":"healthy"}"#;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(body)
        .create();

    let report = backend().health_check(&server.url()).await?;

    assert_eq!(
        report,
        HealthReport {
            status: Some("healthy".to_string()),
            model_loaded: Some(true),
            server: Some("running".to_string()),
            endpoints: vec![
                "ask".to_string(),
                "translate".to_string(),
                "summary".to_string(),
            ],
        }
    );
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/health").with_status(500).create();

    let res = backend().health_check(&server.url()).await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks_without_url() {
    let res = backend().health_check("  ").await;
    assert!(res.is_err());
}

#[tokio::test]
async fn it_asks_questions() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/ask")
        .match_header("content-type", "application/json; charset=utf-8")
        .match_header("accept", "application/json")
        .match_body(Matcher::Json(json!({"question": "What treats a headache?"})))
        .with_status(200)
        .with_body(r#"{"answer":"Rest and hydrate.","status":"success","type":"health_advice"}"#)
        .create();

    let envelope = RequestEnvelope::new(RequestKind::Ask, "What treats a headache?");
    let res = backend()
        .send(&server.url(), RequestKind::Ask, &envelope)
        .await?;

    mock.assert();
    assert_eq!(res.status(), ResponseStatus::Success);
    assert_eq!(res.answer(), "Rest and hydrate.");
    assert_eq!(res.response_type, Some("health_advice".to_string()));

    return Ok(());
}

#[tokio::test]
async fn it_translates_to_french() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/translate")
        .match_body(Matcher::Json(
            json!({"text": "Rest and hydrate.", "target_language": "French"}),
        ))
        .with_status(200)
        .with_body(r#"{"answer":"Repos et hydratation.","status":"partial_success"}"#)
        .create();

    let envelope = RequestEnvelope::new(RequestKind::Translate, "Rest and hydrate.");
    let res = backend()
        .send(&server.url(), RequestKind::Translate, &envelope)
        .await?;

    mock.assert();
    assert_eq!(res.status(), ResponseStatus::PartialSuccess);
    assert_eq!(res.answer(), "Repos et hydratation.");

    return Ok(());
}

#[tokio::test]
async fn it_summarizes_on_summary_path() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/summary")
        .match_body(Matcher::Json(
            json!({"text": "Rest and hydrate.", "target_language": "French"}),
        ))
        .with_status(200)
        .with_body(r#"{"answer":"Reposez-vous.","status":"success"}"#)
        .create();

    let envelope = RequestEnvelope::new(RequestKind::Summary, "Rest and hydrate.");
    let res = backend()
        .send(&format!("{}/", server.url()), RequestKind::Summary, &envelope)
        .await?;

    mock.assert();
    assert_eq!(res.answer(), "Reposez-vous.");

    return Ok(());
}

#[tokio::test]
async fn it_reports_server_errors_with_status_code() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/ask")
        .with_status(500)
        .with_body(r#"{"error":"model crashed","status":"error"}"#)
        .create();

    let envelope = RequestEnvelope::new(RequestKind::Ask, "Hello?");
    let res = backend()
        .send(&server.url(), RequestKind::Ask, &envelope)
        .await;

    mock.assert();
    assert_eq!(res, Err(RequestError::Server(500)));
    assert!(res.unwrap_err().to_string().contains("500"));
}

#[tokio::test]
async fn it_reports_malformed_bodies_as_unexpected() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/ask")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let envelope = RequestEnvelope::new(RequestKind::Ask, "Hello?");
    let res = backend()
        .send(&server.url(), RequestKind::Ask, &envelope)
        .await;

    mock.assert();
    assert!(matches!(res, Err(RequestError::Unexpected(_))));
}

#[tokio::test]
async fn it_reports_refused_connections_as_connectivity() {
    let envelope = RequestEnvelope::new(RequestKind::Ask, "Hello?");
    let res = backend()
        .send(&closed_url(), RequestKind::Ask, &envelope)
        .await;

    match res {
        Err(RequestError::Connectivity(description)) => {
            assert!(!description.is_empty());
        }
        _ => panic!("Expected a connectivity error"),
    }
}

#[tokio::test]
async fn it_reports_addresses_without_scheme_as_unexpected() {
    let envelope = RequestEnvelope::new(RequestKind::Ask, "Hello?");

    for base_url in ["192.168.1.10:5050", "host:5050"] {
        let res = backend().send(base_url, RequestKind::Ask, &envelope).await;

        match res {
            Err(RequestError::Unexpected(description)) => {
                assert!(description.contains("builder error"));
            }
            other => panic!("Expected an unexpected error for {base_url}, got {other:?}"),
        }
    }
}
