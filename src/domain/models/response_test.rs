use anyhow::Result;

use super::HealthReport;
use super::ResponseEnvelope;
use super::ResponseStatus;
use super::ANSWER_PLACEHOLDER;

#[test]
fn it_parses_known_statuses() {
    assert_eq!(ResponseStatus::parse("success"), ResponseStatus::Success);
    assert_eq!(
        ResponseStatus::parse("partial_success"),
        ResponseStatus::PartialSuccess
    );
    assert_eq!(
        ResponseStatus::parse("error"),
        ResponseStatus::Other("error".to_string())
    );
}

#[test]
fn it_defaults_missing_fields() -> Result<()> {
    let envelope: ResponseEnvelope = serde_json::from_str("{}")?;

    assert_eq!(
        envelope.status(),
        ResponseStatus::Other("unknown".to_string())
    );
    assert_eq!(envelope.answer(), ANSWER_PLACEHOLDER);

    return Ok(());
}

#[test]
fn it_reads_full_server_body() -> Result<()> {
    let body = r#"{"answer":"Repos et hydratation.","original_text":"Rest and hydrate.","status":"partial_success","type":"translation"}"#;
    let envelope: ResponseEnvelope = serde_json::from_str(body)?;

    assert_eq!(envelope.status(), ResponseStatus::PartialSuccess);
    assert_eq!(envelope.answer(), "Repos et hydratation.");
    assert_eq!(envelope.response_type, Some("translation".to_string()));
    assert_eq!(envelope.original_text, Some("Rest and hydrate.".to_string()));

    return Ok(());
}

#[test]
fn it_prefixes_by_status() {
    assert_eq!(ResponseStatus::Success.prefix(), "[Success] ");
    assert_eq!(ResponseStatus::PartialSuccess.prefix(), "[Warning] ");
    assert_eq!(ResponseStatus::Other("unknown".to_string()).prefix(), "");
}

#[test]
fn it_reads_non_string_answers_as_text() -> Result<()> {
    let envelope: ResponseEnvelope =
        serde_json::from_str(r#"{"answer":42,"status":true,"type":"health_advice"}"#)?;

    assert_eq!(envelope.answer(), "42");
    assert_eq!(envelope.status(), ResponseStatus::Other("true".to_string()));

    let envelope: ResponseEnvelope = serde_json::from_str(r#"{"answer":null,"status":null}"#)?;
    assert_eq!(envelope.answer(), ANSWER_PLACEHOLDER);
    assert_eq!(
        envelope.status(),
        ResponseStatus::Other("unknown".to_string())
    );

    return Ok(());
}

#[test]
fn it_reads_health_report_with_missing_fields() -> Result<()> {
    let report: HealthReport = serde_json::from_str(r#"{"status":"healthy"}"#)?;

    assert_eq!(report.status, Some("healthy".to_string()));
    assert_eq!(report.model_loaded, None);
    assert!(report.endpoints.is_empty());

    return Ok(());
}
