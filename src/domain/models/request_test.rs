use anyhow::Result;

use super::RequestEnvelope;
use super::RequestKind;

#[test]
fn it_builds_question_envelope() -> Result<()> {
    let envelope = RequestEnvelope::new(RequestKind::Ask, "What treats a headache?");
    let body = serde_json::to_string(&envelope)?;

    insta::assert_snapshot!(body, @r###"{"question":"What treats a headache?"}"###);

    return Ok(());
}

#[test]
fn it_builds_translate_envelope_with_target_language() -> Result<()> {
    let envelope = RequestEnvelope::new(RequestKind::Translate, "Rest and hydrate.");
    let body = serde_json::to_string(&envelope)?;

    insta::assert_snapshot!(body, @r###"{"text":"Rest and hydrate.","target_language":"French"}"###);

    return Ok(());
}

#[test]
fn it_builds_summary_envelope_like_translate() {
    let summary = RequestEnvelope::new(RequestKind::Summary, "Rest and hydrate.");
    let translate = RequestEnvelope::new(RequestKind::Translate, "Rest and hydrate.");

    assert_eq!(summary, translate);
    assert_eq!(summary.question, None);
}

#[test]
fn it_maps_kinds_to_paths() {
    assert_eq!(RequestKind::Ask.path(), "/ask");
    assert_eq!(RequestKind::Translate.path(), "/translate");
    assert_eq!(RequestKind::Summary.path(), "/summary");
}

#[test]
fn it_names_kinds_by_action_type() {
    assert_eq!(RequestKind::Ask.to_string(), "health");
    assert_eq!(RequestKind::Translate.to_string(), "translate");
    assert_eq!(RequestKind::Summary.to_string(), "summary");
}
