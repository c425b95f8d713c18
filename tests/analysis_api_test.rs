use anyhow::Result;
use httpmock::prelude::*;
use visual_audit::{AnalysisClient, AuditError, GeminiBackend};

const MODEL: &str = "gemini-3-pro-preview";

fn backend_for(server: &MockServer) -> GeminiBackend {
    GeminiBackend::new("test-key", MODEL).with_base_url(server.base_url())
}

fn candidates_reply(text: &str) -> serde_json::Value {
    serde_json::json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ] } }
        ]
    })
}

#[tokio::test]
async fn test_analyze_round_trip() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL))
            .query_param("key", "test-key")
            .body_contains(r#""mimeType":"image/png""#)
            .body_contains(r#""responseMimeType":"application/json""#)
            .body_contains("Visual Audit Assistant");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(candidates_reply(r#"{"answer":"ok","items":[]}"#));
    });

    let client = AnalysisClient::new(backend_for(&server));
    let result = client.analyze("QUJD", "image/png", "is the aisle clear?").await?;

    api_mock.assert();
    assert_eq!(result.answer, "ok");
    assert!(result.items.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_analyze_preserves_item_coordinates() -> Result<()> {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(candidates_reply(
                r#"{"answer":"one box","items":[{"label":"box","box_2d":[0,0,500,500]}]}"#,
            ));
    });

    let client = AnalysisClient::new(backend_for(&server));
    let result = client.analyze("QUJD", "image/jpeg", "count the boxes").await?;

    api_mock.assert();
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].box_2d, [0, 0, 500, 500]);
    Ok(())
}

#[tokio::test]
async fn test_analyze_surfaces_remote_failure() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL));
        then.status(500).body("internal error");
    });

    let client = AnalysisClient::new(backend_for(&server));
    let err = client
        .analyze("QUJD", "image/png", "count")
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, AuditError::RemoteError { status: 500, .. }));
}

#[tokio::test]
async fn test_analyze_rejects_non_json_candidate() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(candidates_reply("Three boxes, top shelf."));
    });

    let client = AnalysisClient::new(backend_for(&server));
    let err = client
        .analyze("QUJD", "image/png", "count")
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, AuditError::SchemaError { .. }));
}

#[tokio::test]
async fn test_analyze_rejects_empty_candidate_list() {
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/v1beta/models/{}:generateContent", MODEL));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({ "candidates": [] }));
    });

    let client = AnalysisClient::new(backend_for(&server));
    let err = client
        .analyze("QUJD", "image/png", "count")
        .await
        .unwrap_err();

    api_mock.assert();
    assert!(matches!(err, AuditError::EmptyResponse));
}
