mod common;

use axum::http::StatusCode;
use common::{TestHarness, at};
use rust_decimal::Decimal;
use sales_dashboard::{
    report::{OpenAiClient, ReportConfig, ReportError, TextGenerator},
    test_utils::TestServerBuilder,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OpenAiClient {
    let config = ReportConfig {
        api_key: Some("sk-test".to_string()),
        base_url: format!("{}/v1", server.uri()),
        timeout_seconds: 5,
        ..ReportConfig::default()
    };
    OpenAiClient::new(&config).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ]
    })
}

#[tokio::test]
async fn test_openai_client_sends_chat_completion() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4o" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("# Report")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let report = client.generate("summarize").await.unwrap();

    assert_eq!(report, "# Report");
}

#[tokio::test]
async fn test_openai_client_maps_api_errors() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).generate("summarize").await;

    match result {
        Err(ReportError::Api { status, body }) => {
            assert_eq!(status, 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_openai_client_rejects_empty_choices() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).generate("summarize").await;

    assert!(matches!(result, Err(ReportError::EmptyResponse)));
}

#[tokio::test]
async fn test_report_endpoint_against_mock_api() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("## June was strong")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let generator = Arc::new(client_for(&mock_server));
    let harness =
        TestHarness::from_builder(TestServerBuilder::new().with_text_generator(generator)).await;
    let product = harness.add_product("Smart Home Hub", Decimal::new(149, 0)).await;
    harness
        .add_sale(Some(product), None, 2, Decimal::new(149, 0), at("2024-06-15T12:00:00Z"))
        .await;

    let (status, body) = harness.get("/api/report").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "## June was strong");

    let requests = mock_server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["messages"][0]["content"].as_str().unwrap();
    assert!(prompt.starts_with("Please generate a sales report"));
    assert!(prompt.contains("Smart Home Hub"));
}

#[tokio::test]
async fn test_report_endpoint_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let generator = Arc::new(client_for(&mock_server));
    let harness =
        TestHarness::from_builder(TestServerBuilder::new().with_text_generator(generator)).await;

    let (status, body) = harness.get("/api/report").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Report generation failed");
}
