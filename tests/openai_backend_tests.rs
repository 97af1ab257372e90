use docsumma::remote::{BackendError, OpenAiBackend, Prompt, RemoteConfig, TextBackend};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> OpenAiBackend {
    OpenAiBackend::new(RemoteConfig {
        endpoint: format!("{}/v1/", server.uri()),
        api_key: "test-key".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

fn prompt() -> Prompt {
    Prompt {
        system: "Summarise.".to_string(),
        user: "Document text".to_string(),
        temperature: 0.5,
    }
}

#[tokio::test]
async fn sends_chat_completion_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 1000,
            "messages": [
                { "role": "system", "content": "Summarise." },
                { "role": "user", "content": "Document text" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "A summary" } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = backend_for(&server).generate_text(&prompt(), 1000).await.unwrap();
    assert_eq!(text, "A summary");
}

#[tokio::test]
async fn missing_content_is_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let text = backend_for(&server).generate_text(&prompt(), 500).await.unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn error_status_is_a_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = backend_for(&server).generate_text(&prompt(), 500).await.unwrap_err();
    match err {
        BackendError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn undecodable_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).generate_text(&prompt(), 500).await.unwrap_err();
    assert!(matches!(err, BackendError::ParseError(_)));
}

#[tokio::test]
async fn timeout_is_a_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let backend = OpenAiBackend::new(RemoteConfig {
        endpoint: format!("{}/v1", server.uri()),
        api_key: "test-key".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        timeout: Duration::from_millis(200),
    })
    .unwrap();

    let err = backend.generate_text(&prompt(), 500).await.unwrap_err();
    assert!(matches!(err, BackendError::RequestFailed(_)));
}
