use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use parley::server::{ChatResponseBody, ErrorBody, HealthBody};
use parley::{
    ChatService, History, HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore, ModelProvider,
    ProviderError, ProviderFuture, ProviderId, ProviderOutcome, ResponseOrchestrator, Turn,
    in_memory_service, router,
};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

struct StaticProvider {
    id: ProviderId,
    reply: Result<&'static str, &'static str>,
}

impl ModelProvider for StaticProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn generate<'a>(
        &'a self,
        _system_prompt: &'a str,
        _history: &'a [Turn],
        _user_message: &'a str,
    ) -> ProviderFuture<'a, ProviderOutcome> {
        Box::pin(async move {
            match self.reply {
                Ok(text) => ProviderOutcome::Success(text.to_string()),
                Err(detail) => ProviderOutcome::failure(self.id, ProviderError::other(detail)),
            }
        })
    }
}

fn orchestrator(providers: Vec<StaticProvider>) -> ResponseOrchestrator {
    providers
        .into_iter()
        .fold(ResponseOrchestrator::builder(), |builder, provider| {
            builder.provider(Arc::new(provider))
        })
        .build()
}

fn gemini(reply: Result<&'static str, &'static str>) -> StaticProvider {
    StaticProvider {
        id: ProviderId::Gemini,
        reply,
    }
}

fn groq(reply: Result<&'static str, &'static str>) -> StaticProvider {
    StaticProvider {
        id: ProviderId::Groq,
        reply,
    }
}

fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

async fn send<T: DeserializeOwned>(service: ChatService, request: Request<Body>) -> (StatusCode, T) {
    let response = router(service)
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, body)
}

#[tokio::test]
async fn chat_returns_generated_response() {
    let service = in_memory_service(orchestrator(vec![gemini(Ok("Hi there"))]));
    let store = service.store();

    let (status, body): (_, ChatResponseBody) = send(
        service,
        post_chat(r#"{"message": "Hello", "session_id": "s1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.response, "Hi there");
    let history = store.load().await.expect("history should load");
    assert_eq!(
        history["s1"],
        vec![Turn::user("Hello"), Turn::assistant("Hi there")]
    );
}

#[tokio::test]
async fn chat_uses_backup_provider_when_primary_fails() {
    let service = in_memory_service(orchestrator(vec![
        gemini(Err("quota exceeded")),
        groq(Ok("Backup reply")),
    ]));

    let (status, body): (_, ChatResponseBody) =
        send(service, post_chat(r#"{"message": "Hello"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.response, "Backup reply");
}

#[tokio::test]
async fn missing_message_is_bad_request() {
    for payload in [r#"{}"#, r#"{"message": ""}"#, r#"{"session_id": "s1"}"#] {
        let service = in_memory_service(orchestrator(vec![gemini(Ok("unused"))]));
        let store = service.store();

        let (status, body): (_, ErrorBody) = send(service, post_chat(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "No message provided");
        assert!(store.load().await.expect("history should load").is_empty());
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let service = in_memory_service(orchestrator(vec![gemini(Ok("unused"))]));

    let (status, body): (_, ErrorBody) = send(service, post_chat("{not json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.error, "No message provided");
}

#[tokio::test]
async fn all_providers_failing_returns_details() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(JsonFileHistoryStore::new(dir.path().join("memory.json")).expect("store"));
    let mut seed = History::new();
    seed.insert("s1".to_string(), vec![Turn::user("a"), Turn::assistant("b")]);
    store.save(&seed).await.expect("seed should save");

    let service = ChatService::new(
        Arc::new(orchestrator(vec![
            gemini(Err("bad key")),
            groq(Err("service down")),
        ])),
        store.clone(),
    );

    let (status, body): (_, ErrorBody) = send(
        service,
        post_chat(r#"{"message": "Hello", "session_id": "s1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "Failed to generate response");
    assert_eq!(body.details, vec!["Gemini: bad key", "Groq: service down"]);
    assert_eq!(store.load().await.expect("history should load"), seed);
}

#[tokio::test]
async fn no_configured_provider_is_reported_distinctly() {
    let service = in_memory_service(orchestrator(Vec::new()));

    let (status, body): (_, ErrorBody) =
        send(service, post_chat(r#"{"message": "Hello"}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "No generation provider is configured");
    assert!(body.details.is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_history_is_a_server_error_without_details() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("memory.json");
    std::os::unix::fs::symlink(&path, &path).expect("self-referencing symlink");
    let service = ChatService::new(
        Arc::new(orchestrator(vec![gemini(Ok("unused"))])),
        Arc::new(JsonFileHistoryStore::new(&path).expect("store")),
    );

    let (status, body): (_, ErrorBody) = send(
        service,
        post_chat(r#"{"message": "Hello", "session_id": "s1"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body.error, "Failed to load conversation history");
    assert!(body.details.is_empty());
    assert!(
        std::fs::symlink_metadata(&path)
            .expect("path still present")
            .file_type()
            .is_symlink()
    );
}

#[tokio::test]
async fn health_lists_providers_in_priority_order() {
    let service = in_memory_service(orchestrator(vec![gemini(Ok("a")), groq(Ok("b"))]));
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request should build");

    let (status, body): (_, HealthBody) = send(service, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.status, "ok");
    assert_eq!(body.providers, vec!["gemini", "groq"]);
}

#[tokio::test]
async fn cors_preflight_is_allowed_from_any_origin() {
    let service = ChatService::new(
        Arc::new(orchestrator(Vec::new())),
        Arc::new(InMemoryHistoryStore::new()),
    );
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/chat")
        .header(header::ORIGIN, "http://frontend.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .expect("request should build");

    let response = router(service)
        .oneshot(request)
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
