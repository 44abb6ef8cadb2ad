//! Focused unit tests for Gemini adapter internals.

#![cfg(test)]

use std::sync::Arc;

use crate::{
    ProviderError, ProviderErrorKind, ProviderFuture, SecretString, SecureCredentialManager, Turn,
};

use super::provider::GeminiProvider;
use super::serde_api::{GeminiApiResponse, build_api_request};
use super::transport::GeminiTransport;
use super::types::{GeminiRequest, GeminiResponse, GeminiRole};

#[derive(Debug)]
struct NoopTransport;

impl GeminiTransport for NoopTransport {
    fn generate_content<'a>(
        &'a self,
        _request: GeminiRequest,
        _api_key: SecretString,
    ) -> ProviderFuture<'a, Result<GeminiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn provider() -> GeminiProvider {
    GeminiProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(NoopTransport),
    )
}

#[test]
fn build_request_maps_assistant_turns_to_model_role() {
    let history = vec![Turn::user("Hello"), Turn::assistant("Hi there")];

    let built = provider().build_request("be nice", &history, "And you?");

    let roles = built
        .contents
        .iter()
        .map(|content| content.role)
        .collect::<Vec<_>>();
    assert_eq!(
        roles,
        vec![GeminiRole::User, GeminiRole::Model, GeminiRole::User]
    );
    assert_eq!(built.system_instruction, "be nice");
    assert_eq!(built.contents[2].text, "And you?");
    assert_eq!(built.model, "gemini-1.5-flash");
}

#[test]
fn api_request_serializes_camel_case_system_instruction() {
    let request = provider().build_request("sys", &[Turn::assistant("earlier")], "now");

    let api = build_api_request(request).expect("request should build");
    let body = serde_json::to_value(&api).expect("serializes");

    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
    assert_eq!(body["contents"][0]["role"], "model");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "earlier");
    assert_eq!(body["contents"][1]["role"], "user");
}

#[test]
fn blank_system_prompt_is_omitted() {
    let request = provider().build_request("  ", &[], "hi");

    let api = build_api_request(request).expect("request should build");
    let body = serde_json::to_value(&api).expect("serializes");

    assert!(body.get("systemInstruction").is_none());
}

#[test]
fn response_text_concatenates_parts() {
    let parsed: GeminiApiResponse = serde_json::from_str(
        r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hi "}, {"text": "there"}]},
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-1.5-flash-002"
        }"#,
    )
    .expect("valid payload");

    let response = GeminiResponse::try_from(parsed).expect("has a candidate");
    assert_eq!(response.text, "Hi there");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(response.model_version.as_deref(), Some("gemini-1.5-flash-002"));
}

#[test]
fn blocked_prompt_reports_block_reason() {
    let parsed: GeminiApiResponse =
        serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
            .expect("valid payload");

    let error = GeminiResponse::try_from(parsed).expect_err("no candidates");
    assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);
    assert_eq!(error.message, "Gemini blocked the prompt: SAFETY");
}

#[test]
fn candidate_without_content_is_malformed() {
    let parsed: GeminiApiResponse =
        serde_json::from_str(r#"{"candidates": [{"finishReason": "RECITATION"}]}"#)
            .expect("valid payload");

    let error = GeminiResponse::try_from(parsed).expect_err("no content");
    assert_eq!(error.kind, ProviderErrorKind::MalformedResponse);
    assert!(error.message.contains("RECITATION"));
}
