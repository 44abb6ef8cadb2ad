//! reqwest error and status mapping shared by the HTTP transports.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::ProviderError;

pub(crate) fn map_send_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::timeout(err.to_string())
    } else {
        ProviderError::transport(err.to_string())
    }
}

/// Converts a non-success response into a provider error, preferring the
/// backend's own `{"error": {"message": ...}}` text.
pub(crate) async fn parse_error(response: Response, backend: &str) -> ProviderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_error_message(&body).unwrap_or_else(|| {
        if body.trim().is_empty() {
            format!("{backend} request failed with status {status}")
        } else {
            format!(
                "{backend} request failed with status {status}: {}",
                truncate(body.trim(), 512)
            )
        }
    });

    error_for_status(status, message)
}

pub(crate) fn error_for_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::timeout(message)
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

pub(crate) fn truncate(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }
    let mut end = max;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let mut output = input[..end].to_string();
    output.push_str("...");
    output
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn status_codes_map_to_error_kinds() {
        let cases = [
            (StatusCode::UNAUTHORIZED, ProviderErrorKind::Authentication),
            (StatusCode::FORBIDDEN, ProviderErrorKind::Authentication),
            (StatusCode::TOO_MANY_REQUESTS, ProviderErrorKind::RateLimited),
            (StatusCode::GATEWAY_TIMEOUT, ProviderErrorKind::Timeout),
            (StatusCode::BAD_REQUEST, ProviderErrorKind::InvalidRequest),
            (StatusCode::SERVICE_UNAVAILABLE, ProviderErrorKind::Unavailable),
            (StatusCode::INTERNAL_SERVER_ERROR, ProviderErrorKind::Transport),
        ];

        for (status, kind) in cases {
            assert_eq!(error_for_status(status, "x".to_string()).kind, kind);
        }
    }

    #[test]
    fn extracts_backend_error_message() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Resource has been exhausted")
        );
        assert_eq!(extract_error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("héllo", 2), "h...");
    }
}
