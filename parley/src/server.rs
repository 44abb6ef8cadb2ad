//! HTTP surface: `POST /chat` and `GET /health`.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::{ChatError, ChatErrorKind, ChatRequest, ChatService, NO_MESSAGE_PROVIDED};

#[derive(Debug, Deserialize)]
pub struct ChatPayload {
    pub message: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponseBody {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthBody {
    pub status: String,
    pub providers: Vec<String>,
}

pub fn router(service: ChatService) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// Serves until Ctrl-C.
pub async fn serve(listener: TcpListener, service: ChatService) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, providers = ?service.provider_ids(), "listening");
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(error) => {
            tracing::warn!(error = %error, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

async fn chat(
    State(service): State<ChatService>,
    payload: Result<Json<ChatPayload>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected chat body");
            return error_response(StatusCode::BAD_REQUEST, NO_MESSAGE_PROVIDED, Vec::new());
        }
    };

    let request = ChatRequest {
        message: payload.message,
        session_id: payload.session_id,
    };

    match service.handle(request).await {
        Ok(reply) => (
            StatusCode::OK,
            Json(ChatResponseBody {
                response: reply.response,
            }),
        )
            .into_response(),
        Err(error) => chat_error_response(error),
    }
}

async fn health(State(service): State<ChatService>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok".to_string(),
        providers: service
            .provider_ids()
            .into_iter()
            .map(|id| id.to_string())
            .collect(),
    })
}

fn chat_error_response(error: ChatError) -> Response {
    match error.kind {
        ChatErrorKind::InvalidRequest => {
            error_response(StatusCode::BAD_REQUEST, &error.message, Vec::new())
        }
        ChatErrorKind::GenerationFailed => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &error.message, error.details)
        }
        // Storage details are logged, not returned.
        ChatErrorKind::Unavailable | ChatErrorKind::Store => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, &error.message, Vec::new())
        }
    }
}

fn error_response(status: StatusCode, error: &str, details: Vec<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            details,
        }),
    )
        .into_response()
}
