pub mod health;
pub mod register;
pub mod registrations;

use axum::{
    Json, Router,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::state::AppState;

/// Every route, with `state` attached. CORS and tracing layers are added
/// by the caller.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(register::router())
        .merge(registrations::router())
        .fallback(not_found)
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

/// Handler error. Client errors carry their message; anything else is
/// logged and reported as a generic server error.
pub enum AppError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Internal(err) => {
                tracing::error!(error = %format!("{err:#}"), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error en el servidor.".to_string())
            }
        };
        let body = Json(ErrorResponse {
            ok: false,
            error: message,
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        AppError::Internal(err.into())
    }
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            ok: false,
            error: format!("Ruta no encontrada: {} {}", method, uri.path()),
        }),
    )
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};

    use super::test_support::{RecordingMailer, app, send};
    use crate::config::ServerConfig;

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _) = app(ServerConfig::default(), Arc::new(RecordingMailer::default()));
        let request = Request::builder()
            .method("DELETE")
            .uri("/nope?x=1")
            .body(Body::empty())
            .unwrap();

        let (response, body) = send(app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Ruta no encontrada: DELETE /nope");
    }
}
