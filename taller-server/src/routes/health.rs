//! Banner and liveness endpoints

use axum::{Json, Router, extract::State, routing::get};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

/// GET / - Plain text list of endpoints
async fn index(State(state): State<AppState>) -> String {
    format!(
        "{} API\nGET /health, /registrations.json, /registrations.csv, POST /register",
        state.config.service_name
    )
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: String,
    pub time: String,
    pub uptime_s: f64,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: state.config.service_name.clone(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime_s: state.started_at.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};

    use crate::config::ServerConfig;
    use crate::routes::test_support::{RecordingMailer, app, send};

    #[tokio::test]
    async fn test_health_reports_service() {
        let (app, _) = app(ServerConfig::default(), Arc::new(RecordingMailer::default()));
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let (response, body) = send(app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["service"], "apelles-taller");
        assert!(json["uptime_s"].as_f64().unwrap() >= 0.0);
        assert!(json["time"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_index_is_plain_text() {
        let (app, _) = app(ServerConfig::default(), Arc::new(RecordingMailer::default()));
        let request = Request::get("/").body(Body::empty()).unwrap();

        let (response, body) = send(app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert!(body.starts_with("apelles-taller API\n"), "Got: {}", body);
        assert!(body.contains("POST /register"));
    }
}
