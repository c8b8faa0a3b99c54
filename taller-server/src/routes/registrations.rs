//! Registration listing and export

use axum::{
    Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use taller_core::export::registrations_to_csv;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registrations.json", get(list_json))
        .route("/registrations.csv", get(list_csv))
}

/// GET /registrations.json - All registrations, newest first
async fn list_json(State(state): State<AppState>) -> Result<Response, AppError> {
    let items = state.store.list().await?;
    let body = serde_json::to_string_pretty(&items)?;

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}

/// GET /registrations.csv - Same data as a CSV download
async fn list_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let items = state.store.list().await?;
    let disposition = format!(
        "attachment; filename=\"{}-registrations.csv\"",
        state.config.service_name
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        registrations_to_csv(&items),
    )
        .into_response())
}
