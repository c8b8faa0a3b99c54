//! Registration endpoint

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use chrono::Utc;
use serde::Serialize;

use taller_core::ics::{CalendarEvent, generate_ics};
use taller_core::qr::{QrPayload, qr_image_url};
use taller_core::template::{load_template, render_template};
use taller_core::ticket::ticket_vars;
use taller_core::{Folio, RegistrationRequest, TallerError};

use crate::mailer::{ICS_CONTENT_TYPE, MailAttachment, OutgoingMail};
use crate::routes::AppError;
use crate::state::AppState;

const INVALID_BODY: &str = "Cuerpo JSON inválido.";
const SUCCESS_MESSAGE: &str = "Registro exitoso. Te enviamos tu boleto y .ics por correo.";

pub fn router() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    /// Whether the registration reached the database (false when kept in memory)
    pub saved: bool,
    pub message: String,
}

/// POST /register - Store a registration and email the ticket
///
/// The record is stored before the email goes out and is kept even if
/// sending fails.
async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "rejected registration body");
        AppError::BadRequest(INVALID_BODY.to_string())
    })?;

    let registration = request
        .into_registration(Utc::now())
        .map_err(|e| match e {
            TallerError::InvalidRegistration(msg) => AppError::BadRequest(msg),
            other => other.into(),
        })?;

    let config = &state.config;
    let workshop = &config.workshop;

    let folio = Folio::generate();
    let ics = generate_ics(&workshop.prodid, &CalendarEvent::new_for_workshop(workshop)?);

    let qr_payload = QrPayload::new(workshop, &folio, &registration)?;
    let qr_url = qr_image_url(&config.qr_base_url, config.qr_size, &qr_payload)?;

    let ticket_path = config.ticket_path();
    let template = tokio::task::spawn_blocking(move || load_template(ticket_path))
        .await
        .context("Template read task failed")??;
    let html = render_template(&template, &ticket_vars(&registration, &folio, &qr_url, workshop));

    let saved = state.store.insert(&registration).await?;
    tracing::info!(folio = %folio, saved, "registration stored");

    state
        .mailer
        .send(OutgoingMail {
            to: registration.email.clone(),
            bcc: config.mail_bcc.clone(),
            subject: config.mail_subject.clone(),
            html,
            attachment: Some(MailAttachment {
                filename: workshop.ics_filename.clone(),
                content_type: ICS_CONTENT_TYPE.to_string(),
                content: ics.into_bytes(),
            }),
        })
        .await
        .with_context(|| format!("Failed to email ticket {folio}"))?;

    Ok(Json(RegisterResponse {
        ok: true,
        saved,
        message: SUCCESS_MESSAGE.to_string(),
    }))
}
