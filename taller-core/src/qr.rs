//! QR ticket payload and image URL.
//!
//! The QR image itself is rendered by an external service; we only build
//! the URL that asks for it.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TallerResult;
use crate::folio::Folio;
use crate::registration::Registration;
use crate::workshop::Workshop;

pub const DEFAULT_QR_BASE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
pub const DEFAULT_QR_SIZE: u32 = 220;

/// Data encoded in the ticket's QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrPayload {
    /// Event label
    pub e: String,
    pub folio: String,
    pub name: String,
    /// Workshop start, RFC 3339 with the local offset
    pub date: String,
    pub venue: String,
}

impl QrPayload {
    pub fn new(workshop: &Workshop, folio: &Folio, registration: &Registration) -> TallerResult<Self> {
        Ok(QrPayload {
            e: workshop.qr_label.clone(),
            folio: folio.to_string(),
            name: format!("{} {}", registration.first_name, registration.last_name),
            date: workshop.start_local()?.to_rfc3339(),
            venue: workshop.place_name.clone(),
        })
    }

    pub fn to_json(&self) -> TallerResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// URL of a `size`x`size` QR image for `payload`.
pub fn qr_image_url(base: &str, size: u32, payload: &QrPayload) -> TallerResult<String> {
    let size = format!("{size}x{size}");
    let data = payload.to_json()?;
    let url = Url::parse_with_params(base, [("size", size.as_str()), ("data", data.as_str())])?;
    Ok(url.into())
}
