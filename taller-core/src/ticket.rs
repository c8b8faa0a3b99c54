//! Values exposed to the emailed ticket template.

use crate::folio::Folio;
use crate::registration::Registration;
use crate::template::TemplateVars;
use crate::workshop::Workshop;

/// Placeholders available in the ticket: `firstName`, `lastName`,
/// `fullName`, `folio`, `qrUrl`, `title`, `dateText`, `placeName`,
/// `placeAddr`, `price`.
pub fn ticket_vars(
    registration: &Registration,
    folio: &Folio,
    qr_url: &str,
    workshop: &Workshop,
) -> TemplateVars {
    let mut vars = TemplateVars::new();
    vars.set("firstName", &registration.first_name)
        .set("lastName", &registration.last_name)
        .set("fullName", registration.full_name())
        .set("folio", folio)
        .set("qrUrl", qr_url)
        .set("title", &workshop.title)
        .set("dateText", &workshop.date_text)
        .set("placeName", &workshop.place_name)
        .set("placeAddr", &workshop.place_addr)
        .set("price", &workshop.price);
    vars
}
