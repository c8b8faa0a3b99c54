//! The workshop being registered for.
//!
//! There is exactly one workshop per running service. Its descriptor is
//! read once at startup (compiled-in defaults, optionally overridden by
//! the server's config file) and shared read-only afterwards.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{TallerError, TallerResult};

/// A link shown on the ticket and in the calendar description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Static description of the workshop.
///
/// `start` and `end` are wall-clock times in `timezone`; the UTC instants
/// are derived from the zone rules, so no manual offset is needed around
/// DST changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workshop {
    pub title: String,
    /// Human readable date shown on the ticket
    pub date_text: String,
    pub timezone: Tz,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub place_name: String,
    pub place_addr: String,
    pub price: String,
    pub social: Vec<SocialLink>,

    /// PRODID written into generated calendars
    pub prodid: String,
    /// Right-hand side of generated UIDs (`<uuid>@<uid_domain>`)
    pub uid_domain: String,
    /// Filename of the emailed .ics attachment
    pub ics_filename: String,
    /// Short event label embedded in the QR payload
    pub qr_label: String,
}

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .unwrap_or_default()
}

impl Default for Workshop {
    fn default() -> Self {
        Workshop {
            title: "Taller de Preparación de Óleo Tradicional (Apelles Pro)".to_string(),
            date_text: "Sábado 27 de septiembre · 11:30 a.m. (America/Mexico_City)".to_string(),
            timezone: chrono_tz::America::Mexico_City,
            start: local(2025, 9, 27, 11, 30),
            end: local(2025, 9, 27, 14, 0),
            place_name: "WAD House — Galería y tienda de Arte".to_string(),
            place_addr: "Calle 10 Ote 212, San Juan Aquiahuac, 72810 San Andrés Cholula, Puebla"
                .to_string(),
            price: "$1,000 MXN".to_string(),
            social: vec![
                SocialLink {
                    label: "Apelles Pro".to_string(),
                    url: "https://www.instagram.com/apellespro/".to_string(),
                },
                SocialLink {
                    label: "WAD House".to_string(),
                    url: "https://www.instagram.com/wad_house/".to_string(),
                },
            ],
            prodid: "-//Apelles Taller//EN".to_string(),
            uid_domain: "apelles-taller".to_string(),
            ics_filename: "apelles-taller.ics".to_string(),
            qr_label: "Apelles Taller Óleo".to_string(),
        }
    }
}

impl Workshop {
    pub fn start_local(&self) -> TallerResult<DateTime<Tz>> {
        self.resolve("start", &self.start)
    }

    pub fn end_local(&self) -> TallerResult<DateTime<Tz>> {
        self.resolve("end", &self.end)
    }

    pub fn start_utc(&self) -> TallerResult<DateTime<Utc>> {
        Ok(self.start_local()?.with_timezone(&Utc))
    }

    pub fn end_utc(&self) -> TallerResult<DateTime<Utc>> {
        Ok(self.end_local()?.with_timezone(&Utc))
    }

    /// `"<place name> — <address>"`
    pub fn full_location(&self) -> String {
        format!("{} — {}", self.place_name, self.place_addr)
    }

    pub fn primary_link(&self) -> Option<&SocialLink> {
        self.social.first()
    }

    /// Check that both times exist in the workshop timezone and are ordered.
    pub fn validate(&self) -> TallerResult<()> {
        let start = self.start_utc()?;
        let end = self.end_utc()?;
        if end <= start {
            return Err(TallerError::Workshop(format!(
                "end ({}) must be after start ({})",
                self.end, self.start
            )));
        }
        Ok(())
    }

    fn resolve(&self, which: &str, naive: &NaiveDateTime) -> TallerResult<DateTime<Tz>> {
        match self.timezone.from_local_datetime(naive) {
            LocalResult::Single(dt) => Ok(dt),
            LocalResult::Ambiguous(_, _) => Err(TallerError::Workshop(format!(
                "{which} time {naive} is ambiguous in {}",
                self.timezone
            ))),
            LocalResult::None => Err(TallerError::Workshop(format!(
                "{which} time {naive} does not exist in {}",
                self.timezone
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workshop_is_valid() {
        Workshop::default().validate().unwrap();
    }

    #[test]
    fn test_default_times_convert_to_utc() {
        let ws = Workshop::default();
        assert_eq!(
            ws.start_local().unwrap().to_rfc3339(),
            "2025-09-27T11:30:00-06:00"
        );
        assert_eq!(
            ws.start_utc().unwrap().format("%Y%m%dT%H%M%SZ").to_string(),
            "20250927T173000Z"
        );
        assert_eq!(
            ws.end_utc().unwrap().format("%Y%m%dT%H%M%SZ").to_string(),
            "20250927T200000Z"
        );
    }

    #[test]
    fn test_nonexistent_local_time_is_rejected() {
        let ws = Workshop {
            timezone: chrono_tz::America::New_York,
            // Clocks jump from 02:00 to 03:00 on this day
            start: local(2025, 3, 9, 2, 30),
            end: local(2025, 3, 9, 5, 0),
            ..Workshop::default()
        };
        let err = ws.validate().unwrap_err();
        assert!(
            err.to_string().contains("does not exist"),
            "Unexpected error: {err}"
        );
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let ws = Workshop {
            end: local(2025, 9, 27, 10, 0),
            ..Workshop::default()
        };
        assert!(ws.validate().is_err());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let ws: Workshop = serde_json::from_str(
            r#"{"title": "Otro taller", "start": "2025-10-04T10:00:00", "end": "2025-10-04T12:00:00"}"#,
        )
        .unwrap();
        assert_eq!(ws.title, "Otro taller");
        assert_eq!(ws.price, Workshop::default().price);
        assert_eq!(ws.timezone, chrono_tz::America::Mexico_City);
        ws.validate().unwrap();
    }
}
