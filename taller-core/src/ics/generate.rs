//! ICS file generation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TallerResult;
use crate::workshop::Workshop;

/// A single event ready to be serialized.
///
/// `uid` and `dtstamp` are carried explicitly so output is reproducible
/// when they are fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    pub dtstamp: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub location: String,
    pub description: String,
}

impl CalendarEvent {
    /// Build the invite for `workshop` with a caller supplied UID and stamp.
    pub fn for_workshop(
        workshop: &Workshop,
        uid: impl Into<String>,
        dtstamp: DateTime<Utc>,
    ) -> TallerResult<Self> {
        let mut description = vec![
            format!("Taller en {}", workshop.place_name),
            workshop.place_addr.clone(),
        ];
        if let Some(link) = workshop.primary_link() {
            description.push(format!("Instagram: {}", link.url));
        }

        Ok(CalendarEvent {
            uid: uid.into(),
            dtstamp,
            start: workshop.start_utc()?,
            end: workshop.end_utc()?,
            summary: workshop.title.clone(),
            location: workshop.full_location(),
            description: description.join("\n"),
        })
    }

    /// Build the invite with a fresh `<uuid>@<uid_domain>` UID, stamped now.
    pub fn new_for_workshop(workshop: &Workshop) -> TallerResult<Self> {
        let uid = format!("{}@{}", Uuid::new_v4(), workshop.uid_domain);
        Self::for_workshop(workshop, uid, Utc::now())
    }
}

/// UTC timestamp in basic format, e.g. `20250927T173000Z`
pub fn format_utc(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a TEXT value: backslash, semicolon, comma and line breaks.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                out.push_str("\\n");
            }
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }

    out
}

/// Generate the .ics content for one event.
///
/// Lines are CRLF separated and the output ends with `END:VCALENDAR`
/// without a trailing line break.
pub fn generate_ics(prodid: &str, event: &CalendarEvent) -> String {
    let lines = [
        "BEGIN:VCALENDAR".to_string(),
        format!("PRODID:{prodid}"),
        "VERSION:2.0".to_string(),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{}", event.uid),
        format!("DTSTAMP:{}", format_utc(event.dtstamp)),
        format!("DTSTART:{}", format_utc(event.start)),
        format!("DTEND:{}", format_utc(event.end)),
        format!("SUMMARY:{}", escape_text(&event.summary)),
        format!("LOCATION:{}", escape_text(&event.location)),
        format!("DESCRIPTION:{}", escape_text(&event.description)),
        "END:VEVENT".to_string(),
        "END:VCALENDAR".to_string(),
    ];

    lines.join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_test_event() -> CalendarEvent {
        CalendarEvent {
            uid: "test-event-123@taller".to_string(),
            dtstamp: Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap(),
            start: Utc.with_ymd_and_hms(2025, 9, 27, 17, 30, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 9, 27, 20, 0, 0).unwrap(),
            summary: "Test Event".to_string(),
            location: "Hall; Room, 2".to_string(),
            description: "Line one\nLine two".to_string(),
        }
    }

    #[test]
    fn test_generate_ics_envelope() {
        let ics = generate_ics("-//Test//EN", &make_test_event());

        assert!(ics.starts_with("BEGIN:VCALENDAR"), "ICS:\n{}", ics);
        assert!(ics.ends_with("END:VCALENDAR"), "ICS:\n{}", ics);
        assert_eq!(
            ics.matches("BEGIN:VEVENT").count(),
            1,
            "Should contain exactly one event. ICS:\n{}",
            ics
        );
        assert!(ics.contains("\r\nPRODID:-//Test//EN\r\n"));
        assert!(
            !ics.replace("\r\n", "").contains('\n'),
            "Lines must be CRLF separated"
        );
    }

    #[test]
    fn test_generate_ics_escapes_location() {
        let ics = generate_ics("-//Test//EN", &make_test_event());
        assert!(
            ics.contains("\r\nLOCATION:Hall\\; Room\\, 2\r\n"),
            "Location not escaped. ICS:\n{}",
            ics
        );
    }

    #[test]
    fn test_generate_ics_utc_timestamps() {
        let ics = generate_ics("-//Test//EN", &make_test_event());
        assert!(ics.contains("DTSTAMP:20250901T080000Z"));
        assert!(ics.contains("DTSTART:20250927T173000Z"));
        assert!(ics.contains("DTEND:20250927T200000Z"));
    }

    #[test]
    fn test_generate_ics_is_deterministic_for_fixed_inputs() {
        let event = make_test_event();
        assert_eq!(generate_ics("p", &event), generate_ics("p", &event));
    }

    #[test]
    fn test_escape_text_rules() {
        assert_eq!(escape_text(r"a\b"), r"a\\b");
        assert_eq!(escape_text("a;b,c"), r"a\;b\,c");
        assert_eq!(escape_text("one\r\ntwo\nthree"), r"one\ntwo\nthree");
        assert_eq!(escape_text("lone\rcr"), "lone\rcr");
        assert_eq!(escape_text(""), "");
    }

    #[test]
    fn test_workshop_event_description_has_real_line_breaks() {
        let ws = Workshop::default();
        let stamp = Utc.with_ymd_and_hms(2025, 9, 1, 8, 0, 0).unwrap();
        let event = CalendarEvent::for_workshop(&ws, "fixed@apelles-taller", stamp).unwrap();
        let ics = generate_ics(&ws.prodid, &event);

        let description = ics
            .lines()
            .find(|l| l.starts_with("DESCRIPTION:"))
            .expect("Should have DESCRIPTION line");
        assert!(
            description.contains(r"WAD House — Galería y tienda de Arte\nCalle 10 Ote 212\,"),
            "Got: {}",
            description
        );
        assert!(
            !description.contains(r"\\n"),
            "Line breaks must not be double escaped. Got: {}",
            description
        );
        assert!(ics.contains("UID:fixed@apelles-taller"));
        assert!(ics.contains("DTSTART:20250927T173000Z"));
    }

    #[test]
    fn test_new_for_workshop_generates_unique_uids() {
        let ws = Workshop::default();
        let a = CalendarEvent::new_for_workshop(&ws).unwrap();
        let b = CalendarEvent::new_for_workshop(&ws).unwrap();

        assert_ne!(a.uid, b.uid);
        assert!(a.uid.ends_with("@apelles-taller"), "Got: {}", a.uid);
    }
}
