//! ICS generation for the workshop invite.
//!
//! Produces the small RFC 5545 subset needed for a single published event.

mod generate;

pub use generate::{CalendarEvent, escape_text, format_utc, generate_ics};
