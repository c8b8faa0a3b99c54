//! Core types for the workshop registration service.
//!
//! This crate holds everything that does not touch the network:
//! - `template` for `{{key}}` ticket templates
//! - `ics` for the calendar invite
//! - `workshop`, `registration`, `folio`, `qr` and `ticket` for the data
//!   that flows through a registration
//! - `export` for the CSV download

pub mod error;
pub mod export;
pub mod folio;
pub mod ics;
pub mod qr;
pub mod registration;
pub mod template;
pub mod ticket;
pub mod workshop;

pub use error::{TallerError, TallerResult};
pub use folio::Folio;
pub use registration::{Registration, RegistrationRequest};
pub use template::{TemplateVars, render_template};
pub use workshop::{SocialLink, Workshop};
