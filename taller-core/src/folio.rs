//! Short human-facing registration references.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const FOLIO_LEN: usize = 8;

/// Eight uppercase hex characters from a random UUID, e.g. `3F9A0C21`.
///
/// Collisions are only as unlikely as 32 random bits make them; nothing
/// checks for duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Folio(String);

impl Folio {
    pub fn generate() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Folio(simple[..FOLIO_LEN].to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Folio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
