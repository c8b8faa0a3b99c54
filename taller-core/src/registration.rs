//! Registration records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{TallerError, TallerResult};

/// A stored registration. Created once per accepted request, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Registration form as received over the wire. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RegistrationRequest {
    /// Validate the request and turn it into a record stamped `created_at`.
    ///
    /// First name, last name and email are required; an empty phone is
    /// treated as absent.
    pub fn into_registration(self, created_at: DateTime<Utc>) -> TallerResult<Registration> {
        let (Some(first_name), Some(last_name), Some(email)) = (
            non_empty(self.first_name),
            non_empty(self.last_name),
            non_empty(self.email),
        ) else {
            return Err(TallerError::InvalidRegistration(
                "firstName, lastName y email son obligatorios.".to_string(),
            ));
        };

        Ok(Registration {
            first_name,
            last_name,
            email,
            phone: non_empty(self.phone),
            created_at,
        })
    }
}
