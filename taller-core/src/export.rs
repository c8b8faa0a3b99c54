//! CSV export of registrations.

use chrono::SecondsFormat;

use crate::registration::Registration;

pub const CSV_HEADERS: [&str; 5] = ["firstName", "lastName", "email", "phone", "createdAt"];

fn escape_cell(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let escaped = value.replace('"', "\"\"");
    if escaped.contains(['"', ',', '\n']) {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}

/// Render registrations as CSV, one row each, in the order given.
pub fn registrations_to_csv(registrations: &[Registration]) -> String {
    let mut rows = Vec::with_capacity(registrations.len() + 1);
    rows.push(CSV_HEADERS.join(","));

    for reg in registrations {
        let created_at = reg.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let cells = [
            Some(reg.first_name.as_str()),
            Some(reg.last_name.as_str()),
            Some(reg.email.as_str()),
            reg.phone.as_deref(),
            Some(created_at.as_str()),
        ];
        rows.push(
            cells
                .into_iter()
                .map(escape_cell)
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    rows.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reg(first: &str, phone: Option<&str>) -> Registration {
        Registration {
            first_name: first.to_string(),
            last_name: "López".to_string(),
            email: "ana@example.com".to_string(),
            phone: phone.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_export_has_header_only() {
        assert_eq!(
            registrations_to_csv(&[]),
            "firstName,lastName,email,phone,createdAt"
        );
    }

    #[test]
    fn test_rows_and_missing_phone() {
        let csv = registrations_to_csv(&[reg("Ana", None), reg("Luis", Some("222"))]);
        let lines: Vec<&str> = csv.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Ana,López,ana@example.com,,2025-09-01T12:00:00.000Z");
        assert_eq!(lines[2], "Luis,López,ana@example.com,222,2025-09-01T12:00:00.000Z");
    }

    #[test]
    fn test_quoting() {
        assert_eq!(escape_cell(Some("plain")), "plain");
        assert_eq!(escape_cell(Some("a,b")), "\"a,b\"");
        assert_eq!(escape_cell(Some("say \"hi\"")), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell(Some("two\nlines")), "\"two\nlines\"");
        assert_eq!(escape_cell(None), "");
    }
}
