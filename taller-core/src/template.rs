//! Placeholder substitution for ticket templates.
//!
//! Templates use `{{key}}` placeholders (whitespace inside the braces is
//! allowed). Rendering is a single left-to-right pass: substituted values
//! are copied verbatim and never scanned again, so a value that itself
//! looks like `{{other}}` stays as is. No HTML escaping is done.

use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;

use crate::error::{TallerError, TallerResult};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Values available to a template, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateVars {
    values: HashMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to the string form of `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.values.insert(key.into(), value.to_string());
        self
    }

    /// Set `key`, rendering an absent value as the empty string.
    pub fn set_opt<V: Display>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Self {
        let value = value.map(|v| v.to_string()).unwrap_or_default();
        self.values.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

}

impl<K, V> FromIterator<(K, V)> for TemplateVars
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = TemplateVars::new();
        for (k, v) in iter {
            vars.set(k, v);
        }
        vars
    }
}

/// Replace every `{{key}}` whose key is in `vars`. Unknown placeholders
/// are left untouched.
pub fn render_template(template: &str, vars: &TemplateVars) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };

        match vars.get(after_open[..end].trim()) {
            Some(value) => {
                out.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            None => {
                // Not a known placeholder; one starting at the next byte may be.
                out.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Read a template file from disk.
pub fn load_template(path: impl AsRef<Path>) -> TallerResult<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| TallerError::Template {
        path: path.display().to_string(),
        source,
    })
}
