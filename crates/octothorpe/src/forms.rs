// File: src/forms.rs
// Purpose: Point-in-time capture of a form's field values

use std::collections::HashMap;

use crate::host::Host;

/// Field values read from the host when a form is submitted
///
/// A field the host does not know reads back as empty, the same as an
/// untouched input.
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    values: HashMap<String, String>,
}

impl FormSnapshot {
    /// Captures the listed fields from the host
    pub async fn capture(host: &dyn Host, ids: &[&str]) -> Self {
        let mut values = HashMap::new();
        for id in ids {
            if let Some(value) = host.field(id).await {
                values.insert((*id).to_string(), value);
            }
        }
        Self { values }
    }

    /// The value exactly as typed
    pub fn raw(&self, id: &str) -> &str {
        self.values.get(id).map(String::as_str).unwrap_or("")
    }

    /// The value with surrounding whitespace removed
    pub fn trimmed(&self, id: &str) -> &str {
        self.raw(id).trim()
    }
}
