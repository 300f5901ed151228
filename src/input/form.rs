use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::input::validation::FieldKind;

/// Static definition of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub fn new(key: &str, label: &str, icon: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            icon: icon.to_owned(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FieldEntry {
    text: String,
    kind: FieldKind,
}

/// Raw text per field, in definition order.
///
/// Holds text, never numbers: a field can sit in an in-progress state
/// ("12.") that parses to nothing yet still belongs on screen. Parsing
/// happens all-or-nothing at draw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    entries: IndexMap<String, FieldEntry>,
    default_text: String,
}

impl FormState {
    /// Builds the form with every field holding `default_text` ("" for
    /// interactive tasks, the placeholder "5" for chart-only previews).
    #[must_use]
    pub fn new(fields: &[FieldSpec], default_text: &str) -> Self {
        let entries = fields
            .iter()
            .map(|field| {
                (
                    field.key.clone(),
                    FieldEntry {
                        text: default_text.to_owned(),
                        kind: field.kind,
                    },
                )
            })
            .collect();
        Self {
            entries,
            default_text: default_text.to_owned(),
        }
    }

    /// Applies one edit. Returns `Ok(false)` and leaves the field alone
    /// when the proposed text fails the field's keystroke gate; edits to
    /// unknown keys are an error rather than a silent drop.
    pub fn set_text(&mut self, key: &str, proposed: &str) -> EngineResult<bool> {
        let entry = self
            .entries
            .get_mut(key)
            .ok_or_else(|| EngineError::UnknownField(key.to_owned()))?;
        if !entry.kind.accepts_keystroke(proposed) {
            return Ok(false);
        }
        entry.text = proposed.to_owned();
        Ok(true)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|entry| entry.text.as_str())
    }

    /// Whether every field holds a complete, parseable value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries
            .values()
            .all(|entry| entry.kind.is_complete(&entry.text))
    }

    /// Parses every field. Errors name the first field that is not yet
    /// complete; callers that want silence check `is_complete` first.
    pub fn parse_all(&self) -> EngineResult<FieldValues> {
        let mut values = IndexMap::with_capacity(self.entries.len());
        for (key, entry) in &self.entries {
            let value = entry.kind.parse(&entry.text).map_err(|_| {
                EngineError::InvalidData(format!(
                    "field `{key}` does not hold a complete value (`{}`)",
                    entry.text
                ))
            })?;
            values.insert(key.clone(), value);
        }
        Ok(FieldValues(values))
    }

    /// Puts every field back to the form's default text.
    pub fn reset(&mut self) {
        for entry in self.entries.values_mut() {
            entry.text = self.default_text.clone();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field keys and their current text, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, entry)| (key.as_str(), entry.text.as_str()))
    }
}

/// Parsed numeric values per field key, in definition order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValues(IndexMap<String, f64>);

impl FieldValues {
    pub fn get(&self, key: &str) -> EngineResult<f64> {
        self.0
            .get(key)
            .copied()
            .ok_or_else(|| EngineError::UnknownField(key.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldSpec, FormState};
    use crate::input::validation::FieldKind;

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("capital", "Capital", "$", FieldKind::Decimal),
            FieldSpec::new("interest", "Interest rate", "%", FieldKind::Integer),
        ]
    }

    #[test]
    fn accepted_edits_update_rejected_edits_do_not() {
        let mut form = FormState::new(&fields(), "");
        assert!(form.set_text("capital", "12.").expect("known key"));
        assert_eq!(form.text("capital"), Some("12."));

        assert!(!form.set_text("capital", "12.5.3").expect("known key"));
        assert_eq!(form.text("capital"), Some("12."));
    }

    #[test]
    fn unknown_keys_are_an_error_not_a_silent_drop() {
        let mut form = FormState::new(&fields(), "");
        assert!(form.set_text("nope", "1").is_err());
    }

    #[test]
    fn parse_all_requires_every_field_complete() {
        let mut form = FormState::new(&fields(), "");
        form.set_text("capital", "1000,5").expect("known key");
        assert!(!form.is_complete());
        assert!(form.parse_all().is_err());

        form.set_text("interest", "5").expect("known key");
        assert!(form.is_complete());
        let values = form.parse_all().expect("complete form");
        assert_eq!(values.get("capital").expect("capital"), 1000.5);
        assert_eq!(values.get("interest").expect("interest"), 5.0);
    }

    #[test]
    fn preview_forms_start_prefilled_and_reset_back() {
        let mut form = FormState::new(&fields(), "5");
        assert!(form.is_complete());

        form.set_text("capital", "7").expect("known key");
        form.reset();
        assert_eq!(form.text("capital"), Some("5"));
        assert_eq!(form.text("interest"), Some("5"));
    }
}
