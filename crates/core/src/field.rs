//! Statically declared field rules and JSON field readers.
//!
//! Entities declare their wire fields once as a `&[FieldSpec]` and their codecs
//! walk that list explicitly. Every problem found while reading a body is
//! collected into [`FieldErrors`] so a client sees all of them in one response.

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// A JSON object body, as handed to entity codecs.
pub type JsonObject = serde_json::Map<String, Value>;

/// Shape rules for a single string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Maximum length in characters.
    pub max_len: usize,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            max_len,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, max_len: usize) -> Self {
        Self {
            name,
            max_len,
            required: false,
        }
    }

    /// Check a string value against this field's blank/length rules.
    pub fn check(&self, value: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err("may not be blank".to_string());
        }
        if value.chars().count() > self.max_len {
            return Err(format!("longer than maximum length {}", self.max_len));
        }
        Ok(())
    }

    /// Read a field that must be present.
    ///
    /// Returns `None` when the field is missing or invalid; the reason is
    /// recorded in `errors`.
    pub fn read_required(&self, obj: &JsonObject, errors: &mut FieldErrors) -> Option<String> {
        if !obj.contains_key(self.name) {
            errors.push(self.name, "missing data for required field");
            return None;
        }
        self.read_present(obj, errors).flatten()
    }

    /// Read a field only if the body carries it.
    ///
    /// - `None`: absent, or present but invalid (recorded in `errors`)
    /// - `Some(None)`: explicit `null` on an optional field
    /// - `Some(Some(v))`: a valid value
    pub fn read_present(
        &self,
        obj: &JsonObject,
        errors: &mut FieldErrors,
    ) -> Option<Option<String>> {
        match obj.get(self.name)? {
            Value::Null if self.required => {
                errors.push(self.name, "field may not be null");
                None
            }
            Value::Null => Some(None),
            Value::String(s) => match self.check(s) {
                Ok(()) => Some(Some(s.clone())),
                Err(msg) => {
                    errors.push(self.name, msg);
                    None
                }
            },
            _ => {
                errors.push(self.name, "not a valid string");
                None
            }
        }
    }
}

/// Per-field validation failures, in the order they were found.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    entries: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, msg: impl Into<String>) {
        self.entries.push((field, msg.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    /// `Ok(())` if nothing was recorded, otherwise a single `Validation` error
    /// listing every field problem.
    pub fn into_result(self) -> DomainResult<()> {
        if self.entries.is_empty() {
            return Ok(());
        }
        let msg = self
            .entries
            .iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ");
        Err(DomainError::Validation(msg))
    }
}

/// Interpret a decoded JSON body as an object.
pub fn as_object(body: &Value) -> DomainResult<&JsonObject> {
    body.as_object()
        .ok_or_else(|| DomainError::validation("request body must be a JSON object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NAME: FieldSpec = FieldSpec::required("name", 5);
    const NOTE: FieldSpec = FieldSpec::optional("note", 3);

    fn obj(v: Value) -> JsonObject {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn check_counts_characters_not_bytes() {
        assert!(NAME.check("ééééé").is_ok());
        assert!(NAME.check("éééééé").is_err());
    }

    #[test]
    fn check_rejects_blank_required_but_allows_blank_optional() {
        assert_eq!(NAME.check("   ").unwrap_err(), "may not be blank");
        assert!(NOTE.check("").is_ok());
    }

    #[test]
    fn read_required_reports_missing_null_and_wrong_type() {
        let mut errors = FieldErrors::new();
        assert_eq!(NAME.read_required(&obj(json!({})), &mut errors), None);
        assert_eq!(NAME.read_required(&obj(json!({"name": null})), &mut errors), None);
        assert_eq!(NAME.read_required(&obj(json!({"name": 7})), &mut errors), None);

        let err = errors.into_result().unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation(
                "name: missing data for required field; name: field may not be null; name: not a valid string"
                    .to_string()
            )
        );
    }

    #[test]
    fn read_present_distinguishes_absent_null_and_value() {
        let mut errors = FieldErrors::new();
        assert_eq!(NOTE.read_present(&obj(json!({})), &mut errors), None);
        assert_eq!(NOTE.read_present(&obj(json!({"note": null})), &mut errors), Some(None));
        assert_eq!(
            NOTE.read_present(&obj(json!({"note": "ok"})), &mut errors),
            Some(Some("ok".to_string()))
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn read_present_records_length_violation() {
        let mut errors = FieldErrors::new();
        assert_eq!(NOTE.read_present(&obj(json!({"note": "long"})), &mut errors), None);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["note"]);
    }

    #[test]
    fn as_object_rejects_non_objects() {
        assert!(as_object(&json!([1, 2])).is_err());
        assert!(as_object(&json!({"a": 1})).is_ok());
    }
}
