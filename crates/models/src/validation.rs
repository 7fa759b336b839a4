//! Field-level constraint checks shared by the artist and song models.
//!
//! Each field reports at most one [`FieldError`]: the first rule it fails.
//! Messages are `"<Rule>: <description>"` so clients can tell which
//! constraint fired without parsing the prose.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, rule: &str, description: impl fmt::Display) -> Self {
        Self { field: field.to_string(), message: format!("{rule}: {description}") }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, err: FieldError) {
        self.0.push(err);
    }

    /// Record `result`'s error, if any, and hand back the value.
    pub fn collect<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.0.push(e);
                None
            }
        }
    }

    /// Like [`collect`](Self::collect) for a result that already carries several errors.
    pub fn merge<T>(&mut self, result: Result<T, ValidationErrors>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.0.extend(e.0);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// `NotBlank` then `Size(min..=max)`, counted in characters.
pub fn text(field: &str, value: Option<&str>, min: usize, max: usize) -> Result<String, FieldError> {
    let v = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(FieldError::new(field, "NotBlank", format_args!("{field} must not be null or blank"))),
    };
    let len = v.chars().count();
    if len < min || len > max {
        return Err(FieldError::new(
            field,
            "Size",
            format_args!("{field} must be between {min} and {max} characters"),
        ));
    }
    Ok(v.to_string())
}

/// `NotNull` then `Min` then `Max`.
pub fn bounded(field: &str, value: Option<i64>, min: i64, max: i64) -> Result<i64, FieldError> {
    let v = required(field, value)?;
    if v < min {
        return Err(FieldError::new(field, "Min", format_args!("{field} must be between {min} and {max}")));
    }
    if v > max {
        return Err(FieldError::new(field, "Max", format_args!("{field} must be between {min} and {max}")));
    }
    Ok(v)
}

pub fn required<T>(field: &str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::new(field, "NotNull", format_args!("{field} must not be null")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_accepts_bounds() {
        assert_eq!(text("name", Some("abc"), 3, 50).unwrap(), "abc");
        let fifty = "x".repeat(50);
        assert_eq!(text("name", Some(&fifty), 3, 50).unwrap(), fifty);
    }

    #[test]
    fn text_rejects_out_of_bounds() {
        let e = text("name", Some("ab"), 3, 50).unwrap_err();
        assert_eq!(e.message, "Size: name must be between 3 and 50 characters");
        assert!(text("name", Some(&"x".repeat(51)), 3, 50).is_err());
    }

    #[test]
    fn blank_wins_over_size() {
        for v in [None, Some(""), Some("  ")] {
            let e = text("title", v, 3, 50).unwrap_err();
            assert_eq!(e.field, "title");
            assert_eq!(e.message, "NotBlank: title must not be null or blank");
        }
    }

    #[test]
    fn size_counts_characters_not_bytes() {
        assert!(text("name", Some("été"), 3, 50).is_ok());
    }

    #[test]
    fn bounded_rules_in_order() {
        assert_eq!(bounded("popularity", Some(0), 0, 100).unwrap(), 0);
        assert_eq!(bounded("popularity", Some(100), 0, 100).unwrap(), 100);
        assert!(bounded("popularity", None, 0, 100).unwrap_err().message.starts_with("NotNull:"));
        assert!(bounded("popularity", Some(-1), 0, 100).unwrap_err().message.starts_with("Min:"));
        assert_eq!(
            bounded("popularity", Some(200), 0, 100).unwrap_err().message,
            "Max: popularity must be between 0 and 100"
        );
    }

    #[test]
    fn collect_accumulates() {
        let mut errs = ValidationErrors::default();
        assert_eq!(errs.collect(required("id", Some(1))), Some(1));
        assert_eq!(errs.collect(required::<i64>("id", None)), None);
        assert_eq!(errs.errors().len(), 1);
        assert!(!errs.is_empty());
    }
}
