//! Field-level validation error collection.
//!
//! Payload constructors check every field before failing so a client sees
//! all problems in one response.

use std::fmt;

use serde_json::json;

use super::Error;

/// One failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: &'static str,
    message: String,
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Ordered list of field failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`.
    pub fn push(&mut self, field: &'static str, message: impl fmt::Display) {
        self.0.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    /// Keep the value of a passing check, recording the failure otherwise.
    pub fn check<T, E>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T>
    where
        E: fmt::Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(field, error);
                None
            }
        }
    }

    /// Return the value of a field that must be present.
    pub fn require<'a>(&mut self, field: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        if value.is_none() {
            self.push(field, format_args!("{field} is required"));
        }
        value
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Names of the failing fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(FieldError::field).collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(FieldError::message).collect();
        f.write_str(&messages.join(", "))
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        let fields: Vec<_> = errors
            .iter()
            .map(|error| json!({ "field": error.field(), "message": error.message() }))
            .collect();
        Error::invalid_request(errors.to_string()).with_details(json!({ "fields": fields }))
    }
}
