use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::patch::Patch;

/// The reason a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldErrorKind {
    #[error("field is required")]
    Missing,
    #[error("field must not be null")]
    Null,
    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{expected} out of range")]
    OutOfRange { expected: &'static str },
}

/// A rejected field of a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{field}`: {kind}")]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
}

/// Returned when a payload can not be turned into one of the book shapes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("payload must be an object, found {found}")]
    NotAnObject { found: &'static str },
    #[error("invalid payload: {}", FieldList(.0))]
    Fields(Vec<FieldError>),
}

impl ValidationError {
    /// Returns the rejected fields. Empty if the payload was not an object.
    pub fn fields(&self) -> &[FieldError] {
        match self {
            ValidationError::NotAnObject { .. } => &[],
            ValidationError::Fields(fields) => fields,
        }
    }

    /// Returns the error kind reported for `field`, if any.
    pub fn field(&self, field: &str) -> Option<&FieldErrorKind> {
        self.fields()
            .iter()
            .find(|error| error.field == field)
            .map(|error| &error.kind)
    }
}

struct FieldList<'a>(&'a [FieldError]);

impl fmt::Display for FieldList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{error}")?;
        }

        Ok(())
    }
}

/// Returns the JSON type name of `value` as used in error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_i64() || number.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of an untyped JSON object, collecting every failure
/// instead of stopping at the first one.
pub(crate) struct PayloadReader {
    object: Map<String, Value>,
    errors: Vec<FieldError>,
}

impl PayloadReader {
    pub(crate) fn new(payload: Value) -> Result<Self, ValidationError> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                errors: Vec::new(),
            }),
            other => Err(ValidationError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// A field that must be present and non-null.
    pub(crate) fn required<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Option<T> {
        match self.object.remove(field) {
            None => self.reject(field, FieldErrorKind::Missing),
            Some(Value::Null) => self.reject(field, FieldErrorKind::Null),
            Some(value) => self.convert(field, expected, value),
        }
    }

    /// A field that may be absent or null, both meaning "no value".
    pub(crate) fn optional<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Option<T> {
        match self.object.remove(field) {
            None | Some(Value::Null) => None,
            Some(value) => self.convert(field, expected, value),
        }
    }

    /// A field that may be absent, but never null.
    pub(crate) fn non_null<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Option<T> {
        match self.object.remove(field) {
            None => None,
            Some(Value::Null) => self.reject(field, FieldErrorKind::Null),
            Some(value) => self.convert(field, expected, value),
        }
    }

    /// A field whose absence and explicit null are kept apart.
    pub(crate) fn patch<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
    ) -> Patch<T> {
        match self.object.remove(field) {
            None => Patch::Unset,
            Some(Value::Null) => Patch::Null,
            Some(value) => match self.convert(field, expected, value) {
                Some(value) => Patch::Value(value),
                None => Patch::Unset,
            },
        }
    }

    /// Returns `value` if no field was rejected, otherwise every collected
    /// field error. Leftover keys are ignored.
    pub(crate) fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        if !self.object.is_empty() {
            let unknown = self.object.keys().collect::<Vec<_>>();

            tracing::debug!(?unknown, "Ignoring unrecognized fields");
        }

        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationError::Fields(self.errors)),
        }
    }

    fn convert<T: DeserializeOwned>(
        &mut self,
        field: &'static str,
        expected: &'static str,
        value: Value,
    ) -> Option<T> {
        let found = json_type_name(&value);

        match serde_json::from_value(value) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::trace!(field, %err, "Conversion failed");

                let kind = match found == expected {
                    true => FieldErrorKind::OutOfRange { expected },
                    false => FieldErrorKind::WrongType { expected, found },
                };

                self.reject(field, kind)
            }
        }
    }

    fn reject<T>(&mut self, field: &'static str, kind: FieldErrorKind) -> Option<T> {
        self.errors.push(FieldError { field, kind });

        None
    }
}
