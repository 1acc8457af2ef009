use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SchemaError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            SchemaError::Validation(e) => format!("Request rejected: {}", e),
            SchemaError::IoError(e) => format!("Could not read file: {}", e),
            SchemaError::TomlError(_) => "Configuration file is not valid TOML".to_string(),
            SchemaError::ConfigError { message } => format!("Configuration problem: {}", message),
            SchemaError::InvalidConfigValueError { field, value, reason } => {
                format!("Setting '{}' = '{}' is invalid: {}", field, value, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Machine-readable reason attached to each [`FieldError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    MissingField,
    TypeMismatch { expected: &'static str },
    InvalidEnum { allowed: Vec<&'static str> },
    DivisionByZero { index: usize },
    InvalidLength {
        min: usize,
        max: Option<usize>,
        actual: usize,
    },
}

impl FieldErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::MissingField => "missing_field",
            FieldErrorKind::TypeMismatch { .. } => "type_mismatch",
            FieldErrorKind::InvalidEnum { .. } => "invalid_enum",
            FieldErrorKind::DivisionByZero { .. } => "division_by_zero",
            FieldErrorKind::InvalidLength { .. } => "invalid_length",
        }
    }
}

/// A single violation, addressed by field path (`inputs`, `inputs[2]`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "Field required".to_string(),
            kind: FieldErrorKind::MissingField,
        }
    }

    pub fn type_mismatch(field: impl Into<String>, expected: &'static str) -> Self {
        Self {
            field: field.into(),
            message: format!("Input should be a valid {}", expected),
            kind: FieldErrorKind::TypeMismatch { expected },
        }
    }

    pub fn invalid_enum(field: &str, allowed: &[&'static str]) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Type must be one of: {}", allowed.join(", ")),
            kind: FieldErrorKind::InvalidEnum {
                allowed: allowed.to_vec(),
            },
        }
    }

    pub fn division_by_zero(field: &str, index: usize) -> Self {
        Self {
            field: field.to_string(),
            message: format!("Cannot divide by zero (zero divisor at position {})", index),
            kind: FieldErrorKind::DivisionByZero { index },
        }
    }

    pub fn invalid_length(field: &str, min: usize, max: Option<usize>, actual: usize) -> Self {
        let message = match max {
            Some(max) => format!(
                "List should have between {} and {} items, got {}",
                min, max, actual
            ),
            None => format!("List should have at least {} item(s), got {}", min, actual),
        };
        Self {
            field: field.to_string(),
            message,
            kind: FieldErrorKind::InvalidLength { min, max, actual },
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Aggregated rejection of a payload; never empty when returned from a validator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{} validation error(s) for {}: {}", .errors.len(), .schema, summarize(.errors))]
pub struct ValidationError {
    pub schema: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(schema: &'static str, errors: Vec<FieldError>) -> Self {
        Self { schema, errors }
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.field.as_str())
    }

    pub fn has_kind(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.kind.code() == code)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
