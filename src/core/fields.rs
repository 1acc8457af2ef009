use crate::config::SchemaConfig;
use crate::domain::model::{CalculationType, Field};
use crate::utils::error::{FieldError, ValidationError};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

pub const ID: &str = "id";
pub const USER_ID: &str = "user_id";
pub const TYPE: &str = "type";
pub const INPUTS: &str = "inputs";
pub const RESULT: &str = "result";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// Accumulates field errors so a payload reports every violation at once.
#[derive(Debug, Default)]
pub struct Collector {
    errors: Vec<FieldError>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required<'a>(&mut self, map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
        let value = map.get(field);
        if value.is_none() {
            self.errors.push(FieldError::missing(field));
        }
        value
    }

    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        result.map_err(|e| self.errors.push(e)).ok()
    }

    pub fn check_all<T>(&mut self, result: Result<T, Vec<FieldError>>) -> Option<T> {
        result.map_err(|mut e| self.errors.append(&mut e)).ok()
    }

    /// `record` is `None` only when a required field failed, so an error is always present then.
    pub fn finish<T>(self, schema: &'static str, record: Option<T>) -> Result<T, ValidationError> {
        match record {
            Some(record) if self.errors.is_empty() => Ok(record),
            _ => Err(ValidationError::new(schema, self.errors)),
        }
    }
}

pub fn as_object<'a>(
    schema: &'static str,
    data: &'a Value,
) -> Result<&'a Map<String, Value>, ValidationError> {
    data.as_object().ok_or_else(|| {
        ValidationError::new(schema, vec![FieldError::type_mismatch("", "dictionary")])
    })
}

/// Distinguishes an absent key from an explicit `null`.
pub fn lookup<'a>(map: &'a Map<String, Value>, field: &str) -> Field<&'a Value> {
    match map.get(field) {
        None => Field::Unset,
        Some(Value::Null) => Field::Null,
        Some(v) => Field::Value(v),
    }
}

pub fn parse_type(value: &Value) -> Result<CalculationType, FieldError> {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| FieldError::invalid_enum(TYPE, &CalculationType::allowed_names()))
}

pub fn parse_inputs(value: &Value, config: &SchemaConfig) -> Result<Vec<f64>, Vec<FieldError>> {
    let items = value
        .as_array()
        .ok_or_else(|| vec![FieldError::type_mismatch(INPUTS, "list")])?;

    let mut errors = Vec::new();
    let mut numbers = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_f64() {
            Some(n) => numbers.push(n),
            None => errors.push(FieldError::type_mismatch(format!("{}[{}]", INPUTS, i), "number")),
        }
    }

    let too_short = items.len() < config.min_inputs;
    let too_long = config.max_inputs.is_some_and(|max| items.len() > max);
    if too_short || too_long {
        errors.push(FieldError::invalid_length(
            INPUTS,
            config.min_inputs,
            config.max_inputs,
            items.len(),
        ));
    }

    if errors.is_empty() {
        Ok(numbers)
    } else {
        Err(errors)
    }
}

/// The first operand is the dividend; every later operand must be non-zero.
pub fn check_division(calculation_type: CalculationType, inputs: &[f64]) -> Result<(), FieldError> {
    if calculation_type != CalculationType::Division {
        return Ok(());
    }
    match inputs.iter().skip(1).position(|&x| x == 0.0) {
        Some(pos) => Err(FieldError::division_by_zero(INPUTS, pos + 1)),
        None => Ok(()),
    }
}

pub fn parse_uuid(field: &str, value: &Value) -> Result<Uuid, FieldError> {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| FieldError::type_mismatch(field, "UUID"))
}

pub fn parse_number(field: &str, value: &Value) -> Result<f64, FieldError> {
    value
        .as_f64()
        .ok_or_else(|| FieldError::type_mismatch(field, "number"))
}

const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// RFC 3339, or a naive ISO 8601 timestamp (`T` or space separated) taken as UTC.
pub fn parse_timestamp(field: &str, value: &Value) -> Result<DateTime<Utc>, FieldError> {
    let s = value
        .as_str()
        .ok_or_else(|| FieldError::type_mismatch(field, "datetime"))?;

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FieldError::type_mismatch(field, "datetime"))
}
