use crate::config::SchemaConfig;
use crate::core::fields::{self, Collector};
use crate::domain::model::{CalculationCreate, CalculationResponse, CalculationUpdate, Field};
use crate::domain::ports::Schema;
use crate::utils::error::{self, ValidationError};
use crate::utils::validation::Validate;
use serde_json::Value;

impl Schema for CalculationCreate {
    const NAME: &'static str = "CalculationCreate";

    fn validate_with(data: &Value, config: &SchemaConfig) -> Result<Self, ValidationError> {
        let map = fields::as_object(Self::NAME, data)?;
        let mut collector = Collector::new();

        let calculation_type = collector
            .required(map, fields::TYPE)
            .and_then(|v| collector.check(fields::parse_type(v)));
        let inputs = collector
            .required(map, fields::INPUTS)
            .and_then(|v| collector.check_all(fields::parse_inputs(v, config)));
        let user_id = collector
            .required(map, fields::USER_ID)
            .and_then(|v| collector.check(fields::parse_uuid(fields::USER_ID, v)));

        if let (Some(t), Some(inputs)) = (calculation_type, inputs.as_deref()) {
            collector.check(fields::check_division(t, inputs));
        }
        let record = match (calculation_type, inputs, user_id) {
            (Some(calculation_type), Some(inputs), Some(user_id)) => Some(Self {
                calculation_type,
                inputs,
                user_id,
            }),
            _ => None,
        };
        collector.finish(Self::NAME, record)
    }
}

impl Schema for CalculationUpdate {
    const NAME: &'static str = "CalculationUpdate";

    fn validate_with(data: &Value, config: &SchemaConfig) -> Result<Self, ValidationError> {
        let map = fields::as_object(Self::NAME, data)?;
        let mut collector = Collector::new();

        let calculation_type = match fields::lookup(map, fields::TYPE) {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => match collector.check(fields::parse_type(v)) {
                Some(t) => Field::Value(t),
                None => Field::Unset,
            },
        };
        let inputs = match fields::lookup(map, fields::INPUTS) {
            Field::Unset => Field::Unset,
            Field::Null => Field::Null,
            Field::Value(v) => match collector.check_all(fields::parse_inputs(v, config)) {
                Some(inputs) => Field::Value(inputs),
                None => Field::Unset,
            },
        };

        if let (Field::Value(t), Field::Value(inputs)) = (&calculation_type, &inputs) {
            collector.check(fields::check_division(*t, inputs));
        }
        collector.finish(
            Self::NAME,
            Some(Self {
                calculation_type,
                inputs,
            }),
        )
    }
}

impl Schema for CalculationResponse {
    const NAME: &'static str = "CalculationResponse";

    fn validate_with(data: &Value, config: &SchemaConfig) -> Result<Self, ValidationError> {
        let map = fields::as_object(Self::NAME, data)?;
        let mut collector = Collector::new();

        let id = collector
            .required(map, fields::ID)
            .and_then(|v| collector.check(fields::parse_uuid(fields::ID, v)));
        let user_id = collector
            .required(map, fields::USER_ID)
            .and_then(|v| collector.check(fields::parse_uuid(fields::USER_ID, v)));
        let calculation_type = collector
            .required(map, fields::TYPE)
            .and_then(|v| collector.check(fields::parse_type(v)));
        let inputs = collector
            .required(map, fields::INPUTS)
            .and_then(|v| collector.check_all(fields::parse_inputs(v, config)));
        let result = collector
            .required(map, fields::RESULT)
            .and_then(|v| collector.check(fields::parse_number(fields::RESULT, v)));
        let created_at = collector
            .required(map, fields::CREATED_AT)
            .and_then(|v| collector.check(fields::parse_timestamp(fields::CREATED_AT, v)));
        let updated_at = collector
            .required(map, fields::UPDATED_AT)
            .and_then(|v| collector.check(fields::parse_timestamp(fields::UPDATED_AT, v)));
        let record = match (id, user_id, calculation_type, inputs, result, created_at, updated_at) {
            (
                Some(id),
                Some(user_id),
                Some(calculation_type),
                Some(inputs),
                Some(result),
                Some(created_at),
                Some(updated_at),
            ) => Some(Self {
                id,
                user_id,
                calculation_type,
                inputs,
                result,
                created_at,
                updated_at,
            }),
            _ => None,
        };
        collector.finish(Self::NAME, record)
    }
}

macro_rules! impl_try_from_value {
    ($($record:ty),+) => {
        $(
            impl TryFrom<&Value> for $record {
                type Error = ValidationError;

                fn try_from(data: &Value) -> Result<Self, Self::Error> {
                    <$record as Schema>::validate(data)
                }
            }
        )+
    };
}

impl_try_from_value!(CalculationCreate, CalculationUpdate, CalculationResponse);

/// Validates calculation payloads against a fixed [`SchemaConfig`].
#[derive(Debug, Clone, Default)]
pub struct CalculationValidator {
    config: SchemaConfig,
}

impl CalculationValidator {
    pub fn new(config: SchemaConfig) -> error::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn validate_create(&self, data: &Value) -> Result<CalculationCreate, ValidationError> {
        self.run(data)
    }

    pub fn validate_update(&self, data: &Value) -> Result<CalculationUpdate, ValidationError> {
        self.run(data)
    }

    pub fn validate_response(&self, data: &Value) -> Result<CalculationResponse, ValidationError> {
        self.run(data)
    }

    fn run<T: Schema>(&self, data: &Value) -> Result<T, ValidationError> {
        match T::validate_with(data, &self.config) {
            Ok(record) => {
                tracing::debug!("✅ {} accepted", T::NAME);
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    schema = T::NAME,
                    error_count = e.errors.len(),
                    "❌ {} rejected: {}",
                    T::NAME,
                    e.fields().collect::<Vec<_>>().join(", ")
                );
                Err(e)
            }
        }
    }
}

pub fn validate_create(data: &Value) -> Result<CalculationCreate, ValidationError> {
    CalculationValidator::default().validate_create(data)
}

pub fn validate_update(data: &Value) -> Result<CalculationUpdate, ValidationError> {
    CalculationValidator::default().validate_update(data)
}

pub fn validate_response(data: &Value) -> Result<CalculationResponse, ValidationError> {
    CalculationValidator::default().validate_response(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CalculationType;
    use crate::utils::error::{FieldErrorKind, SchemaError};
    use serde_json::json;

    const USER: &str = "0b8f7c5e-3b1a-4c8e-9f43-2a1d6f0e9b11";

    #[test]
    fn test_create_collects_all_errors() {
        let err = validate_create(&json!({ "inputs": "nope" })).unwrap_err();
        assert_eq!(err.schema, "CalculationCreate");
        let fields: Vec<&str> = err.fields().collect();
        assert_eq!(fields, vec!["type", "inputs", "user_id"]);
        assert_eq!(err.errors[0].kind, FieldErrorKind::MissingField);
        assert_eq!(err.errors[1].kind.code(), "type_mismatch");
    }

    #[test]
    fn test_create_null_required_field_is_type_mismatch() {
        let err = validate_create(&json!({ "type": "addition", "inputs": null, "user_id": USER }))
            .unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].message, "Input should be a valid list");
    }

    #[test]
    fn test_division_guard_skipped_when_inputs_invalid() {
        let err = validate_create(&json!({ "type": "division", "inputs": [1, "x", 0], "user_id": USER }))
            .unwrap_err();
        assert!(!err.has_kind("division_by_zero"));
        assert!(err.has_kind("type_mismatch"));
    }

    #[test]
    fn test_update_null_fields_are_kept_distinct() {
        let update = validate_update(&json!({ "type": null })).unwrap();
        assert!(update.calculation_type.is_null());
        assert!(update.inputs.is_unset());
    }

    #[test]
    fn test_update_division_guard_needs_both_fields() {
        let update = validate_update(&json!({ "inputs": [10, 0] })).unwrap();
        assert_eq!(update.inputs, Field::Value(vec![10.0, 0.0]));
    }

    #[test]
    fn test_non_object_payload() {
        let err = validate_update(&json!([1, 2])).unwrap_err();
        assert_eq!(err.errors[0].message, "Input should be a valid dictionary");
        assert_eq!(err.errors[0].field, "");
    }

    #[test]
    fn test_configured_minimum_inputs() {
        let validator = CalculationValidator::new(SchemaConfig {
            min_inputs: 2,
            max_inputs: None,
        })
        .unwrap();
        let err = validator
            .validate_create(&json!({ "type": "addition", "inputs": [5], "user_id": USER }))
            .unwrap_err();
        assert!(err.has_kind("invalid_length"));
        assert_eq!(validator.config().min_inputs, 2);
    }

    #[test]
    fn test_validator_rejects_bad_config() {
        let result = CalculationValidator::new(SchemaConfig {
            min_inputs: 0,
            max_inputs: None,
        });
        assert!(matches!(result, Err(SchemaError::InvalidConfigValueError { .. })));
    }

    #[test]
    fn test_try_from_value() {
        let data = json!({ "type": "Subtraction", "inputs": [3, 1], "user_id": USER });
        let create = CalculationCreate::try_from(&data).unwrap();
        assert_eq!(create.calculation_type, CalculationType::Subtraction);
    }
}
