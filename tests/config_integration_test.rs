use anyhow::Result;
use calc_schema::{CalculationValidator, FieldErrorKind, SchemaConfig, SchemaError};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

const USER: &str = "5a4c1e0f-8d2b-4f6a-9c3e-7b1d2e3f4a5b";

/// A config file with the stricter "at least two operands" rule applied end to end.
#[test]
fn test_validator_from_toml_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(
        file,
        r#"
[validation]
min_inputs = 2
max_inputs = 4
"#
    )?;

    let config = SchemaConfig::from_file(file.path())?;
    let validator = CalculationValidator::new(config)?;

    let ok = validator.validate_create(&json!({
        "type": "addition",
        "inputs": [1, 2, 3],
        "user_id": USER,
    }));
    assert!(ok.is_ok());

    let err = validator
        .validate_update(&json!({ "inputs": [1, 2, 3, 4, 5] }))
        .unwrap_err();
    assert_eq!(
        err.errors[0].kind,
        FieldErrorKind::InvalidLength {
            min: 2,
            max: Some(4),
            actual: 5
        }
    );

    let single = validator
        .validate_create(&json!({ "type": "addition", "inputs": [1], "user_id": USER }))
        .unwrap_err();
    assert!(single.has_kind("invalid_length"));
    Ok(())
}

#[test]
fn test_inverted_bounds_rejected_at_construction() -> Result<()> {
    let config = SchemaConfig::from_toml_str("[validation]\nmin_inputs = 5\nmax_inputs = 2\n")?;
    let err = CalculationValidator::new(config).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidConfigValueError { ref field, .. } if field == "validation.max_inputs"));
    assert!(err.user_friendly_message().contains("validation.max_inputs"));
    Ok(())
}

#[test]
fn test_missing_config_file() {
    let err = SchemaConfig::from_file("/nonexistent/calc-schema.toml").unwrap_err();
    assert!(matches!(err, SchemaError::IoError(_)));
}

#[test]
fn test_default_validator_accepts_single_operand() -> Result<()> {
    let validator = CalculationValidator::default();
    let calc = validator.validate_create(&json!({
        "type": "Subtraction",
        "inputs": [7],
        "user_id": USER,
    }))?;
    assert_eq!(calc.inputs, vec![7.0]);
    Ok(())
}
