use crate::utils::error::{Result, SchemaError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(SchemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_ordered_bounds(
    field_name: &str,
    min: usize,
    max: Option<usize>,
) -> Result<()> {
    match max {
        Some(max) if max < min => Err(SchemaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: max.to_string(),
            reason: format!("Upper bound must not be below the lower bound {}", min),
        }),
        _ => Ok(()),
    }
}
