use crate::config::SchemaConfig;
use crate::utils::error::ValidationError;
use serde_json::Value;

/// A record that can be produced from an untyped payload.
pub trait Schema: Sized {
    /// Name reported in [`ValidationError::schema`].
    const NAME: &'static str;

    fn validate_with(data: &Value, config: &SchemaConfig) -> Result<Self, ValidationError>;

    fn validate(data: &Value) -> Result<Self, ValidationError> {
        Self::validate_with(data, &SchemaConfig::default())
    }
}
