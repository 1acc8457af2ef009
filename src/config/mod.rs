use crate::utils::error::{Result, SchemaError};
use crate::utils::validation::{validate_ordered_bounds, validate_positive_number, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable limits applied by [`crate::CalculationValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    pub min_inputs: usize,
    pub max_inputs: Option<usize>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            min_inputs: 1,
            max_inputs: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    validation: SchemaConfig,
}

impl SchemaConfig {
    /// Loads the `[validation]` table of a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SchemaError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let file: ConfigFile = toml::from_str(&processed_content)?;
        tracing::debug!(
            "Loaded schema config: min_inputs={}, max_inputs={:?}",
            file.validation.min_inputs,
            file.validation.max_inputs
        );
        Ok(file.validation)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SchemaError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl Validate for SchemaConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("validation.min_inputs", self.min_inputs, 1)?;
        validate_ordered_bounds("validation.max_inputs", self.min_inputs, self.max_inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_when_table_missing() {
        let config = SchemaConfig::from_toml_str("").unwrap();
        assert_eq!(config, SchemaConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_validation_table() {
        let config = SchemaConfig::from_toml_str(
            r#"
[validation]
min_inputs = 2
max_inputs = 10
"#,
        )
        .unwrap();
        assert_eq!(config.min_inputs, 2);
        assert_eq!(config.max_inputs, Some(10));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CALC_SCHEMA_TEST_MAX_INPUTS", "7");
        let config = SchemaConfig::from_toml_str(
            "[validation]\nmax_inputs = ${CALC_SCHEMA_TEST_MAX_INPUTS}\n",
        )
        .unwrap();
        assert_eq!(config.max_inputs, Some(7));
        assert_eq!(config.min_inputs, 1);
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[validation]\nmin_inputs = 3").unwrap();
        let config = SchemaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.min_inputs, 3);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let err = SchemaConfig::from_toml_str("[validation\nmin_inputs = 2").unwrap_err();
        assert!(matches!(err, SchemaError::TomlError(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let config = SchemaConfig {
            min_inputs: 3,
            max_inputs: Some(2),
        };
        assert!(matches!(
            config.validate(),
            Err(SchemaError::InvalidConfigValueError { .. })
        ));

        let zero = SchemaConfig {
            min_inputs: 0,
            max_inputs: None,
        };
        assert!(zero.validate().is_err());
    }
}
