use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Arithmetic operation a calculation applies to its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl CalculationType {
    pub const ALL: [CalculationType; 4] = [
        CalculationType::Addition,
        CalculationType::Subtraction,
        CalculationType::Multiplication,
        CalculationType::Division,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Addition => "addition",
            CalculationType::Subtraction => "subtraction",
            CalculationType::Multiplication => "multiplication",
            CalculationType::Division => "division",
        }
    }

    /// Allowed names in alphabetical order, as reported in error messages.
    pub fn allowed_names() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Self::ALL.iter().map(Self::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown calculation type '{0}'")]
pub struct UnknownCalculationType(pub String);

impl FromStr for CalculationType {
    type Err = UnknownCalculationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| UnknownCalculationType(s.to_string()))
    }
}

/// Tri-state slot for partial updates: absent, explicitly `null`, or set.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Field::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Unset | Field::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            Field::Unset | Field::Null => None,
        }
    }
}

// `Unset` is expected to be skipped by the containing struct.
impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            Field::Unset | Field::Null => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationCreate {
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CalculationUpdate {
    #[serde(rename = "type", skip_serializing_if = "Field::is_unset")]
    pub calculation_type: Field<CalculationType>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub inputs: Field<Vec<f64>>,
}

impl CalculationUpdate {
    pub fn is_empty(&self) -> bool {
        self.calculation_type.is_unset() && self.inputs.is_unset()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub calculation_type: CalculationType,
    pub inputs: Vec<f64>,
    pub result: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
