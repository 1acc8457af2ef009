pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::SchemaConfig;
pub use core::schema::{validate_create, validate_response, validate_update, CalculationValidator};
pub use domain::model::{
    CalculationCreate, CalculationResponse, CalculationType, CalculationUpdate, Field,
};
pub use domain::ports::Schema;
pub use utils::error::{FieldError, FieldErrorKind, Result, SchemaError, ValidationError};
