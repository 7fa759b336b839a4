use thiserror::Error;

use models::errors::ModelError;
use models::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Not found {entity} with id = {id}"))
    }

    pub fn category_not_found(value: &str) -> Self {
        Self::NotFound(format!("Not found Category with value = {value}"))
    }

    /// Field errors, when this is a validation failure.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Model(ModelError::Validation(errs)) => Some(errs),
            _ => None,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Db(e.to_string())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(e: ValidationErrors) -> Self {
        ServiceError::Model(ModelError::Validation(e))
    }
}
