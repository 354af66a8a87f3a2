use thiserror::Error;

/// Errors produced by the domain services and repositories.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: i32 },

    #[error("validation failed on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}
