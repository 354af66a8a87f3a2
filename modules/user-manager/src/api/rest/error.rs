use http::StatusCode;

use crate::api::rest::problem::{FieldViolation, Problem};
use crate::domain::error::DomainError;

/// Map a domain error to an RFC 9457 Problem.
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string());

    let problem = match e {
        DomainError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, "Not Found", e.to_string())
        }
        DomainError::Validation { field, message } => Problem::new(
            StatusCode::BAD_REQUEST,
            "Validation Failed",
            e.to_string(),
        )
        .with_errors(vec![FieldViolation {
            field: field.clone(),
            message: message.clone(),
        }]),
        DomainError::Database(msg) => {
            tracing::error!(error = %msg, "database error");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An internal database error occurred",
            )
        }
    };

    let problem = match trace_id {
        Some(id) => problem.with_trace_id(id),
        None => problem,
    };
    problem.with_instance(instance)
}

/// Implement `From<DomainError>` for Problem so `?` works in handlers.
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
