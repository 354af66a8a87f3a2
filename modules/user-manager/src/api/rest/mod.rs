pub mod dto;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod problem;
pub mod routes;

/// Handler result: success value or an RFC 9457 problem response.
pub type ApiResult<T> = Result<T, problem::Problem>;
