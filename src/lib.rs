pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::*;
pub use domain::{Error, ErrorKind, Outcome, ValidationErrors};
pub use infrastructure::http::middleware::error::{ApiError, ApiResult, ProblemDetails};
