//! Request pipeline.
//!
//! Application requests are dispatched through a [`Mediator`] built from an
//! explicit [`HandlerRegistry`]. Each request passes the logging, validation and
//! authorization behaviours before it reaches its handler.

pub mod behaviours;
pub mod context;
pub mod registry;

pub use behaviours::LoggingBehaviour;
pub use context::{Actor, RequestContext};
pub use registry::{HandlerRegistry, Mediator};

use crate::domain::{Outcome, ValidationErrors};
use async_trait::async_trait;

/// A command or query understood by the pipeline.
pub trait Request: Send + 'static {
    type Response: Send + 'static;

    /// Name used in logs and metrics.
    const NAME: &'static str;

    /// Permission the caller must hold, if any.
    const PERMISSION: Option<&'static str> = None;

    fn validate(&self) -> ValidationErrors {
        ValidationErrors::new()
    }
}

/// Outer `Err` is an unexpected failure (storage down, bug); the inner
/// [`Outcome`] is the domain result.
pub type HandlerResult<T> = anyhow::Result<Outcome<T>>;

#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, ctx: &RequestContext, request: R) -> HandlerResult<R::Response>;
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Invalid(ValidationErrors),

    #[error("No handler registered for request {0}")]
    Unhandled(&'static str),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type PipelineResult<T> = Result<Outcome<T>, PipelineError>;
