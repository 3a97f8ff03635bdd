use super::{PipelineError, PipelineResult, Request, RequestContext};
use crate::domain::{Error, Outcome};
use std::future::Future;
use std::time::Instant;
use tracing::Instrument;

/// Wraps a request in a span, logs its start and result, and records
/// request count and latency metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingBehaviour;

impl LoggingBehaviour {
    pub async fn around<T, F>(
        &self,
        ctx: &RequestContext,
        name: &'static str,
        next: F,
    ) -> PipelineResult<T>
    where
        F: Future<Output = PipelineResult<T>>,
    {
        let span = tracing::info_span!(
            "request",
            request = name,
            request_id = %ctx.request_id,
            tenant_id = %ctx.tenant_id,
        );

        async move {
            tracing::debug!("Handling {}", name);
            let started = Instant::now();
            let result = next.await;
            let elapsed = started.elapsed();

            let label = match &result {
                Ok(outcome) if outcome.is_success() => {
                    tracing::info!("Handled {} in {:?}", name, elapsed);
                    "success"
                }
                Ok(outcome) => {
                    tracing::warn!(
                        error_code = outcome.error().code(),
                        "Request {} failed: {}",
                        name,
                        outcome.error().message()
                    );
                    "failure"
                }
                Err(PipelineError::Invalid(errors)) => {
                    tracing::warn!("Request {} rejected: {}", name, errors);
                    "invalid"
                }
                Err(PipelineError::Unhandled(_)) => {
                    tracing::error!("No handler registered for {}", name);
                    "unhandled"
                }
                Err(PipelineError::Unexpected(e)) => {
                    tracing::error!("Request {} raised an unexpected error: {:#}", name, e);
                    "error"
                }
            };

            metrics::counter!("pipeline_requests_total", "request" => name, "outcome" => label)
                .increment(1);
            metrics::histogram!("pipeline_request_duration_seconds", "request" => name)
                .record(elapsed.as_secs_f64());

            result
        }
        .instrument(span)
        .await
    }
}

/// Runs the request's own validation rules.
pub fn validate_request<R: Request>(request: &R) -> Result<(), PipelineError> {
    let errors = request.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::Invalid(errors))
    }
}

/// Checks the caller against `R::PERMISSION`. Returns the failure to report
/// when access is refused.
pub fn authorize_request<R: Request>(ctx: &RequestContext) -> Option<Error> {
    let permission = R::PERMISSION?;
    match &ctx.actor {
        None => Some(Error::unauthorized()),
        Some(actor) if actor.has_permission(permission) => None,
        Some(actor) => {
            tracing::warn!(
                "Permission denied: user {} lacks permission {}",
                actor.user_id,
                permission
            );
            Some(Error::forbidden())
        }
    }
}

/// Short-circuits with a failed outcome when authorization refuses the caller.
pub fn authorization_outcome<R: Request>(ctx: &RequestContext) -> Option<Outcome<R::Response>> {
    authorize_request::<R>(ctx).map(Outcome::failure)
}
