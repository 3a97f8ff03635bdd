use super::behaviours::{authorization_outcome, validate_request, LoggingBehaviour};
use super::{PipelineError, PipelineResult, Request, RequestContext, RequestHandler};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

type BoxedHandler = Box<dyn Any + Send + Sync>;

/// Collects one handler per request type before the mediator is built.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeId, BoxedHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `R`, replacing any earlier registration.
    pub fn register<R: Request>(mut self, handler: impl RequestHandler<R> + 'static) -> Self {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        if self
            .handlers
            .insert(TypeId::of::<R>(), Box::new(handler))
            .is_some()
        {
            tracing::warn!("Handler for {} registered twice, keeping the latest", R::NAME);
        }
        self
    }

    pub fn contains<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn build(self) -> Mediator {
        tracing::debug!("Request pipeline built with {} handlers", self.handlers.len());
        Mediator {
            handlers: self.handlers,
            logging: LoggingBehaviour,
        }
    }
}

/// Dispatches requests to their registered handlers.
///
/// Cheap to share behind an `Arc`; it holds no per-request state.
pub struct Mediator {
    handlers: HashMap<TypeId, BoxedHandler>,
    logging: LoggingBehaviour,
}

impl Mediator {
    pub async fn send<R: Request>(
        &self,
        ctx: &RequestContext,
        request: R,
    ) -> PipelineResult<R::Response> {
        self.logging
            .around(ctx, R::NAME, self.dispatch(ctx, request))
            .await
    }

    async fn dispatch<R: Request>(
        &self,
        ctx: &RequestContext,
        request: R,
    ) -> PipelineResult<R::Response> {
        let handler = self
            .handler::<R>()
            .ok_or(PipelineError::Unhandled(R::NAME))?;

        validate_request(&request)?;

        if let Some(denied) = authorization_outcome::<R>(ctx) {
            return Ok(denied);
        }

        Ok(handler.handle(ctx, request).await?)
    }

    fn handler<R: Request>(&self) -> Option<Arc<dyn RequestHandler<R>>> {
        self.handlers
            .get(&TypeId::of::<R>())?
            .downcast_ref::<Arc<dyn RequestHandler<R>>>()
            .cloned()
    }

    pub fn handles<R: Request>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<R>())
    }
}
