use async_trait::async_trait;
use deskcore::application::pipeline::{
    Actor, HandlerRegistry, HandlerResult, Mediator, Request, RequestContext, RequestHandler,
};
use deskcore::domain::{Error, Outcome, ValidationErrors};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const TENANT: &str = "acme";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ticket {
    pub id: u64,
    pub title: String,
    pub assignee: Option<String>,
}

/// Tickets keyed by (tenant, id).
#[derive(Default)]
pub struct TicketStore {
    tickets: Mutex<HashMap<(String, u64), Ticket>>,
    next_id: AtomicU64,
    unavailable: AtomicBool,
}

impl TicketStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every following call fail as if storage were down.
    pub fn take_offline(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn with_tickets<T>(
        &self,
        f: impl FnOnce(&mut HashMap<(String, u64), Ticket>) -> T,
    ) -> anyhow::Result<T> {
        if self.unavailable.load(Ordering::SeqCst) {
            anyhow::bail!("database is locked (tickets.db)");
        }
        let mut tickets = self
            .tickets
            .lock()
            .map_err(|_| anyhow::anyhow!("ticket store poisoned"))?;
        Ok(f(&mut tickets))
    }
}

pub struct GetTicket {
    pub id: u64,
}

impl Request for GetTicket {
    type Response = Ticket;
    const NAME: &'static str = "GetTicket";
    const PERMISSION: Option<&'static str> = Some("tickets:read");
}

pub struct CreateTicket {
    pub title: String,
}

impl Request for CreateTicket {
    type Response = u64;
    const NAME: &'static str = "CreateTicket";
    const PERMISSION: Option<&'static str> = Some("tickets:write");

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.ensure(!self.title.trim().is_empty(), "Title", "Title is required");
        errors.ensure(
            self.title.chars().count() <= 200,
            "Title",
            "Title must be at most 200 characters",
        );
        errors
    }
}

pub struct AssignTicket {
    pub id: u64,
    pub assignee: String,
}

impl Request for AssignTicket {
    type Response = ();
    const NAME: &'static str = "AssignTicket";
    const PERMISSION: Option<&'static str> = Some("tickets:assign");
}

pub struct TicketHandlers {
    store: Arc<TicketStore>,
}

#[async_trait]
impl RequestHandler<GetTicket> for TicketHandlers {
    async fn handle(&self, ctx: &RequestContext, request: GetTicket) -> HandlerResult<Ticket> {
        let ticket = self
            .store
            .with_tickets(|tickets| tickets.get(&(ctx.tenant_id.clone(), request.id)).cloned())?;

        Ok(match ticket {
            Some(ticket) => Outcome::success(ticket),
            None => Outcome::failure(Error::not_found("Ticket", request.id)),
        })
    }
}

#[async_trait]
impl RequestHandler<CreateTicket> for TicketHandlers {
    async fn handle(&self, ctx: &RequestContext, request: CreateTicket) -> HandlerResult<u64> {
        let id = self.store.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.with_tickets(|tickets| {
            tickets.insert(
                (ctx.tenant_id.clone(), id),
                Ticket {
                    id,
                    title: request.title,
                    assignee: None,
                },
            )
        })?;
        Ok(id.into())
    }
}

#[async_trait]
impl RequestHandler<AssignTicket> for TicketHandlers {
    async fn handle(&self, ctx: &RequestContext, request: AssignTicket) -> HandlerResult<()> {
        self.store.with_tickets(|tickets| {
            match tickets.get_mut(&(ctx.tenant_id.clone(), request.id)) {
                None => Outcome::failure(Error::not_found("Ticket", request.id)),
                Some(ticket)
                    if ticket
                        .assignee
                        .as_ref()
                        .is_some_and(|current| current != &request.assignee) =>
                {
                    Outcome::failure(Error::conflict(format!(
                        "Ticket {} is already assigned",
                        request.id
                    )))
                }
                Some(ticket) => {
                    ticket.assignee = Some(request.assignee);
                    Outcome::ok()
                }
            }
        })
    }
}

pub fn build_mediator(store: Arc<TicketStore>) -> Mediator {
    HandlerRegistry::new()
        .register::<GetTicket>(TicketHandlers {
            store: store.clone(),
        })
        .register::<CreateTicket>(TicketHandlers {
            store: store.clone(),
        })
        .register::<AssignTicket>(TicketHandlers { store })
        .build()
}

pub fn agent_context() -> RequestContext {
    RequestContext::new(TENANT).with_actor(Actor::new(
        "agent-1",
        ["tickets:read", "tickets:write", "tickets:assign"],
    ))
}

pub fn viewer_context() -> RequestContext {
    RequestContext::new(TENANT).with_actor(Actor::new("viewer-1", ["tickets:read"]))
}
