use uuid::Uuid;

/// Authenticated caller of a request.
///
/// Permissions are the union of every role the user holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub permissions: Vec<String>,
}

impl Actor {
    pub fn new<I, P>(user_id: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let mut permissions: Vec<String> = permissions.into_iter().map(Into::into).collect();
        permissions.sort();
        permissions.dedup();
        Self {
            user_id: user_id.into(),
            permissions,
        }
    }

    /// Builds an actor from the permission sets of several roles.
    pub fn from_roles<'a>(user_id: impl Into<String>, roles: &[&'a [&'a str]]) -> Self {
        Self::new(user_id, roles.iter().flat_map(|role| role.iter().copied()))
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    pub fn has_all_permissions(&self, permissions: &[&str]) -> bool {
        permissions.iter().all(|p| self.has_permission(p))
    }
}

/// Per-request data handed to every pipeline stage and handler.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub tenant_id: String,
    pub actor: Option<Actor>,
}

impl RequestContext {
    /// Anonymous context for `tenant_id` with a fresh request id.
    pub fn new(tenant_id: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            tenant_id: tenant_id.into(),
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }
}
