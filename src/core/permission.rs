//! Field-level permissions for generated resolvers
//!
//! A resolver built with permissions checks every one of them before touching
//! its collaborators. The request identity is an [`AuthContext`] placed in the
//! GraphQL request data; requests without one are treated as anonymous.

use async_graphql::Context;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// A permission guarding a single field
#[async_trait]
pub trait Permission: Send + Sync {
    /// Message reported to the client when access is refused
    fn message(&self) -> &str {
        "User is not authorized to access this field"
    }

    /// Check whether the current request may resolve the field
    async fn has_permission(&self, info: &Context<'_>) -> bool;
}

/// Shared handle to a permission
pub type PermissionRef = Arc<dyn Permission>;

/// Identity of the requester
#[derive(Debug, Clone)]
pub enum AuthContext {
    User { user_id: Uuid, roles: Vec<String> },
    Admin { admin_id: Uuid },
    Anonymous,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::Admin { .. })
    }

    /// Id of the requester, admins included
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Admin { admin_id } => Some(*admin_id),
            AuthContext::Anonymous => None,
        }
    }

    fn has_any_role(&self, wanted: &[String]) -> bool {
        match self {
            AuthContext::User { roles, .. } => roles.iter().any(|r| wanted.contains(r)),
            AuthContext::Admin { .. } | AuthContext::Anonymous => false,
        }
    }
}

/// Declarative permission built from the request identity
///
/// Policies compose with [`AuthPolicy::And`] and [`AuthPolicy::Or`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPolicy {
    Public,
    Authenticated,
    /// Any of the listed roles
    HasRole(Vec<String>),
    AdminOnly,
    And(Vec<AuthPolicy>),
    Or(Vec<AuthPolicy>),
}

impl AuthPolicy {
    /// Whether `context` satisfies the policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.user_id().is_some(),
            AuthPolicy::HasRole(roles) => context.has_any_role(roles),
            AuthPolicy::AdminOnly => context.is_admin(),
            AuthPolicy::And(all) => all.iter().all(|p| p.check(context)),
            AuthPolicy::Or(any) => any.iter().any(|p| p.check(context)),
        }
    }

    /// Shared handle usable in a resolver's permission list
    pub fn into_permission(self) -> PermissionRef {
        Arc::new(self)
    }
}

#[async_trait]
impl Permission for AuthPolicy {
    async fn has_permission(&self, info: &Context<'_>) -> bool {
        match info.data_opt::<AuthContext>() {
            Some(context) => self.check(context),
            None => self.check(&AuthContext::Anonymous),
        }
    }
}

/// Run every permission in order, stopping at the first refusal
///
/// Returns the refusing permission's message.
pub(crate) async fn check_all(
    permissions: &[PermissionRef],
    info: &Context<'_>,
) -> Result<(), String> {
    for permission in permissions {
        if !permission.has_permission(info).await {
            return Err(permission.message().to_string());
        }
    }
    Ok(())
}
