// src/application/ports/identity.rs
//
// Token verification is an external concern; the core only consumes the
// resulting (actor id, role) pair and trusts it.
use crate::application::dto::AuthenticatedActor;
use crate::application::error::ApplicationResult;
use async_trait::async_trait;

#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedActor>;
}
