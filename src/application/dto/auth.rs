// src/application/dto/auth.rs
use crate::domain::identity::Role;

/// Identity attached to every call by the session collaborator. The core
/// trusts these fields; role checks happen in the services.
#[derive(Debug, Clone)]
pub struct AuthenticatedActor {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub ip_address: Option<String>,
}

impl AuthenticatedActor {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
