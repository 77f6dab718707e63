//! Session Actor

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::Role;

/// The admin behind a session: who they are and which role they act as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionActor {
    /// Admin user ID.
    pub id: Uuid,
    /// Role chosen for this session.
    pub role: Role,
}

impl SessionActor {
    #[must_use]
    pub const fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}
