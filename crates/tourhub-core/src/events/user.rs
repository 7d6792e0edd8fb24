//! User-related domain events.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events related to user moderation and lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// A user account was suspended.
    Suspended {
        /// The suspended user.
        user_id: Uuid,
        /// The stated reason.
        reason: String,
    },
    /// A suspended user account was restored.
    Restored {
        /// The restored user.
        user_id: Uuid,
    },
    /// A host/guide role was validated by an administrator.
    RoleValidated {
        /// The validated user.
        user_id: Uuid,
    },
    /// A host/guide account was deactivated; their routes must stop
    /// surfacing to the public.
    OwnerDeactivated {
        /// The deactivated owner.
        owner_id: Uuid,
    },
}
