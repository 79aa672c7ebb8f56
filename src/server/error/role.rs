use thiserror::Error;

use crate::model::user::Role;

/// Violations of the role set invariants.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RoleError {
    /// A role set must hold at least one role.
    #[error("A user must hold at least one role")]
    Empty,

    /// The requested role is not one the user holds.
    #[error("User does not hold the '{}' role", .0.as_str())]
    NotHeld(Role),

    /// Revoking would leave the user without any role.
    #[error("Cannot revoke '{}', it is the user's only role", .0.as_str())]
    LastRole(Role),
}
