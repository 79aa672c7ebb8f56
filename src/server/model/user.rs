//! User domain models and parameters.
//!
//! Users authenticate through the OAuth provider and hold a non-empty set of roles
//! with one of them selected as the active role.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::{
    model::user::{PaginatedUsersDto, Role, UserDto},
    server::error::{internal::InternalError, role::RoleError, AppError},
};

/// Roles held by a user together with the role they currently act as.
///
/// Invariants: the set is never empty and `active` is always a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
    active: Role,
}

impl RoleSet {
    /// Builds a role set, rejecting an empty set or an active role outside it.
    pub fn new(roles: impl IntoIterator<Item = Role>, active: Role) -> Result<Self, RoleError> {
        let roles: BTreeSet<Role> = roles.into_iter().collect();

        if roles.is_empty() {
            return Err(RoleError::Empty);
        }
        if !roles.contains(&active) {
            return Err(RoleError::NotHeld(active));
        }

        Ok(Self { roles, active })
    }

    /// Role set of a newly registered user.
    pub fn author() -> Self {
        Self {
            roles: BTreeSet::from([Role::Author]),
            active: Role::Author,
        }
    }

    pub fn active(&self) -> Role {
        self.active
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the user holds any of the given roles.
    pub fn contains_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.roles.contains(role))
    }

    /// Roles in ascending order of privilege.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }

    /// Most privileged role held.
    pub fn highest(&self) -> Role {
        self.roles.iter().next_back().copied().unwrap_or(self.active)
    }

    pub fn set_active(&mut self, role: Role) -> Result<(), RoleError> {
        if !self.roles.contains(&role) {
            return Err(RoleError::NotHeld(role));
        }
        self.active = role;
        Ok(())
    }

    /// Adds a role. Returns `false` when it was already held.
    pub fn grant(&mut self, role: Role) -> bool {
        self.roles.insert(role)
    }

    /// Removes a role, moving the active role to the most privileged remaining
    /// role when the active one is revoked.
    pub fn revoke(&mut self, role: Role) -> Result<(), RoleError> {
        if !self.roles.contains(&role) {
            return Err(RoleError::NotHeld(role));
        }
        if self.roles.len() == 1 {
            return Err(RoleError::LastRole(role));
        }

        self.roles.remove(&role);
        if self.active == role {
            self.active = self.highest();
        }

        Ok(())
    }
}

/// User with provider identity and role membership.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    /// Subject identifier issued by the OAuth provider.
    pub provider_id: String,
    pub name: String,
    pub email: Option<String>,
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            roles: self.roles.roles().collect(),
            active_role: self.roles.active(),
        }
    }

    /// Converts an entity model and its role rows to a user domain model at the
    /// repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr)` - A stored role string is unknown
    /// - `Err(AppError::RoleErr)` - Stored roles violate the role set invariants
    pub fn from_entity(
        entity: entity::user::Model,
        role_entities: Vec<entity::user_role::Model>,
    ) -> Result<Self, AppError> {
        let roles = role_entities
            .into_iter()
            .map(|r| parse_role(&r.role))
            .collect::<Result<Vec<_>, _>>()?;
        let active = parse_role(&entity.active_role)?;

        Ok(Self {
            id: entity.id,
            provider_id: entity.provider_id,
            name: entity.name,
            email: entity.email,
            roles: RoleSet::new(roles, active)?,
            created_at: entity.created_at,
        })
    }
}

fn parse_role(value: &str) -> Result<Role, InternalError> {
    Role::parse(value).ok_or_else(|| InternalError::UnknownEnumValue {
        field: "role",
        value: value.to_string(),
    })
}

/// Parameters for upserting a user after a successful OAuth login.
///
/// New users receive the `author` role. When `grant_admin` is set the user also
/// receives `admin` and acts as admin.
#[derive(Debug, Clone)]
pub struct UpsertUserParam {
    pub provider_id: String,
    pub name: String,
    pub email: Option<String>,
    pub grant_admin: bool,
}

/// Paginated collection of users with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        let users = self.users.into_iter().map(|u| u.into_dto()).collect();

        PaginatedUsersDto {
            users,
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
