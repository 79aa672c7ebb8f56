//! User service for business logic.
//!
//! This module provides the `UserService` for user lookups, listings and role
//! management. Role changes go through `RoleSet`, which keeps the active role inside
//! the user's role set.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::user::{UserRepository, UserWithRoles},
        error::AppError,
        model::user::{PaginatedUsers, RoleSet, User},
    },
};

/// Service providing business logic for user management.
pub struct UserService<'a> {
    pub db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserService` - New service instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(AppError)` - Database error or corrupt role data
    pub async fn get_user(&self, user_id: i32) -> Result<Option<User>, AppError> {
        let user_repo = UserRepository::new(self.db);

        match user_repo.find_by_id(user_id).await? {
            Some((user, roles)) => Ok(Some(User::from_entity(user, roles)?)),
            None => Ok(None),
        }
    }

    /// Retrieves all users with pagination.
    ///
    /// Returns a paginated collection of users ordered alphabetically by name.
    /// Calculates total pages based on the per_page parameter and total user count.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users for the requested page with pagination metadata
    /// - `Err(AppError)` - Database error during pagination query
    pub async fn get_all_users(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedUsers, AppError> {
        let user_repo = UserRepository::new(self.db);

        let (users, total_items) = user_repo.get_all_paginated(page, per_page).await?;

        let users = users
            .into_iter()
            .map(|(user, roles)| User::from_entity(user, roles))
            .collect::<Result<Vec<_>, _>>()?;
        let total_pages = total_items.div_ceil(per_page.max(1));

        Ok(PaginatedUsers {
            users,
            total: total_items,
            page,
            per_page,
            total_pages,
        })
    }

    /// Switches the role a user acts as.
    ///
    /// # Returns
    /// - `Ok(User)` - User with the new active role
    /// - `Err(AppError::NotFound)` - User does not exist
    /// - `Err(AppError::RoleErr)` - User does not hold the role
    pub async fn set_active_role(&self, user_id: i32, role: Role) -> Result<User, AppError> {
        self.update_roles(user_id, |roles| roles.set_active(role).map_err(AppError::from))
            .await
    }

    /// Grants a role to a user. Granting a held role is a no-op.
    ///
    /// # Returns
    /// - `Ok(User)` - User with the role granted
    /// - `Err(AppError::NotFound)` - User does not exist
    pub async fn grant_role(&self, user_id: i32, role: Role) -> Result<User, AppError> {
        let user = self
            .update_roles(user_id, |roles| {
                roles.grant(role);
                Ok(())
            })
            .await?;

        tracing::info!("Granted role {} to user {}", role.as_str(), user_id);

        Ok(user)
    }

    /// Revokes a role from a user.
    ///
    /// When the active role is revoked the user falls back to their most privileged
    /// remaining role.
    ///
    /// # Returns
    /// - `Ok(User)` - User without the role
    /// - `Err(AppError::NotFound)` - User does not exist
    /// - `Err(AppError::RoleErr)` - Role not held, or it is the user's last role
    pub async fn revoke_role(&self, user_id: i32, role: Role) -> Result<User, AppError> {
        let user = self
            .update_roles(user_id, |roles| roles.revoke(role).map_err(AppError::from))
            .await?;

        tracing::info!("Revoked role {} from user {}", role.as_str(), user_id);

        Ok(user)
    }

    async fn update_roles<F>(&self, user_id: i32, change: F) -> Result<User, AppError>
    where
        F: FnOnce(&mut RoleSet) -> Result<(), AppError>,
    {
        let user_repo = UserRepository::new(self.db);

        let Some((user, roles)) = user_repo.find_by_id(user_id).await? else {
            return Err(AppError::NotFound("User not found".to_string()));
        };
        let mut user = User::from_entity(user, roles)?;

        change(&mut user.roles)?;

        let (user, roles): UserWithRoles = user_repo.save_roles(user_id, &user.roles).await?;

        User::from_entity(user, roles)
    }
}
