//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing user records and their role
//! rows. Roles are stored one row per role in `user_role`; the selected role lives on
//! the user row as `active_role`.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{model::user::Role, server::model::user::RoleSet};

/// A user row together with its role rows.
pub type UserWithRoles = (entity::user::Model, Vec<entity::user_role::Model>);

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a user and its role rows in one transaction.
    ///
    /// # Arguments
    /// - `provider_id` - Subject identifier from the OAuth provider
    /// - `name` - Display name
    /// - `email` - Optional e-mail address
    /// - `roles` - Initial role set; its active role is stored on the user row
    ///
    /// # Returns
    /// - `Ok((user, roles))` - The created user and role rows
    /// - `Err(DbErr)` - Database error, including a duplicate provider ID
    pub async fn create(
        &self,
        provider_id: String,
        name: String,
        email: Option<String>,
        roles: &RoleSet,
    ) -> Result<UserWithRoles, DbErr> {
        let txn = self.db.begin().await?;

        let user = entity::user::ActiveModel {
            provider_id: ActiveValue::Set(provider_id),
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            active_role: ActiveValue::Set(roles.active().as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut role_models = Vec::new();
        for role in roles.roles() {
            let model = entity::user_role::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                role: ActiveValue::Set(role.as_str().to_string()),
            }
            .insert(&txn)
            .await?;
            role_models.push(model);
        }

        txn.commit().await?;

        Ok((user, role_models))
    }

    /// Updates the name and e-mail reported by the provider on login.
    pub async fn update_profile(
        &self,
        id: i32,
        name: String,
        email: Option<String>,
    ) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::Unchanged(id),
            name: ActiveValue::Set(name),
            email: ActiveValue::Set(email),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Replaces a user's role rows and active role with the given role set.
    ///
    /// # Returns
    /// - `Ok((user, roles))` - The updated user and role rows
    /// - `Err(DbErr)` - Database error, rolled back
    pub async fn save_roles(&self, user_id: i32, roles: &RoleSet) -> Result<UserWithRoles, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::UserRole::delete_many()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        let mut role_models = Vec::new();
        for role in roles.roles() {
            let model = entity::user_role::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                role: ActiveValue::Set(role.as_str().to_string()),
            }
            .insert(&txn)
            .await?;
            role_models.push(model);
        }

        let user = entity::user::ActiveModel {
            id: ActiveValue::Unchanged(user_id),
            active_role: ActiveValue::Set(roles.active().as_str().to_string()),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;

        Ok((user, role_models))
    }

    /// Finds a user and its roles by primary key.
    ///
    /// # Returns
    /// - `Ok(Some((user, roles)))` - User found
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserWithRoles>, DbErr> {
        let Some(user) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let roles = self.get_roles(user.id).await?;

        Ok(Some((user, roles)))
    }

    /// Finds a user and its roles by the provider's subject identifier.
    pub async fn find_by_provider_id(
        &self,
        provider_id: &str,
    ) -> Result<Option<UserWithRoles>, DbErr> {
        let Some(user) = entity::prelude::User::find()
            .filter(entity::user::Column::ProviderId.eq(provider_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let roles = self.get_roles(user.id).await?;

        Ok(Some((user, roles)))
    }

    /// Checks if any user holds the admin role.
    ///
    /// Used during startup to decide whether a bootstrap admin code is needed.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin exists
    /// - `Ok(false)` - No admin exists (first-time setup scenario)
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::Role.eq(Role::Admin.as_str()))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Gets users with their roles, ordered alphabetically by name.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users to return per page
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<UserWithRoles>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Name)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let users = paginator.fetch_page(page).await?;

        let ids: Vec<i32> = users.iter().map(|u| u.id).collect();
        let mut roles_by_user: HashMap<i32, Vec<entity::user_role::Model>> = HashMap::new();
        for role in entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.is_in(ids))
            .all(self.db)
            .await?
        {
            roles_by_user.entry(role.user_id).or_default().push(role);
        }

        let users = users
            .into_iter()
            .map(|user| {
                let roles = roles_by_user.remove(&user.id).unwrap_or_default();
                (user, roles)
            })
            .collect();

        Ok((users, total))
    }

    async fn get_roles(&self, user_id: i32) -> Result<Vec<entity::user_role::Model>, DbErr> {
        entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .all(self.db)
            .await
    }
}
