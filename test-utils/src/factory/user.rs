//! User factory for creating test user entities with role rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Factory for creating test users with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let editor = UserFactory::new(&db)
///     .name("Editor")
///     .roles(&["author", "editor"])
///     .active_role("editor")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    provider_id: String,
    name: String,
    email: Option<String>,
    roles: Vec<String>,
    active_role: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - provider_id: `"provider_{id}"`
    /// - name: `"User {id}"`
    /// - roles: `["author"]`, active role `author`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            provider_id: format!("provider_{}", id),
            name: format!("User {}", id),
            email: Some(format!("user{}@example.org", id)),
            roles: vec!["author".to_string()],
            active_role: None,
        }
    }

    pub fn provider_id(mut self, provider_id: impl Into<String>) -> Self {
        self.provider_id = provider_id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(str::to_string);
        self
    }

    /// Replaces the role set.
    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.roles = roles.iter().map(|r| r.to_string()).collect();
        self
    }

    /// Sets the active role. Defaults to the last role in the set.
    pub fn active_role(mut self, role: impl Into<String>) -> Self {
        self.active_role = Some(role.into());
        self
    }

    /// Builds and inserts the user entity and its role rows.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        let active_role = self
            .active_role
            .or_else(|| self.roles.last().cloned())
            .unwrap_or_else(|| "author".to_string());

        let user = entity::user::ActiveModel {
            provider_id: ActiveValue::Set(self.provider_id),
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            active_role: ActiveValue::Set(active_role),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        if !self.roles.is_empty() {
            let rows = self.roles.into_iter().map(|role| entity::user_role::ActiveModel {
                user_id: ActiveValue::Set(user.id),
                role: ActiveValue::Set(role),
            });
            entity::prelude::UserRole::insert_many(rows)
                .exec(self.db)
                .await?;
        }

        Ok(user)
    }
}

/// Creates an author with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a user holding the given roles, acting as the last one.
pub async fn create_user_with_roles(
    db: &DatabaseConnection,
    roles: &[&str],
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).roles(roles).build().await
}
