use sea_orm::DatabaseConnection;

use crate::server::{error::AppError, model::user::User, service::user::UserService};

mod auth;
mod correction;
mod fee;
mod user;
mod volume;

/// Loads a factory-created user as a domain model.
async fn load_user(db: &DatabaseConnection, id: i32) -> Result<User, AppError> {
    UserService::new(db)
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
}
