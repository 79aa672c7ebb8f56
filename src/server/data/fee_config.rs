use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

/// Primary key of the single active fee configuration row.
const ACTIVE_FEE_CONFIG_ID: i32 = 1;

pub struct FeeConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FeeConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the active fee configuration row.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - Configuration has been saved
    /// - `Ok(None)` - No configuration exists yet
    /// - `Err(DbErr)` - Database error
    pub async fn get_active(&self) -> Result<Option<entity::fee_config::Model>, DbErr> {
        entity::prelude::FeeConfig::find_by_id(ACTIVE_FEE_CONFIG_ID)
            .one(self.db)
            .await
    }

    /// Inserts or replaces the active fee configuration document.
    ///
    /// # Arguments
    /// - `document` - Serialized fee schedule
    /// - `updated_by` - ID of the admin saving the configuration
    ///
    /// # Returns
    /// - `Ok(Model)` - The stored configuration row
    /// - `Err(DbErr)` - Database error
    pub async fn save(
        &self,
        document: serde_json::Value,
        updated_by: i32,
    ) -> Result<entity::fee_config::Model, DbErr> {
        entity::prelude::FeeConfig::insert(entity::fee_config::ActiveModel {
            id: ActiveValue::Set(ACTIVE_FEE_CONFIG_ID),
            document: ActiveValue::Set(document),
            updated_by: ActiveValue::Set(Some(updated_by)),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::fee_config::Column::Id)
                .update_columns([
                    entity::fee_config::Column::Document,
                    entity::fee_config::Column::UpdatedBy,
                    entity::fee_config::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await
    }
}
