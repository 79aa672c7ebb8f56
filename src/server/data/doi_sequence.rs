//! Atomic DOI sequence counters.
//!
//! Each DOI stem has a counter row keyed by scope, e.g. `manuscript:2025-01-01` or
//! `correction:2025`. Reserving a number is a single upsert, so two concurrent
//! reservations for the same scope can never observe the same value.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, DbErr, EntityTrait};

pub struct DoiSequenceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DoiSequenceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reserves the next sequence number for a scope.
    ///
    /// Creates the counter with `seed` on first use, otherwise increments the stored
    /// value, in one `INSERT ... ON CONFLICT DO UPDATE ... RETURNING` statement.
    ///
    /// # Arguments
    /// - `scope` - Counter key
    /// - `seed` - Value to start from when the counter does not exist yet
    ///
    /// # Returns
    /// - `Ok(i32)` - The reserved sequence number
    /// - `Err(DbErr)` - Database error
    pub async fn reserve(&self, scope: &str, seed: i32) -> Result<i32, DbErr> {
        let counter = entity::prelude::DoiSequence::insert(entity::doi_sequence::ActiveModel {
            scope: ActiveValue::Set(scope.to_string()),
            value: ActiveValue::Set(seed),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::doi_sequence::Column::Scope)
                .value(
                    entity::doi_sequence::Column::Value,
                    sea_orm::sea_query::Expr::cust("\"value\" + 1"),
                )
                .update_column(entity::doi_sequence::Column::UpdatedAt)
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(counter.value)
    }
}
