//! Payment factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test payments.
pub struct PaymentFactory<'a> {
    db: &'a DatabaseConnection,
    manuscript_id: i32,
    user_id: i32,
    amount: i64,
    status: String,
    session_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'a> PaymentFactory<'a> {
    /// Defaults to a pending payment of 1500.00 USD created now.
    pub fn new(db: &'a DatabaseConnection, manuscript_id: i32, user_id: i32) -> Self {
        Self {
            db,
            manuscript_id,
            user_id,
            amount: 150_000,
            status: "pending".to_string(),
            session_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Attaches a checkout session ID.
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub async fn build(self) -> Result<entity::payment::Model, DbErr> {
        entity::payment::ActiveModel {
            manuscript_id: ActiveValue::Set(self.manuscript_id),
            user_id: ActiveValue::Set(self.user_id),
            base_fee: ActiveValue::Set(self.amount),
            amount: ActiveValue::Set(self.amount),
            discount_amount: ActiveValue::Set(0),
            discount_reason: ActiveValue::Set(None),
            is_waiver: ActiveValue::Set(false),
            currency: ActiveValue::Set("USD".to_string()),
            status: ActiveValue::Set(self.status),
            stripe_session_id: ActiveValue::Set(self.session_id),
            stripe_payment_intent: ActiveValue::Set(None),
            checkout_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
