//! Payment data repository.
//!
//! Amounts are stored as integer cents; conversion from the decimal fee quote happens
//! at insert time.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    model::payment::PaymentStatus,
    server::{model::payment::CreatePaymentParams, util::money::to_cents},
};

pub struct PaymentRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a payment record from a fee quote unless the manuscript already has an
    /// open payment.
    ///
    /// The open-payment check and the insert run in one transaction.
    ///
    /// # Arguments
    /// - `params` - Manuscript, payer, quote and initial status
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The created payment
    /// - `Ok(None)` - A pending or settled payment already exists
    /// - `Err(DbErr)` - Database error, or an amount that does not fit in cents
    pub async fn create(
        &self,
        params: &CreatePaymentParams,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        let cents = |amount| to_cents(amount).map_err(|e| DbErr::Custom(e.to_string()));
        let now = Utc::now();

        let payment = entity::payment::ActiveModel {
            manuscript_id: ActiveValue::Set(params.manuscript_id),
            user_id: ActiveValue::Set(params.user_id),
            base_fee: ActiveValue::Set(cents(params.quote.base_fee)?),
            amount: ActiveValue::Set(cents(params.quote.final_fee)?),
            discount_amount: ActiveValue::Set(cents(params.quote.discount_amount)?),
            discount_reason: ActiveValue::Set(params.quote.discount_reason.clone()),
            is_waiver: ActiveValue::Set(params.quote.is_waiver),
            currency: ActiveValue::Set(params.quote.currency.clone()),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            stripe_session_id: ActiveValue::Set(None),
            stripe_payment_intent: ActiveValue::Set(None),
            checkout_url: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;

        if find_open(&txn, params.manuscript_id).await?.is_some() {
            txn.rollback().await?;
            return Ok(None);
        }
        let payment = payment.insert(&txn).await?;

        txn.commit().await?;

        Ok(Some(payment))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find_by_id(id).one(self.db).await
    }

    pub async fn get_by_manuscript(
        &self,
        manuscript_id: i32,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::ManuscriptId.eq(manuscript_id))
            .order_by_desc(entity::payment::Column::CreatedAt)
            .order_by_desc(entity::payment::Column::Id)
            .all(self.db)
            .await
    }

    /// Finds a payment for the manuscript that is still pending or already settled.
    ///
    /// Failed, expired and refunded payments do not block a new checkout.
    pub async fn find_open_for_manuscript(
        &self,
        manuscript_id: i32,
    ) -> Result<Option<entity::payment::Model>, DbErr> {
        find_open(self.db, manuscript_id).await
    }

    /// Stores the checkout session created at the payment gateway.
    pub async fn attach_checkout(
        &self,
        id: i32,
        session_id: String,
        checkout_url: Option<String>,
    ) -> Result<entity::payment::Model, DbErr> {
        entity::payment::ActiveModel {
            id: ActiveValue::Unchanged(id),
            stripe_session_id: ActiveValue::Set(Some(session_id)),
            checkout_url: ActiveValue::Set(checkout_url),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .update(self.db)
        .await
    }

    /// Updates a payment's status, recording the gateway's payment intent when known.
    pub async fn update_status(
        &self,
        id: i32,
        status: PaymentStatus,
        payment_intent: Option<String>,
    ) -> Result<entity::payment::Model, DbErr> {
        let mut payment = entity::payment::ActiveModel {
            id: ActiveValue::Unchanged(id),
            status: ActiveValue::Set(status.as_str().to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };
        if payment_intent.is_some() {
            payment.stripe_payment_intent = ActiveValue::Set(payment_intent);
        }

        payment.update(self.db).await
    }

    /// Marks a pending or expired payment completed.
    ///
    /// # Returns
    /// - `Ok(true)` - Payment completed
    /// - `Ok(false)` - Payment is in another state or does not exist
    /// - `Err(DbErr)` - Database error
    pub async fn mark_completed(
        &self,
        id: i32,
        payment_intent: Option<String>,
    ) -> Result<bool, DbErr> {
        let mut update = entity::prelude::Payment::update_many()
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Completed.as_str()),
            )
            .col_expr(entity::payment::Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(payment_intent) = payment_intent {
            update = update.col_expr(
                entity::payment::Column::StripePaymentIntent,
                Expr::value(payment_intent),
            );
        }

        let result = update
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.is_in([
                PaymentStatus::Pending.as_str(),
                PaymentStatus::Expired.as_str(),
            ]))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets pending payments created before `cutoff`, oldest first.
    pub async fn find_pending_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<entity::payment::Model>, DbErr> {
        entity::prelude::Payment::find()
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending.as_str()))
            .filter(entity::payment::Column::CreatedAt.lt(cutoff))
            .order_by_asc(entity::payment::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Marks a payment expired if it is still pending.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The expired payment
    /// - `Ok(None)` - Payment was settled in the meantime or does not exist
    /// - `Err(DbErr)` - Database error
    pub async fn expire(&self, id: i32) -> Result<Option<entity::payment::Model>, DbErr> {
        let result = entity::prelude::Payment::update_many()
            .col_expr(
                entity::payment::Column::Status,
                Expr::value(PaymentStatus::Expired.as_str()),
            )
            .col_expr(entity::payment::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::payment::Column::Id.eq(id))
            .filter(entity::payment::Column::Status.eq(PaymentStatus::Pending.as_str()))
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}

async fn find_open<C: ConnectionTrait>(
    db: &C,
    manuscript_id: i32,
) -> Result<Option<entity::payment::Model>, DbErr> {
    entity::prelude::Payment::find()
        .filter(entity::payment::Column::ManuscriptId.eq(manuscript_id))
        .filter(entity::payment::Column::Status.is_in([
            PaymentStatus::Pending.as_str(),
            PaymentStatus::Completed.as_str(),
            PaymentStatus::Waived.as_str(),
        ]))
        .order_by_desc(entity::payment::Column::Id)
        .one(db)
        .await
}
