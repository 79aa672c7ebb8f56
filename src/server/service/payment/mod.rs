//! Publication fee payments.
//!
//! A payment snapshots the fee quote at creation time. Zero-fee quotes are recorded as
//! waived without touching the gateway; everything else goes through Stripe Checkout
//! and is confirmed by reading the session back.

pub mod gateway;

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::{
    model::{manuscript::ManuscriptStatus, payment::PaymentStatus, user::Role},
    server::{
        data::payment::PaymentRepository,
        error::{auth::AuthError, AppError},
        model::{
            fee::FeeQuoteParams,
            notification::NotificationKind,
            payment::{CheckoutSession, CreatePaymentParams, Payment},
            user::User,
        },
        service::{
            fee::FeeService, manuscript::ManuscriptService, notification::NotificationService,
        },
        util::money::{from_cents, to_cents},
    },
};

use self::gateway::{CheckoutRequest, StripeClient};

/// Session statuses that mean the money has been collected.
const PAID_SESSION_STATUSES: &[&str] = &["paid", "no_payment_required"];

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
    gateway: Option<&'a StripeClient>,
}

impl<'a> PaymentService<'a> {
    pub fn new(db: &'a DatabaseConnection, gateway: Option<&'a StripeClient>) -> Self {
        Self { db, gateway }
    }

    /// Creates the publication fee payment for a manuscript.
    ///
    /// Checkout return links point at `app_url`.
    ///
    /// # Returns
    /// - `Ok(Payment)` - A waived payment, or a pending payment with a checkout URL
    /// - `Err(AppError::AuthErr)` - User is not the submitter
    /// - `Err(AppError::BadRequest)` - Manuscript has not been accepted
    /// - `Err(AppError::Conflict)` - A pending or settled payment already exists
    /// - `Err(AppError::FeeConfigMissing)` - No fee configuration saved
    /// - `Err(AppError::PaymentGatewayDisabled)` - Fee is due but no gateway is configured
    pub async fn create_for_manuscript(
        &self,
        manuscript_id: i32,
        user: &User,
        app_url: &str,
    ) -> Result<Payment, AppError> {
        let manuscript = ManuscriptService::new(self.db).get(manuscript_id).await?;

        if manuscript.submitter_id != user.id {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User is not the submitter of manuscript {}", manuscript_id),
            )
            .into());
        }
        if !matches!(
            manuscript.status,
            ManuscriptStatus::Accepted
                | ManuscriptStatus::CopyEditing
                | ManuscriptStatus::Production
                | ManuscriptStatus::Published
        ) {
            return Err(AppError::BadRequest(
                "The publication fee is due once the manuscript is accepted".to_string(),
            ));
        }

        let repo = PaymentRepository::new(self.db);
        if let Some(open) = repo.find_open_for_manuscript(manuscript_id).await? {
            return Err(AppError::Conflict(format!(
                "Manuscript already has a {} payment",
                open.status
            )));
        }

        let quote = FeeService::new(self.db)
            .quote(&FeeQuoteParams {
                article_type: manuscript.article_type.clone(),
                country: manuscript.country.clone(),
                institution: manuscript.institution.clone(),
            })
            .await?;

        if quote.final_fee == Decimal::ZERO {
            let payment = self
                .insert(&CreatePaymentParams {
                    manuscript_id,
                    user_id: user.id,
                    quote,
                    status: PaymentStatus::Waived,
                })
                .await?;

            tracing::info!("Publication fee for manuscript {} waived", manuscript_id);

            return Payment::from_entity(payment);
        }

        let Some(gateway) = self.gateway else {
            return Err(AppError::PaymentGatewayDisabled);
        };

        let amount_cents = to_cents(quote.final_fee)?;
        let currency = quote.currency.clone();
        let payment = self
            .insert(&CreatePaymentParams {
                manuscript_id,
                user_id: user.id,
                quote,
                status: PaymentStatus::Pending,
            })
            .await?;

        let request = CheckoutRequest {
            payment_id: payment.id,
            manuscript_id,
            description: format!("Publication fee: {}", manuscript.title),
            amount_cents,
            currency,
            success_url: format!("{}/payments/{}?status=success", app_url, payment.id),
            cancel_url: format!("{}/payments/{}?status=cancel", app_url, payment.id),
        };

        let session = match gateway.create_checkout_session(&request).await {
            Ok(session) => session,
            Err(err) => {
                tracing::error!(
                    "Failed to create checkout session for payment {}: {}",
                    payment.id,
                    err
                );
                repo.update_status(payment.id, PaymentStatus::Failed, None)
                    .await?;
                return Err(err);
            }
        };

        let payment = repo
            .attach_checkout(payment.id, session.id, session.url)
            .await?;

        Payment::from_entity(payment)
    }

    /// Confirms a payment by reading its checkout session.
    ///
    /// Pending payments are checked, and so are expired payments with a session, in
    /// case the payer finished checkout after expiry. Other payments are returned
    /// unchanged.
    ///
    /// # Returns
    /// - `Ok(Payment)` - Payment, completed when the session reports it paid
    /// - `Err(AppError::NotFound)` - No payment with that ID
    /// - `Err(AppError::AuthErr)` - User is neither the payer nor an admin
    /// - `Err(AppError::PaymentGatewayDisabled)` - No gateway configured
    pub async fn confirm(&self, payment_id: i32, user: &User) -> Result<Payment, AppError> {
        let repo = PaymentRepository::new(self.db);

        let Some(payment) = repo.find_by_id(payment_id).await? else {
            return Err(AppError::NotFound("Payment not found".to_string()));
        };
        let payment = Payment::from_entity(payment)?;

        if payment.user_id != user.id && !user.roles.contains(Role::Admin) {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User may not confirm payment {}", payment_id),
            )
            .into());
        }
        let recheck = match payment.status {
            PaymentStatus::Pending => true,
            PaymentStatus::Expired => payment.stripe_session_id.is_some(),
            _ => false,
        };
        if !recheck {
            return Ok(payment);
        }

        let Some(gateway) = self.gateway else {
            return Err(AppError::PaymentGatewayDisabled);
        };
        let Some(session_id) = payment.stripe_session_id.as_deref() else {
            return Err(AppError::BadRequest(
                "Payment has no checkout session".to_string(),
            ));
        };

        let session = gateway.get_checkout_session(session_id).await?;
        if !is_paid(&session) {
            tracing::debug!(
                "Checkout session for payment {} is {}",
                payment_id,
                session.payment_status
            );
            return Ok(payment);
        }

        self.complete(payment_id, session).await
    }

    /// Lists a manuscript's payments for its submitter or editorial staff.
    pub async fn get_for_manuscript(
        &self,
        manuscript_id: i32,
        user: &User,
    ) -> Result<Vec<Payment>, AppError> {
        let manuscript = ManuscriptService::new(self.db).get(manuscript_id).await?;

        if manuscript.submitter_id != user.id
            && !user.roles.contains_any(&[Role::Editor, Role::Admin])
        {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User may not view payments of manuscript {}", manuscript_id),
            )
            .into());
        }

        PaymentRepository::new(self.db)
            .get_by_manuscript(manuscript_id)
            .await?
            .into_iter()
            .map(Payment::from_entity)
            .collect()
    }

    /// Expires payments left pending for longer than `ttl_days` and notifies payers.
    ///
    /// With a gateway configured, each stale payment's checkout session is read
    /// first: paid sessions complete the payment instead, and payments whose session
    /// cannot be read stay pending until the next run.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of payments expired
    /// - `Err(AppError)` - Database error
    pub async fn expire_stale(&self, ttl_days: i64) -> Result<usize, AppError> {
        let cutoff = Utc::now() - Duration::days(ttl_days);
        let repo = PaymentRepository::new(self.db);
        let notifications = NotificationService::new(self.db);
        let mut expired = 0;

        for payment in repo.find_pending_before(cutoff).await? {
            if let (Some(gateway), Some(session_id)) =
                (self.gateway, payment.stripe_session_id.as_deref())
            {
                match gateway.get_checkout_session(session_id).await {
                    Ok(session) if is_paid(&session) => {
                        self.complete(payment.id, session).await?;
                        continue;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(
                            "Keeping payment {} pending, session lookup failed: {}",
                            payment.id,
                            err
                        );
                        continue;
                    }
                }
            }

            // Skip rows settled between the read and the update
            let Some(payment) = repo.expire(payment.id).await? else {
                continue;
            };

            notifications
                .notify(
                    payment.user_id,
                    NotificationKind::PaymentExpired,
                    format!(
                        "Your payment of {} {} expired before it was completed",
                        from_cents(payment.amount),
                        payment.currency
                    ),
                    Some(payment.manuscript_id),
                )
                .await?;
            expired += 1;
        }

        Ok(expired)
    }

    /// Stores a new payment, turning a lost race for the manuscript into a conflict.
    async fn insert(
        &self,
        params: &CreatePaymentParams,
    ) -> Result<entity::payment::Model, AppError> {
        let created = PaymentRepository::new(self.db).create(params).await;

        match created {
            Ok(Some(payment)) => Ok(payment),
            Ok(None) => Err(open_payment_conflict(params.manuscript_id)),
            Err(err) if is_unique_violation(&err) => {
                Err(open_payment_conflict(params.manuscript_id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Marks a payment completed from its paid checkout session.
    async fn complete(
        &self,
        payment_id: i32,
        session: CheckoutSession,
    ) -> Result<Payment, AppError> {
        let repo = PaymentRepository::new(self.db);

        if repo
            .mark_completed(payment_id, session.payment_intent)
            .await?
        {
            tracing::info!("Payment {} completed", payment_id);
        }

        let Some(payment) = repo.find_by_id(payment_id).await? else {
            return Err(AppError::NotFound("Payment not found".to_string()));
        };

        Payment::from_entity(payment)
    }
}

fn is_paid(session: &CheckoutSession) -> bool {
    PAID_SESSION_STATUSES.contains(&session.payment_status.as_str())
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn open_payment_conflict(manuscript_id: i32) -> AppError {
    AppError::Conflict(format!(
        "Manuscript {} already has an open payment",
        manuscript_id
    ))
}
