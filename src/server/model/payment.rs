//! Payment domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    model::payment::{PaymentDto, PaymentStatus},
    server::{
        error::{internal::InternalError, AppError},
        model::fee::FeeQuote,
        util::money::from_cents,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i32,
    pub manuscript_id: i32,
    pub user_id: i32,
    pub base_fee: Decimal,
    pub amount: Decimal,
    pub discount_amount: Decimal,
    pub discount_reason: Option<String>,
    pub is_waiver: bool,
    pub currency: String,
    pub status: PaymentStatus,
    pub stripe_session_id: Option<String>,
    pub stripe_payment_intent: Option<String>,
    pub checkout_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn from_entity(entity: entity::payment::Model) -> Result<Self, AppError> {
        let status = PaymentStatus::parse(&entity.status).ok_or_else(|| {
            InternalError::UnknownEnumValue {
                field: "payment.status",
                value: entity.status.clone(),
            }
        })?;

        Ok(Self {
            id: entity.id,
            manuscript_id: entity.manuscript_id,
            user_id: entity.user_id,
            base_fee: from_cents(entity.base_fee),
            amount: from_cents(entity.amount),
            discount_amount: from_cents(entity.discount_amount),
            discount_reason: entity.discount_reason,
            is_waiver: entity.is_waiver,
            currency: entity.currency,
            status,
            stripe_session_id: entity.stripe_session_id,
            stripe_payment_intent: entity.stripe_payment_intent,
            checkout_url: entity.checkout_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            manuscript_id: self.manuscript_id,
            user_id: self.user_id,
            base_fee: self.base_fee,
            amount: self.amount,
            discount_amount: self.discount_amount,
            discount_reason: self.discount_reason,
            is_waiver: self.is_waiver,
            currency: self.currency,
            status: self.status,
            checkout_url: self.checkout_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Parameters for recording a payment from a fee quote.
#[derive(Debug, Clone)]
pub struct CreatePaymentParams {
    pub manuscript_id: i32,
    pub user_id: i32,
    pub quote: FeeQuote,
    pub status: PaymentStatus,
}

/// Checkout session details returned by the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub payment_status: String,
    pub payment_intent: Option<String>,
}
