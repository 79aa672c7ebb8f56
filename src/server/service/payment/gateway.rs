//! Stripe Checkout client.
//!
//! Only the two calls the payment flow needs are implemented: creating a checkout
//! session and fetching it back to read its payment status.

use serde::Deserialize;

use crate::server::{error::AppError, model::payment::CheckoutSession};

/// Line item and redirect details for a new checkout session.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub payment_id: i32,
    pub manuscript_id: i32,
    pub description: String,
    /// Amount in minor currency units.
    pub amount_cents: i64,
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
}

impl CheckoutRequest {
    /// Form fields for `POST /v1/checkout/sessions`.
    fn form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("success_url", self.success_url.clone()),
            ("cancel_url", self.cancel_url.clone()),
            ("client_reference_id", self.payment_id.to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.currency.to_ascii_lowercase(),
            ),
            (
                "line_items[0][price_data][unit_amount]",
                self.amount_cents.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                self.description.clone(),
            ),
            ("metadata[payment_id]", self.payment_id.to_string()),
            ("metadata[manuscript_id]", self.manuscript_id.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
    payment_status: String,
    payment_intent: Option<String>,
}

impl From<StripeSession> for CheckoutSession {
    fn from(session: StripeSession) -> Self {
        Self {
            id: session.id,
            url: session.url,
            payment_status: session.payment_status,
            payment_intent: session.payment_intent,
        }
    }
}

#[derive(Clone)]
pub struct StripeClient {
    http_client: reqwest::Client,
    api_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(http_client: reqwest::Client, api_url: String, secret_key: String) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    /// Creates a hosted checkout session.
    ///
    /// # Returns
    /// - `Ok(CheckoutSession)` - Session with the URL to redirect the payer to
    /// - `Err(AppError::ReqwestErr)` - Request failed or Stripe returned an error status
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutSession, AppError> {
        let session = self
            .http_client
            .post(format!("{}/v1/checkout/sessions", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&request.form())
            .send()
            .await?
            .error_for_status()?
            .json::<StripeSession>()
            .await?;

        Ok(session.into())
    }

    /// Fetches a checkout session to read its payment status.
    pub async fn get_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, AppError> {
        let session = self
            .http_client
            .get(format!("{}/v1/checkout/sessions/{}", self.api_url, session_id))
            .bearer_auth(&self.secret_key)
            .send()
            .await?
            .error_for_status()?
            .json::<StripeSession>()
            .await?;

        Ok(session.into())
    }
}
