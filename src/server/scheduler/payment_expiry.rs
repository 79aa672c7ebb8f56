use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::payment::{gateway::StripeClient, PaymentService},
};

/// Starts the payment expiry scheduler.
///
/// Runs at the top of every hour and expires payments left pending for longer than
/// `ttl_days`, notifying each payer. With a gateway, stale payments whose checkout
/// session was paid are completed instead.
///
/// # Arguments
/// - `db`: Database connection
/// - `gateway`: Stripe client, if payments are enabled
/// - `ttl_days`: Days a payment may stay pending
pub async fn start_scheduler(
    db: DatabaseConnection,
    gateway: Option<StripeClient>,
    ttl_days: i64,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_db = db.clone();
    let job_gateway = gateway.clone();

    let job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let db = job_db.clone();
        let gateway = job_gateway.clone();

        Box::pin(async move {
            if let Err(e) = expire_payments(&db, gateway.as_ref(), ttl_days).await {
                tracing::error!("Error expiring stale payments: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Payment expiry scheduler started (pending payments expire after {} days)",
        ttl_days
    );

    Ok(())
}

async fn expire_payments(
    db: &DatabaseConnection,
    gateway: Option<&StripeClient>,
    ttl_days: i64,
) -> Result<(), AppError> {
    let expired = PaymentService::new(db, gateway)
        .expire_stale(ttl_days)
        .await?;

    if expired > 0 {
        tracing::info!("Expired {} stale payments", expired);
    }

    Ok(())
}
