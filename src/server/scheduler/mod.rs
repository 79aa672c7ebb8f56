//! Cron jobs run alongside the HTTP server.

pub mod payment_expiry;
