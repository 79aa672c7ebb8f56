//! One-time bootstrap code for creating the first admin.
//!
//! When no user holds the admin role at startup a random code is generated and a login
//! link carrying it is logged. The code lives only in memory, expires after its TTL and
//! is consumed by the first successful login that presents it.

use std::sync::Arc;
use std::time::Duration;

use rand::{distr::Alphanumeric, Rng};
use tokio::{sync::RwLock, time::Instant};

/// Lifetime of a freshly generated code.
const DEFAULT_TTL: Duration = Duration::from_secs(60);
const CODE_LENGTH: usize = 32;

struct IssuedCode {
    value: String,
    expires_at: Instant,
}

/// Shared holder for the current bootstrap code, cloned into the application state.
#[derive(Clone)]
pub struct AdminCodeService {
    current: Arc<RwLock<Option<IssuedCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Issues a new 32-character alphanumeric code, replacing any previous one.
    pub async fn generate(&self) -> String {
        let value: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect();

        *self.current.write().await = Some(IssuedCode {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        value
    }

    /// Checks `input` against the current code and consumes it on a match.
    ///
    /// An expired code is discarded and never matches. A wrong guess leaves a live
    /// code in place.
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut current = self.current.write().await;

        let Some(code) = current.as_ref() else {
            return false;
        };

        if Instant::now() >= code.expires_at {
            *current = None;
            return false;
        }

        if code.value != input {
            return false;
        }

        *current = None;
        true
    }

    #[cfg(test)]
    async fn is_live(&self) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .is_some_and(|code| Instant::now() < code.expires_at)
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}
