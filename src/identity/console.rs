//! Local identity service stand-in
//!
//! Logs the payload it would send and answers with a session after a
//! configurable delay. It performs no authentication.

use super::traits::{Credentials, IdentityService, Session};
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Default simulated round trip
const DEFAULT_LATENCY: Duration = Duration::from_millis(400);

/// Identity service that only logs what it receives
#[derive(Debug, Clone)]
pub struct ConsoleIdentityService {
    latency: Duration,
}

impl ConsoleIdentityService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    async fn respond(&self, operation: &str, credentials: &Credentials) -> Result<Session> {
        tracing::info!(
            operation,
            payload = %credentials.redacted_json(),
            "emitting credentials"
        );
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(Session {
            email: credentials.email.clone(),
        })
    }
}

impl Default for ConsoleIdentityService {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

#[async_trait]
impl IdentityService for ConsoleIdentityService {
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        self.respond("sign_in", credentials).await
    }

    async fn sign_up(&self, credentials: &Credentials) -> Result<Session> {
        self.respond("sign_up", credentials).await
    }
}
