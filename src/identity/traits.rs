//! Trait abstraction for the identity service to enable mocking in tests

use crate::state::{FieldValues, SubmissionError, EMAIL, PASSWORD};
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload emitted toward the identity service for both flows
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Pick email and password out of validated form values
    ///
    /// Everything else (the sign-up confirmation) is dropped.
    pub fn from_values(values: &FieldValues) -> Result<Self, SubmissionError> {
        let take = |name: &str| {
            values
                .get(name)
                .cloned()
                .ok_or_else(|| SubmissionError::new(format!("Missing field: {name}")))
        };
        Ok(Self {
            email: take(EMAIL)?.trim().to_string(),
            password: take(PASSWORD)?,
        })
    }

    /// JSON body with the password masked, for logs
    pub fn redacted_json(&self) -> String {
        serde_json::json!({ "email": self.email, "password": "<redacted>" }).to_string()
    }
}

/// Session handed back by the identity service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
}

/// Which screen emitted the credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    SignIn,
    SignUp,
}

/// Trait for identity service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Authenticate an existing account
    async fn sign_in(&self, credentials: &Credentials) -> Result<Session>;

    /// Create a new account
    async fn sign_up(&self, credentials: &Credentials) -> Result<Session>;
}
