//! Bridges form submission to the identity service

use super::traits::{AuthFlow, Credentials, IdentityService};
use crate::state::{FieldValues, SubmissionError, SubmitHandler};
use async_trait::async_trait;
use std::sync::Arc;

/// Submit handler that turns validated values into [`Credentials`]
pub struct IdentitySubmitHandler {
    service: Arc<dyn IdentityService>,
    flow: AuthFlow,
}

impl IdentitySubmitHandler {
    pub fn new(service: Arc<dyn IdentityService>, flow: AuthFlow) -> Self {
        Self { service, flow }
    }
}

#[async_trait]
impl SubmitHandler for IdentitySubmitHandler {
    async fn submit(&self, values: FieldValues) -> Result<(), SubmissionError> {
        let credentials = Credentials::from_values(&values)?;
        let result = match self.flow {
            AuthFlow::SignIn => self.service.sign_in(&credentials).await,
            AuthFlow::SignUp => self.service.sign_up(&credentials).await,
        };
        match result {
            Ok(session) => {
                tracing::info!(
                    flow = ?self.flow,
                    email = %session.email,
                    "identity service accepted"
                );
                Ok(())
            }
            Err(err) => {
                tracing::warn!(flow = ?self.flow, error = %err, "identity service rejected");
                Err(err.into())
            }
        }
    }
}
