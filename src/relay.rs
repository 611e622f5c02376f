//! Forwards a lead to the configured downstream services, one step at a time.
//!
//! The CRM step always completes before the notification step starts, and the
//! first failing step ends the relay.

use std::fmt::Formatter;

use anyhow::Context;

use crate::clients::{new_lead_message, CrmClient, NotificationClient};
use crate::config::Configuration;
use crate::domain::{LeadSubmission, NameParts};
use crate::utils::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum RelayError {
    /// Holds the downstream failure already rendered, request url excluded.
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("{0:#}")]
    Unexpected(#[from] anyhow::Error),
}

impl std::fmt::Debug for RelayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl RelayError {
    /// A request that could not even be built (bad url or header) is a local
    /// problem; anything that happened on the wire is the downstream's.
    /// Webhook urls carry their token in the path, so the url never leaves
    /// this function.
    fn from_client(error: reqwest::Error, step: &str) -> Self {
        let error = error.without_url();
        if error.is_builder() {
            RelayError::Unexpected(
                anyhow::Error::new(error).context(format!("Failed to build the {} request", step)),
            )
        } else {
            RelayError::ExternalService(describe(&error))
        }
    }
}

/// Renders an error and its causes on one line, e.g.
/// `error sending request: operation timed out`.
fn describe(error: &dyn std::error::Error) -> String {
    let mut detail = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        detail.push_str(&format!(": {}", cause));
        current = cause.source();
    }
    detail
}

pub struct LeadRelay {
    crm: Option<CrmClient>,
    notifier: Option<NotificationClient>,
}

impl LeadRelay {
    pub fn new(crm: Option<CrmClient>, notifier: Option<NotificationClient>) -> Self {
        Self { crm, notifier }
    }

    /// Builds a client for every integration that is fully configured.
    pub fn from_configuration(configuration: &Configuration) -> anyhow::Result<Self> {
        let crm = configuration
            .crm
            .credentials()
            .map(|credentials| CrmClient::new(credentials, configuration.crm.timeout()))
            .transpose()
            .context("Failed to build the CRM http client")?;

        let notifier = configuration
            .notification
            .webhook_url()
            .map(|url| NotificationClient::new(url, configuration.notification.timeout()))
            .transpose()
            .context("Failed to build the notification http client")?;

        tracing::info!(
            crm_enabled = crm.is_some(),
            notification_enabled = notifier.is_some(),
            "Lead relay configured"
        );

        Ok(Self::new(crm, notifier))
    }

    pub async fn forward(&self, submission: &LeadSubmission) -> Result<(), RelayError> {
        let name = submission.name_parts();

        self.create_crm_lead(&name, &submission.email).await?;
        self.notify_new_lead(&name, &submission.email, submission.phone())
            .await?;

        Ok(())
    }

    #[tracing::instrument(name = "Creating lead in the CRM", skip_all)]
    async fn create_crm_lead(&self, name: &NameParts, email: &str) -> Result<(), RelayError> {
        let Some(crm) = &self.crm else {
            tracing::info!("CRM integration is not configured, skipping");
            return Ok(());
        };

        crm.create_lead(name, email).await.map_err(|e| {
            let error = RelayError::from_client(e, "CRM");
            tracing::error!("Failed to create the CRM lead: {:?}", error);
            error
        })
    }

    #[tracing::instrument(name = "Announcing lead in chat", skip_all)]
    async fn notify_new_lead(
        &self,
        name: &NameParts,
        email: &str,
        phone: Option<&str>,
    ) -> Result<(), RelayError> {
        let Some(notifier) = &self.notifier else {
            tracing::info!("Notification webhook is not configured, skipping");
            return Ok(());
        };

        let message = new_lead_message(name, email, phone);
        notifier.send_message(&message).await.map_err(|e| {
            let error = RelayError::from_client(e, "notification");
            tracing::error!("Failed to send the lead notification: {:?}", error);
            error
        })
    }
}
