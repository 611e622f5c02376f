//! src/clients/notification.rs

use reqwest::Client;

use crate::domain::NameParts;

#[derive(serde::Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

/// Chat message announcing a new lead. The phone line is only present when a
/// phone number was supplied.
pub fn new_lead_message(name: &NameParts, email: &str, phone: Option<&str>) -> String {
    let mut message = format!("🆕 New Lead\nName: {}\nEmail: {}\n", name, email);
    if let Some(phone) = phone {
        message.push_str(&format!("Phone: {}", phone));
    }
    message
}

/// Posts messages to a chat webhook (Discord compatible).
pub struct NotificationClient {
    http_client: Client,
    webhook_url: String,
}

impl NotificationClient {
    pub fn new(webhook_url: String, timeout: std::time::Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            webhook_url,
        })
    }

    pub async fn send_message(&self, content: &str) -> Result<(), reqwest::Error> {
        self.http_client
            .post(&self.webhook_url)
            .json(&WebhookMessage { content })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
