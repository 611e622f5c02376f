//! src/clients/crm.rs

use reqwest::Client;
use secrecy::ExposeSecret;

use crate::config::CrmCredentials;
use crate::domain::NameParts;

#[derive(serde::Serialize)]
struct CreateLeadRequest<'a> {
    doc: CrmLead<'a>,
}

#[derive(serde::Serialize)]
struct CrmLead<'a> {
    doctype: &'static str,
    no_of_employees: &'static str,
    lead_owner: &'static str,
    status: &'static str,
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
}

/// Creates leads through the Frappe CRM REST API.
pub struct CrmClient {
    http_client: Client,
    credentials: CrmCredentials,
}

impl CrmClient {
    pub fn new(
        credentials: CrmCredentials,
        timeout: std::time::Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            http_client: Client::builder().timeout(timeout).build()?,
            credentials,
        })
    }

    pub async fn create_lead(&self, name: &NameParts, email: &str) -> Result<(), reqwest::Error> {
        let request_body = CreateLeadRequest {
            doc: CrmLead {
                doctype: "CRM Lead",
                no_of_employees: "1-10",
                lead_owner: "Administrator",
                status: "New",
                first_name: &name.first,
                last_name: &name.last,
                email,
            },
        };

        self.http_client
            .post(&self.credentials.url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!(
                    "token {}:{}",
                    self.credentials.api_key.expose_secret(),
                    self.credentials.api_secret.expose_secret(),
                ),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
