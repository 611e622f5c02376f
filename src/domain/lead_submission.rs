//! src/domain/lead_submission.rs

use crate::domain::name_parts::NameParts;

/// Lead captured by the inbound webhook, as posted by the form builder.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct LeadSubmission {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "PhoneNumber", default)]
    pub phone: Option<String>,
}

impl LeadSubmission {
    pub fn name_parts(&self) -> NameParts {
        NameParts::parse(&self.name)
    }

    /// The phone number, unless it was omitted or left empty.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|phone| !phone.is_empty())
    }
}
