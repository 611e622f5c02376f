use actix_web::http::Uri;
use secrecy::{ExposeSecret, Secret};
use serde_aux::prelude::deserialize_number_from_string;

/// Origin that is always allowed to read webhook responses from a browser.
pub const FRAMER_ORIGIN: &str = "https://framer.com";

/// Plain environment variables used by existing deployments and the configuration
/// keys they override.
const PROVIDER_VARIABLES: &[(&str, &str)] = &[
    ("BASE_URL", "app.base_url"),
    ("FRAPPE_CRM_URL", "crm.url"),
    ("FRAPPE_API_KEY", "crm.api_key"),
    ("FRAPPE_API_SECRET", "crm.api_secret"),
    ("DISCORD_WEBHOOK_URL", "notification.webhook_url"),
];

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other,
            )),
        }
    }
}

fn default_send_timeout_ms() -> u64 {
    10_000
}

/// Returns the trimmed value, or `None` when it is missing or blank.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Origins allowed by the CORS policy: the base url, framer.com and any
    /// extra configured origin, without trailing slashes or duplicates.
    ///
    /// Every origin must be an exact `scheme://host[:port]`; wildcards are
    /// rejected because credentials are allowed.
    pub fn allowed_origins(&self) -> Result<Vec<String>, String> {
        let mut origins: Vec<String> = Vec::new();

        let candidates = self
            .base_url
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(FRAMER_ORIGIN))
            .chain(self.allowed_origins.iter().map(String::as_str));

        for candidate in candidates {
            if let Some(origin) = non_empty(Some(candidate.trim_end_matches('/'))) {
                validate_origin(&origin)?;
                if !origins.contains(&origin) {
                    origins.push(origin);
                }
            }
        }

        Ok(origins)
    }
}

fn validate_origin(origin: &str) -> Result<(), String> {
    let invalid = |reason: &str| {
        Err(format!(
            "{} is not a valid CORS origin: {}. Use the form `https://host[:port]`.",
            origin, reason,
        ))
    };

    let uri = match origin.parse::<Uri>() {
        Ok(uri) => uri,
        Err(e) => return invalid(&e.to_string()),
    };

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => return invalid("the scheme must be http or https"),
    }
    if uri.host().map_or(true, str::is_empty) {
        return invalid("a host is required");
    }
    if !uri
        .path_and_query()
        .map_or(true, |p| p.as_str().is_empty() || p.as_str() == "/")
    {
        return invalid("an origin has no path or query");
    }

    Ok(())
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct CrmSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    #[serde(default)]
    pub api_secret: Option<Secret<String>>,
    #[serde(
        default = "default_send_timeout_ms",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub send_timeout_ms: u64,
}

/// Everything needed to talk to the CRM, only available when the integration
/// is fully configured.
#[derive(Clone, Debug)]
pub struct CrmCredentials {
    pub url: String,
    pub api_key: Secret<String>,
    pub api_secret: Secret<String>,
}

impl CrmSettings {
    pub fn credentials(&self) -> Option<CrmCredentials> {
        let url = non_empty(self.url.as_deref())?;
        let api_key = non_empty(self.api_key.as_ref().map(|s| s.expose_secret().as_str()))?;
        let api_secret = non_empty(
            self.api_secret
                .as_ref()
                .map(|s| s.expose_secret().as_str()),
        )?;

        Some(CrmCredentials {
            url,
            api_key: Secret::new(api_key),
            api_secret: Secret::new(api_secret),
        })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.send_timeout_ms)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct NotificationSettings {
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(
        default = "default_send_timeout_ms",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub send_timeout_ms: u64,
}

impl NotificationSettings {
    pub fn webhook_url(&self) -> Option<String> {
        non_empty(self.webhook_url.as_deref())
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.send_timeout_ms)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub app: AppConfig,
    pub crm: CrmSettings,
    pub notification: NotificationSettings,
}

/// Collects the provider variables that are set to a non-blank value, paired
/// with the configuration key each one overrides.
fn provider_overrides<F>(lookup: F) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    PROVIDER_VARIABLES
        .iter()
        .filter_map(|(variable, key)| {
            non_empty(lookup(variable).as_deref()).map(|value| (*key, value))
        })
        .collect()
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    let mut settings = config::Config::default();

    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;
    let configuration_directory = base_path.join("configuration");

    // defaults shared by every environment.
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;

    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    // e.g. `APP_APP__PORT=5001` sets `app.port`.
    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    for (key, value) in provider_overrides(|variable| std::env::var(variable).ok()) {
        settings.set(key, value)?;
    }

    settings.try_into()
}
