use once_cell::sync::Lazy;
use secrecy::Secret;
use wiremock::MockServer;

use lead_relay::config::{get_configuration, Configuration, CrmSettings, NotificationSettings};
use lead_relay::startup::AppServer;
use lead_relay::telemetry::{get_subscriber, init_subscriber};

pub const CRM_PATH: &str = "/api/method/frappe.client.insert";
pub const NOTIFICATION_PATH: &str = "/api/webhooks/1234/lead-token";
pub const BASE_URL: &str = "https://leads.example.com";

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            "test".into(),
            "debug".into(),
            std::io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink));
    }
});

/// Which downstream integrations the spawned app has configured.
#[derive(Clone, Copy)]
pub struct Integrations {
    pub crm: bool,
    pub notification: bool,
}

impl Integrations {
    pub fn all() -> Self {
        Self {
            crm: true,
            notification: true,
        }
    }

    pub fn none() -> Self {
        Self {
            crm: false,
            notification: false,
        }
    }
}

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    pub crm_server: MockServer,
    pub notification_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_webhook(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/webhook", &self.addr))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_raw_webhook(&self, body: &'static str) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/webhook", &self.addr))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn preflight_webhook(&self, origin: &str) -> reqwest::Response {
        self.api_client
            .request(reqwest::Method::OPTIONS, &format!("{}/webhook", &self.addr))
            .header("Origin", origin)
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(Integrations::all()).await
}

pub async fn spawn_app_with(integrations: Integrations) -> TestApp {
    Lazy::force(&TRACING);

    let crm_server = MockServer::start().await;
    let notification_server = MockServer::start().await;

    let configuration = {
        let mut c: Configuration = get_configuration().expect("should load configuration");

        c.app.host = "127.0.0.1".into();
        c.app.port = 0;
        c.app.base_url = Some(BASE_URL.into());
        c.crm = CrmSettings {
            url: integrations
                .crm
                .then(|| format!("{}{}", crm_server.uri(), CRM_PATH)),
            api_key: Some(Secret::new("test-key".into())),
            api_secret: Some(Secret::new("test-secret".into())),
            send_timeout_ms: 500,
        };
        c.notification = NotificationSettings {
            webhook_url: integrations
                .notification
                .then(|| format!("{}{}", notification_server.uri(), NOTIFICATION_PATH)),
            send_timeout_ms: 500,
        };
        c
    };

    let server = AppServer::build(configuration)
        .await
        .expect("should have created server");

    let port = server.port();
    let addr = format!("http://{}", server.to_server_address());
    let _ = tokio::spawn(server.run_until_stopped());

    TestApp {
        addr,
        port,
        crm_server,
        notification_server,
        api_client: reqwest::Client::new(),
    }
}
