use lead_relay::config::get_configuration;
use lead_relay::startup::AppServer;

use crate::helpers::{spawn_app_with, Integrations, BASE_URL};

mod helpers;

#[tokio::test]
async fn preflight_from_an_allowed_origin_is_granted_with_credentials() {
    let app = spawn_app_with(Integrations::none()).await;

    for origin in [BASE_URL, "https://framer.com"] {
        let response = app.preflight_webhook(origin).await;

        assert!(response.status().is_success(), "origin {}", origin);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            origin,
            "origin {}",
            origin,
        );
        assert_eq!(
            response.headers()["access-control-allow-credentials"],
            "true"
        );
    }
}

#[tokio::test]
async fn preflight_from_a_foreign_origin_is_not_granted() {
    let app = spawn_app_with(Integrations::none()).await;

    let response = app.preflight_webhook("https://evil.example.com").await;

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}

#[tokio::test]
async fn allowed_origin_can_read_the_webhook_response() {
    let app = spawn_app_with(Integrations::none()).await;

    let response = app
        .api_client
        .post(&format!("http://127.0.0.1:{}/webhook", app.port))
        .header("Origin", "https://framer.com")
        .json(&serde_json::json!({"Name": "Ada Lovelace", "Email": "ada@x.com"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "https://framer.com"
    );
}

#[tokio::test]
async fn server_refuses_to_start_with_an_invalid_origin() {
    for base_url in ["*", "not a uri"] {
        let mut configuration = get_configuration().expect("should load configuration");
        configuration.app.host = "127.0.0.1".into();
        configuration.app.port = 0;
        configuration.app.base_url = Some(base_url.into());

        let outcome = AppServer::build(configuration).await;

        assert!(outcome.is_err(), "started with base url {}", base_url);
    }
}
